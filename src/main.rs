//! Bird Barrage entry point
//!
//! Browser builds wire the DOM and a Canvas 2D renderer around the game
//! controller. Native builds play a seeded round headlessly with a simple
//! autopilot and print the final snapshot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, KeyboardEvent};

    use bird_barrage::consts::{MAX_PLAYFIELD_HEIGHT, MAX_PLAYFIELD_WIDTH};
    use bird_barrage::snapshot::{Circle, Snapshot};
    use bird_barrage::{Game, Tuning};

    /// Browser shell holding the controller and the drawing context
    struct Shell {
        game: Game,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Shell {
        /// Fit the canvas to the window (capped) and tell the game
        fn fit_to_window(&mut self) {
            let (w, h) = window_size();
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.game.resize(w, h);
        }

        /// Draw the current frame
        fn render(&self) {
            let snap = self.game.snapshot();
            let ctx = &self.ctx;
            let (w, h) = (snap.playfield.width as f64, snap.playfield.height as f64);

            ctx.clear_rect(0.0, 0.0, w, h);
            let sky = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
            let _ = sky.add_color_stop(0.0, "#87CEEB");
            let _ = sky.add_color_stop(1.0, "#E0F7FA");
            ctx.set_fill_style_canvas_gradient(&sky);
            ctx.fill_rect(0.0, 0.0, w, h);

            // Grass strip
            ctx.set_fill_style_str("#4ADE80");
            ctx.fill_rect(0.0, h - 40.0, w, 40.0);
            ctx.set_stroke_style_str("#22c55e");
            ctx.set_line_width(4.0);
            ctx.begin_path();
            ctx.move_to(0.0, h - 40.0);
            ctx.line_to(w, h - 40.0);
            ctx.stroke();

            draw_bullets(ctx, &snap);
            for bird in &snap.birds {
                draw_bird(ctx, bird);
            }
            draw_player(ctx, &snap.player);
        }

        /// Push HUD fields into the DOM
        fn update_hud(&self) {
            let hud = self.game.snapshot().hud;
            let document = web_sys::window().unwrap().document().unwrap();

            set_text(&document, "score", &hud.score.to_string());
            set_text(&document, "highScoreDisplay", &hud.high_score.to_string());
            set_text(&document, "timer", &hud.clock);

            if let Some(el) = document.get_element_by_id("overlay") {
                let _ = el.class_list().toggle_with_force("show", hud.overlay_visible);
            }
            if hud.overlay_visible {
                set_text(&document, "statusText", &hud.message);
                set_text(&document, "startButton", hud.button_label);
            }
            if let Some(el) = document.get_element_by_id("rewardSection") {
                let _ = el.class_list().toggle_with_force("hidden", !hud.reward_visible);
            }
        }
    }

    /// Window size, capped to the largest playfield
    fn window_size() -> (f32, f32) {
        let window = web_sys::window().unwrap();
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(MAX_PLAYFIELD_WIDTH, |v| (v as f32).min(MAX_PLAYFIELD_WIDTH));
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .map_or(MAX_PLAYFIELD_HEIGHT, |v| (v as f32).min(MAX_PLAYFIELD_HEIGHT));
        (w.floor(), h.floor())
    }

    fn set_text(document: &web_sys::Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            if el.text_content().as_deref() != Some(text) {
                el.set_text_content(Some(text));
            }
        }
    }

    fn circle(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) {
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
    }

    fn draw_bullets(ctx: &CanvasRenderingContext2d, snap: &Snapshot) {
        ctx.set_stroke_style_str("#9ca3af");
        ctx.set_line_width(1.0);
        for b in &snap.bullets {
            let (x, y, r) = (b.x as f64, b.y as f64, b.radius as f64);
            ctx.set_fill_style_str(b.color);
            ctx.begin_path();
            let _ = ctx.ellipse(x, y, r, r * 1.3, 0.0, 0.0, TAU);
            ctx.fill();
            ctx.stroke();
        }
    }

    fn draw_bird(ctx: &CanvasRenderingContext2d, bird: &Circle) {
        let (x, y, r) = (bird.x as f64, bird.y as f64, bird.radius as f64);

        ctx.set_fill_style_str(bird.color);
        circle(ctx, x, y, r);
        ctx.fill();
        ctx.set_line_width(2.0);
        ctx.set_stroke_style_str("rgba(0,0,0,0.2)");
        ctx.stroke();

        // Eyes
        let eye_offset = r / 3.0;
        let eye_size = r / 3.5;
        for dx in [-eye_offset / 2.0, eye_offset / 2.0] {
            ctx.set_fill_style_str("white");
            circle(ctx, x + dx, y - eye_offset, eye_size);
            ctx.fill();
            ctx.set_fill_style_str("black");
            circle(ctx, x + dx, y - eye_offset, eye_size / 3.0);
            ctx.fill();
        }

        // Brow
        ctx.set_line_width(3.0);
        ctx.set_stroke_style_str("black");
        ctx.begin_path();
        ctx.move_to(x - r / 1.2, y - r / 1.8);
        ctx.line_to(x, y - r / 3.0);
        ctx.line_to(x + r / 1.2, y - r / 1.8);
        ctx.stroke();

        // Beak
        ctx.set_fill_style_str("#F59E0B");
        ctx.begin_path();
        ctx.move_to(x, y - r / 10.0);
        ctx.line_to(x + r / 2.0, y + r / 4.0);
        ctx.line_to(x, y + r / 2.0);
        ctx.fill();
    }

    fn draw_player(ctx: &CanvasRenderingContext2d, player: &Circle) {
        let (x, y, r) = (player.x as f64, player.y as f64, player.radius as f64);

        ctx.set_fill_style_str(player.color);
        circle(ctx, x, y, r);
        ctx.fill();
        ctx.set_stroke_style_str("#407A38");
        ctx.set_line_width(2.0);
        ctx.stroke();

        // Snout
        ctx.set_fill_style_str("#5DA850");
        ctx.begin_path();
        let _ = ctx.ellipse(x, y + r / 5.0, r / 2.2, r / 3.0, 0.0, 0.0, TAU);
        ctx.fill();

        for dx in [-r / 2.5, r / 2.5] {
            ctx.set_fill_style_str("white");
            circle(ctx, x + dx, y - r / 3.0, r / 3.5);
            ctx.fill();
            ctx.set_fill_style_str("black");
            circle(ctx, x + dx, y - r / 3.0, r / 8.0);
            ctx.fill();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bird Barrage starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let seed = js_sys::Date::now() as u64;
        let (width, height) = window_size();
        let game = Game::new(Tuning::default(), width, height, seed);
        let shell = Rc::new(RefCell::new(Shell { game, canvas, ctx }));
        shell.borrow_mut().fit_to_window();

        setup_input_handlers(shell.clone());
        setup_start_button(shell.clone());
        setup_color_buttons(shell.clone());
        setup_resize(shell.clone());

        shell.borrow().update_hud();
        request_animation_frame(shell);

        log::info!("Bird Barrage running!");
    }

    fn setup_input_handlers(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().unwrap();

        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let name = if event.code() == "Space" { "Space" } else { key.as_str() };
                if name == "Space" {
                    event.prevent_default();
                }
                shell.borrow_mut().game.key_down(name);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let shell = shell.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let name = if event.code() == "Space" { "Space" } else { key.as_str() };
                shell.borrow_mut().game.key_up(name);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keys released while the window is unfocused never reach us
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                shell.borrow_mut().game.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(shell: Rc<RefCell<Shell>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("startButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                shell.borrow_mut().game.start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_color_buttons(shell: Rc<RefCell<Shell>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        let Ok(nodes) = document.query_selector_all(".color-btn") else {
            return;
        };

        let buttons: Vec<Element> = (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect();

        for btn in &buttons {
            let shell = shell.clone();
            let all = buttons.clone();
            let this = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let Some(token) = this.get_attribute("data-color") else {
                    return;
                };
                if shell.borrow_mut().game.select_color(&token) {
                    for other in &all {
                        let _ = other.class_list().remove_1("selected");
                    }
                    let _ = this.class_list().add_1("selected");
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            shell.borrow_mut().fit_to_window();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(shell: Rc<RefCell<Shell>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(shell, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(shell: Rc<RefCell<Shell>>, time: f64) {
        {
            let mut s = shell.borrow_mut();
            s.game.frame(time);
            s.render();
            s.update_hud();
        }

        request_animation_frame(shell);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use anyhow::Context;

    use bird_barrage::sim::{GameEvent, GameState};
    use bird_barrage::{Game, Tuning};

    /// Synthetic display refresh (ms per frame)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const PLAYFIELD: (f32, f32) = (1200.0, 720.0);

    /// Usage: `bird-barrage [TUNING.json] [SEED]`
    pub fn run() -> anyhow::Result<()> {
        let mut args = std::env::args().skip(1);
        let tuning = match args.next() {
            Some(path) => Tuning::load(&path)
                .with_context(|| format!("loading tuning from {path}"))?,
            None => Tuning::default(),
        };
        let seed = match args.next() {
            Some(s) => s.parse::<u64>().with_context(|| format!("invalid seed {s:?}"))?,
            None => 0x00B1_4D5E,
        };

        let mut game = Game::new(tuning, PLAYFIELD.0, PLAYFIELD.1, seed);
        game.start();
        game.key_down("Space");

        let mut frame = 0u64;
        let outcome = loop {
            steer(&mut game);
            let events = game.frame(frame as f64 * FRAME_MS);
            frame += 1;
            if let Some(outcome) = events.iter().find_map(|e| match e {
                GameEvent::RoundEnded(outcome) => Some(*outcome),
                _ => None,
            }) {
                break outcome;
            }
        };

        log::info!("Round finished after {} frames: {:?}", frame, outcome);
        println!("{}", game.snapshot().to_json()?);
        Ok(())
    }

    /// Chase the bird whose path crosses the player's column soonest
    fn steer(game: &mut Game) {
        let target = aim_point(game.state());
        let x = game.state().player.pos.x;

        let (left, right) = match target {
            Some(tx) if tx < x - 4.0 => (true, false),
            Some(tx) if tx > x + 4.0 => (false, true),
            _ => (false, false),
        };
        for (key, held) in [("ArrowLeft", left), ("ArrowRight", right)] {
            if held {
                game.key_down(key);
            } else {
                game.key_up(key);
            }
        }
    }

    /// Where the nearest on-screen bird will be when a bullet reaches it
    fn aim_point(state: &GameState) -> Option<f32> {
        let player = &state.player;
        let bullet_speed = -state.tuning.bullet_velocity;
        state
            .birds
            .iter()
            .filter(|b| b.pos.x > 0.0 && b.pos.x < state.playfield.width)
            .map(|b| {
                let flight = (player.pos.y - b.pos.y) / bullet_speed;
                b.pos.x + b.vx * flight
            })
            .min_by(|a, b| {
                (a - player.pos.x)
                    .abs()
                    .partial_cmp(&(b - player.pos.x).abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Bird Barrage (native) starting...");
    log::info!("Native mode plays one headless demo round; build for wasm32 to play in a browser");

    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
