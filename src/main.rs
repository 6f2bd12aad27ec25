//! Brick Pong entry point
//!
//! Owns the game loop: one `step` plus one paint per animation frame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, KeyboardEvent};

    use brick_pong::renderer::{canvas, paint_scoreboard, paint_world};
    use brick_pong::sim::{CollisionEvent, Direction, World, step};
    use brick_pong::{SetupError, Settings, is_mobile_user_agent};
    use brick_pong::consts::{SCOREBOARD_HEIGHT, SCOREBOARD_WIDTH};

    /// Game instance holding all state
    struct Game {
        world: World,
        settings: Settings,
        play: CanvasRenderingContext2d,
        board: CanvasRenderingContext2d,
        /// Start/stop buttons toggle this; the world itself never pauses
        running: bool,
    }

    impl Game {
        fn new(
            settings: Settings,
            play: CanvasRenderingContext2d,
            board: CanvasRenderingContext2d,
        ) -> Self {
            Self {
                world: World::new(settings.clone()),
                settings,
                play,
                board,
                running: true,
            }
        }

        /// One simulation step (skipped without a live ball) and one paint
        fn frame(&mut self) {
            if self.running && self.world.has_ball() {
                for event in step(&mut self.world) {
                    match event {
                        CollisionEvent::BallsExhausted { .. } => {
                            log::info!("Game over with score {}", self.world.score)
                        }
                        CollisionEvent::RoundCleared { round } => {
                            log::info!("Round {} cleared", round)
                        }
                        _ => {}
                    }
                }
            }
            paint_world(&self.world, &mut self.play);
            paint_scoreboard(&self.world, &mut self.board);
        }

        fn restart(&mut self) {
            self.world = World::new(self.settings.clone());
            self.running = true;
        }
    }

    pub fn run() -> Result<(), SetupError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("logger already set: {}", e).into());
        }

        log::info!("Brick Pong starting...");

        let window = web_sys::window().ok_or(SetupError::NoWindow)?;
        let document = window.document().ok_or(SetupError::NoDocument)?;

        let mobile = window
            .navigator()
            .user_agent()
            .map(|agent| is_mobile_user_agent(&agent))
            .unwrap_or(false);

        let screen = window.screen().ok().map(|screen| {
            let w = screen.avail_width().unwrap_or(16) as f32;
            let h = screen.avail_height().unwrap_or(9) as f32;
            (w, h)
        });
        let stored = Settings::load();
        let first_run = stored.is_none();
        let settings = Settings::for_session(stored, mobile, screen);
        if first_run {
            settings.save();
        }

        let play = canvas::acquire(
            &document,
            "#canvas",
            settings.surface_width,
            settings.surface_height,
        )?;
        let board = canvas::acquire(
            &document,
            "#score-board",
            SCOREBOARD_WIDTH,
            SCOREBOARD_HEIGHT,
        )?;

        log::info!(
            "Surface {}x{}, mobile: {}",
            settings.surface_width,
            settings.surface_height,
            mobile
        );

        let game = Rc::new(RefCell::new(Game::new(settings, play, board)));

        setup_keyboard(game.clone());
        setup_direction_buttons(&document, game.clone());
        setup_controls(&document, game.clone());

        request_animation_frame(game);

        log::info!("Brick Pong running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                if let Some(direction) = Direction::from_key(&event.key()) {
                    event.prevent_default();
                    game.borrow_mut().world.press(direction);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(direction) = Direction::from_key(&event.key()) {
                    game.borrow_mut().world.release(direction);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen arrows feed the same press/release path as the keyboard
    fn setup_direction_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (selector, direction) in [
            ("#left-button", Direction::Left),
            ("#right-button", Direction::Right),
        ] {
            let Some(button) = document.query_selector(selector).ok().flatten() else {
                log::warn!("No {} element, touch steering disabled", selector);
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    event.prevent_default();
                    game.borrow_mut().world.press(direction);
                });
                let _ = button
                    .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            for release in ["pointerup", "pointerleave", "pointercancel"] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    let mut g = game.borrow_mut();
                    if g.world.held().is_held(direction) {
                        g.world.release(direction);
                    }
                });
                let _ = button
                    .add_event_listener_with_callback(release, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Start/stop, restart and ball add/remove buttons
    fn setup_controls(document: &Document, game: Rc<RefCell<Game>>) {
        let actions: [(&str, fn(&mut Game)); 5] = [
            ("#start", |g| g.running = true),
            ("#stop", |g| g.running = false),
            ("#restart", Game::restart),
            ("#add-ball", |g| match g.world.spawn_ball() {
                Some(id) => log::info!("Added ball {:?}", id),
                None => log::info!("A ball is already in play"),
            }),
            ("#remove-ball", |g| {
                let last = g.world.balls().last().map(|b| b.id);
                if let Some(id) = last {
                    g.world.remove(id);
                    log::info!("Removed ball {:?}", id);
                }
            }),
        ];

        for (selector, action) in actions {
            let Some(button) = document.query_selector(selector).ok().flatten() else {
                log::warn!("No {} element", selector);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                action(&mut game.borrow_mut());
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Brick Pong (native) starting...");
    log::info!("Native mode runs a headless demo - build for wasm32 for the browser version");

    headless_demo(3000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Autoplay: keep the paddle under the ball until the balls run out
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(max_frames: u32) {
    use brick_pong::Settings;
    use brick_pong::renderer::{RecordingSurface, paint_world};
    use brick_pong::sim::{CollisionEvent, Direction, World, step};

    let mut world = World::new(Settings::default());
    let mut steering: Option<Direction> = None;

    for frame in 0..max_frames {
        if !world.has_ball() {
            log::info!("No ball left after {} frames", frame);
            break;
        }

        let target = world.balls().next().map(|b| b.position().x);
        let paddle_center = world
            .paddle()
            .map(|p| p.position().x + p.width() / 2.0);
        let wanted = match (target, paddle_center) {
            (Some(ball_x), Some(center)) if ball_x < center - 10.0 => Some(Direction::Left),
            (Some(ball_x), Some(center)) if ball_x > center + 10.0 => Some(Direction::Right),
            _ => None,
        };
        if wanted != steering {
            if let Some(old) = steering {
                world.release(old);
            }
            if let Some(direction) = wanted {
                world.press(direction);
            }
            steering = wanted;
        }
        if !world.can_ball_move {
            // A parked ball only launches on a fresh press
            let direction = steering.unwrap_or(Direction::Right);
            world.press(direction);
            steering = Some(direction);
        }

        for event in step(&mut world) {
            match event {
                CollisionEvent::BrickDestroyed { points, .. } => {
                    log::debug!("Brick for {} points, score {}", points, world.score)
                }
                CollisionEvent::BallLost { remaining, .. } => {
                    log::info!("Frame {}: ball lost, {} remaining", frame, remaining)
                }
                CollisionEvent::RoundCleared { round } => {
                    log::info!("Frame {}: round {} cleared", frame, round)
                }
                _ => {}
            }
        }
    }

    let mut surface = RecordingSurface::default();
    paint_world(&world, &mut surface);
    log::info!(
        "Demo finished: score {}, {} rounds cleared, balls {}, {} bricks left, {} draw calls in last frame",
        world.score,
        world.round(),
        world.balls_remaining,
        world.brick_count(),
        surface.calls.len()
    );
}
