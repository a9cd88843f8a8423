//! Dustbunny entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::Clamped;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, ImageData, KeyboardEvent, PointerEvent,
    };

    use dustbunny::Settings;
    use dustbunny::audio::{AudioManager, SoundEffect};
    use dustbunny::input::{Joystick, KeySet};
    use dustbunny::narration;
    use dustbunny::sim::{FrameInput, GameEvent, World, tick};

    /// Game instance: sim state plus browser-side bookkeeping
    struct Game {
        world: World,
        keys: KeySet,
        joystick: Joystick,
        audio: AudioManager,
        settings: Settings,
        ctx: CanvasRenderingContext2d,
        last_time: f64,
        /// Cleared on teardown: stops the frame loop and gates late
        /// narration results out of the DOM
        running: Rc<Cell<bool>>,
    }

    impl Game {
        fn new(
            seed: u64,
            ctx: CanvasRenderingContext2d,
            settings: Settings,
            running: Rc<Cell<bool>>,
        ) -> Self {
            let mut audio = AudioManager::new();
            audio.set_muted(settings.muted);
            audio.set_master_volume(settings.master_volume);

            let mut world = World::new(seed);
            if settings.muted {
                world.store.toggle_muted();
            }

            Self {
                world,
                keys: KeySet::default(),
                joystick: Joystick::new(),
                audio,
                settings,
                ctx,
                last_time: 0.0,
                running,
            }
        }

        /// Advance the sim one displayed frame
        fn update(&mut self, dt: f32) -> Vec<GameEvent> {
            let input = FrameInput {
                keys: self.keys,
                stick: self.joystick.vector(),
            };
            tick(&mut self.world, &input, dt)
        }

        /// React to what the tick reported
        fn handle_events(&mut self, events: Vec<GameEvent>) {
            for event in events {
                match event {
                    GameEvent::CarrotCollected { .. } => self.audio.play(SoundEffect::Pickup),
                    GameEvent::NarrationMilestone { percent } => {
                        self.audio.play(SoundEffect::Milestone);
                        spawn_brief(percent, self.running.clone());
                    }
                    GameEvent::MissionComplete => {
                        self.audio.play(SoundEffect::Victory);
                        show_element("victory", true);
                    }
                    GameEvent::CarrotSpawned { .. } | GameEvent::ProgressChanged { .. } => {}
                }
            }
        }

        /// Blit the coverage buffer to the floor canvas when it changed
        fn render(&mut self) {
            if !self.world.surface.needs_update() {
                return;
            }
            let size = self.world.surface.size() as u32;
            match ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(self.world.surface.pixels()),
                size,
                size,
            ) {
                Ok(image) => {
                    let _ = self.ctx.put_image_data(&image, 0.0, 0.0);
                    self.world.surface.clear_needs_update();
                }
                Err(e) => log::warn!("floor blit failed: {e:?}"),
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-progress .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!(
                    "{}%",
                    self.world.store.cleaned_percentage()
                )));
            }

            if let Some(el) = document.query_selector("#hud-carrots .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.world.store.carrots_collected().to_string()));
            }
        }

        /// Toggle mute everywhere it is mirrored
        fn toggle_mute(&mut self) {
            self.world.store.toggle_muted();
            self.settings.muted = self.world.store.is_muted();
            self.audio.set_muted(self.settings.muted);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    /// Fetch a mission brief off the frame loop and show it once it lands.
    /// A fetch finishing after teardown must not touch the page.
    fn spawn_brief(percent: u8, running: Rc<Cell<bool>>) {
        wasm_bindgen_futures::spawn_local(async move {
            let text = narration::fetch_brief(percent).await;
            if !running.get() {
                return;
            }
            set_brief_text(&text);
        });
    }

    fn set_brief_text(text: &str) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("mission-brief"))
        {
            el.set_text_content(Some(text));
        }
    }

    fn show_element(id: &str, visible: bool) {
        if let Some(el) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
        {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dustbunny starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("floor")
            .expect("no floor canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let running = Rc::new(Cell::new(true));

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("2d context unavailable")
            .expect("2d context missing")
            .dyn_into()
            .expect("not a 2d context");

        let game = Rc::new(RefCell::new(Game::new(seed, ctx, settings, running.clone())));
        {
            let g = game.borrow();
            let size = g.world.surface.size() as u32;
            canvas.set_width(size);
            canvas.set_height(size);
        }
        log::info!("Game initialized with seed: {seed}");

        setup_input_handlers(&canvas, game.clone());
        setup_teardown(running.clone());

        // Opening brief while the floor is still untouched
        set_brief_text(narration::FALLBACK_BRIEF);
        spawn_brief(0, running);

        request_animation_frame(game);

        log::info!("Dustbunny running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard - movement keys plus M for mute
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Browsers require a gesture before audio may start
                g.audio.resume();
                match event.code().as_str() {
                    "KeyM" => g.toggle_mute(),
                    code => g.keys.set(code, true),
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.set(&event.code(), false);
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer drag anywhere on the canvas acts as the virtual joystick
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if !event.is_primary() {
                    return;
                }
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.joystick.press(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if !event.is_primary() {
                    return;
                }
                game.borrow_mut()
                    .joystick
                    .drag(event.client_x() as f32, event.client_y() as f32);
            });
            let _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        for release_event in ["pointerup", "pointercancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                game.borrow_mut().joystick.release();
            });
            let _ = window
                .add_event_listener_with_callback(release_event, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Stop the loop when the page goes away so nothing reschedules or
    /// writes into a torn-down document.
    fn setup_teardown(running: Rc<Cell<bool>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            running.set(false);
            log::info!("Teardown - frame loop stopped");
        });
        let _ =
            window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            if g.running.get() {
                // Variable delta, capped so a backgrounded tab can't warp
                let dt = if g.last_time > 0.0 {
                    (((time - g.last_time) / 1000.0) as f32).min(0.1)
                } else {
                    1.0 / 60.0
                };
                g.last_time = time;

                let events = g.update(dt);
                g.handle_events(events);
                g.render();
                g.update_hud();
                true
            } else {
                false
            }
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dustbunny::sim::{FrameInput, InputVector, World, tick};

    env_logger::init();
    log::info!("Dustbunny (native) starting...");
    log::info!("The game targets the browser - serve the wasm build to play");

    // Headless smoke run: one simulated second of cleaning toward the wall
    let mut world = World::new(42);
    let input = FrameInput {
        stick: InputVector { x: 1.0, z: 0.0 },
        ..Default::default()
    };
    for _ in 0..60 {
        tick(&mut world, &input, 1.0 / 60.0);
    }
    log::info!(
        "after 60 frames: actor at ({:.2}, {:.2}), {}% cleaned, {} carrots alive",
        world.actor.pos.x,
        world.actor.pos.y,
        world.store.cleaned_percentage(),
        world.store.carrots().len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
