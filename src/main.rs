//! Penalty Kick entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use penalty_kick::audio::{AudioManager, SoundEffect};
    use penalty_kick::consts::*;
    use penalty_kick::physics::PhysicsWorld;
    use penalty_kick::platform::InitError;
    use penalty_kick::platform::dom::DomUi;
    use penalty_kick::renderer::SdfRenderState;
    use penalty_kick::scene::SceneGraph;
    use penalty_kick::sim::FrameDriver;
    use penalty_kick::ui::present;
    use penalty_kick::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: FrameDriver<PhysicsWorld>,
        scene: SceneGraph,
        settings: Settings,
        render_state: Option<SdfRenderState>,
        ui: DomUi,
        audio: AudioManager,
        last_time: f64,
        /// Pointer-down position of the swipe in progress
        gesture_start: Option<Vec2>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings, tuning: Tuning, ui: DomUi) -> Self {
            let mut scene = SceneGraph::new();
            let driver = FrameDriver::new(PhysicsWorld::new(), &mut scene, tuning);
            let audio = AudioManager::new(&settings);
            Self {
                driver,
                scene,
                settings,
                render_state: None,
                ui,
                audio,
                last_time: 0.0,
                gesture_start: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn press(&mut self, pos: Vec2) {
            // First user gesture unlocks Web Audio
            self.audio.resume();
            self.gesture_start = Some(pos);
        }

        fn release(&mut self, pos: Vec2) {
            let Some(start) = self.gesture_start.take() else {
                return;
            };
            // Latest rAF timestamp, the clock `frame` ticks on
            self.driver.kick_gesture(start, pos, self.last_time);
        }

        /// Step the game and fan events out to HUD and audio
        fn update(&mut self, dt: f32, time: f64) {
            let events = self.driver.frame(dt, time, &mut self.scene);
            for event in &events {
                present(&mut self.ui, event);
                if let Some(effect) = SoundEffect::for_event(event) {
                    self.audio.play(effect);
                }
            }

            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.scene, &self.settings, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn update_fps(&self) {
            if !self.settings.show_fps {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("fps") {
                el.set_text_content(Some(&format!("{} FPS", self.fps)));
                let _ = el.set_attribute("class", "");
            }
        }
    }

    /// Same clock as requestAnimationFrame timestamps
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn js_err(e: JsValue) -> InitError {
        InitError::Js(format!("{:?}", e))
    }

    /// Pointer position relative to the canvas
    fn canvas_point(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    pub async fn run() -> Result<(), InitError> {
        log::info!("Penalty Kick starting...");

        let window = web_sys::window().ok_or(InitError::NoWindow)?;
        let document = window.document().ok_or(InitError::NoDocument)?;

        let settings = Settings::from_query(&window.location().search().unwrap_or_default());
        // Optional <script id="tuning" type="application/json"> override
        let tuning_json = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content());
        let tuning = Tuning::load(tuning_json.as_deref())?;
        log::info!("Settings: quality {}", settings.quality.as_str());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or(InitError::MissingElement("canvas"))?
            .dyn_into()
            .map_err(|_| InitError::NotACanvas("canvas"))?;

        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ui = DomUi::new(&document)?;
        let game = Rc::new(RefCell::new(Game::new(settings.clone(), tuning, ui)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state =
            SdfRenderState::new(surface, &adapter, width, height, &settings).await?;
        render_state.set_start_time(now_ms());
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Penalty Kick running! Spot at z = {}", BALL_SPAWN.z);
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), InitError> {
        // Mouse down (swipe start)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().press(pos);
            });
            canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Mouse up (swipe end)
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_point(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().release(pos);
            });
            canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().press(pos);
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                // The lifted finger is no longer in `touches`
                if let Some(touch) = event.changed_touches().get(0) {
                    let pos = canvas_point(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().release(pos);
                }
            });
            canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        // Touch move: keep the page from scrolling mid-swipe
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if game.borrow().gesture_start.is_some() {
                    event.prevent_default();
                }
            });
            canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())
                .map_err(js_err)?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone; stopping game loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.render(time);
            g.update_fps();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

    if let Err(e) = wasm_game::run().await {
        log::error!("Penalty Kick failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Penalty Kick (native) starting...");
    log::info!("Native mode runs a headless session - run with `trunk serve` for the web version");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Scripted session on a fake 60 Hz clock

    use glam::{Vec2, Vec3};

    use penalty_kick::Tuning;
    use penalty_kick::consts::*;
    use penalty_kick::physics::PhysicsWorld;
    use penalty_kick::scene::SceneGraph;
    use penalty_kick::sim::{FrameDriver, GameEvent};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up on a shot that has not come back to Ready by then
    const MAX_FRAMES_PER_SHOT: usize = 900;

    enum Shot {
        Swipe { start: Vec2, end: Vec2 },
        Impulse(Vec3),
    }

    pub fn run() {
        let mut scene = SceneGraph::new();
        let mut driver = FrameDriver::new(PhysicsWorld::new(), &mut scene, Tuning::default());
        let mut now_ms = 0.0;

        let shots = [
            ("straight", Shot::Swipe {
                start: Vec2::new(640.0, 600.0),
                end: Vec2::new(640.0, 600.0),
            }),
            ("wide", Shot::Swipe {
                start: Vec2::new(640.0, 600.0),
                end: Vec2::new(840.0, 600.0),
            }),
            ("dribble", Shot::Impulse(Vec3::new(0.0, 0.0, -0.5))),
        ];

        // Let the ball settle on the spot
        for _ in 0..30 {
            now_ms += FRAME_MS;
            log_events(&driver.frame(SIM_DT, now_ms, &mut scene), now_ms);
        }

        for (name, shot) in shots {
            log::info!("--- {} shot ---", name);
            let accepted = match shot {
                Shot::Swipe { start, end } => driver.kick_gesture(start, end, now_ms),
                Shot::Impulse(impulse) => driver.kick(impulse, now_ms),
            };
            if !accepted {
                log::warn!("{} shot rejected", name);
                continue;
            }
            play_out(&mut driver, &mut scene, &mut now_ms);
        }

        match serde_json::to_string(driver.state()) {
            Ok(json) => log::info!("Final state: {}", json),
            Err(e) => log::warn!("Could not serialize final state: {}", e),
        }
    }

    fn play_out(driver: &mut FrameDriver<PhysicsWorld>, scene: &mut SceneGraph, now_ms: &mut f64) {
        for _ in 0..MAX_FRAMES_PER_SHOT {
            *now_ms += FRAME_MS;
            log_events(&driver.frame(SIM_DT, *now_ms, scene), *now_ms);
            if driver.state().is_ready() {
                return;
            }
        }
        log::warn!("Shot still {} after {} frames", driver.state().phase.name(), MAX_FRAMES_PER_SHOT);
    }

    fn log_events(events: &[GameEvent], now_ms: f64) {
        for event in events {
            log::info!("{:>7.0} ms  {:?}", now_ms, event);
        }
    }
}
