//! Rex Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use rex_run::consts::*;
    use rex_run::renderer::{RenderState, shapes, vertex::palette};
    use rex_run::settings::Settings;
    use rex_run::sim::{GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Driver-level freeze while the tab is hidden or unfocused
        frozen: bool,
        /// Best score this session, in memory only
        best_score: u32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Phase edge detection for logging and the session best
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frozen: false,
                best_score: 0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Playing,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.jump = false;
                self.input.reset = false;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            // A death and a queued reset can land in the same frame, so the
            // best is tracked every update rather than on the phase edge
            self.best_score = self.best_score.max(self.state.score);

            // Phase edges drive the round logging
            let current_phase = self.state.phase;
            if current_phase != self.last_phase {
                match current_phase {
                    GamePhase::GameOver => {
                        log::info!(
                            "Round {} over: score {}, session best {}",
                            self.state.round(),
                            self.state.score,
                            self.best_score
                        );
                    }
                    GamePhase::Playing => {
                        log::info!("Round {} started", self.state.round());
                    }
                }
                self.last_phase = current_phase;
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let colors = palette::select(self.settings.dark_theme);
            let vertices = shapes::scene(&self.state, colors, (time / 1000.0) as f32);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            // Update score
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            // Session best, already covering the current run
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.best_score.to_string()));
            }

            // FPS item honors the setting
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Show/hide game over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Sync the render clear color with the active theme
        fn apply_theme(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                render_state.background = background_color(self.settings.dark_theme);
            }
        }
    }

    fn background_color(dark_theme: bool) -> wgpu::Color {
        let bg = palette::select(dark_theme).background;
        wgpu::Color {
            r: bg[0] as f64,
            g: bg[1] as f64,
            b: bg[2] as f64,
            a: bg[3] as f64,
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Rex Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let background = background_color(game.borrow().settings.dark_theme);
        let render_state = RenderState::new(surface, &adapter, width, height, background).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Set up restart button
        setup_restart_button(game.clone());

        // Set up freeze on visibility change / blur
        setup_focus_freeze(game.clone());

        // Show HUD
        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Rex Run running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    "Enter" | "r" | "R" => g.input.reset = true,
                    "d" | "D" => {
                        g.settings.dark_theme = !g.settings.dark_theme;
                        g.settings.save();
                        g.apply_theme();
                    }
                    "f" | "F" => {
                        g.settings.show_fps = !g.settings.show_fps;
                        g.settings.save();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer: jump mid-run, restart from the game-over screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::GameOver {
                    g.input.reset = true;
                } else {
                    g.input.jump = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::GameOver {
                    g.input.reset = true;
                } else {
                    g.input.jump = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            if g.frozen {
                // Hold the world still and drop any backlog
                g.accumulator = 0.0;
            } else {
                g.update(dt, time);
            }
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                // Routed through the tick so round/stream bookkeeping holds
                game.borrow_mut().input.reset = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_freeze(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                if !g.settings.pause_on_blur {
                    return;
                }
                let hidden =
                    document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                g.frozen = hidden;
                if hidden {
                    log::info!("Frozen (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.pause_on_blur {
                    g.frozen = true;
                    log::info!("Frozen (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus returns: thaw, the dropped accumulator keeps it from catching up
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().frozen = false;
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rex_run::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();

    let seed = rex_run::platform::now_ms() as u64;
    log::info!("Rex Run (native) autopilot, session seed {seed}");

    let mut state = GameState::new(seed);
    for _ in 0..5 {
        // Cap at three simulated minutes in case the pilot stops dying
        let cap = state.time_ticks + 3 * 60 * 60;
        while state.phase == GamePhase::Playing && state.time_ticks < cap {
            let jump = should_jump(&state);
            tick(&mut state, &TickInput { jump, ..Default::default() });
        }
        if state.phase == GamePhase::Playing {
            log::warn!("Round {} capped at score {}", state.round(), state.score);
            break;
        }
        log::info!(
            "Round {} over: score {} after {} ticks",
            state.round(),
            state.score,
            state.time_ticks
        );
        tick(&mut state, &TickInput { reset: true, ..Default::default() });
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main; this exists to satisfy the compiler
}

/// Jump when the nearest oncoming obstacle enters the reaction window
#[cfg(not(target_arch = "wasm32"))]
fn should_jump(state: &rex_run::sim::GameState) -> bool {
    use rex_run::consts::{OBSTACLE_WIDTH, RUNNER_WIDTH, RUNNER_X};
    use rex_run::sim::scroll_speed;

    if state.runner.airborne() {
        return false;
    }
    // Ten ticks of lead at the current speed
    let window = scroll_speed(state.score) * 10.0;
    state
        .field
        .obstacles
        .iter()
        .filter(|o| o.x + OBSTACLE_WIDTH > RUNNER_X)
        .any(|o| o.x - (RUNNER_X + RUNNER_WIDTH) < window)
}
