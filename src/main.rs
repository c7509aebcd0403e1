//! Prize Wheel entry point
//!
//! Handles platform-specific initialization and runs the widget loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_widget {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use prize_wheel::audio::AudioManager;
    use prize_wheel::consts::*;
    use prize_wheel::render::ConfettiCanvas;
    use prize_wheel::sim::{ConfettiSim, SpinPlan, WheelState};
    use prize_wheel::ui::Presentation;
    use prize_wheel::{PRIZES, Settings};

    /// Widget instance holding all state
    struct Widget {
        wheel: WheelState,
        confetti: ConfettiSim,
        canvas: ConfettiCanvas,
        presentation: Presentation,
        audio: AudioManager,
        settings: Settings,
    }

    impl Widget {
        /// Begin a spin: sound, rotation animation, button lockout.
        /// Returns `None` (and does nothing) while a spin is in flight.
        fn trigger_spin(&mut self) -> Option<SpinPlan> {
            let plan = self.wheel.try_start_spin()?;
            log::info!("Spin started, target {:.0} degrees", plan.target_rotation);

            self.audio.resume();
            self.audio.play_spin(SPIN_ANIMATION_MS);
            self.presentation.set_spin_enabled(false);
            self.presentation
                .set_status("Girando... preparando a surpresa! \u{1F4AB}");
            // The CSS transition on the wheel element animates toward this
            // absolute angle over SPIN_ANIMATION_MS
            self.presentation.set_wheel_rotation(plan.target_rotation);

            Some(plan)
        }

        /// Conclude a spin after the settle delay: resolve the prize, update
        /// the result card, swap the spin sound for the win chime, confetti.
        fn settle_spin(&mut self, plan: SpinPlan) {
            let index = self.wheel.settle(plan, PRIZES.len());
            let prize = &PRIZES[index];
            log::info!("Spin settled on slice {index}: {}", prize.label);

            self.presentation.show_result(prize);
            self.presentation.set_status(&format!(
                "Resultado: {}. Que momento especial! \u{2728}",
                prize.label
            ));
            self.presentation.set_spin_enabled(true);

            self.audio.stop_spin();
            self.audio.play_win();

            if self.settings.effective_confetti() {
                self.confetti.spawn_burst(CONFETTI_BURST_SIZE);
            }
        }

        /// One animation frame: advance and redraw the confetti. Runs for
        /// the lifetime of the page, spinning or not.
        fn frame(&mut self) {
            self.confetti.advance_frame();
            self.canvas.draw(&self.confetti);
        }

        fn resize(&mut self) {
            let (width, height) = self.canvas.resize_to_viewport();
            self.confetti.resize(width, height);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Prize Wheel starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("confetti-canvas")
            .expect("no confetti canvas")
            .dyn_into()
            .expect("not a canvas");
        let canvas = ConfettiCanvas::new(canvas).expect("no 2d context");
        let (width, height) = canvas.resize_to_viewport();

        let settings = Settings::load();
        let mut audio = AudioManager::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);

        let presentation = Presentation::from_document(&document);
        presentation.build_wheel(&document);
        presentation.set_spin_enabled(true);

        let seed = js_sys::Date::now() as u64;
        let widget = Rc::new(RefCell::new(Widget {
            wheel: WheelState::new(seed),
            confetti: ConfettiSim::new(seed.wrapping_add(1), width, height),
            canvas,
            presentation,
            audio,
            settings,
        }));

        log::info!("Widget initialized with seed: {seed}");

        setup_spin_button(widget.clone());
        setup_resize_handler(widget.clone());

        // Start the confetti loop
        request_animation_frame(widget);

        log::info!("Prize Wheel running!");
    }

    fn setup_spin_button(widget: Rc<RefCell<Widget>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("spin-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                // Re-entrant clicks while spinning resolve to None here
                let plan = widget.borrow_mut().trigger_spin();
                if let Some(plan) = plan {
                    schedule_settle(widget.clone(), plan);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// One-shot timer slightly longer than the rotation animation so the
    /// wheel has visually settled when the result appears. Always fires; no
    /// cancellation path exists.
    fn schedule_settle(widget: Rc<RefCell<Widget>>, plan: SpinPlan) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move || {
            widget.borrow_mut().settle_spin(plan);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            SETTLE_DELAY_MS,
        );
        closure.forget();
    }

    fn setup_resize_handler(widget: Rc<RefCell<Widget>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            widget.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(widget: Rc<RefCell<Widget>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame_loop(widget, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(widget: Rc<RefCell<Widget>>, _time: f64) {
        widget.borrow_mut().frame();
        request_animation_frame(widget);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_widget::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Prize Wheel (native) starting...");
    log::info!("Native mode has no UI - run with `trunk serve` for the web version");

    // Run smoke checks
    println!("\nRunning spin resolver checks...");
    smoke_test_resolver();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test_resolver() {
    use prize_wheel::PRIZES;
    use prize_wheel::sim::{WheelState, resolve_prize};

    assert_eq!(resolve_prize(0.0, PRIZES.len()), 4);

    let mut wheel = WheelState::new(42);
    let plan = wheel.try_start_spin().expect("idle wheel spins");
    let index = wheel.settle(plan, PRIZES.len());
    println!("✓ Spin landed on {}", PRIZES[index].label);
}
