//! Frame timing and the browser animation-frame loop

/// Turns host timestamps (ms) into clamped simulation deltas (s)
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: Option<f64>,
    max_dt: f32,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            last_ms: None,
            max_dt,
        }
    }

    /// Seconds since the previous frame, in [0, max_dt]. First frame is 0.
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        crate::sim::clamp_dt(dt, self.max_dt)
    }

    /// Forget the previous timestamp (after a pause or restart)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::FrameLoop;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;

    type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    /// Self-rescheduling `requestAnimationFrame` loop
    ///
    /// Stopping cancels the pending frame; dropping also releases the
    /// callback (which would otherwise keep itself alive).
    pub struct FrameLoop {
        window: web_sys::Window,
        pending: Rc<Cell<Option<i32>>>,
        stopped: Rc<Cell<bool>>,
        callback: FrameCallback,
    }

    impl FrameLoop {
        pub fn start<F>(mut on_frame: F) -> Result<Self, JsValue>
        where
            F: FnMut(f64) + 'static,
        {
            let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
            let pending = Rc::new(Cell::new(None));
            let stopped = Rc::new(Cell::new(false));
            let callback: FrameCallback = Rc::new(RefCell::new(None));

            {
                let window = window.clone();
                let pending = pending.clone();
                let stopped = stopped.clone();
                let callback_ref = callback.clone();
                *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                    pending.set(None);
                    if stopped.get() {
                        return;
                    }
                    on_frame(time);
                    if stopped.get() {
                        return;
                    }
                    if let Some(cb) = callback_ref.borrow().as_ref() {
                        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                            Ok(id) => pending.set(Some(id)),
                            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
                        }
                    }
                }));
            }

            let id = {
                let cb = callback.borrow();
                let cb = cb.as_ref().ok_or_else(|| JsValue::from_str("frame callback missing"))?;
                window.request_animation_frame(cb.as_ref().unchecked_ref())?
            };
            pending.set(Some(id));

            Ok(Self {
                window,
                pending,
                stopped,
                callback,
            })
        }

        /// Cancel the scheduled frame; the loop never runs again
        pub fn stop(&self) {
            self.stopped.set(true);
            if let Some(id) = self.pending.take() {
                if let Err(e) = self.window.cancel_animation_frame(id) {
                    log::warn!("cancelAnimationFrame failed: {:?}", e);
                }
            }
        }

        pub fn is_running(&self) -> bool {
            !self.stopped.get()
        }
    }

    impl Drop for FrameLoop {
        fn drop(&mut self) {
            self.stop();
            // Break the closure -> Rc -> closure cycle
            self.callback.borrow_mut().take();
        }
    }
}
