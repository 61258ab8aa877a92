//! Browser host: frame loop, input listeners and the JS-facing handle
//!
//! JavaScript owns a [`RunnerApp`] and renders from its snapshots; nothing
//! is stored on `window`.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent, TouchEvent};

use super::frame_loop::{FrameClock, FrameLoop};
use super::input::{SwipeTracker, command_for_key};
use crate::sim::{Command, GameEvent, GameState, TickInput, autopilot, tick};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
}

/// Everything the frame callback and the listeners share
struct Game {
    state: GameState,
    input: TickInput,
    clock: FrameClock,
    swipe: SwipeTracker,
    autopilot: bool,
}

impl Game {
    fn frame(&mut self, time: f64) {
        let dt = self.clock.delta(time);
        if self.autopilot {
            if let Some(command) = autopilot(&self.state) {
                self.input.push(command);
            }
        }
        tick(&mut self.state, &self.input, dt);
        self.input.clear();

        for event in &self.state.events {
            if let GameEvent::GameOver { score, .. } = event {
                log::info!("Final score: {}", score);
            }
        }
    }
}

/// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn add<F>(target: &EventTarget, kind: &'static str, handler: F) -> Result<Self, JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

/// Handle to a running game
#[wasm_bindgen]
pub struct RunnerApp {
    game: Rc<RefCell<Game>>,
    frame_loop: Option<FrameLoop>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl RunnerApp {
    /// Start a run. `on_frame` is called after every tick so the page can
    /// redraw from [`RunnerApp::snapshot`].
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: f64,
        tuning_json: Option<String>,
        on_frame: Option<js_sys::Function>,
    ) -> Result<RunnerApp, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        };
        let seed = seed as u64;
        let clock = FrameClock::new(tuning.max_dt);
        let state = GameState::with_tuning(seed, tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let game = Rc::new(RefCell::new(Game {
            clock,
            state,
            input: TickInput::default(),
            swipe: SwipeTracker::default(),
            autopilot: false,
        }));
        log::info!("Lane Runner starting with seed {}", seed);

        let listeners = install_listeners(&game)?;

        let frame_game = game.clone();
        let frame_loop = FrameLoop::start(move |time| {
            frame_game.borrow_mut().frame(time);
            if let Some(callback) = &on_frame {
                if let Err(e) = callback.call0(&JsValue::NULL) {
                    log::warn!("on_frame callback failed: {:?}", e);
                }
            }
        })?;

        Ok(RunnerApp {
            game,
            frame_loop: Some(frame_loop),
            listeners,
        })
    }

    pub fn move_left(&self) {
        self.push(Command::MoveLeft);
    }

    pub fn move_right(&self) {
        self.push(Command::MoveRight);
    }

    pub fn jump(&self) {
        self.push(Command::Jump);
    }

    pub fn slide(&self) {
        self.push(Command::Slide);
    }

    /// New run after game over (ignored while running)
    pub fn restart(&self) {
        let mut g = self.game.borrow_mut();
        g.state.restart();
        g.input.clear();
        g.clock.reset();
    }

    pub fn set_autopilot(&self, enabled: bool) {
        self.game.borrow_mut().autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    pub fn score(&self) -> f64 {
        self.game.borrow().state.display_score as f64
    }

    pub fn is_game_over(&self) -> bool {
        self.game.borrow().state.is_game_over()
    }

    /// Current [`RenderSnapshot`](crate::sim::RenderSnapshot) as JSON
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.game.borrow().state.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Tear down: cancel the pending frame and remove listeners
    pub fn stop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.take() {
            frame_loop.stop();
        }
        self.listeners.clear();
        log::info!("Lane Runner stopped");
    }

    fn push(&self, command: Command) {
        self.game.borrow_mut().input.push(command);
    }
}

fn install_listeners(game: &Rc<RefCell<Game>>) -> Result<Vec<Listener>, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let target: &EventTarget = window.as_ref();
    let mut listeners = Vec::new();

    // Keyboard
    {
        let game = game.clone();
        listeners.push(Listener::add(target, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let mut g = game.borrow_mut();
            if !g.state.is_running() {
                return;
            }
            if let Some(command) = command_for_key(&event.code()) {
                if command == Command::Jump {
                    // Keep the page from scrolling
                    event.prevent_default();
                }
                g.input.push(command);
            }
        })?);
    }

    // Touch swipes
    {
        let game = game.clone();
        listeners.push(Listener::add(target, "touchstart", move |event: Event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            if let Some(touch) = event.changed_touches().get(0) {
                game.borrow_mut()
                    .swipe
                    .begin(touch.screen_x() as f32, touch.screen_y() as f32);
            }
        })?);
    }
    {
        let game = game.clone();
        listeners.push(Listener::add(target, "touchend", move |event: Event| {
            let Some(event) = event.dyn_ref::<TouchEvent>() else {
                return;
            };
            if let Some(touch) = event.changed_touches().get(0) {
                let mut g = game.borrow_mut();
                if let Some(command) = g
                    .swipe
                    .end(touch.screen_x() as f32, touch.screen_y() as f32)
                {
                    g.input.push(command);
                }
            }
        })?);
    }

    Ok(listeners)
}
