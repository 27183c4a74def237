use crate::constants::*;
use crate::paint::CanvasPainter;
use crate::{dom, format, frame, overlay};
use raffle_core::{Participant, SpinEngine, WheelState};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

pub enum HostEvent {
    Complete(Participant),
    Error(String),
    State(WheelState),
}

#[derive(Default)]
pub struct JsCallbacks {
    pub on_spin_complete: Option<js_sys::Function>,
    pub on_error: Option<js_sys::Function>,
    pub on_state_change: Option<js_sys::Function>,
}

// Engine callbacks only push onto `events`; the queue is drained after the
// engine borrow is released, so JS handlers may call back into the spinner.
pub struct Host {
    pub engine: RefCell<SpinEngine>,
    pub events: Rc<RefCell<VecDeque<HostEvent>>>,
    pub js: RefCell<JsCallbacks>,
    pub painter: Rc<CanvasPainter>,
    /// Roster being assembled from JS; handed to the engine on the next spin.
    pub draft: RefCell<Vec<Participant>>,
    pub draft_dirty: Cell<bool>,
    /// Generation captured when the pending animation frame was requested.
    pub scheduled: Cell<Option<u64>>,
    pub tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl Host {
    pub fn new(mut engine: SpinEngine, painter: CanvasPainter) -> Rc<Self> {
        let events: Rc<RefCell<VecDeque<HostEvent>>> = Rc::new(RefCell::new(VecDeque::new()));
        let painter = Rc::new(painter);

        let q = events.clone();
        engine.set_on_spin_complete(move |p| q.borrow_mut().push_back(HostEvent::Complete(p.clone())));
        let q = events.clone();
        engine.set_on_error(move |e| q.borrow_mut().push_back(HostEvent::Error(e.to_string())));
        let q = events.clone();
        engine.set_on_state_change(move |s| q.borrow_mut().push_back(HostEvent::State(s)));
        let p = painter.clone();
        engine.set_on_frame(move |frame, theme| p.paint(frame, theme));

        Rc::new(Self {
            engine: RefCell::new(engine),
            events,
            js: RefCell::new(JsCallbacks::default()),
            painter,
            draft: RefCell::new(Vec::new()),
            draft_dirty: Cell::new(false),
            scheduled: Cell::new(None),
            tick: RefCell::new(None),
        })
    }

    /// Start a spin, resetting a landed reel first. Returns whether it started.
    pub fn spin(&self, ticket: &str) -> bool {
        let started = {
            let mut engine = self.engine.borrow_mut();
            if self.draft_dirty.replace(false) {
                engine.set_participants(self.draft.borrow().clone());
            }
            if engine.state() == WheelState::Landed {
                engine.reset();
            }
            engine.spin(ticket)
        };
        if started.is_ok() {
            if let Some(doc) = dom::document() {
                overlay::show_status(&doc, STATUS_KIND_SPINNING, &format::spinning_status(ticket));
            }
        }
        self.flush_events();
        match started {
            Ok(_) => {
                frame::schedule(self);
                true
            }
            Err(_) => false,
        }
    }

    pub fn cancel(&self) -> bool {
        let cancelled = self.engine.borrow_mut().cancel();
        if cancelled {
            if let Some(doc) = dom::document() {
                overlay::clear_status(&doc);
            }
        }
        self.flush_events();
        cancelled
    }

    pub fn reset(&self) {
        self.engine.borrow_mut().reset();
        if let Some(doc) = dom::document() {
            overlay::clear_status(&doc);
        }
        self.repaint_idle();
        self.flush_events();
    }

    /// Redraw the empty reel when nothing is animating.
    pub fn repaint_idle(&self) {
        let engine = self.engine.borrow();
        if engine.state() != WheelState::Idle {
            return;
        }
        if let Err(e) = self.painter.clear(engine.theme()) {
            log::warn!("[paint] clear failed: {:#}", e);
        }
    }

    pub fn update_theme(&self, edit: impl FnOnce(&mut raffle_core::ThemeConfig)) {
        {
            let mut engine = self.engine.borrow_mut();
            let mut theme = engine.theme().clone();
            edit(&mut theme);
            engine.set_theme(theme);
        }
        self.repaint_idle();
    }

    pub fn update_settings(&self, edit: impl FnOnce(&mut raffle_core::SpinnerSettings)) {
        let mut engine = self.engine.borrow_mut();
        let mut settings = engine.settings().clone();
        edit(&mut settings);
        engine.set_settings(settings);
    }

    /// Deliver queued engine events to the page and to JavaScript.
    pub fn flush_events(&self) {
        loop {
            let next = self.events.borrow_mut().pop_front();
            let Some(event) = next else {
                break;
            };
            self.deliver(event);
        }
    }

    fn deliver(&self, event: HostEvent) {
        let doc = dom::document();
        let (callback, arg) = match event {
            HostEvent::Complete(p) => {
                log::info!("[host] winner {}", p);
                if let Some(doc) = &doc {
                    overlay::show_status(doc, STATUS_KIND_WINNER, &format::winner_status(&p));
                }
                let arg = match participant_to_js(&p) {
                    Ok(v) => v,
                    Err(e) => {
                        log::error!("[host] could not build winner object: {:?}", e);
                        return;
                    }
                };
                (self.js.borrow().on_spin_complete.clone(), arg)
            }
            HostEvent::Error(message) => {
                if let Some(doc) = &doc {
                    overlay::show_status(doc, STATUS_KIND_ERROR, &message);
                }
                (self.js.borrow().on_error.clone(), JsValue::from_str(&message))
            }
            HostEvent::State(state) => (
                self.js.borrow().on_state_change.clone(),
                JsValue::from_str(format::state_name(state)),
            ),
        };
        // Cloned out of the RefCell so the handler may replace callbacks
        if let Some(f) = callback {
            if let Err(e) = f.call1(&JsValue::NULL, &arg) {
                log::error!("[host] callback threw: {:?}", e);
            }
        }
    }
}

pub fn participant_to_js(p: &Participant) -> Result<JsValue, JsValue> {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"firstName".into(), &p.first_name.as_str().into())?;
    js_sys::Reflect::set(&obj, &"lastName".into(), &p.last_name.as_str().into())?;
    js_sys::Reflect::set(&obj, &"ticketNumber".into(), &p.ticket_number.as_str().into())?;
    Ok(obj.into())
}
