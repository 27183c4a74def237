use crate::host::Host;
use raffle_core::TickOutcome;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Build the frame callback. It holds a weak handle so a dropped spinner
/// stops animating.
pub fn install(host: &Rc<Host>) {
    let weak = Rc::downgrade(host);
    let tick = Closure::wrap(Box::new(move || {
        let Some(host) = weak.upgrade() else {
            return;
        };
        let Some(generation) = host.scheduled.take() else {
            return;
        };
        let now_ms = instant::now();
        let outcome = host.engine.borrow_mut().tick(generation, now_ms);
        host.flush_events();
        if let TickOutcome::Landed = outcome {
            log::debug!("[frame] landed at {:.0}ms", now_ms);
        }
        // Also covers a stale frame superseded by a newer spin, and a spin
        // started from a completion handler
        schedule(&host);
    }) as Box<dyn FnMut()>);
    *host.tick.borrow_mut() = Some(tick);
}

/// Request a frame for the current spin if none is pending.
pub fn schedule(host: &Host) {
    if host.scheduled.get().is_some() {
        return;
    }
    let generation = {
        let engine = host.engine.borrow();
        if !engine.is_spinning() {
            return;
        }
        engine.generation()
    };
    let Some(window) = web::window() else {
        return;
    };
    let tick = host.tick.borrow();
    let Some(callback) = tick.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(_) => host.scheduled.set(Some(generation)),
        Err(e) => log::error!("[frame] requestAnimationFrame failed: {:?}", e),
    }
}
