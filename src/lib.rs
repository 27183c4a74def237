#![cfg(target_arch = "wasm32")]
use crate::host::{participant_to_js, Host};
use raffle_core::samples::generate_participants;
use raffle_core::{BezierCurve, EasingPreset, Participant, SpinEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

mod constants;
mod dom;
mod events;
mod format;
mod frame;
mod host;
mod input;
mod overlay;
mod paint;

fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("raffle-web starting");
    Ok(())
}

/// A reel bound to one canvas.
///
/// ```js
/// const spinner = new RaffleSpinner("raffle-canvas");
/// spinner.add_participant("Ada", "Lovelace", "0042");
/// spinner.on_spin_complete(w => console.log(w.firstName, w.ticketNumber));
/// spinner.spin("42");
/// ```
#[wasm_bindgen]
pub struct RaffleSpinner {
    host: Rc<Host>,
}

#[wasm_bindgen]
impl RaffleSpinner {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: Option<String>) -> Result<RaffleSpinner, JsValue> {
        let canvas_id = canvas_id.unwrap_or_else(|| constants::DEFAULT_CANVAS_ID.to_string());
        let document = dom::document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = dom::canvas_by_id(&document, &canvas_id).map_err(js_err)?;
        dom::fit_canvas_to_css(&canvas);
        let painter = paint::CanvasPainter::new(canvas.clone()).map_err(js_err)?;

        let host = Host::new(SpinEngine::default(), painter);
        frame::install(&host);
        events::wire_page_controls(&host, &document);
        let weak = Rc::downgrade(&host);
        dom::on_window_resize(&canvas, move || {
            if let Some(host) = weak.upgrade() {
                host.repaint_idle();
            }
        });
        host.repaint_idle();
        log::info!("[host] spinner bound to #{}", canvas_id);
        Ok(RaffleSpinner { host })
    }

    pub fn add_participant(&self, first_name: &str, last_name: &str, ticket_number: &str) {
        self.host
            .draft
            .borrow_mut()
            .push(Participant::new(first_name, last_name, ticket_number));
        self.host.draft_dirty.set(true);
    }

    pub fn clear_participants(&self) {
        self.host.draft.borrow_mut().clear();
        self.host.draft_dirty.set(true);
    }

    /// Replace the roster with a generated one; returns its size.
    pub fn load_sample_roster(&self, count: usize, start_ticket: u32, seed: u32) -> Result<usize, JsValue> {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let roster = generate_participants(count, start_ticket as u64, &mut rng)
            .ok_or_else(|| JsValue::from_str("ticket range overflows"))?;
        let n = roster.len();
        *self.host.draft.borrow_mut() = roster;
        self.host.draft_dirty.set(true);
        Ok(n)
    }

    pub fn participant_count(&self) -> usize {
        self.host.draft.borrow().len()
    }

    /// Returns `false` if the spin was rejected or one is already running.
    pub fn spin(&self, ticket: &str) -> bool {
        self.host.spin(ticket)
    }

    pub fn cancel(&self) -> bool {
        self.host.cancel()
    }

    pub fn reset(&self) {
        self.host.reset();
    }

    pub fn state(&self) -> String {
        format::state_name(self.host.engine.borrow().state()).to_string()
    }

    /// `{firstName, lastName, ticketNumber}` of the last landed spin, or `null`.
    pub fn winner(&self) -> Result<JsValue, JsValue> {
        match self.host.engine.borrow().winner() {
            Some(p) => participant_to_js(p),
            None => Ok(JsValue::NULL),
        }
    }

    /// Takes effect from the next spin; out-of-range values are clamped then.
    pub fn set_settings(&self, duration_secs: f64, rotations: u32, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.host.update_settings(|s| {
            s.min_spin_duration_secs = duration_secs;
            s.spin_rotations = rotations;
            s.bezier_curve = BezierCurve::new(x1, y1, x2, y2);
        });
    }

    pub fn set_easing(&self, name: &str) -> Result<(), JsValue> {
        let preset: EasingPreset = name.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.host.update_settings(|s| s.bezier_curve = preset.curve());
        Ok(())
    }

    pub fn set_layout(&self, visible_rows: usize, item_height_px: f64, overscan_rows: usize) {
        self.host.update_theme(|t| {
            t.layout.visible_rows = visible_rows;
            t.layout.item_height_px = item_height_px;
            t.layout.overscan_rows = overscan_rows;
        });
    }

    /// Any CSS color; empty strings keep the default.
    pub fn set_theme_colors(
        &self,
        background: String,
        row_alt_background: String,
        row_text: String,
        highlight: String,
        pointer: String,
    ) {
        self.host.update_theme(|t| {
            t.background = background;
            t.row_alt_background = row_alt_background;
            t.row_text = row_text;
            t.highlight = highlight;
            t.pointer = pointer;
        });
    }

    pub fn set_font(&self, family: String, size_px: f64) {
        self.host.update_theme(|t| {
            t.font_family = family;
            t.font_size_px = size_px;
        });
    }

    pub fn set_show_ticket_numbers(&self, show: bool) {
        self.host.update_theme(|t| t.show_ticket_numbers = show);
    }

    pub fn on_spin_complete(&self, f: js_sys::Function) {
        self.host.js.borrow_mut().on_spin_complete = Some(f);
    }

    pub fn on_error(&self, f: js_sys::Function) {
        self.host.js.borrow_mut().on_error = Some(f);
    }

    pub fn on_state_change(&self, f: js_sys::Function) {
        self.host.js.borrow_mut().on_state_change = Some(f);
    }
}
