use crate::constants::*;
use crate::dom;
use crate::host::Host;
use crate::input::{key_action, ticket_from_input, KeyAction};
use std::rc::Rc;
use web_sys as web;

fn spin_from_input(host: &Host, document: &web::Document) {
    let raw = dom::input_value(document, TICKET_INPUT_ID).unwrap_or_default();
    let ticket = ticket_from_input(&raw);
    if !host.spin(ticket) {
        log::debug!("[keys] spin for '{}' not started", ticket);
    }
}

pub fn handle_ticket_keydown(ev: &web::KeyboardEvent, host: &Host, document: &web::Document) {
    match key_action(&ev.key()) {
        Some(KeyAction::Spin) => {
            ev.prevent_default();
            spin_from_input(host, document);
        }
        // Escape bubbles to the window listener
        Some(KeyAction::Cancel) | None => {}
    }
}

/// Wire whichever of `#ticket-input`, `#spin-button` the page provides.
pub fn wire_page_controls(host: &Rc<Host>, document: &web::Document) {
    if let Some(input) = document.get_element_by_id(TICKET_INPUT_ID) {
        let host_keys = host.clone();
        let doc_keys = document.clone();
        dom::on_keydown(&input, move |ev| {
            handle_ticket_keydown(&ev, &host_keys, &doc_keys)
        });
    }

    let host_click = host.clone();
    let doc_click = document.clone();
    if !dom::on_click(document, SPIN_BUTTON_ID, move || spin_from_input(&host_click, &doc_click)) {
        log::debug!("[keys] no #{} on this page", SPIN_BUTTON_ID);
    }

    // Escape anywhere on the page cancels
    if let Some(window) = web::window() {
        let host_esc = host.clone();
        dom::on_keydown(&window, move |ev| {
            if key_action(&ev.key()) == Some(KeyAction::Cancel) && host_esc.cancel() {
                log::info!("[keys] cancelled");
            }
        });
    }
}
