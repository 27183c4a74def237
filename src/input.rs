use crate::constants::{CANCEL_KEYS, SPIN_KEYS};

/// What a key press in the ticket field asks the spinner to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Spin,
    Cancel,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    if SPIN_KEYS.contains(&key) {
        Some(KeyAction::Spin)
    } else if CANCEL_KEYS.contains(&key) {
        Some(KeyAction::Cancel)
    } else {
        None
    }
}

/// Ticket text to hand to the engine. Blank input is passed through so the
/// engine reports it like any other rejected ticket.
#[inline]
pub fn ticket_from_input(value: &str) -> &str {
    value.trim()
}
