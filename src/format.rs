use crate::constants::MAX_LABEL_CHARS;
use raffle_core::{Participant, WheelState};

/// Lower-case state name handed to JavaScript.
pub fn state_name(state: WheelState) -> &'static str {
    match state {
        WheelState::Idle => "idle",
        WheelState::Spinning => "spinning",
        WheelState::Landed => "landed",
        WheelState::Error => "error",
    }
}

/// Truncate on a char boundary, marking the cut with an ellipsis.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    let mut out: String = text.chars().take(keep).collect();
    out.push('…');
    out
}

/// Name column of a reel row.
pub fn row_name(p: &Participant) -> String {
    truncate_label(&p.display_name(), MAX_LABEL_CHARS)
}

/// Ticket column of a reel row, or `None` when ticket numbers are hidden.
pub fn row_ticket(p: &Participant, show_ticket_numbers: bool) -> Option<String> {
    show_ticket_numbers.then(|| format!("#{}", p.ticket_number))
}

pub fn winner_status(p: &Participant) -> String {
    format!("Winner: {} (ticket {})", p.display_name(), p.ticket_number)
}

pub fn spinning_status(ticket: &str) -> String {
    if ticket.is_empty() {
        "Spinning…".to_string()
    } else {
        format!("Spinning for ticket {ticket}…")
    }
}
