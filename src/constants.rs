// Page wiring and canvas painting constants for the web front end.
// Plain data only: the host-side tests include this file.

// Element ids the host page is expected to provide
pub const DEFAULT_CANVAS_ID: &str = "raffle-canvas";
pub const TICKET_INPUT_ID: &str = "ticket-input";
pub const SPIN_BUTTON_ID: &str = "spin-button";
pub const STATUS_ID: &str = "spin-status";

// `data-kind` values on the status element, for page CSS
pub const STATUS_KIND_SPINNING: &str = "spinning";
pub const STATUS_KIND_WINNER: &str = "winner";
pub const STATUS_KIND_ERROR: &str = "error";

// Keyboard
pub const SPIN_KEYS: &[&str] = &["Enter"];
pub const CANCEL_KEYS: &[&str] = &["Escape", "Esc"]; // "Esc" on legacy Edge

// Row layout, as fractions of the item height or viewport width
pub const TEXT_INSET_FRACTION: f64 = 0.08; // left padding of names, of viewport width
pub const TICKET_INSET_FRACTION: f64 = 0.04; // right padding of ticket numbers
pub const HIGHLIGHT_BORDER_PX: f64 = 3.0;
pub const HIGHLIGHT_FILL_ALPHA: f64 = 0.18;
pub const POINTER_HALF_HEIGHT_FRACTION: f64 = 0.22; // of item height
pub const POINTER_DEPTH_FRACTION: f64 = 0.035; // of viewport width

// Names longer than this are cut with an ellipsis before painting
pub const MAX_LABEL_CHARS: usize = 40;
