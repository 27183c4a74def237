use thiserror::Error;

/// Everything that can go wrong around a spin. None of these are fatal:
/// the engine always comes back to `Idle` and stays reusable.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpinError {
    #[error("Please enter a ticket number")]
    EmptyTicket,
    #[error("Ticket {ticket} was not found among the participants")]
    NotFound { ticket: String },
    #[error("There are no participants to spin through")]
    EmptyRoster,
    /// Returned to the caller only; never delivered through `on_error`.
    #[error("A spin is already in progress")]
    AlreadySpinning,
    #[error("Invalid spinner settings: {0}")]
    InvalidSettings(String),
    #[error("Reel paint failed: {0}")]
    RenderCallbackFault(String),
}

impl SpinError {
    /// Whether hosts should surface this error to the user.
    pub fn is_reported(&self) -> bool {
        !matches!(self, SpinError::AlreadySpinning)
    }
}
