use std::fmt;

/// One raffle entry as supplied by the import pipeline.
///
/// Tickets are compared after normalization and are not assumed to be
/// unique: imported rosters can contain duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Participant {
    pub first_name: String,
    pub last_name: String,
    pub ticket_number: String,
}

impl Participant {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        ticket_number: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ticket_number: ticket_number.into(),
        }
    }

    /// "First Last", skipping whichever half is blank.
    pub fn display_name(&self) -> String {
        let first = self.first_name.trim();
        let last = self.last_name.trim();
        match (first.is_empty(), last.is_empty()) {
            (false, false) => format!("{first} {last}"),
            (false, true) => first.to_string(),
            (true, false) => last.to_string(),
            (true, true) => String::new(),
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (#{})", self.display_name(), self.ticket_number)
    }
}

/// A spin request as issued by the UI: one per button press or Enter key.
#[derive(Clone, Debug)]
pub struct SpinRequest {
    pub target_ticket_number: String,
    pub participants: std::rc::Rc<[Participant]>,
}
