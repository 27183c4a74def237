use crate::error::SpinError;
use crate::participant::Participant;
use fnv::FnvHashMap;

/// Canonical form of a ticket string.
///
/// Only ASCII letters and digits are kept. Purely numeric tickets lose their
/// leading zeros (`"000"` becomes `"0"`); tickets containing letters keep
/// their content and case.
pub fn normalize_ticket(raw: &str) -> String {
    let cleaned: String = raw.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_digit()) {
        let trimmed = cleaned.trim_start_matches('0');
        if trimmed.is_empty() {
            return "0".to_string();
        }
        return trimmed.to_string();
    }
    cleaned
}

/// Position of the first participant whose ticket matches `raw_ticket`.
///
/// Linear scan in roster order; duplicates resolve to the earliest entry.
pub fn resolve_target(participants: &[Participant], raw_ticket: &str) -> Result<usize, SpinError> {
    let wanted = normalize_ticket(raw_ticket);
    if wanted.is_empty() {
        return Err(SpinError::EmptyTicket);
    }
    participants
        .iter()
        .position(|p| normalize_ticket(&p.ticket_number) == wanted)
        .ok_or_else(|| SpinError::NotFound {
            ticket: raw_ticket.trim().to_string(),
        })
}

/// Normalized ticket -> first index, built once per roster.
///
/// Gives the same answers as [`resolve_target`] in O(1) per lookup, which
/// matters when the same 100k roster is spun repeatedly.
#[derive(Clone, Debug, Default)]
pub struct TicketIndex {
    first_index: FnvHashMap<String, usize>,
    duplicates: usize,
}

impl TicketIndex {
    pub fn build(participants: &[Participant]) -> Self {
        let mut first_index =
            FnvHashMap::with_capacity_and_hasher(participants.len(), Default::default());
        let mut duplicates = 0usize;
        for (i, p) in participants.iter().enumerate() {
            let key = normalize_ticket(&p.ticket_number);
            if key.is_empty() {
                continue;
            }
            if first_index.contains_key(&key) {
                duplicates += 1;
            } else {
                first_index.insert(key, i);
            }
        }
        if duplicates > 0 {
            log::warn!(
                "[resolve] roster has {} duplicate ticket(s); earliest entry wins",
                duplicates
            );
        }
        Self {
            first_index,
            duplicates,
        }
    }

    pub fn resolve(&self, raw_ticket: &str) -> Result<usize, SpinError> {
        let wanted = normalize_ticket(raw_ticket);
        if wanted.is_empty() {
            return Err(SpinError::EmptyTicket);
        }
        self.first_index
            .get(&wanted)
            .copied()
            .ok_or_else(|| SpinError::NotFound {
                ticket: raw_ticket.trim().to_string(),
            })
    }

    /// Number of entries shadowed by an earlier entry with the same ticket.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    pub fn len(&self) -> usize {
        self.first_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.first_index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(tickets: &[&str]) -> Vec<Participant> {
        tickets
            .iter()
            .enumerate()
            .map(|(i, t)| Participant::new(format!("P{i}"), "Test", *t))
            .collect()
    }

    #[test]
    fn zero_padding_and_whitespace_are_equivalent() {
        assert_eq!(normalize_ticket("007"), "7");
        assert_eq!(normalize_ticket("7"), "7");
        assert_eq!(normalize_ticket(" 007 "), "7");
        assert_eq!(normalize_ticket("0-0-7"), "7");
    }

    #[test]
    fn all_zero_ticket_keeps_one_zero() {
        assert_eq!(normalize_ticket("000"), "0");
        assert_eq!(normalize_ticket("0"), "0");
    }

    #[test]
    fn alphanumeric_tickets_keep_case_and_zeros() {
        assert_eq!(normalize_ticket("ABC007"), "ABC007");
        assert_eq!(normalize_ticket(" abc-007 "), "abc007");
        assert_eq!(normalize_ticket("00A1"), "00A1");
    }

    #[test]
    fn non_ascii_characters_are_dropped_on_both_sides() {
        // Fullwidth and Arabic-Indic digits never survive as un-strippable zeros
        assert_eq!(normalize_ticket("００７"), "");
        assert_eq!(normalize_ticket("٠٠٧"), "");
        assert_eq!(normalize_ticket("Ä-007"), "7");
        assert_eq!(normalize_ticket("Å12B"), "12B");
        let list = roster(&["Ä-007", "008"]);
        assert_eq!(resolve_target(&list, "7"), Ok(0));
        assert_eq!(resolve_target(&list, "００７"), Err(SpinError::EmptyTicket));
    }

    #[test]
    fn blank_input_normalizes_to_empty() {
        assert_eq!(normalize_ticket(""), "");
        assert_eq!(normalize_ticket("  \t"), "");
        assert_eq!(normalize_ticket("#-#"), "");
    }

    #[test]
    fn resolve_returns_first_duplicate() {
        let list = roster(&["001", "002", "2", "003"]);
        assert_eq!(resolve_target(&list, "2"), Ok(1));
        let index = TicketIndex::build(&list);
        assert_eq!(index.resolve("0002"), Ok(1));
        assert_eq!(index.duplicates(), 1);
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn resolve_rejects_blank_and_missing() {
        let list = roster(&["001", "002"]);
        assert_eq!(resolve_target(&list, "   "), Err(SpinError::EmptyTicket));
        assert_eq!(
            resolve_target(&list, " 999 "),
            Err(SpinError::NotFound {
                ticket: "999".into()
            })
        );
        let index = TicketIndex::build(&list);
        assert_eq!(index.resolve(""), Err(SpinError::EmptyTicket));
        assert!(matches!(index.resolve("999"), Err(SpinError::NotFound { .. })));
    }

    #[test]
    fn index_agrees_with_linear_scan() {
        let list = roster(&["A1", "a1", "010", "10", "B-2", "0"]);
        let index = TicketIndex::build(&list);
        for probe in ["A1", "a1", "10", "0010", "B2", "b2", "000", "x"] {
            assert_eq!(index.resolve(probe), resolve_target(&list, probe), "probe {probe}");
        }
    }
}
