use std::collections::VecDeque;

/// Roster indices sampled backwards from the winner with modular indexing.
/// The last entry is always the winner; growing prepends at the head, so the
/// tail never moves. Cost follows the window length, not the roster size.
#[derive(Clone, Debug)]
pub struct ReelWindow {
    entries: VecDeque<usize>,
    population: usize,
    target: usize,
}

/// Roster index `k` places before `target`, wrapping around the roster.
#[inline]
fn sample_before(target: usize, k: usize, population: usize) -> usize {
    (target + population - k % population) % population
}

impl ReelWindow {
    /// Window of `required_len` entries (at least one) ending in `target_index`.
    ///
    /// Returns `None` for an empty roster or an out-of-range target.
    pub fn build(population: usize, target_index: usize, required_len: usize) -> Option<Self> {
        if population == 0 || target_index >= population {
            return None;
        }
        let len = required_len.max(1);
        let entries = (0..len)
            .rev()
            .map(|k| sample_before(target_index, k, population))
            .collect::<VecDeque<_>>();
        Some(Self {
            entries,
            population,
            target: target_index,
        })
    }

    /// Prepend `by` more sampled entries at the head.
    pub fn extend(&mut self, by: usize) {
        if by == 0 {
            return;
        }
        let start = self.entries.len();
        self.entries.reserve(by);
        for k in start..start + by {
            self.entries
                .push_front(sample_before(self.target, k, self.population));
        }
        log::debug!(
            "[reel] extended window by {} to {} entries",
            by,
            self.entries.len()
        );
    }

    /// Grow the head until an entry `distance` places before the winner exists.
    pub fn ensure_distance(&mut self, distance: usize) {
        let have = self.max_distance();
        if distance > have {
            self.extend(distance - have);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: a built window always holds at least the winner.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn population(&self) -> usize {
        self.population
    }

    pub fn target_index(&self) -> usize {
        self.target
    }

    /// Roster index of the final entry, which is the winner.
    pub fn last(&self) -> usize {
        self.entries.back().copied().unwrap_or(self.target)
    }

    /// Roster index at window position `pos` (0 = head).
    pub fn get(&self, pos: usize) -> Option<usize> {
        self.entries.get(pos).copied()
    }

    /// Largest distance before the winner the window can answer for.
    pub fn max_distance(&self) -> usize {
        self.entries.len().saturating_sub(1)
    }

    /// Roster index of the entry `distance` rows before the winner.
    ///
    /// Negative distances are the rows after the winner, shown below the
    /// pointer once the reel lands; they continue the modular sequence
    /// forward and are not part of the window. Distances beyond the head
    /// return `None` until the window is extended.
    pub fn at_distance(&self, distance: i64) -> Option<usize> {
        if distance < 0 {
            let ahead = distance.unsigned_abs() as usize % self.population;
            return Some((self.target + ahead) % self.population);
        }
        let d = distance as usize;
        if d > self.max_distance() {
            return None;
        }
        self.get(self.entries.len() - 1 - d)
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().copied()
    }

    /// Window entries resolved against the roster they were sampled from.
    pub fn participants<'a, T>(&'a self, roster: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        self.entries.iter().filter_map(move |&i| roster.get(i))
    }
}
