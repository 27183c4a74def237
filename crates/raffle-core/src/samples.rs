use crate::participant::Participant;
use rand::seq::SliceRandom;
use rand::Rng;

pub const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Christopher", "Karen", "Charles", "Lisa", "Daniel", "Nancy", "Matthew", "Betty", "Anthony",
    "Helen", "Mark", "Sandra", "Donald", "Donna", "Steven", "Carol", "Kenneth", "Ruth", "Andrew",
    "Sharon", "Joshua", "Michelle", "Kevin", "Laura", "Brian", "Emily", "George", "Kimberly",
    "Timothy", "Deborah", "Ronald", "Dorothy", "Edward", "Amy", "Jason", "Angela", "Jeffrey",
    "Ashley",
];

pub const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores", "Green", "Adams", "Nelson", "Baker", "Hall",
    "Rivera", "Campbell", "Mitchell", "Carter", "Roberts", "Gomez", "Phillips", "Evans",
    "Turner", "Diaz",
];

/// Last ticket of a run of `count` starting at `start_ticket`, or `None` if
/// it does not fit in a `u64`.
pub fn last_ticket(count: usize, start_ticket: u64) -> Option<u64> {
    let span = u64::try_from(count).ok()?.checked_sub(1)?;
    start_ticket.checked_add(span)
}

/// `count` participants with tickets `start_ticket..start_ticket + count`.
///
/// `None` when the ticket range would overflow `u64`.
pub fn generate_participants<R: Rng + ?Sized>(
    count: usize,
    start_ticket: u64,
    rng: &mut R,
) -> Option<Vec<Participant>> {
    if count == 0 {
        return Some(Vec::new());
    }
    let width = last_ticket(count, start_ticket)?.to_string().len();
    let roster = (0..count as u64)
        .map(|i| {
            let first = FIRST_NAMES.choose(rng).copied().unwrap_or("Alex");
            let last = LAST_NAMES.choose(rng).copied().unwrap_or("Doe");
            Participant::new(first, last, format!("{:0width$}", start_ticket + i))
        })
        .collect();
    Some(roster)
}

/// Standard roster sizes used to exercise the reel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SampleRoster {
    K5,
    K10,
    K25,
    K50,
    K100,
}

impl SampleRoster {
    pub const ALL: [SampleRoster; 5] = [
        SampleRoster::K5,
        SampleRoster::K10,
        SampleRoster::K25,
        SampleRoster::K50,
        SampleRoster::K100,
    ];

    pub fn count(self) -> usize {
        match self {
            SampleRoster::K5 => 5_000,
            SampleRoster::K10 => 10_000,
            SampleRoster::K25 => 25_000,
            SampleRoster::K50 => 50_000,
            SampleRoster::K100 => 100_000,
        }
    }

    pub fn start_ticket(self) -> u64 {
        match self {
            SampleRoster::K5 => 10_001,
            SampleRoster::K10 => 20_001,
            SampleRoster::K25 => 50_001,
            SampleRoster::K50 => 100_001,
            SampleRoster::K100 => 200_001,
        }
    }

    /// Smallest preset holding at least `count` entries.
    pub fn for_count(count: usize) -> Option<SampleRoster> {
        Self::ALL.into_iter().find(|s| s.count() >= count)
    }

    pub fn generate<R: Rng + ?Sized>(self, rng: &mut R) -> Vec<Participant> {
        // Preset ranges end far below u64::MAX
        generate_participants(self.count(), self.start_ticket(), rng).unwrap_or_default()
    }
}
