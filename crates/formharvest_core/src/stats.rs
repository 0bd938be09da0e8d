use serde::{Deserialize, Serialize};

/// Response counters shown on a form's results page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub answered: u64,
    pub started: u64,
    pub invited: u64,
}

impl Stats {
    /// Build from the raw counter texts; each unreadable counter becomes 0.
    pub fn from_counters(answered: Option<&str>, started: Option<&str>, invited: Option<&str>) -> Self {
        Self {
            answered: parse_counter(answered),
            started: parse_counter(started),
            invited: parse_counter(invited),
        }
    }
}

/// Parse a rendered counter, defaulting to 0 for missing or non-numeric text.
pub fn parse_counter(text: Option<&str>) -> u64 {
    text.and_then(|raw| raw.trim().parse::<u64>().ok())
        .unwrap_or(0)
}
