use itertools::Itertools;

use crate::data::{Match, MatchView, Timestamp, Tournament, TournamentView};

/// Anything with a scheduled start, so list pages can sort and bucket
/// matches and tournaments with the same utilities.
pub trait Scheduled {
    fn starts_at(&self) -> Timestamp;
}

impl Scheduled for Tournament {
    fn starts_at(&self) -> Timestamp {
        self.start
    }
}

impl Scheduled for TournamentView {
    fn starts_at(&self) -> Timestamp {
        self.start
    }
}

impl Scheduled for Match {
    fn starts_at(&self) -> Timestamp {
        self.start
    }
}

impl Scheduled for MatchView {
    fn starts_at(&self) -> Timestamp {
        self.start
    }
}

/// Returns a copy of `items` ordered by start date, newest first. The sort
/// is stable: items sharing a start keep their relative input order. The
/// input is left untouched.
pub fn sorted_by_start_desc<T: Scheduled + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| b.starts_at().cmp(&a.starts_at()));
    sorted
}

/// Partitions a date-ordered list into consecutive runs sharing a calendar
/// day (same year, month and day of month). A single forward pass: a new
/// bucket starts whenever an item's date differs from its predecessor's,
/// so the input must already be date-ordered for buckets to be meaningful.
pub fn group_by_day<T: Scheduled + Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut grouped = Vec::new();
    for (_, run) in &items.iter().chunk_by(|item| item.starts_at().date()) {
        grouped.push(run.cloned().collect());
    }
    grouped
}
