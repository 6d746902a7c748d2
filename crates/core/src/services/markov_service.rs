use tracing::debug;

use crate::datetime::WallClock;
use crate::models::entry::Entry;
use crate::models::prediction::{Analysis, MarkovAnalysis, TimelineHistogram, TransitionCounts};
use crate::models::time_range::classify_hour;

/// Builds first-order transition counts and successor-timing histograms
/// from a journal's entries.
///
/// Pure computation over the full entry list; the caller re-runs it after
/// every mutation (O(n log n) per call).
pub struct MarkovService {
    clock: WallClock,
}

impl MarkovService {
    pub fn new(clock: WallClock) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &WallClock {
        &self.clock
    }

    /// Entries in ascending `datetime` order.
    ///
    /// The sort is stable: entries with identical timestamps keep their
    /// original insertion order.
    pub fn sorted<'a>(&self, entries: &'a [Entry]) -> Vec<&'a Entry> {
        let mut sorted: Vec<&Entry> = entries.iter().collect();
        sorted.sort_by_key(|e| e.datetime);
        sorted
    }

    /// Analyse the transitions between consecutive entries.
    ///
    /// For each adjacent pair `(current, next)`:
    /// - `transitions[current.type][next.type]` is incremented, and
    /// - the timing histogram of `next.type` records `next`'s local weekday
    ///   and time bucket.
    ///
    /// The histograms therefore describe when each type has occurred *as a
    /// successor*; they are not conditioned on the current state.
    pub fn analyze(&self, entries: &[Entry]) -> Analysis {
        let sorted = self.sorted(entries);
        let Some(last) = sorted.last().filter(|_| sorted.len() >= 2) else {
            debug!(entries = sorted.len(), "not enough entries for transition analysis");
            return Analysis::InsufficientData {
                entry_count: sorted.len(),
            };
        };

        let mut transitions = TransitionCounts::default();
        let mut timelines = [TimelineHistogram::default(); 2];

        for pair in sorted.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            transitions.record(current.event_type, next.event_type);

            let day = self.clock.weekday_index(&next.datetime);
            // The table covers every hour, so the fallback is never taken.
            let bucket = classify_hour(self.clock.hour(&next.datetime)).unwrap_or(0);
            timelines[next.event_type.as_index()].record(day, bucket);
        }

        debug!(
            entries = sorted.len(),
            last_type = %last.event_type,
            "transition analysis complete"
        );

        Analysis::Ready(MarkovAnalysis {
            transitions,
            last_type: last.event_type,
            timelines,
            entry_count: sorted.len(),
        })
    }
}

impl Default for MarkovService {
    fn default() -> Self {
        Self::new(WallClock::System)
    }
}
