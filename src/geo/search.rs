use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Tunables for the search-as-you-type session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTuning {
    pub debounce_ms: i64,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

/// Handle for one fired query; carries the generation that must still be
/// current when results arrive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub query: String,
    generation: u64,
}

impl QueryTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What happened to a completed query's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    /// A newer keystroke superseded this query; the results must be dropped.
    Stale,
}

/// Debounced keystroke-to-query session with stale-result rejection.
///
/// The host calls `keystroke` on input, `poll` on its event loop, and
/// `accept` when an in-flight query completes. Each keystroke bumps a
/// generation counter; only results carrying the latest generation are
/// applied, so late responses from abandoned queries can never overwrite
/// fresher ones. Time is passed in by the caller, keeping the session
/// deterministic under test.
#[derive(Debug, Default)]
pub struct SearchDebouncer {
    tuning: SearchTuning,
    generation: u64,
    pending: Option<(String, DateTime<Utc>)>,
}

impl SearchDebouncer {
    #[must_use]
    pub fn new(tuning: SearchTuning) -> Self {
        Self {
            tuning,
            generation: 0,
            pending: None,
        }
    }

    /// Records a keystroke; any not-yet-fired query is replaced.
    pub fn keystroke(&mut self, query: impl Into<String>, now: DateTime<Utc>) {
        self.generation += 1;
        self.pending = Some((query.into(), now));
    }

    /// Fires the pending query once the debounce window has elapsed.
    ///
    /// Returns at most one ticket per keystroke burst.
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<QueryTicket> {
        let (_, typed_at) = self.pending.as_ref()?;
        if now - *typed_at < Duration::milliseconds(self.tuning.debounce_ms) {
            return None;
        }

        let (query, _) = self.pending.take()?;
        Some(QueryTicket {
            query,
            generation: self.generation,
        })
    }

    /// Decides whether a completed query's results may be applied.
    #[must_use]
    pub fn accept(&self, ticket: &QueryTicket) -> SearchOutcome {
        if ticket.generation == self.generation {
            SearchOutcome::Applied
        } else {
            debug!(
                query = ticket.query.as_str(),
                ticket_generation = ticket.generation,
                current_generation = self.generation,
                "discarding stale search result"
            );
            SearchOutcome::Stale
        }
    }
}
