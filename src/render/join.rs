use indexmap::{IndexMap, IndexSet};
use tracing::debug;

use crate::render::marks::Mark;

/// One outcome of the keyed diff between the previous and next mark sets.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinPhase {
    Enter(Mark),
    Update { key: String, to: Mark },
    Exit { key: String },
}

/// Keyed enter/update/exit diff.
///
/// Deterministic and side-effect free: enters and updates come out in
/// `next` order, exits in `previous` order. Duplicate keys in `next` are
/// dropped after the first occurrence so repeated applications of the same
/// data can never accumulate marks.
#[must_use]
pub fn keyed_join(previous: &[Mark], next: &[Mark]) -> Vec<JoinPhase> {
    let previous_keys: IndexSet<&str> = previous.iter().map(Mark::key).collect();

    let mut seen: IndexMap<&str, ()> = IndexMap::with_capacity(next.len());
    let mut phases = Vec::with_capacity(next.len() + previous.len());

    for mark in next {
        if seen.insert(mark.key(), ()).is_some() {
            debug!(key = mark.key(), "duplicate mark key in join input, dropped");
            continue;
        }

        if previous_keys.contains(mark.key()) {
            phases.push(JoinPhase::Update {
                key: mark.key().to_owned(),
                to: mark.clone(),
            });
        } else {
            phases.push(JoinPhase::Enter(mark.clone()));
        }
    }

    for mark in previous {
        if !seen.contains_key(mark.key()) {
            phases.push(JoinPhase::Exit {
                key: mark.key().to_owned(),
            });
        }
    }

    phases
}
