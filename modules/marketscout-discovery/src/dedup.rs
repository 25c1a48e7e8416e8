//! Identity-based deduplication across fan-out queries.

use std::collections::HashSet;

use marketscout_common::Candidate;

/// Keep one candidate per [`EntityKey`](marketscout_common::EntityKey),
/// first-seen-wins in fan-out-query order. Scoring happens after this
/// stage, so the survivor is whichever textual variant appeared first,
/// not necessarily the richest one.
pub fn dedup(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.entity_key()))
        .collect()
}
