//! Final ordering, truncation, and aggregate statistics.

use marketscout_common::{DiscoverySummary, PipelineResult, ScoredRecord};

/// Sort by score descending (stable, so equal scores keep dedup
/// order), truncate to `max_results`, and summarize the returned
/// subset. Pure computation over already-validated data.
pub fn rank(mut records: Vec<ScoredRecord>, max_results: usize) -> PipelineResult {
    records.sort_by(|a, b| b.score.cmp(&a.score));
    let total_found = records.len();
    records.truncate(max_results);
    let summary = summarize(&records, total_found);
    PipelineResult {
        records,
        total_found,
        summary,
    }
}

fn summarize(returned: &[ScoredRecord], total_found: usize) -> DiscoverySummary {
    let has_link = |record: &ScoredRecord, needles: &[&str]| {
        record
            .candidate
            .links()
            .iter()
            .any(|link| needles.iter().any(|needle| link.to_lowercase().contains(needle)))
    };

    let average_score = if returned.is_empty() {
        0.0
    } else {
        let sum: u32 = returned.iter().map(|r| u32::from(r.score)).sum();
        (sum as f64 / returned.len() as f64 * 10.0).round() / 10.0
    };

    DiscoverySummary {
        total_found,
        returned: returned.len(),
        with_linkedin: returned
            .iter()
            .filter(|r| has_link(r, &["linkedin.com"]))
            .count(),
        with_twitter: returned
            .iter()
            .filter(|r| has_link(r, &["twitter.com", "x.com"]))
            .count(),
        with_crunchbase: returned
            .iter()
            .filter(|r| has_link(r, &["crunchbase.com"]))
            .count(),
        with_multiple_links: returned
            .iter()
            .filter(|r| r.candidate.links().len() > 1)
            .count(),
        average_score,
        high_scores_8plus: returned.iter().filter(|r| r.score >= 8).count(),
    }
}
