//! The discovery pipeline driver.
//!
//! One linear pass per invocation, no state between runs:
//! fan-out → execute → extract → validate → dedup → score →
//! geocode → rank.

use std::sync::Arc;

use llm_client::ChatClient;
use mapbox_client::GeocodeClient;
use marketscout_common::{Candidate, EntityKind, PipelineResult, ScoredRecord};
use tracing::{debug, info};

use crate::{dedup, executor, extract, geocode::Geocoder, queries, rank, score, validate};

#[derive(Debug, Clone, Copy)]
pub struct DiscoveryOptions {
    pub max_results: usize,
    pub include_coordinates: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            max_results: 20,
            include_coordinates: true,
        }
    }
}

pub struct DiscoveryPipeline {
    chat: Arc<dyn ChatClient>,
    geocoder: Geocoder,
}

impl DiscoveryPipeline {
    pub fn new(chat: Arc<dyn ChatClient>, geocode_client: Arc<dyn GeocodeClient>) -> Self {
        Self {
            chat,
            geocoder: Geocoder::new(geocode_client),
        }
    }

    /// Run one discovery pass. "No data found" is a valid outcome:
    /// even a total fan-out failure yields a well-formed empty result.
    pub async fn run(
        &self,
        kind: EntityKind,
        domain: &str,
        stage: Option<&str>,
        options: DiscoveryOptions,
    ) -> PipelineResult {
        let prompts = queries::fan_out(kind, domain, stage);
        info!(kind = kind.label(), %domain, queries = prompts.len(), "starting discovery run");

        let responses =
            executor::run_fan_out(self.chat.clone(), queries::system_prompt(kind), prompts).await;

        let mut candidates: Vec<Candidate> = Vec::new();
        for (index, response) in responses.iter().enumerate() {
            let Some(text) = response else { continue };
            let entries = extract::first_json_array(text);
            debug!(query = index, entries = entries.len(), "extracted entries");
            for raw in &entries {
                match validate::build_candidate(kind, raw) {
                    Ok(candidate) => candidates.push(candidate),
                    Err(reason) => debug!(query = index, %reason, "rejected record"),
                }
            }
        }

        let candidates = dedup::dedup(candidates);
        info!(kind = kind.label(), unique = candidates.len(), "validated and deduplicated");

        let mut records: Vec<ScoredRecord> = candidates
            .into_iter()
            .map(|candidate| {
                let (final_score, source) = score::finalize(&candidate, domain);
                debug!(
                    name = candidate.name(),
                    score = final_score,
                    source = ?source,
                    "finalized score"
                );
                ScoredRecord {
                    candidate,
                    score: final_score,
                    coordinates: None,
                }
            })
            .collect();

        if options.include_coordinates && !records.is_empty() {
            let locations: Vec<String> = records
                .iter()
                .map(|record| record.candidate.location().to_string())
                .collect();
            let geocoded = self.geocoder.resolve_all(&locations).await;
            for (record, resolved) in records.iter_mut().zip(geocoded) {
                record.coordinates = Some(resolved.coordinates);
            }
        }

        rank::rank(records, options.max_results)
    }
}
