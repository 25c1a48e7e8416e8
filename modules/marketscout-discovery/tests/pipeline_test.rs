//! End-to-end pipeline runs over mock chat and geocode clients.

use std::sync::Arc;

use async_trait::async_trait;
use llm_client::{ChatClient, LlmError};
use mapbox_client::{GeocodeClient, GeocodeError};
use marketscout_common::EntityKind;
use marketscout_discovery::{DiscoveryOptions, DiscoveryPipeline};

/// Serves a canned response for each fan-out query that contains a
/// configured needle; all other queries fail at the transport.
struct ScriptedChat {
    responses: Vec<(&'static str, &'static str)>,
}

#[async_trait]
impl ChatClient for ScriptedChat {
    async fn complete(&self, _system: &str, user_prompt: &str) -> llm_client::Result<String> {
        for (needle, response) in &self.responses {
            if user_prompt.contains(needle) {
                return Ok(response.to_string());
            }
        }
        Err(LlmError::Network("scripted failure".to_string()))
    }
}

/// Resolves anything except Atlantis to fixed San Francisco coords.
struct FakeGeocode;

#[async_trait]
impl GeocodeClient for FakeGeocode {
    async fn forward(
        &self,
        query: &str,
        _country_hint: Option<&str>,
    ) -> mapbox_client::Result<Option<(f64, f64)>> {
        if query.contains("Atlantis") {
            return Err(GeocodeError::Network("unreachable".to_string()));
        }
        Ok(Some((37.7749, -122.4194)))
    }
}

fn pipeline(responses: Vec<(&'static str, &'static str)>) -> DiscoveryPipeline {
    DiscoveryPipeline::new(Arc::new(ScriptedChat { responses }), Arc::new(FakeGeocode))
}

#[tokio::test]
async fn duplicate_across_queries_keeps_first_seen_and_model_score() {
    let pipeline = pipeline(vec![
        (
            "founders/CEOs",
            r#"[{"name":"Alice Smith","location":"San Francisco, USA","links":["https://linkedin.com/in/alicesmith"],"match_score":9}]"#,
        ),
        (
            "technical founders",
            r#"[{"name":"Alice Smith","location":"San Francisco, USA","links":["https://twitter.com/alice"]}]"#,
        ),
    ]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.total_found, 1);
    assert_eq!(result.records.len(), 1);
    let record = &result.records[0];
    assert_eq!(record.candidate.name(), "Alice Smith");
    assert_eq!(record.score, 9);
    assert_eq!(
        record.candidate.links(),
        &["https://linkedin.com/in/alicesmith".to_string()]
    );
}

#[tokio::test]
async fn total_fan_out_failure_returns_wellformed_empty_result() {
    let pipeline = pipeline(Vec::new());

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.total_found, 0);
    assert!(result.records.is_empty());
    assert_eq!(result.summary.returned, 0);
    assert_eq!(result.summary.average_score, 0.0);
}

#[tokio::test]
async fn one_failed_query_still_produces_partial_results() {
    // Only one of the seven cofounder queries answers.
    let pipeline = pipeline(vec![(
        "Crunchbase or AngelList",
        r#"[{"name":"Bob Jones","location":"London, UK","links":["https://crunchbase.com/person/bob"]}]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.total_found, 1);
    assert_eq!(result.records[0].candidate.name(), "Bob Jones");
}

#[tokio::test]
async fn invalid_records_are_dropped_silently() {
    let pipeline = pipeline(vec![(
        "founders/CEOs",
        r#"Here you go:
[
  {"name":"Alice Smith","location":"San Francisco, USA","links":["https://linkedin.com/in/alicesmith"],"match_score":8},
  {"name":"Team Page","location":"Unknown","links":[]},
  {"name":"Bob","location":"London, UK","links":["https://a.com"]},
  {"name":"Carol Croft","location":"Somewhere","links":["https://b.com"]}
]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.total_found, 1);
    assert_eq!(result.records[0].candidate.name(), "Alice Smith");
}

#[tokio::test]
async fn results_are_ranked_and_truncated() {
    let pipeline = pipeline(vec![(
        "founders/CEOs",
        r#"[
  {"name":"Low Scorer","location":"Nowhere, Atlantis","links":["https://a.xyz"],"match_score":2},
  {"name":"High Scorer","location":"San Francisco, USA","links":["https://b.com"],"match_score":10},
  {"name":"Mid Scorer","location":"London, UK","links":["https://c.com"],"match_score":6}
]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions {
                max_results: 2,
                include_coordinates: false,
            },
        )
        .await;

    assert_eq!(result.total_found, 3);
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].candidate.name(), "High Scorer");
    assert_eq!(result.records[1].candidate.name(), "Mid Scorer");
    // Coordinates were not requested.
    assert!(result.records.iter().all(|r| r.coordinates.is_none()));
}

#[tokio::test]
async fn geocoding_failure_degrades_to_fallback_coordinates() {
    let pipeline = pipeline(vec![(
        "founders/CEOs",
        r#"[{"name":"Dora Deep","location":"Nowhereville, Atlantis","links":["https://d.com"],"match_score":5}]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    let coordinates = result.records[0].coordinates.expect("coordinates requested");
    // Global fallback: London.
    assert_eq!(coordinates.latitude, Some(51.5074));
    assert_eq!(coordinates.longitude, Some(-0.1278));
}

#[tokio::test]
async fn out_of_range_model_score_is_recalculated() {
    let pipeline = pipeline(vec![(
        "founders/CEOs",
        r#"[{"name":"Eve Early","location":"Nowhere, Utopia","links":["https://e.xyz"],"match_score":15}]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    // Not clamped to 10: the sparse record's calculated score is low.
    assert!(result.records[0].score < 10);
    assert!(result.records[0].score >= 1);
}

#[tokio::test]
async fn investor_run_separates_same_name_at_different_firms() {
    let pipeline = pipeline(vec![
        (
            "VC partners",
            r#"[{"name":"Jane Roe","firm":"Accel","location":"London, UK","links":["https://accel.com"],"match_score":8}]"#,
        ),
        (
            "angel investors",
            r#"[{"name":"Jane Roe","firm":"Benchmark","location":"San Francisco, USA","links":["https://benchmark.com"],"match_score":7}]"#,
        ),
    ]);

    let result = pipeline
        .run(
            EntityKind::Investor,
            "fintech",
            Some("seed"),
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.total_found, 2);
}

#[tokio::test]
async fn competitor_run_serializes_threat_score() {
    let pipeline = pipeline(vec![(
        "direct competitors",
        r#"[{"company_name":"Acme AI","location":"Berlin, Germany","links":["https://acme.ai","https://crunchbase.com/acme"],"date_founded":"2019","threat_score":8,"explanation":{"angle":["API-first"],"what_they_cover":["contracts"],"gaps":["no EU hosting"]}}]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Competitor,
            "contract automation",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.total_found, 1);
    let json = result.records[0].to_json();
    assert_eq!(json["threat_score"], 8);
    assert_eq!(json["company_name"], "Acme AI");
    assert_eq!(json["date_founded"], "2019");
    assert_eq!(json["explanation"]["angle"][0], "API-first");
}

#[tokio::test]
async fn summary_reflects_returned_records() {
    let pipeline = pipeline(vec![(
        "founders/CEOs",
        r#"[
  {"name":"Ann Ames","location":"San Francisco, USA","links":["https://linkedin.com/in/ann","https://x.com/ann"],"match_score":9},
  {"name":"Bea Bones","location":"London, UK","links":["https://crunchbase.com/bea"],"match_score":8}
]"#,
    )]);

    let result = pipeline
        .run(
            EntityKind::Cofounder,
            "legal technology",
            None,
            DiscoveryOptions::default(),
        )
        .await;

    assert_eq!(result.summary.with_linkedin, 1);
    assert_eq!(result.summary.with_twitter, 1);
    assert_eq!(result.summary.with_crunchbase, 1);
    assert_eq!(result.summary.with_multiple_links, 1);
    assert_eq!(result.summary.average_score, 8.5);
    assert_eq!(result.summary.high_scores_8plus, 2);
}
