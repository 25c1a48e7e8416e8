use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which discovery surface a record came from. The pipeline is the
/// same shape for all three; field names, denylists, and scoring
/// weights differ per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Cofounder,
    Investor,
    Competitor,
}

impl EntityKind {
    /// The serialized name of the finalized score field.
    pub fn score_field(&self) -> &'static str {
        match self {
            EntityKind::Competitor => "threat_score",
            _ => "match_score",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Cofounder => "cofounder",
            EntityKind::Investor => "investor",
            EntityKind::Competitor => "competitor",
        }
    }
}

/// Three labeled bullet groups the model attaches to investor records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvestorExplanation {
    #[serde(default)]
    pub recent_investments: Vec<String>,
    #[serde(default)]
    pub investment_thesis: Vec<String>,
    #[serde(default)]
    pub how_to_pitch: Vec<String>,
}

/// Three labeled bullet groups the model attaches to competitor records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompetitorExplanation {
    #[serde(default)]
    pub angle: Vec<String>,
    #[serde(default)]
    pub what_they_cover: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
}

/// A potential cofounder. `provided_score` is the model's own 1-10
/// rating when it supplied one; the finalized score replaces it in
/// serialized output.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CofounderRecord {
    pub name: String,
    pub location: String,
    pub links: Vec<String>,
    #[serde(skip_serializing)]
    pub provided_score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InvestorRecord {
    pub name: String,
    pub firm: String,
    pub location: String,
    pub links: Vec<String>,
    #[serde(skip_serializing)]
    pub provided_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<InvestorExplanation>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CompetitorRecord {
    pub company_name: String,
    pub location: String,
    pub links: Vec<String>,
    /// Founding year as the model reported it, or "Unknown".
    pub date_founded: String,
    #[serde(skip_serializing)]
    pub provided_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<CompetitorExplanation>,
}

/// A validated record of any kind. Construction happens in the
/// validator; a `Candidate` is either fully valid or never built.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Cofounder(CofounderRecord),
    Investor(InvestorRecord),
    Competitor(CompetitorRecord),
}

impl Candidate {
    pub fn kind(&self) -> EntityKind {
        match self {
            Candidate::Cofounder(_) => EntityKind::Cofounder,
            Candidate::Investor(_) => EntityKind::Investor,
            Candidate::Competitor(_) => EntityKind::Competitor,
        }
    }

    /// Display name: person name or company name.
    pub fn name(&self) -> &str {
        match self {
            Candidate::Cofounder(r) => &r.name,
            Candidate::Investor(r) => &r.name,
            Candidate::Competitor(r) => &r.company_name,
        }
    }

    pub fn location(&self) -> &str {
        match self {
            Candidate::Cofounder(r) => &r.location,
            Candidate::Investor(r) => &r.location,
            Candidate::Competitor(r) => &r.location,
        }
    }

    pub fn links(&self) -> &[String] {
        match self {
            Candidate::Cofounder(r) => &r.links,
            Candidate::Investor(r) => &r.links,
            Candidate::Competitor(r) => &r.links,
        }
    }

    pub fn provided_score(&self) -> Option<f64> {
        match self {
            Candidate::Cofounder(r) => r.provided_score,
            Candidate::Investor(r) => r.provided_score,
            Candidate::Competitor(r) => r.provided_score,
        }
    }

    /// Deduplication identity. Lower-cased trimmed name; investors
    /// include the firm so partners sharing a name stay distinct.
    pub fn entity_key(&self) -> EntityKey {
        let key = match self {
            Candidate::Cofounder(r) => r.name.trim().to_lowercase(),
            Candidate::Investor(r) => format!(
                "{}|{}",
                r.name.trim().to_lowercase(),
                r.firm.trim().to_lowercase()
            ),
            Candidate::Competitor(r) => r.company_name.trim().to_lowercase(),
        };
        EntityKey(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinates {
    pub fn known(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn unknown() -> Self {
        Self {
            latitude: None,
            longitude: None,
        }
    }
}

/// A candidate with its finalized 1-10 score and, when requested,
/// resolved coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord {
    pub candidate: Candidate,
    pub score: u8,
    pub coordinates: Option<Coordinates>,
}

impl ScoredRecord {
    /// Serialize with exactly the candidate's fields plus the
    /// kind-named score field and `coordinates`.
    pub fn to_json(&self) -> Value {
        let mut value = match &self.candidate {
            Candidate::Cofounder(r) => serde_json::to_value(r),
            Candidate::Investor(r) => serde_json::to_value(r),
            Candidate::Competitor(r) => serde_json::to_value(r),
        }
        .unwrap_or_else(|_| Value::Object(Default::default()));

        if let Value::Object(map) = &mut value {
            map.insert(
                self.candidate.kind().score_field().to_string(),
                Value::from(self.score),
            );
            let coords = match &self.coordinates {
                Some(c) => serde_json::to_value(c).unwrap_or(Value::Null),
                None => Value::Null,
            };
            map.insert("coordinates".to_string(), coords);
        }
        value
    }
}

/// Aggregate statistics over the returned subset of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DiscoverySummary {
    pub total_found: usize,
    pub returned: usize,
    pub with_linkedin: usize,
    pub with_twitter: usize,
    pub with_crunchbase: usize,
    pub with_multiple_links: usize,
    pub average_score: f64,
    pub high_scores_8plus: usize,
}

/// One pipeline run's output: ranked records, pre-truncation total,
/// and the summary. Serialized once into the API response.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub records: Vec<ScoredRecord>,
    pub total_found: usize,
    pub summary: DiscoverySummary,
}

impl PipelineResult {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total_found: 0,
            summary: DiscoverySummary::default(),
        }
    }

    /// Serialize with the record array under a caller-chosen key
    /// ("cofounders", "vcs", "competitors").
    pub fn to_json(&self, records_key: &str) -> Value {
        serde_json::json!({
            records_key: self.records.iter().map(ScoredRecord::to_json).collect::<Vec<_>>(),
            "total_found": self.total_found,
            "summary": self.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cofounder(name: &str) -> Candidate {
        Candidate::Cofounder(CofounderRecord {
            name: name.to_string(),
            location: "San Francisco, USA".to_string(),
            links: vec!["https://linkedin.com/in/x".to_string()],
            provided_score: None,
        })
    }

    #[test]
    fn entity_key_normalizes_case_and_whitespace() {
        assert_eq!(
            cofounder("  Alice Smith ").entity_key(),
            cofounder("alice smith").entity_key()
        );
    }

    #[test]
    fn investor_key_includes_firm() {
        let a = Candidate::Investor(InvestorRecord {
            name: "Jane Roe".to_string(),
            firm: "Accel".to_string(),
            location: "London, UK".to_string(),
            links: vec!["https://accel.com".to_string()],
            provided_score: None,
            explanation: None,
        });
        let b = Candidate::Investor(InvestorRecord {
            firm: "Benchmark".to_string(),
            ..match a.clone() {
                Candidate::Investor(r) => r,
                _ => unreachable!(),
            }
        });
        assert_ne!(a.entity_key(), b.entity_key());
    }

    #[test]
    fn scored_record_serializes_score_and_coordinates() {
        let record = ScoredRecord {
            candidate: cofounder("Alice Smith"),
            score: 9,
            coordinates: Some(Coordinates::known(37.77, -122.42)),
        };
        let json = record.to_json();
        assert_eq!(json["match_score"], 9);
        assert_eq!(json["coordinates"]["latitude"], 37.77);
        assert_eq!(json["name"], "Alice Smith");
        // The model-provided score never leaks into output.
        assert!(json.get("provided_score").is_none());
    }

    #[test]
    fn competitor_serializes_threat_score() {
        let record = ScoredRecord {
            candidate: Candidate::Competitor(CompetitorRecord {
                company_name: "Acme AI".to_string(),
                location: "Berlin, Germany".to_string(),
                links: vec!["https://acme.ai".to_string()],
                date_founded: "2020".to_string(),
                provided_score: Some(7.0),
                explanation: None,
            }),
            score: 7,
            coordinates: None,
        };
        let json = record.to_json();
        assert_eq!(json["threat_score"], 7);
        assert!(json["coordinates"].is_null());
    }
}
