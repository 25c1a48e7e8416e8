//! Record validation: typed construction that fails closed.
//!
//! The model hallucinates organizational entries, truncated names,
//! and placeholder locations. This is a deliberately conservative
//! rule-based filter, not a second model call — a raw field map
//! either builds a fully valid [`Candidate`] or is dropped with a
//! reason.

use marketscout_common::{
    Candidate, CofounderRecord, CompetitorExplanation, CompetitorRecord, EntityKind,
    InvestorExplanation, InvestorRecord,
};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RejectReason {
    #[error("not a JSON object")]
    NotAnObject,

    #[error("missing or empty required field: {0}")]
    MissingField(&'static str),

    #[error("links must be a non-empty array of URLs")]
    EmptyLinks,

    #[error("location is a placeholder value")]
    PlaceholderLocation,

    #[error("location is not in \"City, Country\" format")]
    LocationWithoutCountry,

    #[error("name has fewer than two tokens")]
    ShortName,

    #[error("name matches a non-person phrase")]
    NonPersonName,

    #[error("name contains a company suffix")]
    CompanySuffix,

    #[error("company name is a placeholder value")]
    PlaceholderCompanyName,
}

const LOCATION_PLACEHOLDERS: &[&str] = &[
    "unknown",
    "n/a",
    "not found",
    "not available",
    "n.a.",
    "tbd",
    "various",
    "remote",
    "global",
];

/// Phrases the model returns when it scraped a page instead of a person.
const NON_PERSON_COFOUNDER_NAMES: &[&str] = &[
    "Team Page",
    "About Us",
    "New York",
    "San Francisco",
    "Home Page",
    "Our Team",
    "Meet The",
    "Join Us",
    "Contact Us",
];

const NON_PERSON_INVESTOR_NAMES: &[&str] = &[
    "Team Page",
    "About Us",
    "Contact Us",
    "Portfolio",
    "Investments",
];

const COMPANY_SUFFIXES: &[&str] = &[
    "LLC", "Inc", "Ltd", "Corp", "Company", "Partners", "Group", "Capital",
];

const PLACEHOLDER_COMPANY_NAMES: &[&str] =
    &["Example Company", "Test Inc", "Sample Corp", "N/A", "Unknown"];

/// Build a typed candidate from one raw field map, or reject it.
pub fn build_candidate(kind: EntityKind, raw: &Value) -> Result<Candidate, RejectReason> {
    if !raw.is_object() {
        return Err(RejectReason::NotAnObject);
    }
    match kind {
        EntityKind::Cofounder => build_cofounder(raw),
        EntityKind::Investor => build_investor(raw),
        EntityKind::Competitor => build_competitor(raw),
    }
}

fn build_cofounder(raw: &Value) -> Result<Candidate, RejectReason> {
    let name = required_string(raw, "name")?;
    let location = valid_location(raw)?;
    let links = links(raw)?;
    check_person_name(&name, NON_PERSON_COFOUNDER_NAMES)?;
    check_company_suffix(&name)?;

    Ok(Candidate::Cofounder(CofounderRecord {
        name,
        location,
        links,
        provided_score: provided_score(raw, EntityKind::Cofounder),
    }))
}

fn build_investor(raw: &Value) -> Result<Candidate, RejectReason> {
    let name = required_string(raw, "name")?;
    let firm = required_string(raw, "firm")?;
    let location = valid_location(raw)?;
    let links = links(raw)?;
    check_person_name(&name, NON_PERSON_INVESTOR_NAMES)?;

    Ok(Candidate::Investor(InvestorRecord {
        name,
        firm,
        location,
        links,
        provided_score: provided_score(raw, EntityKind::Investor),
        explanation: raw
            .get("explanation")
            .cloned()
            .and_then(|v| serde_json::from_value::<InvestorExplanation>(v).ok()),
    }))
}

fn build_competitor(raw: &Value) -> Result<Candidate, RejectReason> {
    let company_name = required_string(raw, "company_name")?;
    let location = valid_location(raw)?;
    let links = links(raw)?;

    if PLACEHOLDER_COMPANY_NAMES.contains(&company_name.as_str()) {
        return Err(RejectReason::PlaceholderCompanyName);
    }

    Ok(Candidate::Competitor(CompetitorRecord {
        company_name,
        location,
        links,
        date_founded: date_founded(raw),
        provided_score: provided_score(raw, EntityKind::Competitor),
        explanation: raw
            .get("explanation")
            .cloned()
            .and_then(|v| serde_json::from_value::<CompetitorExplanation>(v).ok()),
    }))
}

/// A present, string-typed, non-empty-after-trim field.
fn required_string(raw: &Value, field: &'static str) -> Result<String, RejectReason> {
    raw.get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or(RejectReason::MissingField(field))
}

fn valid_location(raw: &Value) -> Result<String, RejectReason> {
    let location = required_string(raw, "location")?;
    if LOCATION_PLACEHOLDERS.contains(&location.to_lowercase().as_str()) {
        return Err(RejectReason::PlaceholderLocation);
    }
    // Minimal "City, Country" shape
    if !location.contains(',') {
        return Err(RejectReason::LocationWithoutCountry);
    }
    Ok(location)
}

fn links(raw: &Value) -> Result<Vec<String>, RejectReason> {
    let links: Vec<String> = raw
        .get("links")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if links.is_empty() {
        return Err(RejectReason::EmptyLinks);
    }
    Ok(links)
}

fn check_person_name(name: &str, denylist: &[&str]) -> Result<(), RejectReason> {
    if name.split_whitespace().count() < 2 {
        return Err(RejectReason::ShortName);
    }
    if denylist.contains(&name) {
        return Err(RejectReason::NonPersonName);
    }
    Ok(())
}

fn check_company_suffix(name: &str) -> Result<(), RejectReason> {
    let is_suffix = |token: &str| {
        let token = token.trim_matches(|c| c == '.' || c == ',');
        COMPANY_SUFFIXES
            .iter()
            .any(|suffix| token.eq_ignore_ascii_case(suffix))
    };
    if name.split_whitespace().any(is_suffix) {
        return Err(RejectReason::CompanySuffix);
    }
    Ok(())
}

/// The model's own score, if it is numeric. Range checking happens in
/// the scorer; a non-numeric value is simply absent.
fn provided_score(raw: &Value, kind: EntityKind) -> Option<f64> {
    raw.get(kind.score_field()).and_then(Value::as_f64)
}

fn date_founded(raw: &Value) -> String {
    match raw.get("date_founded") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_cofounder() -> Value {
        json!({
            "name": "Alice Smith",
            "location": "San Francisco, USA",
            "links": ["https://linkedin.com/in/alicesmith"],
            "match_score": 9
        })
    }

    #[test]
    fn accepts_valid_cofounder() {
        let candidate = build_candidate(EntityKind::Cofounder, &valid_cofounder()).unwrap();
        assert_eq!(candidate.name(), "Alice Smith");
        assert_eq!(candidate.provided_score(), Some(9.0));
    }

    #[test]
    fn rejects_denylisted_name_alone() {
        let mut raw = valid_cofounder();
        raw["name"] = json!("Team Page");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::NonPersonName)
        );
    }

    #[test]
    fn rejects_denylisted_location_alone() {
        let mut raw = valid_cofounder();
        raw["location"] = json!("Unknown");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::PlaceholderLocation)
        );
    }

    #[test]
    fn location_denylist_is_case_insensitive() {
        let mut raw = valid_cofounder();
        raw["location"] = json!("UNKNOWN");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::PlaceholderLocation)
        );
    }

    #[test]
    fn rejects_empty_links_alone() {
        let mut raw = valid_cofounder();
        raw["links"] = json!([]);
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::EmptyLinks)
        );
    }

    #[test]
    fn rejects_missing_links_field() {
        let mut raw = valid_cofounder();
        raw.as_object_mut().unwrap().remove("links");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::EmptyLinks)
        );
    }

    #[test]
    fn rejects_location_without_comma() {
        let mut raw = valid_cofounder();
        raw["location"] = json!("San Francisco");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::LocationWithoutCountry)
        );
    }

    #[test]
    fn rejects_single_token_name() {
        let mut raw = valid_cofounder();
        raw["name"] = json!("Alice");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::ShortName)
        );
    }

    #[test]
    fn rejects_company_suffix_in_cofounder_name() {
        let mut raw = valid_cofounder();
        raw["name"] = json!("Acme Capital");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::CompanySuffix)
        );
    }

    #[test]
    fn suffix_must_match_a_whole_token() {
        // "Vince" contains "Inc" but is not a company suffix.
        let mut raw = valid_cofounder();
        raw["name"] = json!("Vince Moretti");
        assert!(build_candidate(EntityKind::Cofounder, &raw).is_ok());
    }

    #[test]
    fn rejects_wrongly_typed_fields() {
        let mut raw = valid_cofounder();
        raw["name"] = json!(42);
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::MissingField("name"))
        );

        let mut raw = valid_cofounder();
        raw["links"] = json!("https://linkedin.com/in/alicesmith");
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &raw),
            Err(RejectReason::EmptyLinks)
        );
    }

    #[test]
    fn rejects_non_object_entries() {
        assert_eq!(
            build_candidate(EntityKind::Cofounder, &json!("Alice Smith")),
            Err(RejectReason::NotAnObject)
        );
    }

    #[test]
    fn non_numeric_score_is_carried_as_absent() {
        let mut raw = valid_cofounder();
        raw["match_score"] = json!("9");
        let candidate = build_candidate(EntityKind::Cofounder, &raw).unwrap();
        assert_eq!(candidate.provided_score(), None);
    }

    #[test]
    fn investor_requires_firm() {
        let raw = json!({
            "name": "Jane Roe",
            "location": "London, UK",
            "links": ["https://accel.com"]
        });
        assert_eq!(
            build_candidate(EntityKind::Investor, &raw),
            Err(RejectReason::MissingField("firm"))
        );
    }

    #[test]
    fn investor_carries_explanation_bullets() {
        let raw = json!({
            "name": "Jane Roe",
            "firm": "Accel",
            "location": "London, UK",
            "links": ["https://accel.com"],
            "match_score": 8,
            "explanation": {
                "recent_investments": ["Led Series A in Acme"],
                "investment_thesis": ["Vertical AI"],
                "how_to_pitch": ["Warm intro via portfolio founder"]
            }
        });
        let candidate = build_candidate(EntityKind::Investor, &raw).unwrap();
        match candidate {
            Candidate::Investor(r) => {
                let explanation = r.explanation.unwrap();
                assert_eq!(explanation.recent_investments.len(), 1);
            }
            _ => panic!("expected investor"),
        }
    }

    #[test]
    fn competitor_rejects_placeholder_company() {
        let raw = json!({
            "company_name": "Example Company",
            "location": "Austin, USA",
            "links": ["https://example.com"]
        });
        assert_eq!(
            build_candidate(EntityKind::Competitor, &raw),
            Err(RejectReason::PlaceholderCompanyName)
        );
    }

    #[test]
    fn competitor_single_token_company_name_is_fine() {
        let raw = json!({
            "company_name": "Stripe",
            "location": "San Francisco, USA",
            "links": ["https://stripe.com"],
            "date_founded": "2010"
        });
        assert!(build_candidate(EntityKind::Competitor, &raw).is_ok());
    }

    #[test]
    fn competitor_missing_date_founded_defaults_to_unknown() {
        let raw = json!({
            "company_name": "Acme AI",
            "location": "Berlin, Germany",
            "links": ["https://acme.ai"]
        });
        match build_candidate(EntityKind::Competitor, &raw).unwrap() {
            Candidate::Competitor(r) => assert_eq!(r.date_founded, "Unknown"),
            _ => panic!("expected competitor"),
        }
    }

    #[test]
    fn competitor_numeric_date_founded_is_stringified() {
        let raw = json!({
            "company_name": "Acme AI",
            "location": "Berlin, Germany",
            "links": ["https://acme.ai"],
            "date_founded": 2021
        });
        match build_candidate(EntityKind::Competitor, &raw).unwrap() {
            Candidate::Competitor(r) => assert_eq!(r.date_founded, "2021"),
            _ => panic!("expected competitor"),
        }
    }

    #[test]
    fn competitor_reads_threat_score_field() {
        let raw = json!({
            "company_name": "Acme AI",
            "location": "Berlin, Germany",
            "links": ["https://acme.ai"],
            "threat_score": 7
        });
        let candidate = build_candidate(EntityKind::Competitor, &raw).unwrap();
        assert_eq!(candidate.provided_score(), Some(7.0));
    }
}
