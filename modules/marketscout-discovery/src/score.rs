//! Relevance/threat scoring.
//!
//! A model-supplied score strictly within [1,10] wins — the model has
//! read the actual content and can judge relevance qualitatively. The
//! deterministic calculation below only keeps the ordering consistent
//! when the score is missing or out of range, and an out-of-range
//! value is recalculated, not clamped.

use chrono::Datelike;
use marketscout_common::Candidate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreSource {
    Model,
    Calculated,
}

/// Finalize a candidate's score in [1,10].
pub fn finalize(candidate: &Candidate, domain: &str) -> (u8, ScoreSource) {
    if let Some(provided) = candidate.provided_score() {
        if (1.0..=10.0).contains(&provided) {
            return (provided as u8, ScoreSource::Model);
        }
    }
    (calculate(candidate, domain), ScoreSource::Calculated)
}

/// Deterministic fallback score from signals present in the record.
pub fn calculate(candidate: &Candidate, domain: &str) -> u8 {
    let link_text = candidate.links().join(" ").to_lowercase();
    let location = candidate.location().to_lowercase();

    let points = match candidate {
        Candidate::Cofounder(record) => cofounder_points(
            &record.name.to_lowercase(),
            &link_text,
            &location,
            record.links.len(),
            domain,
        ),
        Candidate::Investor(record) => investor_points(
            &record.firm.to_lowercase(),
            &link_text,
            &location,
            record.links.len(),
            domain,
        ),
        Candidate::Competitor(record) => competitor_points(
            &record.company_name.to_lowercase(),
            &record.date_founded,
            &link_text,
            &location,
            record.links.len(),
            domain,
        ),
    };

    points.clamp(1, 10)
}

const TIER1_HUBS: &[&str] = &[
    "san francisco",
    "palo alto",
    "silicon valley",
    "menlo park",
    "new york",
    "nyc",
];

const COFOUNDER_TIER2_HUBS: &[&str] = &[
    "london",
    "boston",
    "seattle",
    "austin",
    "toronto",
    "singapore",
    "tel aviv",
    "berlin",
    "amsterdam",
    "bangalore",
];

const INVESTOR_TIER2_HUBS: &[&str] = &[
    "london",
    "boston",
    "seattle",
    "austin",
    "los angeles",
    "singapore",
    "tel aviv",
    "berlin",
    "hong kong",
    "beijing",
];

const COMPETITOR_TIER2_HUBS: &[&str] = &[
    "london",
    "boston",
    "seattle",
    "austin",
    "los angeles",
    "singapore",
    "tel aviv",
    "berlin",
    "toronto",
    "beijing",
];

const TOP_TIER_FIRMS: &[&str] = &[
    "sequoia",
    "a16z",
    "andreessen",
    "accel",
    "greylock",
    "benchmark",
    "kleiner",
    "founders fund",
    "general catalyst",
    "insight",
    "tiger global",
    "coatue",
    "lightspeed",
    "bessemer",
    "khosla",
];

fn cofounder_points(name: &str, link_text: &str, location: &str, num_links: usize, domain: &str) -> u8 {
    let mut score = 0u8;

    // Profile links (4 points max)
    if link_text.contains("linkedin.com") && link_text.contains("/in/") {
        score += 2; // personal profile, not a company page
    } else if link_text.contains("linkedin.com") {
        score += 1;
    }
    if link_text.contains("twitter.com") || link_text.contains("x.com") {
        score += 1;
    }
    if link_text.contains("github.com") {
        score += 1; // technical founder signal
    }
    if link_text.contains("crunchbase.com") {
        score += 1;
    }

    // Link quantity and premium sources
    if num_links >= 4 {
        score += 2;
    } else if num_links >= 2 {
        score += 1;
    }
    if contains_any(
        link_text,
        &["ycombinator.com", "techcrunch.com", "forbes.com", "venturebeat.com"],
    ) {
        score += 1;
    }

    score += hub_points(location, COFOUNDER_TIER2_HUBS);

    // Name plausibility
    if name.split_whitespace().count() >= 2
        && !contains_any(name, &["test", "user", "admin", "demo", "example"])
    {
        score += 1;
    }

    if domain_keyword_overlap(domain, link_text) {
        score += 1;
    }

    score
}

fn investor_points(firm: &str, link_text: &str, location: &str, num_links: usize, domain: &str) -> u8 {
    let mut score = 0u8;

    // Profile links (4 points max)
    if link_text.contains("linkedin.com") && link_text.contains("/in/") {
        score += 2;
    } else if link_text.contains("linkedin.com") {
        score += 1;
    }
    if link_text.contains("twitter.com") || link_text.contains("x.com") {
        score += 1; // VCs are active on Twitter
    }
    if link_text.contains("crunchbase.com") {
        score += 2; // central to investor research
    }
    if contains_any(link_text, &[".com", ".io", ".vc"]) {
        score += 1; // firm website
    }

    // Link quantity and VC databases
    if num_links >= 3 {
        score += 2;
    } else if num_links >= 2 {
        score += 1;
    }
    if contains_any(
        link_text,
        &["pitchbook.com", "signal.nfx.com", "techcrunch.com", "forbes.com/midas"],
    ) {
        score += 1;
    }

    score += hub_points(location, INVESTOR_TIER2_HUBS);

    // Firm reputation
    if contains_any(firm, TOP_TIER_FIRMS) || contains_any(link_text, TOP_TIER_FIRMS) {
        score += 2;
    }

    if domain_keyword_overlap(domain, link_text) {
        score += 1;
    }

    score
}

fn competitor_points(
    company_name: &str,
    date_founded: &str,
    link_text: &str,
    location: &str,
    num_links: usize,
    domain: &str,
) -> u8 {
    let mut score = maturity_points(date_founded, chrono::Utc::now().year());

    // Online presence (crunchbase listing and media coverage weigh most)
    if link_text.contains("crunchbase.com") {
        score += 2;
    }
    if contains_any(
        link_text,
        &["techcrunch.com", "forbes.com", "venturebeat.com", "bloomberg.com"],
    ) {
        score += 2;
    }
    if link_text.contains("producthunt.com") {
        score += 1;
    }
    if contains_any(link_text, &[".com", ".io", ".ai", ".co"]) {
        score += 1;
    }

    if num_links >= 3 {
        score += 1;
    }

    score += hub_points(location, COMPETITOR_TIER2_HUBS);

    // Funding signals
    if contains_any(
        link_text,
        &[
            "series a", "series b", "series c", "raised", "funding", "million", "billion",
            "venture", "vc", "backed",
        ],
    ) {
        score += 2;
    }
    if contains_any(
        link_text,
        &["y combinator", "yc ", "techstars", "500 startups", "sequoia"],
    ) {
        score += 1;
    }

    if domain_keyword_overlap(domain, link_text) || domain_keyword_overlap(domain, company_name) {
        score += 1;
    }

    score
}

/// Company maturity from the founding year. An established company is
/// a bigger threat; an unparseable year still suggests some history,
/// while a plain "Unknown" earns nothing.
fn maturity_points(date_founded: &str, current_year: i32) -> u8 {
    let trimmed = date_founded.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("unknown") {
        return 0;
    }
    match trimmed.parse::<i32>() {
        Ok(year) => {
            let years_active = current_year - year;
            if years_active >= 5 {
                3
            } else if years_active >= 2 {
                2
            } else if years_active >= 0 {
                1
            } else {
                0
            }
        }
        Err(_) => 1,
    }
}

fn hub_points(location: &str, tier2: &[&str]) -> u8 {
    if contains_any(location, TIER1_HUBS) {
        2
    } else if contains_any(location, tier2) {
        1
    } else {
        0
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Any domain keyword longer than 3 characters appearing in the text.
fn domain_keyword_overlap(domain: &str, text: &str) -> bool {
    domain
        .to_lowercase()
        .split_whitespace()
        .filter(|keyword| keyword.len() > 3)
        .any(|keyword| text.contains(keyword))
}
