//! Query fan-out: a fixed set of differently-angled prompts per
//! entity kind. One prompt surfaces one slice of the entity space;
//! the union is deduplicated downstream. Pure string construction.

use marketscout_common::EntityKind;

/// System instruction paired with every fan-out prompt of a kind.
pub fn system_prompt(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Cofounder => {
            "You are a precise research assistant that returns structured data about real people.\n\
             CRITICAL: Return ONLY valid JSON. Do not include any explanatory text before or after the JSON.\n\
             Format: [{\"name\": \"First Last\", \"location\": \"City, Country\", \"links\": [\"url1\", \"url2\"], \"match_score\": 8}]\n\
             IMPORTANT:\n\
             - location MUST be in \"City, Country\" format (e.g., \"San Francisco, USA\" or \"London, UK\")\n\
             - Do NOT include entries if you cannot determine both the city AND country\n\
             - match_score: rate 1-10 how good of a cofounder match this person is for the domain\n\
             - Only include real individual people with real names, not companies or teams."
        }
        EntityKind::Investor => {
            "You are a precise research assistant that returns structured data about real venture investors.\n\
             CRITICAL: Return ONLY valid JSON. Do not include any explanatory text before or after the JSON.\n\
             Format: [{\"name\": \"First Last\", \"firm\": \"VC Firm Name\", \"location\": \"City, Country\", \"links\": [\"url1\"], \"match_score\": 8, \
             \"explanation\": {\"recent_investments\": [\"bullet\"], \"investment_thesis\": [\"bullet\"], \"how_to_pitch\": [\"bullet\"]}}]\n\
             IMPORTANT:\n\
             - firm is the venture capital firm they work at\n\
             - location MUST be in \"City, Country\" format; omit entries without both city and country\n\
             - match_score: rate 1-10 how good an investor match they are for the domain and stage\n\
             - Only include real individual VCs or partners with real names and firms."
        }
        EntityKind::Competitor => {
            "You are a precise research assistant that returns structured data about real companies.\n\
             CRITICAL: Return ONLY valid JSON. Do not include any explanatory text before or after the JSON.\n\
             Format: [{\"company_name\": \"Company Inc\", \"location\": \"City, Country\", \"links\": [\"url1\"], \"date_founded\": \"2020\", \"threat_score\": 8, \
             \"explanation\": {\"angle\": [\"bullet\"], \"what_they_cover\": [\"bullet\"], \"gaps\": [\"bullet\"]}}]\n\
             IMPORTANT:\n\
             - location MUST be in \"City, Country\" format; omit entries without both city and country\n\
             - date_founded is the founding year (e.g., \"2020\") or \"Unknown\"\n\
             - threat_score: rate 1-10 how much of a competitive threat the company is\n\
             - Only include real companies."
        }
    }
}

/// Build the ordered fan-out prompt set for one discovery run.
/// `stage` only applies to investors and defaults to "seed".
pub fn fan_out(kind: EntityKind, domain: &str, stage: Option<&str>) -> Vec<String> {
    match kind {
        EntityKind::Cofounder => cofounder_queries(domain),
        EntityKind::Investor => investor_queries(domain, stage.unwrap_or("seed")),
        EntityKind::Competitor => competitor_queries(domain),
    }
}

const COFOUNDER_SHAPE: &str = r#"[{"name": "Full Name", "location": "City, Country", "links": ["url1"], "match_score": 8}]"#;

fn cofounder_queries(domain: &str) -> Vec<String> {
    let rules = format!(
        "Location MUST be \"City, Country\" format. Include match_score 1-10 for {domain}. \
         Real individual people only; skip entries without both city and country."
    );
    vec![
        format!(
            "Find 5 real individual founders/CEOs in {domain}. Return ONLY a JSON array with this exact format:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
        format!(
            "Find 5 technical founders (CTOs/engineers) in {domain}. Return ONLY JSON:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
        format!(
            "Find 5 people working on {domain} looking for cofounders. Return ONLY JSON:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
        format!(
            "Search Y Combinator and TechCrunch for {domain} founders. Return ONLY JSON:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
        format!(
            "Find entrepreneurs in {domain} who could be cofounders. Return ONLY JSON:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
        format!(
            "Find {domain} founders on Crunchbase or AngelList. Return ONLY JSON:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
        format!(
            "Find thought leaders and builders in {domain}. Return ONLY JSON:\n{COFOUNDER_SHAPE}\n{rules}"
        ),
    ]
}

const INVESTOR_SHAPE: &str = r#"[{"name": "Full Name", "firm": "VC Firm", "location": "City, Country", "links": ["url1"], "match_score": 8, "explanation": {"recent_investments": ["bullet"], "investment_thesis": ["bullet"], "how_to_pitch": ["bullet"]}}]"#;

fn investor_queries(domain: &str, stage: &str) -> Vec<String> {
    let rules = "Location MUST be \"City, Country\" format. Include match_score 1-10 and the explanation object. \
         Real individual investors only; skip entries without both city and country.";
    vec![
        format!(
            "Find 5 {stage}-stage VC partners who invest in {domain}. Return ONLY a JSON array with this exact format:\n{INVESTOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find 5 angel investors and solo capitalists active in {domain} at {stage} stage. Return ONLY JSON:\n{INVESTOR_SHAPE}\n{rules}"
        ),
        format!(
            "Search Crunchbase and PitchBook for investors who recently funded {domain} startups. Return ONLY JSON:\n{INVESTOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find partners at top-tier firms (Sequoia, a16z, Accel, Benchmark) covering {domain}. Return ONLY JSON:\n{INVESTOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find investors who have published a thesis on {domain}. Return ONLY JSON:\n{INVESTOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find {stage}-stage investors outside Silicon Valley backing {domain} companies. Return ONLY JSON:\n{INVESTOR_SHAPE}\n{rules}"
        ),
    ]
}

const COMPETITOR_SHAPE: &str = r#"[{"company_name": "Company Name", "location": "City, Country", "links": ["url1"], "date_founded": "2020", "threat_score": 8, "explanation": {"angle": ["bullet"], "what_they_cover": ["bullet"], "gaps": ["bullet"]}}]"#;

fn competitor_queries(domain: &str) -> Vec<String> {
    let rules = "Location MUST be \"City, Country\" format. Include threat_score 1-10, date_founded, and the explanation object. \
         Real companies only; skip entries without both city and country.";
    vec![
        format!(
            "Find 5 direct competitors in {domain}. Return ONLY a JSON array with this exact format:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find 5 established market leaders in {domain}. Return ONLY JSON:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
        format!(
            "Search Crunchbase and TechCrunch for companies in {domain} that recently raised funding. Return ONLY JSON:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find YC-backed and accelerator companies in {domain}. Return ONLY JSON:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find legacy or adjacent players moving into {domain}. Return ONLY JSON:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find well-funded startups in {domain} on Product Hunt or AngelList. Return ONLY JSON:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
        format!(
            "Find early-stage startups entering {domain} this year. Return ONLY JSON:\n{COMPETITOR_SHAPE}\n{rules}"
        ),
    ]
}
