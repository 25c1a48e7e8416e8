use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Perplexity API key for discovery queries.
    pub perplexity_api_key: String,

    /// Mapbox access token. Optional: without it every geocode
    /// resolves to fallback coordinates instead of a live lookup.
    pub mapbox_token: Option<String>,

    // Web server
    pub web_host: String,
    pub web_port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            perplexity_api_key: required_env("PERPLEXITY_API_KEY"),
            mapbox_token: env::var("MAPBOX_TOKEN").ok().filter(|t| !t.is_empty()),
            web_host: env::var("WEB_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            web_port: env::var("WEB_PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse()
                .expect("WEB_PORT must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
