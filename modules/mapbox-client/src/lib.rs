pub mod error;

pub use error::{GeocodeError, Result};

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const BASE_URL: &str = "https://api.mapbox.com/geocoding/v5/mapbox.places";

/// Forward-geocoding seam. The enrichment stage only depends on this
/// trait so tests can substitute a deterministic resolver.
#[async_trait]
pub trait GeocodeClient: Send + Sync {
    /// Resolve a free-text place query to `(latitude, longitude)`.
    /// `Ok(None)` means the provider returned zero results.
    async fn forward(&self, query: &str, country_hint: Option<&str>) -> Result<Option<(f64, f64)>>;
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// Mapbox order: `[longitude, latitude]`.
    coordinates: Vec<f64>,
}

pub struct MapboxClient {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl MapboxClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            access_token: access_token.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl GeocodeClient for MapboxClient {
    async fn forward(&self, query: &str, country_hint: Option<&str>) -> Result<Option<(f64, f64)>> {
        if self.access_token.is_empty() {
            return Err(GeocodeError::MissingToken);
        }

        let url = format!("{}/{}.json", self.base_url, urlencode(query));
        let mut params = vec![
            ("access_token", self.access_token.clone()),
            ("limit", "1".to_string()),
        ];
        if let Some(country) = country_hint {
            params.push(("country", country.to_lowercase()));
        }

        debug!(%query, "Mapbox forward geocode");

        let response = self.http.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GeocodeResponse = response.json().await?;
        Ok(body.features.first().and_then(|f| {
            match f.geometry.coordinates.as_slice() {
                // Mapbox returns [longitude, latitude]
                [lon, lat, ..] => Some((*lat, *lon)),
                _ => None,
            }
        }))
    }
}

/// Percent-encode the path segment of a place query. Mapbox accepts
/// spaces and commas encoded; everything alphanumeric passes through.
fn urlencode(query: &str) -> String {
    let mut out = String::with_capacity(query.len());
    for byte in query.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
