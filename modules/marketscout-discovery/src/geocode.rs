//! Geographic enrichment with caching and graceful degradation.
//!
//! Geocoding providers rate-limit and occasionally time out. Lookups
//! for a batch run concurrently, every outcome (success or fallback)
//! is cached for the life of the process, and a failed location never
//! aborts the batch — it resolves to a deterministic country-level
//! fallback instead.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use futures::stream::{self, StreamExt};
use mapbox_client::GeocodeClient;
use marketscout_common::Coordinates;
use tracing::{debug, warn};

/// How many geocode requests run at once.
const GEOCODE_CONCURRENCY: usize = 6;

/// Cache capacity. Oldest entries are evicted once full, so a
/// long-lived server process cannot grow without bound.
const CACHE_CAPACITY: usize = 1024;

/// Largest-city coordinates per country code, used when live
/// geocoding fails or no token is configured.
const FALLBACK_COORDINATES: &[(&str, f64, f64)] = &[
    ("US", 40.7128, -74.0060),  // New York
    ("UK", 51.5074, -0.1278),   // London
    ("CA", 43.6532, -79.3832),  // Toronto
    ("AU", -33.8688, 151.2093), // Sydney
    ("DE", 52.5200, 13.4050),   // Berlin
    ("FR", 48.8566, 2.3522),    // Paris
    ("JP", 35.6762, 139.6503),  // Tokyo
    ("IN", 19.0760, 72.8777),   // Mumbai
    ("BR", -23.5505, -46.6333), // São Paulo
];

/// Global default when no country hint is available or recognized.
const GLOBAL_FALLBACK: (f64, f64) = (51.5074, -0.1278); // London

/// A resolved location. `fallback` marks table coordinates standing
/// in for a failed live geocode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geocoded {
    pub coordinates: Coordinates,
    pub fallback: bool,
}

/// Deterministic coordinates for a country hint.
pub fn fallback_coordinates(country_hint: Option<&str>) -> Coordinates {
    let (latitude, longitude) = country_hint
        .and_then(|hint| {
            let hint = hint.trim().to_uppercase();
            FALLBACK_COORDINATES
                .iter()
                .find(|(code, _, _)| *code == hint)
                .map(|(_, lat, lon)| (*lat, *lon))
        })
        .unwrap_or(GLOBAL_FALLBACK);
    Coordinates::known(latitude, longitude)
}

/// Bounded insertion-order cache. Concurrent same-key misses may both
/// populate it; writes are equal values, so overwrite is harmless.
struct GeocodeCache {
    capacity: usize,
    entries: HashMap<String, Geocoded>,
    order: VecDeque<String>,
}

impl GeocodeCache {
    fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: &str) -> Option<Geocoded> {
        self.entries.get(key).copied()
    }

    fn insert(&mut self, key: String, value: Geocoded) {
        if !self.entries.contains_key(&key) {
            while self.entries.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            self.order.push_back(key.clone());
        }
        self.entries.insert(key, value);
    }
}

pub struct Geocoder {
    client: Arc<dyn GeocodeClient>,
    cache: Mutex<GeocodeCache>,
}

impl Geocoder {
    pub fn new(client: Arc<dyn GeocodeClient>) -> Self {
        Self {
            client,
            cache: Mutex::new(GeocodeCache::new(CACHE_CAPACITY)),
        }
    }

    /// Resolve one free-text location. Never fails: transport errors,
    /// zero results, and missing credentials all degrade to fallback
    /// coordinates, and every outcome is cached.
    pub async fn resolve(&self, location: &str, country_hint: Option<&str>) -> Geocoded {
        let key = cache_key(location, country_hint);
        if let Some(hit) = self.cache.lock().expect("geocode cache poisoned").get(&key) {
            return hit;
        }

        let resolved = match self.client.forward(location, country_hint).await {
            Ok(Some((latitude, longitude))) => Geocoded {
                coordinates: Coordinates::known(latitude, longitude),
                fallback: false,
            },
            Ok(None) => {
                debug!(%location, "no geocoding results, using fallback");
                Geocoded {
                    coordinates: fallback_coordinates(country_hint),
                    fallback: true,
                }
            }
            Err(err) => {
                warn!(%location, error = %err, "geocoding failed, using fallback");
                Geocoded {
                    coordinates: fallback_coordinates(country_hint),
                    fallback: true,
                }
            }
        };

        self.cache
            .lock()
            .expect("geocode cache poisoned")
            .insert(key, resolved);
        resolved
    }

    /// Resolve a batch concurrently, preserving input order. Shared
    /// locations hit the cache rather than the provider.
    pub async fn resolve_all(&self, locations: &[String]) -> Vec<Geocoded> {
        // Named async fn instead of an async block closure to work around
        // rust-lang/rust#102211 ("implementation of `FnOnce` is not general
        // enough") when the caller's future is checked for `Send`.
        async fn resolve_indexed(
            geocoder: &Geocoder,
            index: usize,
            location: &str,
        ) -> (usize, Geocoded) {
            (index, geocoder.resolve(location, None).await)
        }

        let mut lookups = Vec::with_capacity(locations.len());
        for (index, location) in locations.iter().enumerate() {
            lookups.push(resolve_indexed(self, index, location));
        }
        let mut resolved: Vec<(usize, Geocoded)> = stream::iter(lookups)
            .buffer_unordered(GEOCODE_CONCURRENCY)
            .collect()
            .await;

        resolved.sort_by_key(|(index, _)| *index);
        resolved.into_iter().map(|(_, geocoded)| geocoded).collect()
    }
}

fn cache_key(location: &str, country_hint: Option<&str>) -> String {
    format!(
        "{}|{}",
        location.trim().to_lowercase(),
        country_hint.unwrap_or("").trim().to_lowercase()
    )
}
