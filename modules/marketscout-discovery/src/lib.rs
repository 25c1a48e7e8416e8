//! Structured entity discovery and enrichment.
//!
//! Turns free-text LLM answers about cofounders, investors, and
//! competitors into validated, deduplicated, scored, and geocoded
//! records. Best-effort by design: unreliable queries degrade to
//! partial results, never to pipeline failures.

pub mod dedup;
pub mod executor;
pub mod extract;
pub mod geocode;
pub mod pipeline;
pub mod queries;
pub mod rank;
pub mod score;
pub mod validate;

pub use geocode::{Geocoded, Geocoder};
pub use pipeline::{DiscoveryOptions, DiscoveryPipeline};
pub use validate::RejectReason;
