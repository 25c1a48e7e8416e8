//! Concurrent execution of the fan-out prompt set.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use llm_client::ChatClient;
use tracing::warn;

/// How many chat requests run at once.
const FAN_OUT_CONCURRENCY: usize = 4;

/// Issue every prompt concurrently and return responses aligned with
/// input order. A failed query becomes `None`; it never aborts its
/// siblings, so a partial result set still flows downstream.
pub async fn run_fan_out(
    client: Arc<dyn ChatClient>,
    system_prompt: &str,
    prompts: Vec<String>,
) -> Vec<Option<String>> {
    let mut responses: Vec<(usize, Option<String>)> =
        stream::iter(prompts.into_iter().enumerate().map(|(index, prompt)| {
            let client = client.clone();
            let system = system_prompt.to_string();
            async move {
                match client.complete(&system, &prompt).await {
                    Ok(text) => (index, Some(text)),
                    Err(err) => {
                        warn!(query = index, error = %err, "fan-out query failed");
                        (index, None)
                    }
                }
            }
        }))
        .buffer_unordered(FAN_OUT_CONCURRENCY)
        .collect()
        .await;

    responses.sort_by_key(|(index, _)| *index);
    responses.into_iter().map(|(_, response)| response).collect()
}
