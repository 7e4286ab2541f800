use mongodb::{bson::doc, Client};
use std::time::Instant;

/// Outcome of a MongoDB readiness probe.
#[derive(Debug, Clone)]
pub struct MongoHealth {
    pub healthy: bool,
    /// Round-trip time of the probe command.
    pub latency_ms: u64,
    /// Error details when unhealthy.
    pub error: Option<String>,
}

/// Probe the server with a `ping` command and report the round trip.
pub async fn check_health(client: &Client) -> MongoHealth {
    let started = Instant::now();
    let outcome = client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(_) => MongoHealth {
            healthy: true,
            latency_ms,
            error: None,
        },
        Err(e) => MongoHealth {
            healthy: false,
            latency_ms,
            error: Some(e.to_string()),
        },
    }
}
