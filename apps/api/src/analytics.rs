//! Product analytics as structured tracing events under the `analytics` target.
//! No external sink; route the target to one via the subscriber if needed.

use serde_json::Value;
use tracing::info;

pub fn track(event: &str, properties: Value) {
    info!(target: "analytics", event, properties = %properties, "analytics event");
}
