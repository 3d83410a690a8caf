use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded fallback: a component failed and a degraded path was used instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn now(component: &str, failure: String, fallback_used: &str) -> Self {
        Self {
            component: component.to_string(),
            failure,
            fallback_used: fallback_used.to_string(),
            timestamp: Utc::now(),
        }
    }
}
