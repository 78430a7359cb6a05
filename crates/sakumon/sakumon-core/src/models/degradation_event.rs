use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Records a fallback from a preferred component to a degraded one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}
