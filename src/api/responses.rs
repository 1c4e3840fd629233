//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{TimerSnapshot, TransitionOutcome};

/// Optional body for POST /timer/start
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartRequest {
    pub duration_ms: Option<i64>,
}

/// Body for POST /timer/freeze
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FreezeRequest {
    pub freeze_duration_ms: i64,
}

/// API response structure for transition endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, timer: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            timer,
        }
    }

    /// Build a response from a transition outcome
    pub fn from_outcome(action: &str, outcome: TransitionOutcome) -> Self {
        if outcome.accepted {
            Self::accepted(format!("Timer {} accepted", action), outcome.snapshot)
        } else {
            let message = format!(
                "Timer {} ignored in state {}",
                action, outcome.snapshot.state
            );
            Self::ignored(message, outcome.snapshot)
        }
    }

    /// Create an accepted response
    pub fn accepted(message: String, timer: TimerSnapshot) -> Self {
        Self::new("accepted".to_string(), message, timer)
    }

    /// Create an ignored response
    pub fn ignored(message: String, timer: TimerSnapshot) -> Self {
        Self::new("ignored".to_string(), message, timer)
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
