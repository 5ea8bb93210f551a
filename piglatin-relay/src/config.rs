//! Relay deployment configuration
//!
//! The dispatcher receives a [`RelayConfig`] explicitly instead of reading
//! process environment variables at the point of use, so the pipeline can be
//! exercised in tests without any ambient state. Binaries that do want the
//! environment go through [`RelayConfig::from_env`].

use crate::error::{RelayError, RelayResult};

/// Deployment settings injected into the dispatcher
///
/// All values are opaque strings decided at deploy time, not computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Display name of the team, included in every outbound payload
    pub team_name: String,
    /// Logical name of the destination event bus
    pub event_bus_name: String,
    /// Endpoint URL the event-bus publisher posts to
    pub event_bus_endpoint: String,
    /// URL of the message queue for the queue channel
    pub queue_url: String,
    /// Recipient address for the email channel
    pub email: Option<String>,
    /// Team identifier for the email channel
    pub team_id: Option<String>,
}

impl RelayConfig {
    /// Build a config from the process environment
    ///
    /// Required variables: `TEAM_NAME`, `EVENT_BUS_NAME`, `EVENT_BUS_ENDPOINT`,
    /// `QUEUE_URL`. Optional: `TEAM_EMAIL` and `TEAM_ID` (needed only when
    /// dispatching to the email channel).
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - Config with every required variable present
    /// * `Err(RelayError)` - `ConfigError` naming the first missing variable
    pub fn from_env() -> RelayResult<Self> {
        Ok(Self {
            team_name: require_var("TEAM_NAME")?,
            event_bus_name: require_var("EVENT_BUS_NAME")?,
            event_bus_endpoint: require_var("EVENT_BUS_ENDPOINT")?,
            queue_url: require_var("QUEUE_URL")?,
            email: optional_var("TEAM_EMAIL"),
            team_id: optional_var("TEAM_ID"),
        })
    }
}

fn require_var(name: &str) -> RelayResult<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            RelayError::ConfigError(format!("{} environment variable not set", name))
        })
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
