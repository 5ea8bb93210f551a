//! Destination channels and their wire payloads
//!
//! The inbound event names its destination as a string; that string is parsed
//! into the closed [`Channel`] enum up front, so an unknown name is a
//! validation error before any downstream call instead of a lookup failure at
//! dispatch time.

use crate::error::{RelayError, RelayResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The fixed set of downstream notification channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// Team-notification event on the event bus
    Teams,
    /// Message queue
    Sqs,
    /// Email-dispatch event on the event bus
    SendGrid,
}

impl Channel {
    /// Canonical name of the channel, as it appears in inbound events
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Teams => "Teams",
            Channel::Sqs => "SQS",
            Channel::SendGrid => "SendGrid",
        }
    }

}

impl FromStr for Channel {
    type Err = RelayError;

    fn from_str(name: &str) -> RelayResult<Self> {
        match name {
            "Teams" => Ok(Channel::Teams),
            "SQS" => Ok(Channel::Sqs),
            "SendGrid" => Ok(Channel::SendGrid),
            other => Err(RelayError::InvalidChannel(other.to_string())),
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload forwarded to a downstream channel
///
/// Serializes with the field names the downstream consumers expect
/// (`translatedMessage`, `teamName`, `email`, `teamId`). The email fields are
/// present only for the email-dispatch channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelPayload {
    /// The Pig Latin message
    pub translated_message: String,
    /// Team display name from the deployment config
    pub team_name: String,
    /// Recipient address, email channel only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Team identifier, email channel only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

impl ChannelPayload {
    /// Payload for the team-notification and queue channels
    pub fn notification(message: &str, team_name: &str) -> Self {
        Self {
            translated_message: message.to_string(),
            team_name: team_name.to_string(),
            email: None,
            team_id: None,
        }
    }

    /// Payload for the email-dispatch channel
    pub fn email(message: &str, team_name: &str, email: &str, team_id: &str) -> Self {
        Self {
            translated_message: message.to_string(),
            team_name: team_name.to_string(),
            email: Some(email.to_string()),
            team_id: Some(team_id.to_string()),
        }
    }
}
