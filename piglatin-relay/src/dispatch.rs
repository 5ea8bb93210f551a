//! Channel dispatch: event-bus and queue seams plus the fan-out logic
//!
//! Outbound delivery goes through two small async traits so tests can swap in
//! recording implementations. The HTTP implementations POST JSON to the
//! endpoints named in the deployment config and treat any non-success status
//! as a dispatch failure.

use crate::channel::{Channel, ChannelPayload};
use crate::config::RelayConfig;
use crate::error::{RelayError, RelayResult};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Source tag stamped on every published event
pub const EVENT_SOURCE: &str = "piglatin-relay";

/// Detail type of the unconditional secondary notification
const NOTIFY_DETAIL_TYPE: &str = "SendToTeams";

/// Named-event publisher seam
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publish one named event carrying the payload
    ///
    /// # Arguments
    ///
    /// * `detail_type` - Event name the downstream rules match on
    /// * `detail` - The channel payload
    async fn put_event(&self, detail_type: &str, detail: &ChannelPayload) -> RelayResult<()>;
}

/// Message-queue sender seam
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Send one message body to the queue
    async fn send(&self, body: &ChannelPayload) -> RelayResult<()>;
}

/// Envelope the HTTP event-bus publisher posts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventEnvelope<'a> {
    source: &'static str,
    detail_type: &'a str,
    detail: &'a ChannelPayload,
    event_bus_name: &'a str,
}

/// Event-bus publisher that POSTs the event envelope to an HTTP endpoint
pub struct HttpEventBus {
    client: reqwest::Client,
    endpoint: String,
    bus_name: String,
}

impl HttpEventBus {
    pub fn new(endpoint: String, bus_name: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
            bus_name,
        }
    }
}

#[async_trait]
impl EventBus for HttpEventBus {
    async fn put_event(&self, detail_type: &str, detail: &ChannelPayload) -> RelayResult<()> {
        let envelope = EventEnvelope {
            source: EVENT_SOURCE,
            detail_type,
            detail,
            event_bus_name: &self.bus_name,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&envelope)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RelayError::DispatchError(format!(
                "put_event {} failed: {} {}",
                detail_type, status, body
            )));
        }
        Ok(())
    }
}

/// Queue sender that POSTs the payload to the configured queue URL
pub struct HttpQueue {
    client: reqwest::Client,
    queue_url: String,
}

impl HttpQueue {
    pub fn new(queue_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            queue_url,
        }
    }
}

#[async_trait]
impl MessageQueue for HttpQueue {
    async fn send(&self, body: &ChannelPayload) -> RelayResult<()> {
        let response = self.client.post(&self.queue_url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(RelayError::DispatchError(format!(
                "queue send failed: {} {}",
                status, text
            )));
        }
        Ok(())
    }
}

/// Fans a transformed message out to the selected channel
///
/// Builds the channel-specific payload, forwards it through the matching
/// seam, and then publishes the unconditional secondary team notification
/// carrying the same message.
pub struct ChannelDispatcher {
    bus: Arc<dyn EventBus>,
    queue: Arc<dyn MessageQueue>,
    config: RelayConfig,
}

impl ChannelDispatcher {
    pub fn new(bus: Arc<dyn EventBus>, queue: Arc<dyn MessageQueue>, config: RelayConfig) -> Self {
        Self { bus, queue, config }
    }

    /// Dispatcher wired to the HTTP implementations named in the config
    pub fn http(config: RelayConfig) -> Self {
        let bus = Arc::new(HttpEventBus::new(
            config.event_bus_endpoint.clone(),
            config.event_bus_name.clone(),
        ));
        let queue = Arc::new(HttpQueue::new(config.queue_url.clone()));
        Self::new(bus, queue, config)
    }

    /// Forward `message` to `channel`, then fire the secondary notification
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Primary and secondary delivery both succeeded
    /// * `Err(RelayError)` - `ConfigError` when the email channel is selected
    ///   without recipient settings, or `DispatchError`/`NetworkError` from
    ///   the underlying seam
    pub async fn dispatch(&self, channel: Channel, message: &str) -> RelayResult<()> {
        match channel {
            Channel::Teams => {
                let payload = ChannelPayload::notification(message, &self.config.team_name);
                self.bus.put_event("SendToTeams", &payload).await?;
            }
            Channel::Sqs => {
                let payload = ChannelPayload::notification(message, &self.config.team_name);
                self.queue.send(&payload).await?;
            }
            Channel::SendGrid => {
                let email = self.config.email.as_deref().ok_or_else(|| {
                    RelayError::ConfigError(
                        "email channel selected but no recipient email configured".to_string(),
                    )
                })?;
                let team_id = self.config.team_id.as_deref().ok_or_else(|| {
                    RelayError::ConfigError(
                        "email channel selected but no team id configured".to_string(),
                    )
                })?;
                let payload =
                    ChannelPayload::email(message, &self.config.team_name, email, team_id);
                self.bus.put_event("SendToSendGrid", &payload).await?;
            }
        }
        info!(channel = %channel, "dispatched message");

        self.notify(message).await
    }

    /// Secondary generic team notification, fired after every dispatch
    async fn notify(&self, message: &str) -> RelayResult<()> {
        let payload = ChannelPayload::notification(message, &self.config.team_name);
        self.bus.put_event(NOTIFY_DETAIL_TYPE, &payload).await
    }
}
