//! Message processing pipeline
//!
//! One inbound event flows through a fixed sequence: validate and parse the
//! destination channel, detect the language (once), translate to English
//! when needed, transform to Pig Latin, dispatch. Each step's input depends
//! on the previous step's output, so there is nothing to parallelize; the
//! task suspends only while awaiting an external service.

use crate::channel::Channel;
use crate::detector::{ENGLISH, LanguageDetector};
use crate::dispatch::ChannelDispatcher;
use crate::error::{RelayError, RelayResult};
use crate::translator::Translator;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Inbound event payload: the message and its destination channel
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    /// The text message to process
    pub message: String,
    /// Destination channel name ("Teams", "SQS" or "SendGrid")
    pub send_to: String,
}

impl InboundEvent {
    pub fn new(message: &str, send_to: &str) -> Self {
        Self {
            message: message.to_string(),
            send_to: send_to.to_string(),
        }
    }

    /// Fail fast on missing fields before any service call is made
    fn validate(&self) -> RelayResult<()> {
        if self.message.trim().is_empty() {
            return Err(RelayError::InvalidEvent("message is empty".to_string()));
        }
        if self.send_to.trim().is_empty() {
            return Err(RelayError::InvalidEvent("sendTo is empty".to_string()));
        }
        Ok(())
    }
}

/// Trigger envelope: one JSON event per invocation
#[derive(Debug, Clone, Deserialize)]
pub struct TriggerEvent {
    pub detail: InboundEvent,
}

/// Result of one processed invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Processed {
    /// The Pig Latin message that was forwarded
    pub message: String,
    /// The channel it was forwarded to
    pub channel: Channel,
}

/// Orchestrates detection, translation, transformation and dispatch
pub struct MessageProcessor {
    detector: Arc<dyn LanguageDetector>,
    translator: Arc<dyn Translator>,
    dispatcher: ChannelDispatcher,
}

impl MessageProcessor {
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        translator: Arc<dyn Translator>,
        dispatcher: ChannelDispatcher,
    ) -> Self {
        Self {
            detector,
            translator,
            dispatcher,
        }
    }

    /// Process one inbound event end to end
    ///
    /// The detection service is called exactly once; its result answers both
    /// whether translation is needed and which source code to translate
    /// from. Failures propagate to the caller; nothing is retried or
    /// replayed here.
    ///
    /// # Returns
    ///
    /// * `Ok(Processed)` - The dispatched Pig Latin message and its channel
    /// * `Err(RelayError)` - Validation failure or an external-service error
    pub async fn process(&self, event: InboundEvent) -> RelayResult<Processed> {
        event.validate()?;
        let channel: Channel = event.send_to.parse()?;
        info!(channel = %channel, "processing inbound message");

        let detected = self.detector.detect(&event.message).await?;
        debug!(
            code = %detected.code,
            provider = self.detector.provider_name(),
            "detected language"
        );

        let english = if detected.is_english() {
            event.message
        } else {
            let translated = self
                .translator
                .translate(&event.message, &detected.code, ENGLISH)
                .await?;
            debug!(translated = %translated, "translated message to English");
            translated
        };

        let transformed = piglatin::transform(&english);
        info!(transformed = %transformed, "transformed message");

        self.dispatcher.dispatch(channel, &transformed).await?;

        Ok(Processed {
            message: transformed,
            channel,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use crate::mock::{MockDetector, MockMode, MockTranslator, RecordingEventBus, RecordingQueue};

    fn config() -> RelayConfig {
        RelayConfig {
            team_name: "The Swines".to_string(),
            event_bus_name: "relay-bus".to_string(),
            event_bus_endpoint: "http://localhost:9200/events".to_string(),
            queue_url: "http://localhost:9200/queue".to_string(),
            email: Some("team@example.com".to_string()),
            team_id: Some("team-42".to_string()),
        }
    }

    struct Harness {
        detector: Arc<MockDetector>,
        translator: Arc<MockTranslator>,
        bus: Arc<RecordingEventBus>,
        queue: Arc<RecordingQueue>,
        processor: MessageProcessor,
    }

    fn harness(detector: MockDetector, translator: MockTranslator) -> Harness {
        let detector = Arc::new(detector);
        let translator = Arc::new(translator);
        let bus = Arc::new(RecordingEventBus::new());
        let queue = Arc::new(RecordingQueue::new());
        let dispatcher = ChannelDispatcher::new(bus.clone(), queue.clone(), config());
        let processor =
            MessageProcessor::new(detector.clone(), translator.clone(), dispatcher);
        Harness {
            detector,
            translator,
            bus,
            queue,
            processor,
        }
    }

    #[tokio::test]
    async fn test_english_message_skips_translation() {
        let h = harness(MockDetector::fixed("en"), MockTranslator::new(MockMode::NoOp));
        let processed = h
            .processor
            .process(InboundEvent::new("hello world", "Teams"))
            .await
            .unwrap();

        assert_eq!(processed.message, "Ellohay orldway");
        assert_eq!(processed.channel, Channel::Teams);
        assert_eq!(h.detector.calls(), 1);
        assert_eq!(h.translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_english_message_is_translated_first() {
        let mut map = std::collections::HashMap::new();
        map.insert(
            ("bonjour le monde".to_string(), "en".to_string()),
            "hello world".to_string(),
        );
        let h = harness(
            MockDetector::fixed("fr"),
            MockTranslator::new(MockMode::Mappings(map)),
        );
        let processed = h
            .processor
            .process(InboundEvent::new("bonjour le monde", "Teams"))
            .await
            .unwrap();

        // Pig Latin is applied to the English text, not the French source
        assert_eq!(processed.message, "Ellohay orldway");
        assert_eq!(h.translator.calls(), 1);
    }

    #[tokio::test]
    async fn test_detection_runs_exactly_once() {
        let h = harness(MockDetector::fixed("fr"), MockTranslator::new(MockMode::NoOp));
        h.processor
            .process(InboundEvent::new("bonjour", "Teams"))
            .await
            .unwrap();
        assert_eq!(h.detector.calls(), 1);
    }

    #[tokio::test]
    async fn test_regional_english_skips_translation() {
        let h = harness(
            MockDetector::fixed("en-GB"),
            MockTranslator::new(MockMode::NoOp),
        );
        h.processor
            .process(InboundEvent::new("hello", "Teams"))
            .await
            .unwrap();
        assert_eq!(h.translator.calls(), 0);
    }

    #[tokio::test]
    async fn test_queue_channel_routes_to_queue() {
        let h = harness(MockDetector::fixed("en"), MockTranslator::new(MockMode::NoOp));
        h.processor
            .process(InboundEvent::new("hello world", "SQS"))
            .await
            .unwrap();

        assert_eq!(h.queue.messages().len(), 1);
        assert_eq!(h.queue.messages()[0].translated_message, "Ellohay orldway");
    }

    #[tokio::test]
    async fn test_unknown_channel_fails_before_any_service_call() {
        let h = harness(MockDetector::fixed("en"), MockTranslator::new(MockMode::NoOp));
        let result = h
            .processor
            .process(InboundEvent::new("hello", "Slack"))
            .await;

        match result {
            Err(RelayError::InvalidChannel(name)) => assert_eq!(name, "Slack"),
            _ => panic!("Expected InvalidChannel error"),
        }
        assert_eq!(h.detector.calls(), 0);
        assert!(h.bus.events().is_empty());
        assert!(h.queue.messages().is_empty());
    }

    #[tokio::test]
    async fn test_empty_message_fails_fast() {
        let h = harness(MockDetector::fixed("en"), MockTranslator::new(MockMode::NoOp));
        let result = h.processor.process(InboundEvent::new("  ", "Teams")).await;

        match result {
            Err(RelayError::InvalidEvent(msg)) => assert!(msg.contains("message")),
            _ => panic!("Expected InvalidEvent error"),
        }
        assert_eq!(h.detector.calls(), 0);
    }

    #[tokio::test]
    async fn test_empty_send_to_fails_fast() {
        let h = harness(MockDetector::fixed("en"), MockTranslator::new(MockMode::NoOp));
        let result = h.processor.process(InboundEvent::new("hello", "")).await;
        assert!(matches!(result, Err(RelayError::InvalidEvent(_))));
    }

    #[tokio::test]
    async fn test_detection_failure_propagates() {
        let h = harness(
            MockDetector::failing("service unavailable"),
            MockTranslator::new(MockMode::NoOp),
        );
        let result = h.processor.process(InboundEvent::new("hello", "Teams")).await;
        assert!(matches!(result, Err(RelayError::DetectionError(_))));
        // Nothing was dispatched after the failure
        assert!(h.bus.events().is_empty());
    }

    #[tokio::test]
    async fn test_translation_failure_propagates() {
        let h = harness(
            MockDetector::fixed("fr"),
            MockTranslator::new(MockMode::Error("quota exceeded".to_string())),
        );
        let result = h.processor.process(InboundEvent::new("bonjour", "Teams")).await;
        assert!(matches!(result, Err(RelayError::TranslationError(_))));
        assert!(h.bus.events().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_failure_propagates() {
        let h = harness(MockDetector::fixed("en"), MockTranslator::new(MockMode::NoOp));
        h.bus.fail_with("bus offline");
        let result = h.processor.process(InboundEvent::new("hello", "Teams")).await;
        assert!(matches!(result, Err(RelayError::DispatchError(_))));
    }

    #[test]
    fn test_trigger_event_deserializes_wire_shape() {
        let json = r#"{"detail": {"message": "hello", "sendTo": "Teams"}}"#;
        let trigger: TriggerEvent = serde_json::from_str(json).unwrap();
        assert_eq!(trigger.detail.message, "hello");
        assert_eq!(trigger.detail.send_to, "Teams");
    }

    #[test]
    fn test_inbound_event_missing_field_is_rejected() {
        let json = r#"{"message": "hello"}"#;
        let result: Result<InboundEvent, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
