//! Mock providers and recording dispatchers for testing
//!
//! This module provides deterministic, API-free stand-ins for every external
//! collaborator, so the pipeline can be tested without API keys or network
//! access: a detector with a scripted verdict, a translator with pluggable
//! modes, and event-bus/queue implementations that record what was sent.
//!
//! # Example
//!
//! ```ignore
//! use piglatin_relay::{LanguageDetector, MockDetector};
//!
//! #[tokio::test]
//! async fn test_detection() {
//!     let mock = MockDetector::fixed("fr");
//!     let detected = mock.detect("Bonjour").await.unwrap();
//!     assert_eq!(detected.code, "fr");
//!     assert_eq!(mock.calls(), 1);
//! }
//! ```

use crate::channel::ChannelPayload;
use crate::detector::{DetectedLanguage, LanguageDetector};
use crate::dispatch::{EventBus, MessageQueue};
use crate::error::{RelayError, RelayResult};
use crate::translator::Translator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_en"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_locale) → translation
    Mappings(HashMap<(String, String), String>),

    /// Simulate API errors
    Error(String),

    /// No-op: return input unchanged
    NoOp,
}

/// Mock language detector with a scripted verdict
///
/// Counts its invocations so tests can assert the detection service is
/// called exactly once per message.
#[derive(Debug)]
pub struct MockDetector {
    code: String,
    score: Option<f32>,
    error: Option<String>,
    calls: AtomicUsize,
}

impl MockDetector {
    /// Detector that always reports the given language code
    pub fn fixed(code: &str) -> Self {
        Self {
            code: code.to_string(),
            score: Some(0.99),
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Detector that always fails with the given message
    pub fn failing(message: &str) -> Self {
        Self {
            code: String::new(),
            score: None,
            error: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of detect calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, _text: &str) -> RelayResult<DetectedLanguage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(msg) = &self.error {
            return Err(RelayError::DetectionError(msg.clone()));
        }
        Ok(DetectedLanguage {
            code: self.code.clone(),
            score: self.score,
        })
    }

    fn provider_name(&self) -> &str {
        "Mock Detector"
    }
}

/// Mock translator that simulates various translation scenarios
///
/// Useful for testing the pipeline without external API dependencies. Counts
/// its invocations so tests can assert the translation leg runs only for
/// non-English input.
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: AtomicUsize,
}

impl MockTranslator {
    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a MockTranslator with simulated network delay
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            mode,
            delay_ms,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of translate calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn apply_translation(&self, text: &str, _source: &str, target: &str) -> RelayResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(RelayError::TranslationError(msg.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl Translator for MockTranslator {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> RelayResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.apply_delay().await;
        self.apply_translation(text, source_locale, target_locale)
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}

/// Event bus that records published events instead of delivering them
#[derive(Debug, Default)]
pub struct RecordingEventBus {
    events: Mutex<Vec<(String, ChannelPayload)>>,
    fail_with: Mutex<Option<String>>,
}

impl RecordingEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent put_event fail with a dispatch error
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    /// Events recorded so far, as (detail_type, payload) pairs
    pub fn events(&self) -> Vec<(String, ChannelPayload)> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventBus for RecordingEventBus {
    async fn put_event(&self, detail_type: &str, detail: &ChannelPayload) -> RelayResult<()> {
        if let Some(msg) = self.fail_with.lock().unwrap().clone() {
            return Err(RelayError::DispatchError(msg));
        }
        self.events
            .lock()
            .unwrap()
            .push((detail_type.to_string(), detail.clone()));
        Ok(())
    }
}

/// Message queue that records sent bodies instead of delivering them
#[derive(Debug, Default)]
pub struct RecordingQueue {
    messages: Mutex<Vec<ChannelPayload>>,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages recorded so far
    pub fn messages(&self) -> Vec<ChannelPayload> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageQueue for RecordingQueue {
    async fn send(&self, body: &ChannelPayload) -> RelayResult<()> {
        self.messages.lock().unwrap().push(body.clone());
        Ok(())
    }
}
