//! Pig Latin message relay pipeline
//!
//! Receives an event carrying a text message and a destination channel,
//! detects the message's language, translates it to English when it is not
//! already English, transforms the English text into Pig Latin, and forwards
//! the result to the selected downstream channel plus one unconditional
//! secondary team notification.
//!
//! The pipeline consists of several components working together:
//!
//! 1. **LanguageDetector & Translator traits** - Provider seams with a Google
//!    Translate implementation and API-free mocks
//! 2. **PigLatinTransformer** - The `piglatin` crate's deterministic sentence
//!    transform
//! 3. **ChannelDispatcher** - Payload construction and fan-out over the
//!    event-bus and queue seams
//! 4. **MessageProcessor** - Orchestrates the full pipeline
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use piglatin_relay::{
//!     ChannelDispatcher, GoogleTranslateProvider, InboundEvent, MessageProcessor, RelayConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = Arc::new(GoogleTranslateProvider::from_env()?);
//!     let config = RelayConfig::from_env()?;
//!     let processor = MessageProcessor::new(
//!         provider.clone(),
//!         provider,
//!         ChannelDispatcher::http(config),
//!     );
//!
//!     let processed = processor
//!         .process(InboundEvent::new("Bonjour le monde", "Teams"))
//!         .await?;
//!     println!("{}", processed.message);
//!     Ok(())
//! }
//! ```

pub mod channel;
pub mod config;
pub mod detector;
pub mod dispatch;
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod processor;
pub mod translator;


pub use channel::{Channel, ChannelPayload};
pub use config::RelayConfig;
pub use detector::{DetectedLanguage, ENGLISH, LanguageDetector};
pub use dispatch::{ChannelDispatcher, EVENT_SOURCE, EventBus, HttpEventBus, HttpQueue, MessageQueue};
pub use error::{RelayError, RelayResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockDetector, MockMode, MockTranslator, RecordingEventBus, RecordingQueue};
pub use processor::{InboundEvent, MessageProcessor, Processed, TriggerEvent};
pub use translator::{Translator, normalize_locale, validate_locale};
