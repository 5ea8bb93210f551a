//! Language detection trait
//!
//! Abstracts the managed language-detection service behind a small async
//! trait so the pipeline can run against the real API or a deterministic
//! mock. Detection runs once per inbound message; the single result answers
//! both "is this already English?" and "what source code do we translate
//! from?".

use crate::error::RelayResult;
use crate::translator::normalize_locale;
use async_trait::async_trait;

/// Language code the pipeline translates into
pub const ENGLISH: &str = "en";

/// Outcome of one language-detection call
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedLanguage {
    /// ISO 639-1 code of the dominant language (e.g. "en", "fr")
    pub code: String,
    /// Detection confidence when the service reports one, in [0, 1]
    pub score: Option<f32>,
}

impl DetectedLanguage {
    /// True when the detected code is English after locale normalization
    ///
    /// Regional variants count as English ("en-GB" → "en").
    pub fn is_english(&self) -> bool {
        normalize_locale(&self.code) == ENGLISH
    }
}

/// Generic trait for language-detection providers
///
/// Implementations call a detection API (or deterministic logic in tests)
/// and return the most probable language of the given text.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    /// Detect the dominant language of `text`
    ///
    /// # Arguments
    ///
    /// * `text` - The text to classify
    ///
    /// # Returns
    ///
    /// * `Ok(DetectedLanguage)` - The most probable language
    /// * `Err(RelayError)` - If detection fails
    async fn detect(&self, text: &str) -> RelayResult<DetectedLanguage>;

    /// Name of this detection provider, for logging
    fn provider_name(&self) -> &str;
}
