//! Google Translate API provider for language detection and translation
//!
//! This module integrates with Google Translate API v2 to provide the two
//! managed-service legs of the pipeline: `/detect` for dominant-language
//! detection and the root endpoint for translation.
//!
//! # Authentication
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable. Obtain a key from:
//! https://console.cloud.google.com/
//!
//! # Example
//!
//! ```ignore
//! use piglatin_relay::{GoogleTranslateProvider, LanguageDetector, Translator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!
//!     let detected = provider.detect("Bonjour le monde").await?;
//!     println!("{}", detected.code); // "fr"
//!
//!     let result = provider.translate("Bonjour le monde", &detected.code, "en").await?;
//!     println!("{}", result); // "Hello world"
//!
//!     Ok(())
//! }
//! ```

use crate::detector::{DetectedLanguage, LanguageDetector};
use crate::error::{RelayError, RelayResult};
use crate::translator::{Translator, normalize_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;

/// Google Translate API v2 provider
///
/// Communicates with Google's translation API to perform real language
/// detection and translation.
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// API key for authentication
    api_key: String,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a new GoogleTranslateProvider with an explicit API key
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google Translate API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(RelayError)` - If API key is empty or HTTP client creation fails
    pub fn new(api_key: String) -> RelayResult<Self> {
        if api_key.trim().is_empty() {
            return Err(RelayError::ConfigError(
                "API key cannot be empty".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                RelayError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            client,
            base_url: "https://translation.googleapis.com/language/translate/v2".to_string(),
        })
    }

    /// Create a GoogleTranslateProvider from the `GOOGLE_TRANSLATE_API_KEY`
    /// environment variable
    pub fn from_env() -> RelayResult<Self> {
        let api_key = std::env::var("GOOGLE_TRANSLATE_API_KEY").map_err(|_| {
            RelayError::ConfigError(
                "GOOGLE_TRANSLATE_API_KEY environment variable not set".to_string(),
            )
        })?;

        Self::new(api_key)
    }

    fn check_length(text: &str) -> RelayResult<()> {
        if text.len() > Self::MAX_CHARS_PER_STRING {
            return Err(RelayError::TranslationError(format!(
                "Text exceeds maximum length of {} characters",
                Self::MAX_CHARS_PER_STRING
            )));
        }
        Ok(())
    }

    /// POST a JSON body to an API path and return the parsed response
    ///
    /// Client errors (bad key, quota) map to `ConfigError`; server errors map
    /// to the operation error named by `operation`.
    async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
        operation: fn(String) -> RelayError,
    ) -> RelayResult<serde_json::Value> {
        let url = format!("{}{}?key={}", self.base_url, path, self.api_key);

        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            return Err(if status.is_client_error() {
                RelayError::ConfigError(format!("API client error ({}): {}", status, error_text))
            } else {
                operation(format!("API server error ({}): {}", status, error_text))
            });
        }

        response
            .json()
            .await
            .map_err(|e| operation(format!("Failed to parse API response: {}", e)))
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl LanguageDetector for GoogleTranslateProvider {
    async fn detect(&self, text: &str) -> RelayResult<DetectedLanguage> {
        Self::check_length(text)?;

        let body = json!({ "q": text });
        let json = self
            .post_json("/detect", &body, RelayError::DetectionError)
            .await?;

        // Response shape: {"data": {"detections": [[{"language": "...", "confidence": ...}]]}}
        let detection = json["data"]["detections"][0][0].as_object().ok_or_else(|| {
            RelayError::DetectionError(
                "Invalid API response: missing 'data.detections' entry".to_string(),
            )
        })?;

        let code = detection
            .get("language")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                RelayError::DetectionError(
                    "Invalid API response: missing 'language' field".to_string(),
                )
            })?;

        let score = detection
            .get("confidence")
            .and_then(|v| v.as_f64())
            .map(|v| v as f32);

        Ok(DetectedLanguage {
            code: code.to_string(),
            score,
        })
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}

#[async_trait]
impl Translator for GoogleTranslateProvider {
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> RelayResult<String> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if text.is_empty() {
            return Ok(String::new());
        }
        Self::check_length(text)?;

        let body = json!({
            "q": [text],
            "source": normalize_locale(source_locale),
            "target": normalize_locale(target_locale),
            "format": "text"
        });

        let json = self
            .post_json("", &body, RelayError::TranslationError)
            .await?;

        json["data"]["translations"][0]["translatedText"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| {
                RelayError::TranslationError(
                    "Invalid API response: missing 'translatedText' field".to_string(),
                )
            })
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== Initialization Tests ==========

    #[test]
    fn test_new_with_valid_key() {
        let provider = GoogleTranslateProvider::new("test-api-key".to_string());
        assert!(provider.is_ok());
        assert_eq!(
            Translator::provider_name(&provider.unwrap()),
            "Google Translate"
        );
    }

    #[test]
    fn test_new_with_empty_key() {
        let result = GoogleTranslateProvider::new("".to_string());
        assert!(result.is_err());
        match result {
            Err(RelayError::ConfigError(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected ConfigError"),
        }
    }

    #[test]
    fn test_new_with_whitespace_key() {
        let result = GoogleTranslateProvider::new("   ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_from_env_without_key() {
        // Ensure env var is not set for this test
        unsafe {
            std::env::remove_var("GOOGLE_TRANSLATE_API_KEY");
        }
        let result = GoogleTranslateProvider::from_env();
        assert!(result.is_err());
        match result {
            Err(RelayError::ConfigError(msg)) => assert!(msg.contains("not set")),
            _ => panic!("Expected ConfigError"),
        }
    }

    // ========== Validation Tests ==========

    #[tokio::test]
    async fn test_translate_empty_text() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("", "fr", "en").await.unwrap();
        assert_eq!(result, "");
    }

    #[tokio::test]
    async fn test_translate_invalid_source_locale() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider.translate("hello", "invalid@code", "en").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_translate_text_too_long() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        let result = provider.translate(&long_text, "fr", "en").await;
        assert!(result.is_err());
        match result {
            Err(RelayError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            _ => panic!("Expected TranslationError"),
        }
    }

    // ========== Debug Implementation Test ==========

    #[test]
    fn test_debug_output_masks_key() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    // ========== Integration Tests (require real API key) ==========

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_detection() {
        if std::env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
            eprintln!("Skipping: GOOGLE_TRANSLATE_API_KEY not set");
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let detected = provider.detect("Bonjour tout le monde").await.unwrap();
        assert_eq!(detected.code, "fr");
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test -- --ignored
    async fn test_real_api_translation() {
        if std::env::var("GOOGLE_TRANSLATE_API_KEY").is_err() {
            eprintln!("Skipping: GOOGLE_TRANSLATE_API_KEY not set");
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let result = provider.translate("Bonjour", "fr", "en").await.unwrap();
        println!("Translation: {} → {}", "Bonjour", result);
        assert!(!result.is_empty());
    }
}
