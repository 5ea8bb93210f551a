//! Translation trait and locale utilities
//!
//! This module defines the `Translator` trait for provider abstraction,
//! enabling support for different translation backends (Google Translate,
//! mock, etc.) without coupling the pipeline to any specific implementation.

use crate::error::{RelayError, RelayResult};
use async_trait::async_trait;

/// Generic trait for translation providers
///
/// Implementations of this trait handle the actual translation work, whether
/// through an API (Google Translate) or deterministic logic (Mock).
///
/// All methods are async to support I/O-bound operations like network
/// requests.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - The text to translate
    /// * `source_locale` - Source language code (e.g. "fr", "fr-FR")
    /// * `target_locale` - Target language code (e.g. "en")
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translated text
    /// * `Err(RelayError)` - If translation fails
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> RelayResult<String>;

    /// Name of this translation provider, for logging
    fn provider_name(&self) -> &str;
}

/// Normalize a locale code by stripping region information
///
/// Converts locale codes from BCP 47 format to ISO 639-1 format:
/// - `en-US` → `en`
/// - `zh-Hans` → `zh`
/// - `en` → `en` (unchanged)
///
/// # Arguments
///
/// * `locale` - The locale code to normalize
///
/// # Returns
///
/// The normalized locale code (base language only)
pub fn normalize_locale(locale: &str) -> String {
    locale.split('-').next().unwrap_or(locale).to_lowercase()
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code contains only alphanumeric characters,
/// hyphens, and underscores (following ISO 639 conventions).
///
/// # Arguments
///
/// * `locale` - The locale code to validate
///
/// # Returns
///
/// * `Ok(())` - If the locale is valid
/// * `Err(RelayError)` - If the locale is invalid
pub fn validate_locale(locale: &str) -> RelayResult<()> {
    if locale.is_empty() {
        return Err(RelayError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(RelayError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_locale_with_region() {
        assert_eq!(normalize_locale("en-US"), "en");
        assert_eq!(normalize_locale("fr-FR"), "fr");
    }

    #[test]
    fn test_normalize_locale_with_script() {
        assert_eq!(normalize_locale("zh-Hans"), "zh");
        assert_eq!(normalize_locale("sr-Latn"), "sr");
    }

    #[test]
    fn test_normalize_locale_already_simple() {
        assert_eq!(normalize_locale("en"), "en");
        assert_eq!(normalize_locale("nl"), "nl");
    }

    #[test]
    fn test_normalize_locale_case_insensitive() {
        assert_eq!(normalize_locale("EN"), "en");
        assert_eq!(normalize_locale("EN-US"), "en");
    }

    #[test]
    fn test_validate_locale_valid_codes() {
        assert!(validate_locale("en").is_ok());
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("de_DE").is_ok());
    }

    #[test]
    fn test_validate_locale_invalid_codes() {
        assert!(validate_locale("").is_err());
        assert!(validate_locale("en@invalid").is_err());
        assert!(validate_locale("fr#bad").is_err());
    }

    #[test]
    fn test_validate_locale_error_messages() {
        match validate_locale("en@US") {
            Err(RelayError::InvalidLocale(msg)) => {
                assert!(msg.contains("Invalid characters"));
            }
            _ => panic!("Expected InvalidLocale error"),
        }
    }
}
