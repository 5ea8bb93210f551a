//! Word-by-word Pig Latin transformation
//!
//! Words are produced by splitting on single spaces and rejoined the same
//! way, so runs of consecutive spaces survive the round trip verbatim (the
//! empty tokens between them are passed through unchanged). Trailing
//! punctuation is detached from a word before the rotation and reattached
//! after the suffix, preserving every mark in its original order.

/// Punctuation characters recognized at the end of a word
///
/// A trailing run of these characters is detached before the rotation step
/// and reattached after the `ay` suffix.
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Suffix appended to every rotated word
const SUFFIX: &str = "ay";

/// Transform a full sentence into Pig Latin
///
/// Each word is transformed with [`transform_word`], the words are rejoined
/// with single spaces, the whole sentence is lower-cased, and the first
/// character of the result is capitalized.
///
/// # Arguments
///
/// * `message` - The sentence to transform
///
/// # Returns
///
/// The transformed sentence. An empty input yields an empty output.
///
/// # Example
///
/// ```
/// use piglatin::transform;
///
/// assert_eq!(transform("hello world"), "Ellohay orldway");
/// assert_eq!(transform(""), "");
/// assert_eq!(transform("a"), "A");
/// ```
pub fn transform(message: &str) -> String {
    let transformed = message
        .split(' ')
        .map(transform_word)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    capitalize_first(&transformed)
}

/// Transform a single word into Pig Latin
///
/// Trailing punctuation is split off first; the length guard then applies to
/// the remaining stem. Stems shorter than two characters pass through
/// unchanged (punctuation included), otherwise the first letter of the stem
/// moves to the end and the `ay` suffix is appended, followed by the detached
/// punctuation.
///
/// Case is left untouched here; [`transform`] normalizes it at the sentence
/// level.
///
/// # Example
///
/// ```
/// use piglatin::transform_word;
///
/// assert_eq!(transform_word("hello"), "ellohay");
/// assert_eq!(transform_word("world!"), "orldway!");
/// assert_eq!(transform_word("a"), "a");
/// ```
pub fn transform_word(word: &str) -> String {
    let stem = word.trim_end_matches(TRAILING_PUNCTUATION);
    let tail = &word[stem.len()..];

    let mut chars = stem.chars();
    let Some(first) = chars.next() else {
        // Word is empty or all punctuation
        return word.to_string();
    };
    let rest = chars.as_str();
    if rest.is_empty() {
        // Single-character stem
        return word.to_string();
    }

    format!("{rest}{first}{SUFFIX}{tail}")
}

/// Upper-case the first character of a sentence, leaving the rest untouched
fn capitalize_first(sentence: &str) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
