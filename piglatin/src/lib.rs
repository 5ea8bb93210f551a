//! Pig Latin sentence transformation
//!
//! This crate implements the word-rotation dialect of Pig Latin used by the
//! relay pipeline: the first letter of each word moves to the end of the word
//! and the suffix `ay` is appended, trailing punctuation stays attached to its
//! word, and the finished sentence is lower-cased with the first character
//! capitalized.
//!
//! The transformation is deterministic and stateless. It is **not**
//! idempotent: applying it twice does not return the original sentence.
//!
//! # Example
//!
//! ```
//! use piglatin::transform;
//!
//! assert_eq!(transform("hello world"), "Ellohay orldway");
//! assert_eq!(transform("Hello, world!"), "Ellohay, orldway!");
//! ```

mod transform;

pub use transform::{transform, transform_word};
