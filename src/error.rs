//! Structured error types for quotepage.
//!
//! Layout itself cannot fail. These variants cover the surfaces around it:
//! JSON input and output, file access, logo decoding, and the letterhead
//! lookup.

use thiserror::Error;

use crate::letterhead::LetterheadError;

/// The unified error type returned by the fallible public API.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// JSON input failed to parse as a valid document or config.
    #[error("Failed to parse document: {source}{}", hint_suffix(.hint))]
    Parse {
        source: serde_json::Error,
        hint: String,
    },
    /// Laid-out pages could not be written as JSON.
    #[error("Failed to write layout JSON: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// A letterhead logo could not be loaded or decoded.
    #[error("Image error: {0}")]
    Image(String),
    #[error(transparent)]
    Letterhead(#[from] LetterheadError),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the expected schema. Check field names (camelCase), types, and dates (YYYY-MM-DD).".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        QuoteError::Parse { source: e, hint }
    }
}
