//! Prefill Errors
//!
//! Everything that can go wrong between an edit trigger and a filled form.
//! None of these cross the JS event boundary; handlers log them and move on.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PrefillError {
    /// `data-id` present but not a record identifier
    #[error("invalid record id {0:?}")]
    InvalidId(String),

    /// Request never produced a response
    #[error("request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// Response arrived with a non-2xx status
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },

    /// Body was not the JSON shape we expected
    #[error("malformed response from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl PrefillError {
    /// Short text for the inline notice shown inside the modal
    pub fn notice_text(&self) -> String {
        match self {
            PrefillError::InvalidId(_) => "Záznam sa nepodarilo identifikovať.".to_string(),
            PrefillError::Network { .. } | PrefillError::Status { .. } => {
                "Údaje sa nepodarilo načítať, formulár nebol zmenený.".to_string()
            }
            PrefillError::Decode { .. } => {
                "Server vrátil neplatné údaje, formulár nebol zmenený.".to_string()
            }
        }
    }
}
