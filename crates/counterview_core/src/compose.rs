use url::Url;

use crate::{AnalysisRequest, Surface};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Please enter some text to analyze.")]
    EmptyText,
    #[error("Could not read the URL of the current page.")]
    TabUrlUnavailable,
    #[error("The current page does not have a valid URL: {0}")]
    InvalidUrl(String),
}

/// Validate raw user input for `surface` and build the outgoing payload.
pub fn compose_request(surface: Surface, raw: &str) -> Result<AnalysisRequest, InputError> {
    match surface {
        Surface::TextForm => {
            if raw.trim().is_empty() {
                return Err(InputError::EmptyText);
            }
            Ok(AnalysisRequest::new(raw.to_string()))
        }
        Surface::ActiveTab => {
            let candidate = raw.trim();
            if candidate.is_empty() {
                return Err(InputError::TabUrlUnavailable);
            }
            Url::parse(candidate).map_err(|err| InputError::InvalidUrl(err.to_string()))?;
            Ok(AnalysisRequest::new(candidate.to_string()))
        }
    }
}
