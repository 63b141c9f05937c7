use serde::{Deserialize, Serialize};

pub type SubmissionId = u64;

/// Payload sent to the analyze endpoint: `{"content": "..."}`.
///
/// Built by [`crate::compose_request`], which guarantees `content` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    content: String,
}

impl AnalysisRequest {
    pub(crate) fn new(content: String) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Successful analyze response. Article order is kept as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub summary: String,
    pub articles: Vec<String>,
}

/// Where the user input comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Surface {
    /// Free text pasted into a form.
    #[default]
    TextForm,
    /// URL of the page the user is currently viewing.
    ActiveTab,
}

impl Surface {
    pub fn default_stale_policy(self) -> StaleResultPolicy {
        match self {
            Surface::TextForm => StaleResultPolicy::Retain,
            Surface::ActiveTab => StaleResultPolicy::Clear,
        }
    }

    pub(crate) fn failure_alert(self) -> &'static str {
        match self {
            Surface::TextForm => "Failed to analyze content. Please try again.",
            Surface::ActiveTab => "Failed to analyze the current page. Please try again.",
        }
    }
}

/// What happens to a displayed result when a new submission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaleResultPolicy {
    /// Hide the previous result as soon as the new request is sent.
    Clear,
    /// Keep showing the previous result until the new one arrives.
    Retain,
}
