use crate::view_model::{AppViewModel, LinkTarget, LinkView};
use crate::{AnalysisResponse, StaleResultPolicy, SubmissionId, Surface};

/// Session state for one client surface.
///
/// Owned by the caller and threaded through [`crate::update`]; there is no
/// shared global copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    surface: Surface,
    stale_policy: StaleResultPolicy,
    input: String,
    is_loading: bool,
    in_flight: Option<SubmissionId>,
    next_submission_id: SubmissionId,
    result: Option<AnalysisResponse>,
    alert: Option<String>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Surface::default())
    }
}

impl AppState {
    pub fn new(surface: Surface) -> Self {
        Self::with_policy(surface, surface.default_stale_policy())
    }

    pub fn with_policy(surface: Surface, stale_policy: StaleResultPolicy) -> Self {
        Self {
            surface,
            stale_policy,
            input: String::new(),
            is_loading: false,
            in_flight: None,
            next_submission_id: 1,
            result: None,
            alert: None,
            dirty: false,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn stale_policy(&self) -> StaleResultPolicy {
        self.stale_policy
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn in_flight(&self) -> Option<SubmissionId> {
        self.in_flight
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn view(&self) -> AppViewModel {
        let (summary, links) = match &self.result {
            Some(result) => (
                Some(result.summary.clone()),
                result
                    .articles
                    .iter()
                    .map(|href| LinkView {
                        href: href.clone(),
                        target: LinkTarget::NewContext,
                    })
                    .collect(),
            ),
            None => (None, Vec::new()),
        };
        AppViewModel {
            surface: self.surface,
            is_loading: self.is_loading,
            submit_enabled: !self.is_loading,
            loading_label: self.is_loading.then(|| "Analyzing...".to_string()),
            summary,
            links,
            alert: self.alert.clone(),
        }
    }

    /// Returns whether anything observable changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_input(&mut self, input: String) {
        if self.input != input {
            self.input = input;
            self.mark_dirty();
        }
    }

    /// Enter Submitting; returns the id assigned to the new submission.
    pub(crate) fn begin_submission(&mut self) -> SubmissionId {
        let id = self.next_submission_id;
        self.next_submission_id += 1;
        self.is_loading = true;
        self.in_flight = Some(id);
        self.alert = None;
        if self.stale_policy == StaleResultPolicy::Clear {
            self.result = None;
        }
        self.mark_dirty();
        id
    }

    /// Leave Submitting if `submission_id` is the one in flight.
    pub(crate) fn settle(&mut self, submission_id: SubmissionId) -> bool {
        if self.in_flight != Some(submission_id) {
            return false;
        }
        self.in_flight = None;
        self.is_loading = false;
        self.mark_dirty();
        true
    }

    pub(crate) fn set_result(&mut self, response: AnalysisResponse) {
        self.result = Some(response);
        self.mark_dirty();
    }

    pub(crate) fn set_alert(&mut self, message: String) {
        self.alert = Some(message);
        self.mark_dirty();
    }

    pub(crate) fn clear_alert(&mut self) {
        if self.alert.take().is_some() {
            self.mark_dirty();
        }
    }
}
