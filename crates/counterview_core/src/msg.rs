#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the input (pasted text, or the active tab's URL).
    InputChanged(String),
    /// User pressed the submit control.
    SubmitClicked,
    /// Transport returned a parsed response.
    AnalysisSucceeded {
        submission_id: crate::SubmissionId,
        response: crate::AnalysisResponse,
    },
    /// Transport failed: non-2xx, network error or unreadable body.
    AnalysisFailed {
        submission_id: crate::SubmissionId,
        failure: String,
    },
    /// User acknowledged the current alert.
    AlertDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
