#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    SendAnalysis {
        submission_id: crate::SubmissionId,
        request: crate::AnalysisRequest,
    },
    /// Blocking, user-facing notice.
    ShowAlert { message: String },
    LogFailure {
        submission_id: crate::SubmissionId,
        message: String,
    },
}
