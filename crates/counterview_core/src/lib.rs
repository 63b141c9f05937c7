//! Counterview core: pure analyze-flow state machine and view-model helpers.
mod compose;
mod effect;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use compose::{compose_request, InputError};
pub use effect::Effect;
pub use model::{AnalysisRequest, AnalysisResponse, StaleResultPolicy, SubmissionId, Surface};
pub use msg::Msg;
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, LinkTarget, LinkView};
