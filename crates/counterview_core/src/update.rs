use crate::{compose_request, AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(input) => {
            state.set_input(input);
            Vec::new()
        }
        Msg::SubmitClicked => {
            // Submit control is disabled while a request is in flight.
            if state.is_loading() {
                return (state, Vec::new());
            }
            match compose_request(state.surface(), state.input()) {
                Ok(request) => {
                    let submission_id = state.begin_submission();
                    vec![Effect::SendAnalysis {
                        submission_id,
                        request,
                    }]
                }
                Err(err) => {
                    let message = err.to_string();
                    state.set_alert(message.clone());
                    vec![Effect::ShowAlert { message }]
                }
            }
        }
        Msg::AnalysisSucceeded {
            submission_id,
            response,
        } => {
            if state.settle(submission_id) {
                state.set_result(response);
            }
            Vec::new()
        }
        Msg::AnalysisFailed {
            submission_id,
            failure,
        } => {
            if state.settle(submission_id) {
                let message = state.surface().failure_alert().to_string();
                state.set_alert(message.clone());
                vec![
                    Effect::LogFailure {
                        submission_id,
                        message: failure,
                    },
                    Effect::ShowAlert { message },
                ]
            } else {
                Vec::new()
            }
        }
        Msg::AlertDismissed => {
            state.clear_alert();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
