use std::io::Write;

use counterview_core::{Effect, Msg};
use counterview_engine::{EngineEvent, EngineHandle};
use counterview_logging::{client_error, client_info, client_warn};

/// Executes core effects against the engine and the user's terminal.
pub struct EffectRunner<A: Write> {
    engine: EngineHandle,
    alerts: A,
}

impl<A: Write> EffectRunner<A> {
    pub fn new(engine: EngineHandle, alerts: A) -> Self {
        Self { engine, alerts }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SendAnalysis {
                    submission_id,
                    request,
                } => {
                    client_info!(
                        "SendAnalysis submission_id={} content_len={}",
                        submission_id,
                        request.content().len()
                    );
                    self.engine.submit(submission_id, request);
                }
                Effect::ShowAlert { message } => {
                    if let Err(err) = writeln!(self.alerts, "alert: {message}") {
                        client_warn!("Failed to show alert {:?}: {}", message, err);
                    }
                }
                Effect::LogFailure {
                    submission_id,
                    message,
                } => {
                    client_error!("Analysis {} failed: {}", submission_id, message);
                }
            }
        }
    }

    /// Blocks until the engine reports a completion. `None` if the engine is gone.
    pub fn wait_for_completion(&self) -> Option<Msg> {
        self.engine.recv().map(map_event)
    }

    #[cfg(test)]
    pub fn alerts(&self) -> &A {
        &self.alerts
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted {
            submission_id,
            result,
        } => match result {
            Ok(response) => Msg::AnalysisSucceeded {
                submission_id,
                response,
            },
            Err(err) => Msg::AnalysisFailed {
                submission_id,
                failure: err.to_string(),
            },
        },
    }
}
