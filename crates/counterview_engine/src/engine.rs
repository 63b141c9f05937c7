use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use counterview_core::{AnalysisRequest, SubmissionId};
use counterview_logging::{client_debug, client_info};

use crate::transport::{ReqwestTransport, Transport, TransportSettings};
use crate::{EngineEvent, TransportError};

enum EngineCommand {
    Analyze {
        submission_id: SubmissionId,
        request: AnalysisRequest,
    },
}

/// Runs analyze calls on a background tokio runtime.
///
/// Commands go in through [`EngineHandle::submit`], results come back as
/// [`EngineEvent`]s on a channel, so the caller's loop never touches async code.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl EngineHandle {
    pub fn new(settings: TransportSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let transport = transport.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(transport.as_ref(), command, event_tx).await;
                });
            }
            client_debug!("engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, submission_id: SubmissionId, request: AnalysisRequest) {
        client_info!(
            "submitting analysis submission={} content_len={}",
            submission_id,
            request.content().len()
        );
        let _ = self.cmd_tx.send(EngineCommand::Analyze {
            submission_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event. `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    transport: &dyn Transport,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze {
            submission_id,
            request,
        } => {
            let result = transport.analyze(&request).await;
            if let Err(err) = &result {
                client_debug!("submission={} failed: {}", submission_id, err);
            }
            let _ = event_tx.send(EngineEvent::AnalysisCompleted {
                submission_id,
                result,
            });
        }
    }
}
