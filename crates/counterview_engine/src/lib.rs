//! Counterview engine: analyze transport and effect execution.
mod engine;
mod persist;
mod transport;
mod types;

pub use engine::{EngineError, EngineHandle};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use transport::{
    default_endpoint, ReqwestTransport, Transport, TransportSettings, DEFAULT_ENDPOINT,
};
pub use types::{EngineEvent, FailureKind, TransportError};
