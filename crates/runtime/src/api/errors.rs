//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination, registry loading and snapshot
//! decoding so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use shelter_core::{ErrorSeverity, GameError, RegistryError, SnapshotError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("ability worker command channel closed")]
    CommandChannelClosed,

    #[error("ability worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("runtime worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("failed to build ability registry")]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

impl GameError for RuntimeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Snapshot(error) => error.severity(),
            Self::Registry(_) | Self::WorkerJoin(_) => ErrorSeverity::Fatal,
            Self::CommandChannelClosed | Self::ReplyChannelClosed(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::CommandChannelClosed => "RUNTIME_COMMAND_CHANNEL_CLOSED",
            Self::ReplyChannelClosed(_) => "RUNTIME_REPLY_CHANNEL_CLOSED",
            Self::WorkerJoin(_) => "RUNTIME_WORKER_JOIN",
            Self::Registry(error) => error.error_code(),
            Self::Snapshot(error) => error.error_code(),
        }
    }
}
