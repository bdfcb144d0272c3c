//! Unified error types surfaced by the runtime API.
//!
//! Domain outcomes (strikes, passes) are events, never errors. These cover
//! runtime plumbing and startup only.
use thiserror::Error;
use tokio::sync::oneshot;

use iconic_core::DecodeError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("module worker command channel closed")]
    CommandChannelClosed,

    #[error("module worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("module worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires a module host before building")]
    MissingHost,

    #[error("runtime requires bundled dataset before building")]
    MissingBundledData,

    #[error("failed to decode bundled dataset")]
    BundledDecode(#[source] DecodeError),

    #[error("no module with id {0}")]
    UnknownModule(u32),
}
