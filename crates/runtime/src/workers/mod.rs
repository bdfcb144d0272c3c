//! Worker tasks that back the runtime.
//!
//! The module worker is the single writer for every orchestrator and the
//! dataset store. The fetch task runs the remote dataset check once and
//! reports back through the worker's mailbox.

mod fetch;
mod module;

pub use fetch::spawn_remote_check;
pub use module::{Command, ModuleWorker};
