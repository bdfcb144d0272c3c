//! Public runtime API surface.

pub mod errors;
pub mod handle;
pub mod host;
pub mod status;

pub use errors::{Result, RuntimeError};
pub use handle::RuntimeHandle;
pub use host::ModuleHost;
pub use status::ModuleStatus;
