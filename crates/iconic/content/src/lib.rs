//! Dataset loading and version reconciliation for the Iconic module.
//!
//! This crate turns raw dataset files into installed snapshots:
//! - Bundled data read from a local data directory
//! - Remote overrides fetched over HTTP (feature `remote`)
//! - [`DatasetStore`], which keeps the active snapshot and only lets a
//!   strictly newer remote build replace it
//!
//! Decoding itself lives in `iconic-core`; this crate owns the I/O around it.

pub mod loaders;
pub mod remote;
pub mod store;

pub use loaders::{BundledData, BundledLoader, LoadResult};
#[cfg(feature = "remote")]
pub use remote::HttpDatasetSource;
pub use remote::{DatasetSource, FetchError, RemotePayload};
pub use store::{DatasetStore, RemoteOutcome};
