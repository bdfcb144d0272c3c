//! Deterministic logic core of the Iconic puzzle module.
//!
//! `iconic-core` defines the dataset wire format and the queue-driven puzzle
//! state machine. It is pure and synchronous: loading, fetching, polling and
//! host signalling live in `iconic-content` and `iconic-runtime`, which drive
//! [`engine::PuzzleOrchestrator`] through the oracle traits in [`env`].
pub mod config;
pub mod data;
pub mod engine;
pub mod env;
pub mod error;

pub use config::IconicConfig;
pub use data::{
    DatasetSnapshot, FilterMode, IconRecord, PartRecord, SpriteSheet, StringDictionary, Timestamp,
};
pub use engine::{
    ActiveSelection, COMMAND_HELP, ChatCommand, CommandRejection, CommandResponse,
    CompletionStage, Display, Effect, ForcedStep, IconTexture, Phase, PuzzleOrchestrator, Sound,
    UvRect, cell_position, parse_coordinate,
};
pub use env::{BombOracle, IconOracle, ModuleEnv, PcgRng, RngOracle, StaticBomb, compute_seed};
pub use error::{DecodeError, ErrorSeverity, IconicError};
