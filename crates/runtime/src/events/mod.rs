//! Topic-based event bus for runtime events.
//!
//! Module outcomes and dataset lifecycle changes are published to separate
//! topics so frontends can subscribe only to what they render.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{DataEvent, ModuleEvent};
