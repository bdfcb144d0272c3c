//! Dataset wire format.
//!
//! A payload is `<timestamp>#<iconTokens>#<dictBlob>`: icon tokens are joined
//! by `^`, fields inside an icon by `|`, parts by `!`, a part's name and
//! ranges by `$`, ranges by `,`, and a range's start and count by `:`.
//! Names are stored once in the trailing [`StringDictionary`] and referenced
//! by index.
mod dictionary;
mod icon;
mod part;
mod snapshot;
mod sprite;
mod timestamp;

pub use dictionary::{CARET_ESCAPE, ENTRY_SEPARATOR, HASH_ESCAPE, StringDictionary};
pub use icon::{IconRecord, PART_SEPARATOR};
pub use part::{PartRecord, parse_ranges};
pub use snapshot::{DatasetSnapshot, ICON_SEPARATOR, SECTION_SEPARATOR};
pub use sprite::{FilterMode, SpriteSheet};
pub use timestamp::Timestamp;
