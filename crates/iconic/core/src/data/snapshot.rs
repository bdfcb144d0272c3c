//! Complete, internally consistent dataset versions.

use std::collections::HashMap;
use std::sync::Arc;

use crate::data::{IconRecord, SpriteSheet, StringDictionary, Timestamp};
use crate::env::IconOracle;
use crate::error::DecodeError;

/// Payload section separator.
pub const SECTION_SEPARATOR: char = '#';

/// Icon token separator (shared with the dictionary entry separator).
pub const ICON_SEPARATOR: char = '^';

/// One loaded dataset version: build timestamp, icons, and sprite sheet.
///
/// Immutable once parsed. Icons are reference counted so an active puzzle
/// keeps its icon alive after a newer snapshot replaces this one.
#[derive(Clone, Debug)]
pub struct DatasetSnapshot {
    timestamp: Timestamp,
    icons: Vec<Arc<IconRecord>>,
    by_name: HashMap<String, usize>,
    sprite: SpriteSheet,
}

impl DatasetSnapshot {
    /// Decodes `<timestamp>#<iconTokens>#<dictBlob>`.
    pub fn parse(payload: &str, sprite: SpriteSheet) -> Result<Self, DecodeError> {
        let mut sections = payload.split(SECTION_SEPARATOR);
        let timestamp = sections
            .next()
            .ok_or(DecodeError::MissingSection("timestamp"))?;
        let icon_tokens = sections
            .next()
            .ok_or(DecodeError::MissingSection("icons"))?;
        let dict_blob = sections
            .next()
            .ok_or(DecodeError::MissingSection("dictionary"))?;

        let timestamp = Timestamp::parse(timestamp)?;
        let dict = StringDictionary::parse(dict_blob);
        let icons = icon_tokens
            .split(ICON_SEPARATOR)
            .map(|token| IconRecord::parse(token, &dict).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(timestamp, icons, sprite))
    }

    /// Reads only the leading timestamp, without decoding icons.
    pub fn peek_timestamp(payload: &str) -> Result<Timestamp, DecodeError> {
        let (timestamp, _) = payload
            .split_once(SECTION_SEPARATOR)
            .ok_or(DecodeError::MissingSection("icons"))?;
        Timestamp::parse(timestamp)
    }

    pub fn new(timestamp: Timestamp, icons: Vec<Arc<IconRecord>>, sprite: SpriteSheet) -> Self {
        let mut by_name = HashMap::with_capacity(icons.len());
        for (position, icon) in icons.iter().enumerate() {
            // First occurrence wins; later duplicates are shadowed.
            by_name.entry(icon.name().to_string()).or_insert(position);
        }

        Self {
            timestamp,
            icons,
            by_name,
            sprite,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn icons(&self) -> &[Arc<IconRecord>] {
        &self.icons
    }

    pub fn sprite(&self) -> &SpriteSheet {
        &self.sprite
    }

    /// Replaces the sprite sheet (used when installing the snapshot).
    pub fn set_sprite(&mut self, sprite: SpriteSheet) {
        self.sprite = sprite;
    }

    pub fn lookup_by_name(&self, name: &str) -> Option<&Arc<IconRecord>> {
        self.by_name.get(name).map(|&position| &self.icons[position])
    }
}

impl IconOracle for DatasetSnapshot {
    fn icon(&self, name: &str) -> Option<Arc<IconRecord>> {
        self.lookup_by_name(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = "1700000000000#m|0|0|0,0|1$0:4^m|2|2|1,0|3$5^m|0|2|2,0|1$9#Blank^Whole^Wires^Cut";

    #[test]
    fn parses_payload_sections() {
        let snapshot = DatasetSnapshot::parse(PAYLOAD, SpriteSheet::blank(64, 64)).unwrap();
        assert_eq!(snapshot.timestamp().as_millis(), 1_700_000_000_000.0);
        assert_eq!(snapshot.icons().len(), 3);

        let wires = snapshot.lookup_by_name("Wires").unwrap();
        assert_eq!(wires.parts()[0].name(), "Cut");
        assert_eq!((wires.location_x(), wires.location_y()), (1, 0));
    }

    #[test]
    fn duplicate_names_resolve_to_first_icon() {
        let snapshot = DatasetSnapshot::parse(PAYLOAD, SpriteSheet::blank(64, 64)).unwrap();
        let blank = snapshot.icon("Blank").unwrap();
        assert_eq!(blank.location_x(), 0);
        assert!(snapshot.icon("Keypad").is_none());
    }

    #[test]
    fn escaped_dictionary_entries_survive() {
        let payload = "5#m|0|1|0,0|1$1#C{{HASH}} Sharp^Up{{CARET}}";
        let snapshot = DatasetSnapshot::parse(payload, SpriteSheet::blank(32, 32)).unwrap();
        let icon = snapshot.icon("C# Sharp").unwrap();
        assert_eq!(icon.parts()[0].name(), "Up^");
    }

    #[test]
    fn peeks_timestamp_without_decoding_icons() {
        let timestamp = DatasetSnapshot::peek_timestamp("42#garbage").unwrap();
        assert_eq!(timestamp.as_millis(), 42.0);
        assert!(DatasetSnapshot::peek_timestamp("42").is_err());
    }

    #[test]
    fn missing_sections_are_reported() {
        assert_eq!(
            DatasetSnapshot::parse("5#m|0|0|0,0|0$1", SpriteSheet::blank(1, 1)).unwrap_err(),
            DecodeError::MissingSection("dictionary")
        );
        assert!(matches!(
            DatasetSnapshot::parse("x#m|0|0|0,0|0$1#a", SpriteSheet::blank(1, 1)),
            Err(DecodeError::InvalidNumber { field: "timestamp", .. })
        ));
    }
}
