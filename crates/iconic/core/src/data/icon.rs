//! Icon records: a named puzzle icon and its parts.

use crate::data::{PartRecord, StringDictionary};
use crate::error::DecodeError;

/// Part token separator inside an icon token.
pub const PART_SEPARATOR: char = '!';

/// A named puzzle icon: label, sprite-sheet cell, and its ordered parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconRecord {
    name: String,
    sprite_name: String,
    location_x: i32,
    location_y: i32,
    parts: Vec<PartRecord>,
}

impl IconRecord {
    pub fn new(
        name: impl Into<String>,
        sprite_name: impl Into<String>,
        location: (i32, i32),
        parts: Vec<PartRecord>,
    ) -> Self {
        Self {
            name: name.into(),
            sprite_name: sprite_name.into(),
            location_x: location.0,
            location_y: location.1,
            parts,
        }
    }

    /// Decodes `<modId>|<nameIdx>|<iconNameIdx>|<x>,<y>|<part>!<part>...`.
    ///
    /// The leading mod id only tags provenance and is skipped. Zero-part
    /// icons are accepted here; the orchestrator treats them as unplayable.
    pub fn parse(token: &str, dict: &StringDictionary) -> Result<Self, DecodeError> {
        let mut fields = token.split('|');
        let mut field = |name: &'static str| {
            fields.next().ok_or_else(|| DecodeError::MissingField {
                field: name,
                token: token.to_string(),
            })
        };

        let _mod_id = field("mod id")?;
        let name = dict.resolve(field("name index")?, "name index")?.to_string();
        let sprite_name = dict
            .resolve(field("icon name index")?, "icon name index")?
            .to_string();

        let location = field("location")?;
        let (x, y) = location.split_once(',').ok_or_else(|| DecodeError::MissingField {
            field: "y coordinate",
            token: token.to_string(),
        })?;
        let location_x = parse_coordinate(x, "x coordinate")?;
        let location_y = parse_coordinate(y, "y coordinate")?;

        let parts = field("parts")?
            .split(PART_SEPARATOR)
            .map(|part| PartRecord::parse(part, dict))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            sprite_name,
            location_x,
            location_y,
            parts,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sprite_name(&self) -> &str {
        &self.sprite_name
    }

    pub fn location_x(&self) -> i32 {
        self.location_x
    }

    pub fn location_y(&self) -> i32 {
        self.location_y
    }

    pub fn parts(&self) -> &[PartRecord] {
        &self.parts
    }

    pub fn part(&self, index: usize) -> Option<&PartRecord> {
        self.parts.get(index)
    }
}

fn parse_coordinate(raw: &str, field: &'static str) -> Result<i32, DecodeError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DecodeError::number(field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> StringDictionary {
        StringDictionary::parse("The Button^button^Top^Bottom")
    }

    #[test]
    fn parses_icon_token() {
        let icon = IconRecord::parse("BigButton|0|1|3,7|2$0:32!3$992:32", &dict()).unwrap();
        assert_eq!(icon.name(), "The Button");
        assert_eq!(icon.sprite_name(), "button");
        assert_eq!((icon.location_x(), icon.location_y()), (3, 7));
        assert_eq!(icon.parts().len(), 2);
        assert_eq!(icon.parts()[0].name(), "Top");
        assert!(icon.parts()[1].contains(1023));
    }

    #[test]
    fn reports_missing_fields() {
        assert!(matches!(
            IconRecord::parse("mod|0|1", &dict()),
            Err(DecodeError::MissingField { field: "location", .. })
        ));
        assert!(matches!(
            IconRecord::parse("mod|0|1|3|2$1", &dict()),
            Err(DecodeError::MissingField { field: "y coordinate", .. })
        ));
        assert!(matches!(
            IconRecord::parse("mod|0|1|3,x|2$1", &dict()),
            Err(DecodeError::InvalidNumber { field: "y coordinate", .. })
        ));
    }

    #[test]
    fn bad_part_fails_whole_icon() {
        assert!(matches!(
            IconRecord::parse("mod|0|1|0,0|2$1!3", &dict()),
            Err(DecodeError::MissingPartSeparator(_))
        ));
    }
}
