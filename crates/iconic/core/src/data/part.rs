//! Part records: a named target region of an icon.

use std::collections::BTreeSet;

use crate::config::IconicConfig;
use crate::data::StringDictionary;
use crate::error::DecodeError;

/// One past the highest selectable grid index.
const GRID_CELLS: u32 = IconicConfig::GRID_SIZE * IconicConfig::GRID_SIZE;

/// A named sub-target of an icon and the grid cells that satisfy it.
///
/// Indices are 0-based, row-major positions on the selection grid. An empty
/// set is legal and simply never matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartRecord {
    name: String,
    indices: BTreeSet<u32>,
}

impl PartRecord {
    pub fn new(name: impl Into<String>, indices: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            indices: indices.into_iter().collect(),
        }
    }

    /// Decodes `<dictIndex>$<rangeList>`.
    pub fn parse(token: &str, dict: &StringDictionary) -> Result<Self, DecodeError> {
        let (name_index, ranges) = token
            .split_once('$')
            .ok_or_else(|| DecodeError::MissingPartSeparator(token.to_string()))?;

        let name = dict.resolve(name_index, "part name index")?.to_string();
        let indices = parse_ranges(ranges)?;

        Ok(Self { name, indices })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn indices(&self) -> &BTreeSet<u32> {
        &self.indices
    }

    /// Returns true if selecting `index` satisfies this part.
    pub fn contains(&self, index: u32) -> bool {
        self.indices.contains(&index)
    }

    /// Lowest satisfying index, if any.
    pub fn first_index(&self) -> Option<u32> {
        self.indices.first().copied()
    }
}

/// Expands a comma-separated list of `start` / `start:count` tokens.
///
/// An empty list yields an empty set. Counted ranges must end inside the
/// selection grid.
pub fn parse_ranges(list: &str) -> Result<BTreeSet<u32>, DecodeError> {
    let mut indices = BTreeSet::new();
    if list.is_empty() {
        return Ok(indices);
    }

    for range in list.split(',') {
        match range.split_once(':') {
            Some((start, count)) => {
                let start = parse_index(start, "range start")?;
                let count = parse_index(count, "range count")?;
                if count < 1 {
                    return Err(DecodeError::EmptyRange(range.to_string()));
                }
                let end = start
                    .checked_add(count)
                    .filter(|end| *end <= GRID_CELLS)
                    .ok_or_else(|| DecodeError::RangeOutsideGrid(range.to_string()))?;
                indices.extend(start..end);
            }
            None => {
                indices.insert(parse_index(range, "range start")?);
            }
        }
    }

    Ok(indices)
}

fn parse_index(raw: &str, field: &'static str) -> Result<u32, DecodeError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| DecodeError::number(field, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u32]) -> BTreeSet<u32> {
        values.iter().copied().collect()
    }

    #[test]
    fn expands_counted_ranges() {
        assert_eq!(parse_ranges("5:3").unwrap(), set(&[5, 6, 7]));
        assert_eq!(parse_ranges("5,9:2").unwrap(), set(&[5, 9, 10]));
        assert_eq!(parse_ranges("").unwrap(), set(&[]));
    }

    #[test]
    fn overlapping_ranges_collapse() {
        assert_eq!(parse_ranges("1:3,2,3:2").unwrap(), set(&[1, 2, 3, 4]));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(matches!(
            parse_ranges("a"),
            Err(DecodeError::InvalidNumber { .. })
        ));
        assert!(matches!(
            parse_ranges("-1"),
            Err(DecodeError::InvalidNumber { .. })
        ));
        assert_eq!(
            parse_ranges("4:0"),
            Err(DecodeError::EmptyRange("4:0".to_string()))
        );
        assert!(parse_ranges("1,,2").is_err());
    }

    #[test]
    fn rejects_ranges_past_the_grid() {
        let started = std::time::Instant::now();
        assert_eq!(
            parse_ranges("0:4294967295"),
            Err(DecodeError::RangeOutsideGrid("0:4294967295".to_string()))
        );
        assert_eq!(
            parse_ranges("1000:25"),
            Err(DecodeError::RangeOutsideGrid("1000:25".to_string()))
        );
        assert!(started.elapsed() < std::time::Duration::from_secs(1));

        assert_eq!(parse_ranges("1020:4").unwrap(), set(&[1020, 1021, 1022, 1023]));
    }

    #[test]
    fn parses_part_token() {
        let dict = StringDictionary::parse("Hat^Eye");
        let part = PartRecord::parse("1$64:2,100", &dict).unwrap();
        assert_eq!(part.name(), "Eye");
        assert!(part.contains(65));
        assert!(!part.contains(66));
        assert_eq!(part.first_index(), Some(64));
    }

    #[test]
    fn empty_range_list_matches_nothing() {
        let dict = StringDictionary::parse("Hat");
        let part = PartRecord::parse("0$", &dict).unwrap();
        assert!(part.indices().is_empty());
        assert_eq!(part.first_index(), None);
    }

    #[test]
    fn missing_separator_is_an_error() {
        let dict = StringDictionary::parse("Hat");
        assert_eq!(
            PartRecord::parse("0", &dict),
            Err(DecodeError::MissingPartSeparator("0".to_string()))
        );
        assert!(matches!(
            PartRecord::parse("3$1", &dict),
            Err(DecodeError::DictionaryIndex { index: 3, len: 1 })
        ));
    }
}
