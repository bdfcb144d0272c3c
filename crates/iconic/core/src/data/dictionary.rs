//! Shared-string dictionary used to de-duplicate names across records.
//!
//! The dictionary blob is the last `#` section of a dataset payload. Entries
//! are separated by `^`; literal `#` and `^` inside an entry are written as
//! [`HASH_ESCAPE`] and [`CARET_ESCAPE`].

use crate::error::DecodeError;

/// Escape token standing for a literal `#` (the payload section separator).
pub const HASH_ESCAPE: &str = "{{HASH}}";

/// Escape token standing for a literal `^` (the dictionary entry separator).
pub const CARET_ESCAPE: &str = "{{CARET}}";

/// Dictionary entry separator.
pub const ENTRY_SEPARATOR: char = '^';

/// Ordered, immutable sequence of shared strings indexed by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StringDictionary {
    entries: Vec<String>,
}

impl StringDictionary {
    /// Decodes an escaped dictionary blob.
    ///
    /// `{{HASH}}` is restored across the whole blob first since no split on
    /// `#` happens at this level; `{{CARET}}` is restored per entry after the
    /// split so escaped carets never act as separators.
    pub fn parse(blob: &str) -> Self {
        let unhashed = blob.replace(HASH_ESCAPE, "#");
        let entries = unhashed
            .split(ENTRY_SEPARATOR)
            .map(|entry| entry.replace(CARET_ESCAPE, "^"))
            .collect();

        Self { entries }
    }

    /// Encodes entries back into a blob accepted by [`StringDictionary::parse`].
    pub fn encode<S: AsRef<str>>(entries: &[S]) -> String {
        entries
            .iter()
            .map(|entry| {
                entry
                    .as_ref()
                    .replace('^', CARET_ESCAPE)
                    .replace('#', HASH_ESCAPE)
            })
            .collect::<Vec<_>>()
            .join("^")
    }

    /// Returns the entry at `index`.
    pub fn get(&self, index: usize) -> Result<&str, DecodeError> {
        self.entries
            .get(index)
            .map(String::as_str)
            .ok_or(DecodeError::DictionaryIndex {
                index,
                len: self.entries.len(),
            })
    }

    /// Resolves a textual index (as found in icon and part tokens).
    pub fn resolve(&self, raw: &str, field: &'static str) -> Result<&str, DecodeError> {
        let index = raw
            .trim()
            .parse::<usize>()
            .map_err(|_| DecodeError::number(field, raw))?;
        self.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn splits_on_unescaped_caret() {
        let dict = StringDictionary::parse("Blank^Top{{CARET}}Left^C{{HASH}}");
        assert_eq!(dict.entries(), ["Blank", "Top^Left", "C#"]);
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let dict = StringDictionary::parse("a^b");
        assert_eq!(dict.get(1), Ok("b"));
        assert_eq!(
            dict.get(2),
            Err(DecodeError::DictionaryIndex { index: 2, len: 2 })
        );
        assert!(matches!(
            dict.resolve("x", "name index"),
            Err(DecodeError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn empty_blob_has_one_empty_entry() {
        let dict = StringDictionary::parse("");
        assert_eq!(dict.entries(), [""]);
    }

    proptest! {
        #[test]
        fn encode_then_parse_restores_entries(
            entries in prop::collection::vec("[a-zA-Z0-9 #^{]{0,12}", 1..8)
        ) {
            let blob = StringDictionary::encode(&entries);
            prop_assert!(!blob.contains('#'));
            let decoded = StringDictionary::parse(&blob);
            prop_assert_eq!(decoded.entries(), entries.as_slice());
        }
    }
}
