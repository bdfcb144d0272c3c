//! Common error infrastructure for iconic-core.
//!
//! Wire-format failures are reported through [`DecodeError`]. Lookup misses
//! are not errors at this layer: the orchestrator recovers from them locally
//! and only surfaces domain outcomes (strike/pass) to the host.
//!
//! # Design Principles
//!
//! - **Type Safety**: each failure has its own variant carrying the offending text
//! - **Severity Classification**: errors are categorized for recovery strategies
//! - **Isolation**: a failed decode never touches the previously active snapshot

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the caller can fall back to something it already has
/// - **Validation**: invalid input that should be rejected without retry
/// - **Internal**: unexpected state inconsistencies that require investigation
/// - **Fatal**: nothing usable remains
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all iconic-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait IconicError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and test assertions.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// Failures raised while decoding the dataset wire format.
///
/// A decode error is fatal to that parse attempt only.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The payload did not contain the named `#`-separated section.
    #[error("dataset payload is missing the {0} section")]
    MissingSection(&'static str),

    /// An icon token did not contain the named `|`-separated field.
    #[error("icon token {token:?} is missing the {field} field")]
    MissingField { field: &'static str, token: String },

    /// A part token did not contain the `$` separator.
    #[error("part token {0:?} is missing the '$' separator")]
    MissingPartSeparator(String),

    /// An integer (or timestamp) field failed to parse.
    #[error("invalid {field} {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// A `start:count` range had a count below one.
    #[error("range {0:?} must cover at least one index")]
    EmptyRange(String),

    /// A `start:count` range ran past the last selection grid cell.
    #[error("range {0:?} extends past the selection grid")]
    RangeOutsideGrid(String),

    /// A dictionary index referred past the end of the dictionary.
    #[error("dictionary index {index} out of range (dictionary has {len} entries)")]
    DictionaryIndex { index: usize, len: usize },

    /// The sprite sheet bytes did not start with a PNG header.
    #[error("sprite sheet is not a PNG image")]
    InvalidSprite,
}

impl DecodeError {
    pub(crate) fn number(field: &'static str, value: &str) -> Self {
        Self::InvalidNumber {
            field,
            value: value.to_string(),
        }
    }
}

impl IconicError for DecodeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            // The previous snapshot (if any) stays active.
            Self::InvalidSprite => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSection(_) => "DECODE_MISSING_SECTION",
            Self::MissingField { .. } => "DECODE_MISSING_FIELD",
            Self::MissingPartSeparator(_) => "DECODE_MISSING_PART_SEPARATOR",
            Self::InvalidNumber { .. } => "DECODE_INVALID_NUMBER",
            Self::EmptyRange(_) => "DECODE_EMPTY_RANGE",
            Self::RangeOutsideGrid(_) => "DECODE_RANGE_OUTSIDE_GRID",
            Self::DictionaryIndex { .. } => "DECODE_DICTIONARY_INDEX",
            Self::InvalidSprite => "DECODE_INVALID_SPRITE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_errors_are_validation_failures() {
        let err = DecodeError::number("x coordinate", "q");
        assert_eq!(err.severity(), ErrorSeverity::Validation);
        assert_eq!(err.error_code(), "DECODE_INVALID_NUMBER");
        assert_eq!(err.to_string(), "invalid x coordinate \"q\"");
    }

    #[test]
    fn severity_helpers() {
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(!ErrorSeverity::Validation.is_recoverable());
        assert!(ErrorSeverity::Fatal.is_internal());
        assert_eq!(ErrorSeverity::Internal.as_str(), "internal");
    }
}
