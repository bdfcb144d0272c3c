//! Text commands and grid coordinates.
//!
//! Scripted players address cells as `<column><row>`: columns `A`..`Z` then
//! `AA`..`AF`, rows `1`..`32`. `A1` is the top-left cell (index 0).

use crate::config::IconicConfig;

const COLUMNS: [&str; IconicConfig::GRID_SIZE as usize] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z", "AA", "AB", "AC", "AD", "AE", "AF",
];

/// Help text shown to scripted players.
pub const COMMAND_HELP: &str = "!{0} press <coord> [Presses the pixel as the specified coordinate] | Valid coordinates are A1-AF32 (after Z it becomes AA)";

/// Resolves a coordinate like `b3` or `AA12` to a row-major cell index.
///
/// Every column prefix is tried in order, so `AA1` first fails as column `A`
/// (row `"A1"` is not a number) and then matches column `AA`.
pub fn parse_coordinate(coordinate: &str) -> Option<u32> {
    let coordinate = coordinate.to_uppercase();
    let grid = IconicConfig::GRID_SIZE;

    COLUMNS.iter().zip(0u32..).find_map(|(letters, column)| {
        let row = coordinate.strip_prefix(letters)?.parse::<u32>().ok()?;
        (1..=grid)
            .contains(&row)
            .then(|| (row - 1) * grid + column)
    })
}

/// Formats a cell index as `(column, row)`, both 1-based.
pub fn cell_position(index: u32) -> (u32, u32) {
    let grid = IconicConfig::GRID_SIZE;
    (index % grid + 1, index / grid + 1)
}

/// A recognised text command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChatCommand {
    Press(u32),
}

/// Why a recognised command could not be carried out.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandRejection {
    #[error("Too many parameters!")]
    TooManyParameters,

    #[error("Please specify the coordinate of the pixel you wish to press!")]
    MissingCoordinate,

    #[error("The specified coordinate of the pixel you wish to press (\"{0}\") is invalid!")]
    InvalidCoordinate(String),
}

impl ChatCommand {
    /// Parses a command line.
    ///
    /// Returns `None` if the line is not addressed to this module at all.
    /// Parameters are separated by single spaces; the line is not trimmed.
    pub fn parse(line: &str) -> Option<Result<Self, CommandRejection>> {
        let parameters: Vec<&str> = line.split(' ').collect();
        if !parameters[0].eq_ignore_ascii_case("press") {
            return None;
        }

        Some(match parameters.as_slice() {
            [_] => Err(CommandRejection::MissingCoordinate),
            [_, coordinate] => parse_coordinate(coordinate)
                .map(ChatCommand::Press)
                .ok_or_else(|| CommandRejection::InvalidCoordinate(coordinate.to_string())),
            _ => Err(CommandRejection::TooManyParameters),
        })
    }
}

/// Reply to a handled text command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandResponse {
    /// The press went through; `points` is awarded for a correct press.
    Pressed { points: u32 },
    /// Shown back to the player; nothing happened.
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_single_and_double_letter_columns() {
        assert_eq!(parse_coordinate("A1"), Some(0));
        assert_eq!(parse_coordinate("B1"), Some(1));
        assert_eq!(parse_coordinate("A2"), Some(32));
        assert_eq!(parse_coordinate("AA1"), Some(26));
        assert_eq!(parse_coordinate("af32"), Some(31 * 32 + 31));
        assert_eq!(parse_coordinate("z10"), Some(9 * 32 + 25));
    }

    #[test]
    fn rejects_out_of_range_or_unknown_coordinates() {
        assert_eq!(parse_coordinate("A33"), None);
        assert_eq!(parse_coordinate("A0"), None);
        assert_eq!(parse_coordinate("AG1"), None);
        assert_eq!(parse_coordinate("1A"), None);
        assert_eq!(parse_coordinate(""), None);
    }

    #[test]
    fn cell_position_is_one_based() {
        assert_eq!(cell_position(0), (1, 1));
        assert_eq!(cell_position(33), (2, 2));
    }

    #[test]
    fn parses_press_commands() {
        assert_eq!(ChatCommand::parse("press A1"), Some(Ok(ChatCommand::Press(0))));
        assert_eq!(ChatCommand::parse("PRESS b2"), Some(Ok(ChatCommand::Press(33))));
        assert_eq!(ChatCommand::parse("cycle"), None);
        assert_eq!(
            ChatCommand::parse("press"),
            Some(Err(CommandRejection::MissingCoordinate))
        );
        assert_eq!(
            ChatCommand::parse("press A1 B2"),
            Some(Err(CommandRejection::TooManyParameters))
        );
        assert_eq!(
            ChatCommand::parse("press Q99"),
            Some(Err(CommandRejection::InvalidCoordinate("Q99".to_string())))
        );
    }

    #[test]
    fn surrounding_spaces_count_as_parameters() {
        assert_eq!(ChatCommand::parse("  press c1"), None);
        assert_eq!(
            ChatCommand::parse("press c1 "),
            Some(Err(CommandRejection::TooManyParameters))
        );
    }

    #[test]
    fn rejection_messages_match_chat_wording() {
        assert_eq!(
            CommandRejection::InvalidCoordinate("x".into()).to_string(),
            "The specified coordinate of the pixel you wish to press (\"x\") is invalid!"
        );
    }
}
