//! Detailed simulation errors.
//!
//! None of these ever reach the caller of the engine: a command that fails
//! one of the checks below is dropped, and the simulation carries on with the
//! next record. They exist so that every command handler can say *why* it did
//! nothing.

use super::robot::{RobotID, RobotKind, TeamID};

/// Detailed simulation errors.
#[derive(Debug, Fail, PartialEq, Eq, Clone, Copy)]
pub enum SimError {
    /// A robot with this id is already live.
    #[fail(display = "Robot {} of team {} is already live.", robot_id, team_id)]
    AlreadyLive { team_id: TeamID, robot_id: RobotID },

    /// The given robot does not have a type appropriate for the given command.
    #[fail(display = "The command does not apply to a robot of kind {:?}.", kind)]
    InappropriateRobotType { kind: RobotKind },

    /// The upgrade target is not above the current level, or above the cap.
    #[fail(display = "Cannot upgrade from level {} to level {}.", level, target_level)]
    InvalidUpgradeLevel { level: u32, target_level: u32 },

    /// The specified robot is not live.
    #[fail(display = "Robot {} of team {} is not live.", robot_id, team_id)]
    NoSuchRobot { team_id: TeamID, robot_id: RobotID },

    /// The record did not decode to a known command.
    #[fail(display = "The record does not name a known command.")]
    UnknownCommand,
}

/// Asserts that $left is an Err whose unwrapped value is the simulation error
/// $right.
#[cfg(test)]
macro_rules! assert_err {
    ($left:expr, $right:expr) => ({
        assert_eq!($left.unwrap_err(), $right)
    });
    ($left:expr, $right:expr, $($arg:tt)+) => ({
        assert_eq!($left.unwrap_err(), $right, format_args!($($arg)+))
    });
}

/// Asserts that $left is less than or equal to $right. More informative than
/// assert!(left <= right), since it'll output the $left and $right values
/// when panicking.
#[cfg(test)]
macro_rules! assert_lte {
    ($left:expr, $right:expr) => ({
        match (&$left, &$right) {
            (left_val, right_val) => {
                if !(*left_val <= *right_val) {
                    panic!(r#"assertion failed: `(left <= right)`
  left: `{:?}`,
 right: `{:?}`"#, left_val, right_val)
                }
            }
        }
    });
    ($left:expr, $right:expr, $($arg:tt)+) => ({
        match (&($left), &($right)) {
            (left_val, right_val) => {
                if !(*left_val <= *right_val) {
                    panic!(r#"assertion failed: `(left <= right)`
  left: `{:?}`,
 right: `{:?}`: {}"#, left_val, right_val,
                           format_args!($($arg)+))
                }
            }
        }
    });
}
