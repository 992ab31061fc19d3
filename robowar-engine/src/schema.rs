//! The "schema" for robowar: the records that can be fed to the engine, and
//! the events it produces in return. Serialized to JSON using Serde.
//!
//! On the wire a record is a timestamp, a one-letter tag, and three unsigned
//! operands:
//!
//! | tag | command | operands                         |
//! |-----|---------|----------------------------------|
//! | `A` | ADD     | team, robot, kind (0 or 1)       |
//! | `F` | DAMAGE  | team, robot, damage              |
//! | `H` | HEAT    | team, robot, heat                |
//! | `U` | UPGRADE | team, robot, target level        |

use std::fmt;

use super::robot::*;

/// The commands a record can carry, as named by the record's tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CommandTag {
    Add,
    Damage,
    Heat,
    Upgrade,
}

impl CommandTag {
    /// List all the command tags.
    pub fn all() -> Vec<CommandTag> {
        vec![
            CommandTag::Add,
            CommandTag::Damage,
            CommandTag::Heat,
            CommandTag::Upgrade,
        ]
    }

    /// The tag spelled by a wire letter, if any.
    pub fn from_letter(letter: &str) -> Option<CommandTag> {
        match letter {
            "A" => Some(CommandTag::Add),
            "F" => Some(CommandTag::Damage),
            "H" => Some(CommandTag::Heat),
            "U" => Some(CommandTag::Upgrade),
            _ => None,
        }
    }

    /// The wire letter of this tag.
    pub fn letter(&self) -> &'static str {
        match *self {
            CommandTag::Add => "A",
            CommandTag::Damage => "F",
            CommandTag::Heat => "H",
            CommandTag::Upgrade => "U",
        }
    }
}

/// A single, atomic change to the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Command {
    /// Builds the robot, or brings it back if it died as the same kind.
    Add { team_id: TeamID, robot_id: RobotID, kind: RobotKind },
    /// Deals damage to a live robot.
    Damage { team_id: TeamID, robot_id: RobotID, amount: u32 },
    /// Heats up a live infantry robot.
    Heat { team_id: TeamID, robot_id: RobotID, amount: u32 },
    /// Upgrades a live infantry robot to the target level.
    Upgrade { team_id: TeamID, robot_id: RobotID, target_level: u32 },
    /// Nothing happens, except that time passes.
    Nothing,
}

impl Command {
    /// Decodes a tag and its three operands. Unknown tags, and ADD commands
    /// with an unknown kind, decode to `Nothing`.
    pub fn decode(tag: Option<CommandTag>, operands: [u32; 3]) -> Command {
        let [team_id, robot_id, operand] = operands;
        match tag {
            Some(CommandTag::Add) => match RobotKind::from_code(operand) {
                Some(kind) => Command::Add { team_id, robot_id, kind },
                None => Command::Nothing,
            },
            Some(CommandTag::Damage) => Command::Damage { team_id, robot_id, amount: operand },
            Some(CommandTag::Heat) => Command::Heat { team_id, robot_id, amount: operand },
            Some(CommandTag::Upgrade) => Command::Upgrade { team_id, robot_id, target_level: operand },
            None => Command::Nothing,
        }
    }

    /// The tag this command is sent with, if any.
    pub fn tag(&self) -> Option<CommandTag> {
        match *self {
            Command::Add { .. } => Some(CommandTag::Add),
            Command::Damage { .. } => Some(CommandTag::Damage),
            Command::Heat { .. } => Some(CommandTag::Heat),
            Command::Upgrade { .. } => Some(CommandTag::Upgrade),
            Command::Nothing => None,
        }
    }
}

/// A command, stamped with the time at which it happens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Records must arrive in non-decreasing time order.
    pub time: u32,
    pub command: Command,
}

impl Record {
    pub fn new(time: u32, command: Command) -> Record {
        Record { time, command }
    }

    /// Decodes a record in its wire form.
    pub fn from_raw(time: u32, letter: &str, operands: [u32; 3]) -> Record {
        Record::new(time, Command::decode(CommandTag::from_letter(letter), operands))
    }
}

/// Reports that a robot was destroyed. Displayed as `D <team> <robot>`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Destroyed {
    pub team_id: TeamID,
    pub robot_id: RobotID,
}

impl fmt::Display for Destroyed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "D {} {}", self.team_id, self.robot_id)
    }
}

impl From<(TeamID, RobotID)> for Destroyed {
    fn from((team_id, robot_id): (TeamID, RobotID)) -> Destroyed {
        Destroyed { team_id, robot_id }
    }
}
