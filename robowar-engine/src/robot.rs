//! Robots are the entities of the simulation. Every robot carries health and
//! heat; what else it carries, and which commands apply to it, depends on its
//! kind.

use super::constants::*;
use super::error::SimError;

/// The team a robot fights for.
pub type TeamID = u32;

/// The number of a robot within its team. Only unique together with the
/// team, and for dead robots, only together with the kind as well.
pub type RobotID = u32;

/// The two kinds of robots.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum RobotKind {
    /// Infantry heat up, overheat, and can be upgraded.
    Infantry,
    /// Engineers are tough, but never heat up and never upgrade.
    Engineer,
}

impl RobotKind {
    /// List all the robot kinds.
    pub fn all() -> Vec<RobotKind> {
        vec![RobotKind::Infantry, RobotKind::Engineer]
    }

    /// The kind named by an ADD operand, if any.
    pub fn from_code(code: u32) -> Option<RobotKind> {
        match code {
            KIND_CODE_INFANTRY => Some(RobotKind::Infantry),
            KIND_CODE_ENGINEER => Some(RobotKind::Engineer),
            _ => None,
        }
    }

    /// The ADD operand that names this kind.
    pub fn code(&self) -> u32 {
        match *self {
            RobotKind::Infantry => KIND_CODE_INFANTRY,
            RobotKind::Engineer => KIND_CODE_ENGINEER,
        }
    }

    /// The kind-specific state of a freshly built robot of this kind.
    fn default_info(&self) -> RobotInfo {
        match *self {
            RobotKind::Infantry => RobotInfo::Infantry { level: INFANTRY_MIN_LEVEL },
            RobotKind::Engineer => RobotInfo::Engineer,
        }
    }
}

/// Kind-specific state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RobotInfo {
    /// Infantry remember their level.
    Infantry { level: u32 },
    /// Engineers have nothing of their own.
    Engineer,
}

impl RobotInfo {
    /// The kind this info belongs to.
    pub fn kind(&self) -> RobotKind {
        match *self {
            RobotInfo::Infantry { .. } => RobotKind::Infantry,
            RobotInfo::Engineer => RobotKind::Engineer,
        }
    }

    /// The (max health, max heat) caps for this kind and level.
    ///
    /// Levels outside the table fall back to the level 1 caps.
    pub fn caps(&self) -> (u32, u32) {
        match *self {
            RobotInfo::Infantry { level } => {
                let index = if level >= INFANTRY_MIN_LEVEL && level <= INFANTRY_MAX_LEVEL {
                    (level - INFANTRY_MIN_LEVEL) as usize
                } else {
                    0
                };
                (INFANTRY_MAX_HEALTH[index], INFANTRY_MAX_HEAT[index])
            },
            RobotInfo::Engineer => (ENGINEER_MAX_HEALTH, ENGINEER_MAX_HEAT),
        }
    }
}

/// A single robot in the simulation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Robot {
    team_id: TeamID,
    robot_id: RobotID,
    health: u32,
    heat: u32,
    max_health: u32,
    max_heat: u32,

    /// The kind-specific info.
    info: RobotInfo,
}

impl Robot {
    /// Build a new robot of the given kind, at full health and without heat.
    pub fn new(team_id: TeamID, robot_id: RobotID, kind: RobotKind) -> Robot {
        let mut robot = Robot {
            team_id: team_id,
            robot_id: robot_id,
            health: 0,
            heat: 0,
            max_health: 0,
            max_heat: 0,
            info: kind.default_info(),
        };
        robot.reset();
        robot
    }

    // ************************************************************************
    // ***************************** GENERAL METHODS **************************
    // ************************************************************************

    /// The (team, robot) pair that identifies a live robot.
    pub fn id(&self) -> (TeamID, RobotID) {
        (self.team_id, self.robot_id)
    }

    pub fn team_id(&self) -> TeamID {
        self.team_id
    }

    pub fn robot_id(&self) -> RobotID {
        self.robot_id
    }

    pub fn kind(&self) -> RobotKind {
        self.info.kind()
    }

    pub fn info(&self) -> RobotInfo {
        self.info
    }

    /// The current level. Only infantry have one.
    pub fn level(&self) -> Option<u32> {
        match self.info {
            RobotInfo::Infantry { level } => Some(level),
            RobotInfo::Engineer => None,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn heat(&self) -> u32 {
        self.heat
    }

    pub fn max_heat(&self) -> u32 {
        self.max_heat
    }

    /// Whether the robot has been destroyed.
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    // ************************************************************************
    // *************************** HELPER METHODS *****************************
    // ************************************************************************

    /// Ok if the robot is infantry. Errors otherwise.
    pub(crate) fn ok_if_infantry(&self) -> Result<(), SimError> {
        match self.info {
            RobotInfo::Infantry { .. } => Ok(()),
            _ => Err(SimError::InappropriateRobotType { kind: self.kind() }),
        }
    }

    // ************************************************************************
    // *************************** LIFECYCLE METHODS **************************
    // ************************************************************************

    /// Re-derives the caps from the kind and level, restores full health and
    /// clears all heat. The level itself is kept.
    pub(crate) fn reset(&mut self) {
        let (max_health, max_heat) = self.info.caps();
        self.max_health = max_health;
        self.max_heat = max_heat;
        self.health = max_health;
        self.heat = 0;
    }

    /// Take the amount of damage given, returning true if the robot has died.
    pub(crate) fn take_damage(&mut self, damage: u32) -> bool {
        self.health = self.health.saturating_sub(damage);
        self.is_dead()
    }

    /// Lets `elapsed` time units pass. Heat drains by one per unit; if the
    /// heat left is still above the cap, health drains by the same amount.
    /// Returns true if the robot has died.
    pub(crate) fn decay(&mut self, elapsed: u32) -> bool {
        self.heat = self.heat.saturating_sub(elapsed);
        if self.heat > self.max_heat {
            self.health = self.health.saturating_sub(elapsed);
        }
        self.is_dead()
    }

    // ************************************************************************
    // *************************** INFANTRY METHODS ***************************
    // ************************************************************************

    /// Adds heat. There is no cap here; overheating only costs health once
    /// time moves on.
    ///
    /// Errors if the robot is not infantry.
    pub(crate) fn add_heat(&mut self, heat: u32) -> Result<(), SimError> {
        self.ok_if_infantry()?;
        self.heat = self.heat.saturating_add(heat);
        Ok(())
    }

    /// Upgrades to the target level, which resets the robot to the caps of
    /// that level. The target must be above the current level, and no higher
    /// than INFANTRY_MAX_LEVEL.
    ///
    /// Errors if the robot is not infantry, or the level is invalid.
    pub(crate) fn upgrade(&mut self, target_level: u32) -> Result<(), SimError> {
        let level = match self.info {
            RobotInfo::Infantry { level } => level,
            RobotInfo::Engineer => {
                return Err(SimError::InappropriateRobotType { kind: RobotKind::Engineer });
            },
        };
        if target_level <= level || target_level > INFANTRY_MAX_LEVEL {
            return Err(SimError::InvalidUpgradeLevel { level, target_level });
        }
        self.info = RobotInfo::Infantry { level: target_level };
        self.reset();
        Ok(())
    }
}
