//! The core robowar engine.
//!
//! The world keeps a clock and a registry of robots. Time only moves when a
//! record arrives: before a record's command runs, everything that happened
//! to the live robots since the previous record is settled first, so robots
//! that overheated to death in the meantime are gone before the command can
//! touch them.

use smallvec::SmallVec;

use super::config::Config;
use super::constants::*;
use super::error::SimError;
use super::registry::Registry;
use super::robot::*;
use super::schema::*;

/// Simulated time.
pub type Time = u32;

/// The robots destroyed while processing one record, in order.
pub type Events = SmallVec<[Destroyed; 4]>;

/// The full world of the simulation.
#[derive(Debug, Clone)]
pub struct RobotWorld {
    /// The time of the latest record that moved the clock.
    time: Time,

    /// Every robot, live or dead.
    registry: Registry,

    config: Config,
}

impl Default for RobotWorld {
    fn default() -> RobotWorld {
        RobotWorld::new()
    }
}

impl RobotWorld {
    /// An empty world at time zero, with the quiet configuration.
    pub fn new() -> RobotWorld {
        RobotWorld::with_config(Config::quiet())
    }

    /// An empty world at time zero.
    pub fn with_config(config: Config) -> RobotWorld {
        RobotWorld {
            time: START_TIME,
            registry: Registry::new(),
            config: config,
        }
    }

    // ************************************************************************
    // ***************************** GENERAL METHODS **************************
    // ************************************************************************

    /// The current time.
    pub fn time(&self) -> Time {
        self.time
    }

    pub fn config(&self) -> Config {
        self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The live robot with this id, if any.
    pub fn robot(&self, team_id: TeamID, robot_id: RobotID) -> Option<&Robot> {
        self.registry.live(team_id, robot_id)
    }

    /// The dead robot with this id and kind, if any.
    pub fn dead_robot(&self, team_id: TeamID, robot_id: RobotID, kind: RobotKind) -> Option<&Robot> {
        self.registry.dead(team_id, robot_id, kind)
    }

    /// The live robots, in the order they are visited when time passes.
    pub fn live_robots<'a>(&'a self) -> impl Iterator<Item = &'a Robot> + 'a {
        self.registry.live_robots()
    }

    pub fn live_count(&self) -> usize {
        self.registry.live_count()
    }

    pub fn dead_count(&self) -> usize {
        self.registry.dead_count()
    }

    /// * NoSuchRobot - no live robot has this id.
    fn live_robot_mut(&mut self, team_id: TeamID, robot_id: RobotID) -> Result<&mut Robot, SimError> {
        self.registry.live_mut(team_id, robot_id)
            .ok_or(SimError::NoSuchRobot { team_id, robot_id })
    }

    // ************************************************************************
    // ****************************** TIME METHODS ****************************
    // ************************************************************************

    /// Moves the clock forward to `curr_time`, letting every live robot cool
    /// down (and overheat) for the time elapsed. Robots that die on the way
    /// are reported in the order they were visited.
    ///
    /// Does nothing if `curr_time` is not after the current time.
    pub fn advance_time(&mut self, curr_time: Time) -> Events {
        let mut events = Events::new();
        if curr_time <= self.time {
            return events;
        }
        let elapsed = curr_time - self.time;
        trace!("t={}: {} time units pass for {} live robots", curr_time, elapsed, self.live_count());

        let burials = self.registry.retain_live(|robot| !robot.decay(elapsed));
        for id in burials {
            let event = Destroyed::from(id);
            info!("t={}: robot {} of team {} burned out", curr_time, event.robot_id, event.team_id);
            events.push(event);
        }
        self.time = curr_time;
        events
    }

    // ************************************************************************
    // **************************** COMMAND METHODS ***************************
    // ************************************************************************

    /// Builds a robot of the given kind at full health. If a robot with this
    /// id died as the same kind, that robot comes back instead, keeping its
    /// level. Either way, no dead robot with this id remains.
    ///
    /// * AlreadyLive - a live robot has this id, whatever its kind.
    fn add_robot(&mut self, team_id: TeamID, robot_id: RobotID, kind: RobotKind)
                 -> Result<(), SimError> {
        if self.registry.is_live(team_id, robot_id) {
            return Err(SimError::AlreadyLive { team_id, robot_id });
        }
        if self.registry.revive(team_id, robot_id, kind) {
            debug!("t={}: robot {} of team {} revived as {:?}", self.time, robot_id, team_id, kind);
        } else {
            self.registry.insert_live(Robot::new(team_id, robot_id, kind));
        }
        Ok(())
    }

    /// Deals damage to a live robot, destroying it if its health runs out.
    ///
    /// * NoSuchRobot - no live robot has this id.
    fn damage_robot(&mut self, team_id: TeamID, robot_id: RobotID, amount: u32)
                    -> Result<Option<Destroyed>, SimError> {
        if !self.live_robot_mut(team_id, robot_id)?.take_damage(amount) {
            return Ok(None);
        }
        self.registry.bury(team_id, robot_id);
        info!("t={}: robot {} of team {} shot down", self.time, robot_id, team_id);
        Ok(Some(Destroyed { team_id, robot_id }))
    }

    /// Heats up a live infantry robot. Overheating costs health only as time
    /// passes.
    ///
    /// * NoSuchRobot - no live robot has this id.
    /// * InappropriateRobotType - the robot is an engineer.
    fn heat_robot(&mut self, team_id: TeamID, robot_id: RobotID, amount: u32)
                  -> Result<(), SimError> {
        self.live_robot_mut(team_id, robot_id)?.add_heat(amount)
    }

    /// Upgrades a live infantry robot.
    ///
    /// * NoSuchRobot - no live robot has this id.
    /// * InappropriateRobotType - the robot is an engineer.
    /// * InvalidUpgradeLevel - the target is not above the current level, or
    ///   above the highest level.
    fn upgrade_robot(&mut self, team_id: TeamID, robot_id: RobotID, target_level: u32)
                     -> Result<(), SimError> {
        self.live_robot_mut(team_id, robot_id)?.upgrade(target_level)
    }

    /// Applies a single command to this world, at the current time.
    pub(crate) fn apply(&mut self, command: &Command) -> Result<Option<Destroyed>, SimError> {
        match *command {
            Command::Add { team_id, robot_id, kind } => self.add_robot(team_id, robot_id, kind).map(|_| None),
            Command::Damage { team_id, robot_id, amount } => self.damage_robot(team_id, robot_id, amount),
            Command::Heat { team_id, robot_id, amount } => self.heat_robot(team_id, robot_id, amount).map(|_| None),
            Command::Upgrade { team_id, robot_id, target_level } => self.upgrade_robot(team_id, robot_id, target_level).map(|_| None),
            Command::Nothing => Err(SimError::UnknownCommand),
        }
    }

    // ************************************************************************
    // ***************************** RECORD METHODS ***************************
    // ************************************************************************

    /// Processes one record: moves the clock to the record's time, then
    /// applies its command. Returns every robot destroyed along the way, in
    /// order. Commands that do not apply are dropped without complaint.
    pub fn process(&mut self, record: &Record) -> Events {
        if record.time < self.time && self.config.warn_on_stale_records {
            warn!("t={}: record at t={} arrived late; the clock stays put", self.time, record.time);
        }

        let mut events = self.advance_time(record.time);
        match self.apply(&record.command) {
            Ok(Some(event)) => events.push(event),
            Ok(None) => {},
            Err(e) => {
                if self.config.log_ignored_commands {
                    debug!("t={}: ignored {:?}: {}", record.time, record.command, e);
                }
            },
        }
        events
    }

    /// Processes a sequence of records, returning every destruction in order.
    pub fn process_all<'a, I>(&mut self, records: I) -> Vec<Destroyed>
        where I: IntoIterator<Item = &'a Record>
    {
        let mut events = Vec::new();
        for record in records {
            events.extend(self.process(record));
        }
        events
    }
}
