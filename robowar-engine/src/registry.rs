//! The registry owns every robot in the simulation.
//!
//! Robots live by value in a single arena. Two indices over the arena say
//! which robots are live and which are dead, so every robot has exactly one
//! home at all times:
//!
//! 1. The live index is keyed by (team, robot). A team never has two live
//!    robots with the same number, whatever their kinds.
//! 2. The dead index is keyed by (team, robot, kind).
//! 3. While a (team, robot) pair is live, the dead index holds nothing for
//!    that pair under any kind.
//!
//! The live index also remembers the order robots entered the live set,
//! which is the order the world visits them in when time passes.

use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::mem;

use super::robot::*;

/// An index into the robot arena.
type Slot = usize;

/// The ids of the robots destroyed in one step, in the order they died.
pub type Burials = SmallVec<[(TeamID, RobotID); 4]>;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// The arena. `None` marks a free slot.
    robots: Vec<Option<Robot>>,

    /// Free slots, reused before the arena grows.
    free: Vec<Slot>,

    /// Live robots by (team, robot).
    live: FnvHashMap<(TeamID, RobotID), Slot>,

    /// The live slots, in the order they became live.
    live_order: Vec<Slot>,

    /// Dead robots by (team, robot, kind).
    dead: FnvHashMap<(TeamID, RobotID, RobotKind), Slot>,
}

impl Registry {
    /// Construct an empty registry.
    pub fn new() -> Registry {
        Registry::default()
    }

    // ************************************************************************
    // ***************************** QUERY METHODS ****************************
    // ************************************************************************

    fn get(&self, slot: Slot) -> Option<&Robot> {
        self.robots.get(slot).and_then(|robot| robot.as_ref())
    }

    fn get_mut(&mut self, slot: Slot) -> Option<&mut Robot> {
        self.robots.get_mut(slot).and_then(|robot| robot.as_mut())
    }

    /// The live robot with this id, if any.
    pub fn live(&self, team_id: TeamID, robot_id: RobotID) -> Option<&Robot> {
        self.live.get(&(team_id, robot_id)).and_then(|&slot| self.get(slot))
    }

    pub(crate) fn live_mut(&mut self, team_id: TeamID, robot_id: RobotID) -> Option<&mut Robot> {
        match self.live.get(&(team_id, robot_id)) {
            Some(&slot) => self.get_mut(slot),
            None => None,
        }
    }

    /// The dead robot with this id and kind, if any.
    pub fn dead(&self, team_id: TeamID, robot_id: RobotID, kind: RobotKind) -> Option<&Robot> {
        self.dead.get(&(team_id, robot_id, kind)).and_then(|&slot| self.get(slot))
    }

    /// Whether a live robot has this id.
    pub fn is_live(&self, team_id: TeamID, robot_id: RobotID) -> bool {
        self.live.contains_key(&(team_id, robot_id))
    }

    /// The live robots, in the order they became live.
    pub fn live_robots<'a>(&'a self) -> impl Iterator<Item = &'a Robot> + 'a {
        self.live_order.iter().filter_map(move |&slot| self.get(slot))
    }

    /// The dead robots, in no particular order.
    pub fn dead_robots<'a>(&'a self) -> impl Iterator<Item = &'a Robot> + 'a {
        self.dead.values().filter_map(move |&slot| self.get(slot))
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn dead_count(&self) -> usize {
        self.dead.len()
    }

    // ************************************************************************
    // *************************** ARENA METHODS ******************************
    // ************************************************************************

    /// Stores a robot in a free slot, growing the arena if there is none.
    fn allocate(&mut self, robot: Robot) -> Slot {
        if let Some(slot) = self.free.pop() {
            if let Some(entry) = self.robots.get_mut(slot) {
                *entry = Some(robot);
                return slot;
            }
        }
        self.robots.push(Some(robot));
        self.robots.len() - 1
    }

    /// Drops the robot in a slot and makes the slot available again.
    fn release(&mut self, slot: Slot) {
        if let Some(entry) = self.robots.get_mut(slot) {
            if entry.take().is_some() {
                self.free.push(slot);
            }
        }
    }

    // ************************************************************************
    // ************************* LIFECYCLE METHODS ****************************
    // ************************************************************************

    /// Appends a slot to the live set.
    fn enter_live(&mut self, slot: Slot, team_id: TeamID, robot_id: RobotID) {
        self.live.insert((team_id, robot_id), slot);
        self.live_order.push(slot);
    }

    /// Removes every dead robot with this (team, robot) pair, whatever its
    /// kind. Returns how many were removed.
    fn purge_dead(&mut self, team_id: TeamID, robot_id: RobotID) -> usize {
        let mut purged = 0;
        for kind in RobotKind::all() {
            if let Some(slot) = self.dead.remove(&(team_id, robot_id, kind)) {
                self.release(slot);
                purged += 1;
            }
        }
        purged
    }

    /// Inserts a newly built robot at the back of the live set, clearing out
    /// any dead robots with the same id.
    ///
    /// The caller must make sure no live robot has the same id.
    pub(crate) fn insert_live(&mut self, robot: Robot) {
        let (team_id, robot_id) = robot.id();
        self.purge_dead(team_id, robot_id);
        let slot = self.allocate(robot);
        self.enter_live(slot, team_id, robot_id);
    }

    /// Brings back the dead robot with this id and kind, resetting its health
    /// and heat. Any dead robot of another kind with the same id is removed.
    ///
    /// Returns false if there is no such dead robot. The caller must make sure
    /// no live robot has the same id.
    pub(crate) fn revive(&mut self, team_id: TeamID, robot_id: RobotID, kind: RobotKind) -> bool {
        let slot = match self.dead.remove(&(team_id, robot_id, kind)) {
            Some(slot) => slot,
            None => return false,
        };
        match self.get_mut(slot) {
            Some(robot) => robot.reset(),
            None => return false,
        }
        self.purge_dead(team_id, robot_id);
        self.enter_live(slot, team_id, robot_id);
        true
    }

    /// Moves a slot that has already left the live order into the dead index.
    fn bury_slot(&mut self, slot: Slot) -> Option<(TeamID, RobotID)> {
        let (team_id, robot_id, kind) = match self.get(slot) {
            Some(robot) => (robot.team_id(), robot.robot_id(), robot.kind()),
            None => return None,
        };
        self.live.remove(&(team_id, robot_id));
        if let Some(stale) = self.dead.insert((team_id, robot_id, kind), slot) {
            self.release(stale);
        }
        Some((team_id, robot_id))
    }

    /// Moves the live robot with this id to the dead set.
    ///
    /// Returns false if there is no such live robot.
    pub(crate) fn bury(&mut self, team_id: TeamID, robot_id: RobotID) -> bool {
        let slot = match self.live.get(&(team_id, robot_id)) {
            Some(&slot) => slot,
            None => return false,
        };
        self.live_order.retain(|&live_slot| live_slot != slot);
        self.bury_slot(slot).is_some()
    }

    /// Visits every live robot in live order. Robots for which `keep` returns
    /// false are moved to the dead set; their ids are returned in visiting
    /// order.
    pub(crate) fn retain_live<F>(&mut self, mut keep: F) -> Burials
        where F: FnMut(&mut Robot) -> bool
    {
        let order = mem::replace(&mut self.live_order, Vec::new());
        let mut kept = Vec::with_capacity(order.len());
        let mut doomed: SmallVec<[Slot; 4]> = SmallVec::new();
        for slot in order {
            let keep_slot = match self.get_mut(slot) {
                Some(robot) => keep(robot),
                None => continue,
            };
            if keep_slot {
                kept.push(slot);
            } else {
                doomed.push(slot);
            }
        }
        self.live_order = kept;

        let mut burials = Burials::new();
        for slot in doomed {
            if let Some(id) = self.bury_slot(slot) {
                burials.push(id);
            }
        }
        burials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &Registry) -> Vec<(TeamID, RobotID)> {
        registry.live_robots().map(|robot| robot.id()).collect()
    }

    #[test]
    fn insert_and_bury() {
        let mut registry = Registry::new();
        registry.insert_live(Robot::new(1, 1, RobotKind::Infantry));
        registry.insert_live(Robot::new(1, 2, RobotKind::Engineer));
        assert_eq!(registry.live_count(), 2);
        assert!(registry.is_live(1, 1));
        assert_eq!(registry.live(1, 2).unwrap().kind(), RobotKind::Engineer);

        assert!(registry.bury(1, 1));
        assert!(!registry.is_live(1, 1));
        assert_eq!(registry.live_count(), 1);
        assert_eq!(registry.dead_count(), 1);
        assert!(registry.dead(1, 1, RobotKind::Infantry).is_some());
        assert!(registry.dead(1, 1, RobotKind::Engineer).is_none());

        // Burying twice does nothing.
        assert!(!registry.bury(1, 1));
        assert_eq!(registry.dead_count(), 1);
    }

    #[test]
    fn revive_moves_to_the_back() {
        let mut registry = Registry::new();
        registry.insert_live(Robot::new(1, 1, RobotKind::Infantry));
        registry.insert_live(Robot::new(1, 2, RobotKind::Infantry));
        registry.insert_live(Robot::new(2, 1, RobotKind::Infantry));
        registry.bury(1, 1);
        assert_eq!(ids(&registry), vec![(1, 2), (2, 1)]);

        assert!(!registry.revive(1, 1, RobotKind::Engineer));
        assert!(registry.revive(1, 1, RobotKind::Infantry));
        assert_eq!(ids(&registry), vec![(1, 2), (2, 1), (1, 1)]);
        assert_eq!(registry.dead_count(), 0);
    }

    #[test]
    fn revive_resets_but_keeps_level() {
        let mut registry = Registry::new();
        let mut robot = Robot::new(4, 4, RobotKind::Infantry);
        robot.upgrade(2).unwrap();
        robot.add_heat(400).unwrap();
        robot.take_damage(150);
        registry.insert_live(robot);
        registry.bury(4, 4);

        assert!(registry.revive(4, 4, RobotKind::Infantry));
        let robot = registry.live(4, 4).unwrap();
        assert_eq!(robot.level(), Some(2));
        assert_eq!(robot.health(), 150);
        assert_eq!(robot.heat(), 0);
    }

    #[test]
    fn revive_purges_other_kinds() {
        let mut registry = Registry::new();
        registry.insert_live(Robot::new(1, 5, RobotKind::Infantry));
        registry.bury(1, 5);
        // A fresh engineer with the same id clears out the dead infantry.
        registry.insert_live(Robot::new(1, 5, RobotKind::Engineer));
        assert!(registry.dead(1, 5, RobotKind::Infantry).is_none());
        assert_eq!(registry.dead_count(), 0);

        registry.bury(1, 5);
        assert!(registry.revive(1, 5, RobotKind::Engineer));
        assert_eq!(registry.dead_count(), 0);
        assert_eq!(registry.live(1, 5).unwrap().kind(), RobotKind::Engineer);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut registry = Registry::new();
        registry.insert_live(Robot::new(1, 5, RobotKind::Infantry));
        registry.bury(1, 5);
        registry.insert_live(Robot::new(1, 5, RobotKind::Engineer));
        registry.insert_live(Robot::new(1, 6, RobotKind::Engineer));
        assert_eq!(registry.robots.len(), 2);
        assert!(registry.free.is_empty());
    }

    #[test]
    fn retain_live_buries_in_visiting_order() {
        let mut registry = Registry::new();
        for robot_id in 1..6 {
            registry.insert_live(Robot::new(1, robot_id, RobotKind::Infantry));
        }

        let mut visited = vec![];
        let burials = registry.retain_live(|robot| {
            visited.push(robot.robot_id());
            robot.robot_id() % 2 == 0
        });
        assert_eq!(visited, vec![1, 2, 3, 4, 5]);
        assert_eq!(burials.into_iter().collect::<Vec<_>>(), vec![(1, 1), (1, 3), (1, 5)]);
        assert_eq!(ids(&registry), vec![(1, 2), (1, 4)]);
        assert_eq!(registry.dead_count(), 3);
    }
}
