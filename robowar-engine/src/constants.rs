//! Defines constants that affect gameplay.

// *********************************
// ****** INFANTRY CONSTANTS *******
// *********************************

/// The level every infantry robot starts at.
pub const INFANTRY_MIN_LEVEL: u32 = 1;

/// The highest level an infantry robot can be upgraded to.
pub const INFANTRY_MAX_LEVEL: u32 = 3;

/// The maximum health of an infantry robot at levels 1, 2 and 3.
pub const INFANTRY_MAX_HEALTH: [u32; 3] = [100, 150, 250];

/// The maximum heat of an infantry robot at levels 1, 2 and 3. Heat above
/// this value burns health as time passes.
pub const INFANTRY_MAX_HEAT: [u32; 3] = [100, 200, 300];

// *********************************
// ****** ENGINEER CONSTANTS *******
// *********************************

/// The maximum health of an engineer robot.
pub const ENGINEER_MAX_HEALTH: u32 = 300;

/// Engineers never carry heat.
pub const ENGINEER_MAX_HEAT: u32 = 0;

// *********************************
// ****** COMMAND PARAMETERS *******
// *********************************

/// The operand that selects an infantry robot in an ADD command.
pub const KIND_CODE_INFANTRY: u32 = 0;

/// The operand that selects an engineer robot in an ADD command.
pub const KIND_CODE_ENGINEER: u32 = 1;

/// The clock reading before any record has been processed.
pub const START_TIME: u32 = 0;
