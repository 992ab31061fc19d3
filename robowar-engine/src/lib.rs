//! The Robowar Engine.
//! Provides an embeddable library with no I/O, which holds the state of a
//! population of combat robots, and applies a timestamped command stream to
//! that state, reporting every robot that gets destroyed along the way.

// Serialization.
#[macro_use]
extern crate serde_derive;
extern crate serde;
#[cfg(test)]
extern crate serde_json;

// Error handling.
#[macro_use] extern crate failure;

// Logging. The binary decides where (and whether) the messages go.
#[macro_use] extern crate log;

// Provides FnvHashMap, which is like std::HashMap, but significantly faster
// for integer keys.
extern crate fnv;

// Inline storage for the handful of events a single record can produce.
extern crate smallvec;

// see error.rs
#[macro_use]
pub mod error;

// see constants.rs
pub mod constants;

// see config.rs
pub mod config;

// see robot.rs
pub mod robot;

// see registry.rs
pub mod registry;

// see schema.rs
pub mod schema;

// see world.rs
pub mod world;

pub use config::Config;
pub use robot::{Robot, RobotID, RobotInfo, RobotKind, TeamID};
pub use schema::{Command, CommandTag, Destroyed, Record};
pub use world::{Events, RobotWorld, Time};
