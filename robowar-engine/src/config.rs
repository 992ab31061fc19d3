//! Configuration for the engine.

/// Switches that change what the engine reports about itself. None of them
/// change the outcome of a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Whether to log every command that was dropped, and why.
    pub log_ignored_commands: bool,

    /// Whether to warn about records that are older than the clock.
    pub warn_on_stale_records: bool,
}

impl Config {
    pub fn quiet() -> Config {
        Config {
            log_ignored_commands: false,
            warn_on_stale_records: false,
        }
    }

    pub fn verbose() -> Config {
        Config {
            log_ignored_commands: true,
            warn_on_stale_records: true,
        }
    }
}

impl Default for Config {
    fn default() -> Config {
        Config::quiet()
    }
}
