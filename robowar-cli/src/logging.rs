use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Crates whose messages are worth showing; everything else stays at warn.
const OWN_CRATES: [&str; 2] = ["robowar", "robowar_engine"];

/// The filter used when `RUST_LOG` is not set: our own crates at info, or at
/// debug with `verbose`, which shows every ignored command.
fn default_filter(verbose: bool) -> String {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let mut filter = LevelFilter::Warn.to_string();
    for name in OWN_CRATES.iter() {
        filter.push_str(&format!(",{}={}", name, level));
    }
    filter.to_lowercase()
}

/// Sends log messages to stderr, untimestamped, so stdout carries nothing
/// but destruction lines.
pub fn init(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter(verbose)));
    builder.target(Target::Stderr).format_timestamp(None);

    // Fails only if a logger is already installed.
    let _ = builder.try_init();
}
