//! Logger setup for the terminal binary.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Default filter when `RUST_LOG` is unset.
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG` wins when set. Records go to stderr so they never interleave
/// with frames drawn on stdout.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    builder.target(Target::Stderr).format_timestamp_millis();

    // Already initialised (e.g. by another test); keep the existing logger.
    let _ = builder.try_init();
}
