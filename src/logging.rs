//! Terminal logging for the binaries.

use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Install a terminal logger at `level`.
///
/// Timestamps, targets, thread ids and source locations are left out so
/// progress lines stay readable. Calling this twice is harmless: the second
/// call leaves the first logger in place and returns `false`.
pub fn init(level: LevelFilter) -> bool {
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build();

    TermLogger::init(level, config, TerminalMode::Mixed, ColorChoice::Auto).is_ok()
}

/// Level for a `--verbose` flag: debug when set, info otherwise.
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(true), LevelFilter::Debug);
        assert_eq!(level_for(false), LevelFilter::Info);
    }

    #[test]
    fn test_second_init_is_rejected() {
        init(LevelFilter::Warn);
        assert!(!init(LevelFilter::Warn));
    }
}
