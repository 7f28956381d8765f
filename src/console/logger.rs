/* src/console/logger.rs */

use log::LevelFilter;
use std::str::FromStr;

// Unknown names fall back to info rather than aborting before the run starts.
pub fn parse_level(name: &str) -> LevelFilter {
    LevelFilter::from_str(name.trim()).unwrap_or(LevelFilter::Info)
}

/// Sends log output to stderr so stdout only carries the address and the result line.
/// `RUST_LOG` can still refine the configured level.
pub fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(parse_level(level))
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env();
    // A second initialisation is harmless; keep the first logger.
    builder.try_init().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }
}
