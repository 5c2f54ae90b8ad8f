use crate::Error;
use log::LevelFilter;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Parses a level name from the configuration, e.g. `info` or `debug`.
pub fn level_from_str(level: &str) -> Result<LevelFilter, Error> {
    level
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| Error::ConfigError(format!("Unknown log level \"{}\".", level)))
}

/// Installs the terminal logger on stderr, limited to this crate.
pub fn init(level: LevelFilter) -> Result<(), Error> {
    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Debug)
        .add_filter_allow_str("gios")
        .build();
    TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto)
        .map_err(|err| Error::Unspecified(format!("Could not set up logging ({}).", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names() {
        assert_eq!(level_from_str("debug").unwrap(), LevelFilter::Debug);
        assert_eq!(level_from_str(" WARN ").unwrap(), LevelFilter::Warn);
        assert!(matches!(level_from_str("loud"), Err(Error::ConfigError(_))));
    }
}
