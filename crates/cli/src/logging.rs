use anyhow::Result;
use log::LevelFilter;
use log4rs::{
    Config, Handle,
    append::console::{ConsoleAppender, Target},
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
};

// ISO 8601 timestamp and color coded level tag
const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

/// Installs a stderr console logger at `level`.
///
/// Logs go to stderr so CSV written to stdout stays clean.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or a logger is already set.
pub fn init(level: LevelFilter) -> Result<Handle> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))?;

    Ok(log4rs::init_config(config)?)
}
