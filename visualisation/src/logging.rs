use std::str::FromStr;

use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    config::{ runtime::ConfigErrors, Appender, Config, Root },
    encode::pattern::PatternEncoder,
};
use thiserror::Error;

pub const LOG_ENV_VAR: &str = "BILLIARDS_LOG";
const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;
const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("invalid logging configuration: {0}")]
    Config(#[from] ConfigErrors),
    #[error("a logger is already installed: {0}")]
    Logger(#[from] log::SetLoggerError),
}

/// Level requested through the environment, falling back to info when unset
/// or unparsable
pub fn parse_level(raw: Option<&str>) -> Result<LevelFilter, String> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_LEVEL),
        Some(raw) => LevelFilter::from_str(raw).map_err(|_| raw.to_owned()),
    }
}

pub fn init() -> Result<(), SetupError> {
    let raw = std::env::var(LOG_ENV_VAR).ok();
    let (level, invalid) = match parse_level(raw.as_deref()) {
        Ok(level) => (level, None),
        Err(invalid) => (DEFAULT_LEVEL, Some(invalid)),
    };

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;

    if let Some(invalid) = invalid {
        log::warn!("ignoring {LOG_ENV_VAR}={invalid:?}, using {DEFAULT_LEVEL}");
    }
    Ok(())
}
