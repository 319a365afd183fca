use log::{error, info, LevelFilter};
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        file::FileAppender,
    },
    config::{Appender, Config, Logger, Root},
    encode::pattern::PatternEncoder,
};

use crate::config::LogConfig;
use crate::error::{BitboardError, Result};

const PATTERN: &str = "{d(%H:%M:%S%.3f)} {h({l:<5})} {t} - {m}{n}";

// Failures the binaries already print on stderr; only the log file gets them
pub const FAILURE_TARGET: &str = "bitboard_tools::failure";

/*
 * Build a log4rs configuration: stderr always, plus a file appender when a
 * log file is configured. Stdout is left alone for tool output.
 */
pub fn build_config(config: &LogConfig) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut builder =
        Config::builder().appender(Appender::builder().build("stderr", Box::new(stderr)));
    let mut root = Root::builder().appender("stderr");
    let mut failures = Logger::builder().additive(false);

    if let Some(path) = &config.file {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
        failures = failures.appender("file");
    }

    builder
        .logger(failures.build(FAILURE_TARGET, LevelFilter::Error))
        .build(root.build(config.level))
        .map_err(|e| BitboardError::ConfigError(e.to_string()))
}

/*
 * Install the logger and route panics through it.
 */
pub fn init(config: &LogConfig) -> Result<()> {
    let log4rs_config = build_config(config)?;
    log4rs::init_config(log4rs_config)
        .map_err(|e| BitboardError::ConfigError(format!("logger already set: {}", e)))?;
    log_panics::init();

    let destination = match &config.file {
        Some(path) => format!("stderr and {}", path.display()),
        None => "stderr".to_string(),
    };
    info!("Logging at {} to {}", config.level, destination);
    Ok(())
}

/*
 * Report a failure that ends the program: plain message on stderr, logged
 * at error level to the log file if there is one.
 */
pub fn report_failure(e: &BitboardError) {
    error!(target: FAILURE_TARGET, "{}", e);
    eprintln!("{}", e);
}

/*
 * Entry point for the binaries: read the environment, fall back to the
 * defaults if it is malformed.
 */
pub fn init_from_env() {
    let config = LogConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{}, using default logging", e);
        LogConfig::default()
    });

    if let Err(e) = init(&config) {
        eprintln!("{}", e);
    }
}

#[test]
fn test_build_console_config() {
    let config = build_config(&LogConfig::default()).unwrap();
    assert_eq!(config.appenders().len(), 1);
    assert_eq!(config.root().level(), LevelFilter::Warn);

    let failures = &config.loggers()[0];
    assert_eq!(failures.name(), FAILURE_TARGET);
    assert!(failures.appenders().is_empty());
    assert!(!failures.additive());
}

#[test]
fn test_build_file_config() {
    let path = std::env::temp_dir().join(format!("bitboard-tools-{}.log", std::process::id()));
    let config = build_config(&LogConfig {
        level: LevelFilter::Debug,
        file: Some(path.clone()),
    })
    .unwrap();

    assert_eq!(config.appenders().len(), 2);
    assert_eq!(config.root().appenders(), ["stderr", "file"]);
    assert_eq!(config.loggers()[0].appenders(), ["file"]);
    assert_eq!(config.loggers()[0].level(), LevelFilter::Error);
    let _ = std::fs::remove_file(path);
}
