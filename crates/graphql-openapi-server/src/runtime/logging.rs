//! Logging config and setup
//!
//! Logs go to stderr unless a directory is configured, in which case a rolling log file is
//! written there instead.

mod parsers;

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::Deserialize;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE_PREFIX: &str = "graphql_openapi_server";

/// Logging related options
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(default)]
pub struct Logging {
    /// The log level to use for tracing
    #[serde(deserialize_with = "parsers::from_str")]
    #[schemars(schema_with = "level")]
    pub level: Level,

    /// The directory to write log files to
    pub path: Option<PathBuf>,

    /// Log file rotation period to use when a log path is provided
    /// [default: Hourly]
    pub rotation: LogRotationKind,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            path: None,
            rotation: LogRotationKind::Hourly,
        }
    }
}

#[derive(Debug, Default, Deserialize, JsonSchema, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotationKind {
    Minutely,
    #[default]
    Hourly,
    Daily,
    Never,
}

impl From<LogRotationKind> for Rotation {
    fn from(value: LogRotationKind) -> Self {
        match value {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}

impl Logging {
    /// Install the global subscriber. The returned guard must be held until exit so that
    /// buffered file logs are flushed.
    pub fn setup(&self) -> Result<Option<WorkerGuard>, anyhow::Error> {
        let env_filter = EnvFilter::from_default_env().add_directive(self.level.into());

        let Some(path) = &self.path else {
            return setup_stderr_logging(env_filter);
        };

        let appender = std::fs::create_dir_all(path)
            .map_err(anyhow::Error::from)
            .and_then(|_| {
                RollingFileAppender::builder()
                    .rotation(self.rotation.into())
                    .filename_prefix(LOG_FILE_PREFIX)
                    .filename_suffix("log")
                    .build(path)
                    .map_err(anyhow::Error::from)
            });

        match appender {
            Ok(appender) => {
                let (non_blocking_writer, guard) = tracing_appender::non_blocking(appender);
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(non_blocking_writer)
                            .with_ansi(false)
                            .with_target(false),
                    )
                    .try_init()?;
                Ok(Some(guard))
            }
            Err(e) => {
                eprintln!("Log file setup failed ({e}) - falling back to stderr");
                setup_stderr_logging(env_filter)
            }
        }
    }
}

fn setup_stderr_logging(env_filter: EnvFilter) -> Result<Option<WorkerGuard>, anyhow::Error> {
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .with_target(false),
        )
        .try_init()?;

    Ok(None)
}

fn level(generator: &mut schemars::SchemaGenerator) -> schemars::Schema {
    /// Log level
    #[derive(JsonSchema)]
    #[schemars(rename_all = "lowercase")]
    // This is just an intermediate type to auto create schema information for,
    // so it is OK if it is never used
    #[allow(dead_code)]
    enum Level {
        Trace,
        Debug,
        Info,
        Warn,
        Error,
    }

    Level::json_schema(generator)
}
