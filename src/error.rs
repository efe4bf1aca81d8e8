use crate::types::Axis;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the underlying link.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Serial link is not open")]
    NotOpen,

    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocking I/O task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("Serial link {path} is unavailable: {source}")]
    LinkUnavailable {
        path: String,
        #[source]
        source: TransportError,
    },

    #[error("Failed to configure serial link {path}: {source}")]
    ConfigurationFailed {
        path: String,
        #[source]
        source: TransportError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {axis} request: {requested} outside {}..={}", .bounds.start(), .bounds.end())]
pub struct InvalidRange {
    pub axis: Axis,
    pub requested: i32,
    pub bounds: RangeInclusive<i32>,
}

#[derive(Debug, Error)]
pub enum TransmitError {
    #[error("Short write: expected {expected} bytes but wrote {written}")]
    ShortWrite { expected: usize, written: usize },

    #[error(transparent)]
    Link(#[from] TransportError),
}

#[derive(Debug, Error)]
pub enum MoveError {
    #[error("PTU not connected")]
    NotConnected,

    #[error("PTU position unknown; anchor it with an absolute move first")]
    PositionUnknown,

    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    #[error("Failed to transmit command: {0}")]
    Transmit(#[from] TransmitError),
}

/// Failure of a connect-and-anchor constructor.
#[derive(Debug, Error)]
pub enum OpenError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Move(#[from] MoveError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
