use crate::constants::*;
use crate::error::ConfigError;
use crate::limits::MotionLimits;
use crate::types::Position;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Serial line parameters applied by [`Transport::configure`](crate::Transport::configure).
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LinkConfig {
    pub port: String,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl LinkConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_millis(self.read_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PtuConfig {
    pub link: LinkConfig,
    pub limits: MotionLimits,
    pub origin: Position,
    pub send_rate_ms: u64,
    pub settle_delay_ms: u64,
}

impl Default for PtuConfig {
    fn default() -> Self {
        PtuConfig {
            link: LinkConfig::default(),
            limits: MotionLimits::default(),
            origin: Position::new(ORIGIN_PAN, ORIGIN_TILT),
            send_rate_ms: DEFAULT_SEND_RATE_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
        }
    }
}

impl PtuConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PtuConfig = toml::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = i32::from(u16::MAX);
        let MotionLimits {
            max_pan,
            tilt_min,
            tilt_max,
        } = self.limits;

        if !(0..=field).contains(&max_pan) {
            return Err(ConfigError::Invalid(format!(
                "max_pan {} must be within 0..={}",
                max_pan, field
            )));
        }
        if tilt_min < 0 || tilt_max > field || tilt_min > tilt_max {
            return Err(ConfigError::Invalid(format!(
                "tilt window {}..={} must be ordered and within 0..={}",
                tilt_min, tilt_max, field
            )));
        }
        if !self.limits.contains(self.origin) {
            return Err(ConfigError::Invalid(format!(
                "origin {} lies outside the motion limits",
                self.origin
            )));
        }
        Ok(())
    }

    pub fn send_rate(&self) -> Duration {
        Duration::from_millis(self.send_rate_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}
