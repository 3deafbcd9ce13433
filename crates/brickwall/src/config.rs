#![forbid(unsafe_code)]

//! Controller configuration.
//!
//! ```
//! use std::time::Duration;
//! use brickwall::BrickwallConfig;
//!
//! let config = BrickwallConfig::default()
//!     .with_grid_gap(20.0)
//!     .with_animation_speed(Duration::from_millis(200))
//!     .validate()
//!     .unwrap();
//! assert_eq!(config.min_height, 30.0);
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default item transition and settle delay.
pub const DEFAULT_ANIMATION_SPEED: Duration = Duration::from_millis(150);

/// Default floor for a zone's collapsed height, in pixels.
pub const DEFAULT_MIN_HEIGHT: f64 = 30.0;

/// Errors raised while loading or validating a [`BrickwallConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid gap must be a finite, non-negative number (got {0})")]
    InvalidGridGap(f64),
    #[error("minimum height must be a finite, non-negative number (got {0})")]
    InvalidMinHeight(f64),
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Layout and timing parameters supplied at construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickwallConfig {
    /// Pixel spacing between items and from the container's top-left edge.
    pub grid_gap: f64,
    /// Duration of every reposition transition and of the post-drop settle
    /// delay. Serialized as whole milliseconds.
    #[serde(rename = "animation_speed_ms", with = "duration_ms")]
    pub animation_speed: Duration,
    /// Floor for a zone's height when its container declares none.
    pub min_height: f64,
}

impl Default for BrickwallConfig {
    fn default() -> Self {
        Self {
            grid_gap: 0.0,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            min_height: DEFAULT_MIN_HEIGHT,
        }
    }
}

impl BrickwallConfig {
    #[must_use]
    pub const fn with_grid_gap(mut self, grid_gap: f64) -> Self {
        self.grid_gap = grid_gap;
        self
    }

    #[must_use]
    pub const fn with_animation_speed(mut self, animation_speed: Duration) -> Self {
        self.animation_speed = animation_speed;
        self
    }

    #[must_use]
    pub const fn with_min_height(mut self, min_height: f64) -> Self {
        self.min_height = min_height;
        self
    }

    /// Reject values the reflow cannot work with.
    pub fn validate(self) -> Result<Self> {
        if !self.grid_gap.is_finite() || self.grid_gap < 0.0 {
            return Err(ConfigError::InvalidGridGap(self.grid_gap));
        }
        if !self.min_height.is_finite() || self.min_height < 0.0 {
            return Err(ConfigError::InvalidMinHeight(self.min_height));
        }
        Ok(self)
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
