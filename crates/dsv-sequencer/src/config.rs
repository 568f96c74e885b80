//! Sequencer timing configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Slowest accepted playback speed
pub const MIN_SPEED: f64 = 0.01;

/// Fastest accepted playback speed
pub const MAX_SPEED: f64 = 100.0;

/// Phase durations and playback speed.
///
/// Durations are picked for legibility, not correctness; nothing depends on
/// their exact values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencerConfig {
    /// Time spent in Prepare before the mutation happens
    pub prepare_ms: u64,

    /// Time spent showing the mutated structure
    pub mutate_ms: u64,

    /// Time the completion message stays up before clearing
    pub confirm_ms: u64,

    /// Playback multiplier applied to every `advance`
    pub speed: f64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            prepare_ms: 1000,
            mutate_ms: 1000,
            confirm_ms: 1500,
            speed: 1.0,
        }
    }
}

impl SequencerConfig {
    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the playback speed lies within `MIN_SPEED..=MAX_SPEED`
    pub fn validate(&self) -> Result<(), ConfigError> {
        if (MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            Ok(())
        } else {
            tracing::warn!("Rejecting sequencer config with speed {}", self.speed);
            Err(ConfigError::InvalidSpeed(self.speed))
        }
    }

    /// Virtual time covered by a wall-clock step of `dt`, saturating at
    /// `Duration::MAX`
    pub fn scaled(&self, dt: Duration) -> Duration {
        Duration::try_from_secs_f64(dt.as_secs_f64() * self.speed).unwrap_or(Duration::MAX)
    }

    /// Wall-clock time needed to cover `virtual_dt` of virtual time
    pub fn unscaled(&self, virtual_dt: Duration) -> Duration {
        Duration::try_from_secs_f64(virtual_dt.as_secs_f64() / self.speed).unwrap_or(Duration::MAX)
    }

    pub fn prepare_delay(&self) -> Duration {
        Duration::from_millis(self.prepare_ms)
    }

    pub fn mutate_delay(&self) -> Duration {
        Duration::from_millis(self.mutate_ms)
    }

    pub fn confirm_delay(&self) -> Duration {
        Duration::from_millis(self.confirm_ms)
    }

    /// Total duration of a full prepare/mutate/confirm run at speed 1.0
    pub fn full_run(&self) -> Duration {
        self.prepare_delay() + self.mutate_delay() + self.confirm_delay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SequencerConfig::default();
        assert_eq!(config.prepare_delay(), Duration::from_millis(1000));
        assert_eq!(config.full_run(), Duration::from_millis(3500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SequencerConfig::from_json(r#"{ "mutate_ms": 250, "speed": 2.0 }"#).unwrap();
        assert_eq!(config.mutate_ms, 250);
        assert_eq!(config.prepare_ms, 1000);
        assert_eq!(config.speed, 2.0);
    }

    #[test]
    fn test_rejects_bad_speed() {
        let err = SequencerConfig::from_json(r#"{ "speed": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSpeed(_)));

        let err = SequencerConfig::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_rejects_out_of_range_speed() {
        for json in [r#"{ "speed": 1e-20 }"#, r#"{ "speed": 1e300 }"#, r#"{ "speed": 100.5 }"#] {
            let err = SequencerConfig::from_json(json).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidSpeed(_)));
        }
        assert!(SequencerConfig::from_json(r#"{ "speed": 0.01 }"#).is_ok());
        assert!(SequencerConfig::from_json(r#"{ "speed": 100.0 }"#).is_ok());
    }

    #[test]
    fn test_scaling_saturates() {
        let config = SequencerConfig {
            speed: MAX_SPEED,
            ..SequencerConfig::default()
        };
        assert_eq!(config.scaled(Duration::from_secs(2)), Duration::from_secs(200));
        assert_eq!(config.scaled(Duration::MAX), Duration::MAX);

        let config = SequencerConfig {
            speed: MIN_SPEED,
            ..SequencerConfig::default()
        };
        assert_eq!(config.unscaled(Duration::MAX), Duration::MAX);
        assert_eq!(config.unscaled(Duration::ZERO), Duration::ZERO);
    }
}
