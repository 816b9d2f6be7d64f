//! Configuration type definitions

use core::fmt;

use heapless::String;

use crate::geometry::Easing;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum label length in bytes
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum segments on one wheel
pub const MAX_SEGMENTS: usize = 64;

/// Maximum length of raw segment input in bytes
pub const MAX_INPUT_LEN: usize = 256;

/// Default raw segment input
pub const DEFAULT_INPUT: &str = "0,1";

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `min_turns` greater than `max_turns`
    InvalidTurnRange,
    /// `min_offset` greater than `max_offset`
    InvalidOffsetRange,
    /// A run duration would be zero
    ZeroDuration,
    /// Playback rate is zero, negative or not finite
    InvalidPlaybackRate,
    /// Default input exceeds `MAX_INPUT_LEN`
    InputTooLong,
    /// TOML text could not be parsed into a configuration
    Toml,
    /// Serialization into the storage buffer failed
    Encoding,
    /// Stored blob could not be decoded
    Decoding,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ConfigError::InvalidTurnRange => "min_turns exceeds max_turns",
            ConfigError::InvalidOffsetRange => "min_offset exceeds max_offset",
            ConfigError::ZeroDuration => "run duration must be non-zero",
            ConfigError::InvalidPlaybackRate => "playback_rate must be a positive number",
            ConfigError::InputTooLong => "default input too long",
            ConfigError::Toml => "invalid TOML configuration",
            ConfigError::Encoding => "configuration does not fit storage buffer",
            ConfigError::Decoding => "stored configuration is corrupt",
        };
        f.write_str(msg)
    }
}

/// Policy for a full spin started by the spin trigger
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpinPolicy {
    /// Fewest extra whole turns (inclusive)
    pub min_turns: u32,
    /// Most extra whole turns (inclusive)
    pub max_turns: u32,
    /// Nominal duration before per-turn time is added (ms)
    pub base_ms: u32,
    /// Nominal time added per extra turn (ms)
    pub per_turn_ms: u32,
    /// Speed multiplier applied to the nominal duration
    ///
    /// Values below 1.0 stretch the run.
    pub playback_rate: f32,
}

impl Default for SpinPolicy {
    fn default() -> Self {
        Self {
            min_turns: 6,
            max_turns: 11,
            base_ms: 4800,
            per_turn_ms: 300,
            playback_rate: 0.6,
        }
    }
}

impl SpinPolicy {
    /// Run duration for a spin with `turns` extra turns (ms, at least 1)
    pub fn duration_ms(&self, turns: u32) -> u32 {
        let nominal = self
            .base_ms
            .saturating_add(self.per_turn_ms.saturating_mul(turns));
        let scaled = nominal as f32 / self.playback_rate + 0.5;
        // `as` saturates, and NaN becomes 0 which the max() below repairs
        (scaled as u32).max(1)
    }
}

/// Policy for the short settle run started by the stop trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SettlePolicy {
    /// Extra whole turns before landing
    pub extra_turns: u32,
    /// Fixed run duration (ms)
    pub duration_ms: u32,
    /// Smallest index offset from the segment under the pointer (inclusive)
    pub min_offset: u32,
    /// Largest index offset from the segment under the pointer (inclusive)
    pub max_offset: u32,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            extra_turns: 2,
            duration_ms: 2500,
            min_offset: 1,
            max_offset: 3,
        }
    }
}

/// Wheel configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WheelConfig {
    /// Segment input used until the input source supplies its own
    pub default_input: String<MAX_INPUT_LEN>,
    /// Full spin policy
    pub spin: SpinPolicy,
    /// Settle (stop) policy
    pub settle: SettlePolicy,
    /// Deceleration curve for both run kinds
    pub easing: Easing,
}

impl Default for WheelConfig {
    fn default() -> Self {
        let mut default_input = String::new();
        let _ = default_input.push_str(DEFAULT_INPUT);
        Self {
            default_input,
            spin: SpinPolicy::default(),
            settle: SettlePolicy::default(),
            easing: Easing::default(),
        }
    }
}

impl WheelConfig {
    /// Create a configuration with default policies and the given input
    pub fn with_input(input: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.default_input.clear();
        config
            .default_input
            .push_str(input)
            .map_err(|_| ConfigError::InputTooLong)?;
        Ok(config)
    }

    /// Check the policies for values that would break a run
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spin.min_turns > self.spin.max_turns {
            return Err(ConfigError::InvalidTurnRange);
        }
        if !(self.spin.playback_rate.is_finite() && self.spin.playback_rate > 0.0) {
            return Err(ConfigError::InvalidPlaybackRate);
        }
        if self.spin.base_ms == 0 && self.spin.per_turn_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.settle.duration_ms == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.settle.min_offset > self.settle.max_offset {
            return Err(ConfigError::InvalidOffsetRange);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = WheelConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.default_input.as_str(), "0,1");
        assert_eq!(config.spin.min_turns, 6);
        assert_eq!(config.spin.max_turns, 11);
        assert_eq!(config.settle.duration_ms, 2500);
    }

    #[test]
    fn test_spin_duration_grows_with_turns() {
        let policy = SpinPolicy::default();
        // (4800 + 6 * 300) / 0.6
        assert_eq!(policy.duration_ms(6), 11000);
        assert!(policy.duration_ms(11) > policy.duration_ms(6));
    }

    #[test]
    fn test_spin_duration_never_zero() {
        let policy = SpinPolicy {
            base_ms: 0,
            per_turn_ms: 0,
            ..Default::default()
        };
        assert_eq!(policy.duration_ms(3), 1);
    }

    #[test]
    fn test_validate_rejects_bad_ranges() {
        let mut config = WheelConfig::default();
        config.spin.min_turns = 12;
        assert_eq!(config.validate(), Err(ConfigError::InvalidTurnRange));

        let mut config = WheelConfig::default();
        config.settle.min_offset = 4;
        assert_eq!(config.validate(), Err(ConfigError::InvalidOffsetRange));

        let mut config = WheelConfig::default();
        config.settle.duration_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration));
    }

    #[test]
    fn test_validate_rejects_bad_playback_rate() {
        for rate in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            let mut config = WheelConfig::default();
            config.spin.playback_rate = rate;
            assert_eq!(config.validate(), Err(ConfigError::InvalidPlaybackRate));
        }
    }

    #[test]
    fn test_with_input_length_limit() {
        assert!(WheelConfig::with_input("a,b,c").is_ok());

        let mut long: String<512> = String::new();
        for _ in 0..300 {
            long.push('x').unwrap();
        }
        assert_eq!(
            WheelConfig::with_input(&long).unwrap_err(),
            ConfigError::InputTooLong
        );
    }
}
