//! Configuration storage formats
//!
//! TOML for hand-written configuration files, postcard for compact blobs.

use super::types::{ConfigError, WheelConfig};

impl WheelConfig {
    /// Parse and validate a TOML configuration
    ///
    /// Missing keys fall back to their defaults.
    ///
    /// ```toml
    /// default_input = "0, 1, 2, 3"
    /// easing = "ease_out_cubic"
    ///
    /// [spin]
    /// min_turns = 6
    /// max_turns = 11
    ///
    /// [settle]
    /// duration_ms = 2500
    /// ```
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        let config: WheelConfig = toml::from_str(input).map_err(|_| ConfigError::Toml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize into `buf`, returning the used prefix
    pub fn to_postcard<'a>(&self, buf: &'a mut [u8]) -> Result<&'a mut [u8], ConfigError> {
        postcard::to_slice(self, buf).map_err(|_| ConfigError::Encoding)
    }

    /// Decode and validate a postcard blob
    pub fn from_postcard(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: WheelConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Decoding)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Easing;

    #[test]
    fn test_postcard_roundtrip() {
        let mut config = WheelConfig::with_input("a, b, c").unwrap();
        config.spin.max_turns = 9;
        config.easing = Easing::EaseOutQuad;

        let mut buf = [0u8; 512];
        let used = config.to_postcard(&mut buf).unwrap();
        let decoded = WheelConfig::from_postcard(used).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_postcard_buffer_too_small() {
        let config = WheelConfig::default();
        let mut buf = [0u8; 2];
        assert_eq!(
            config.to_postcard(&mut buf).unwrap_err(),
            ConfigError::Encoding
        );
    }

    #[test]
    fn test_postcard_rejects_garbage() {
        assert_eq!(
            WheelConfig::from_postcard(&[0xFF, 0xFF, 0xFF]).unwrap_err(),
            ConfigError::Decoding
        );
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_partial_config() {
        let input = r#"
default_input = "7, 7, 3"
easing = "linear"

[spin]
min_turns = 2
max_turns = 4

[settle]
duration_ms = 1200
"#;
        let config = WheelConfig::from_toml(input).unwrap();
        assert_eq!(config.default_input.as_str(), "7, 7, 3");
        assert_eq!(config.easing, Easing::Linear);
        assert_eq!(config.spin.min_turns, 2);
        assert_eq!(config.spin.max_turns, 4);
        // Untouched keys keep their defaults
        assert_eq!(config.spin.base_ms, 4800);
        assert_eq!(config.settle.duration_ms, 1200);
        assert_eq!(config.settle.max_offset, 3);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_validation_applies() {
        let input = "[spin]\nmin_turns = 9\nmax_turns = 3\n";
        assert_eq!(
            WheelConfig::from_toml(input).unwrap_err(),
            ConfigError::InvalidTurnRange
        );
        assert_eq!(WheelConfig::from_toml("spin = 3").unwrap_err(), ConfigError::Toml);
    }
}
