use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{PrepError, PrepResult};

/// Ambient defaults for the pipeline. Everything here can be overridden on
/// the command line; the config file and environment only move the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepConfig {
    pub cleaning: CleaningConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    /// Minimum character count for the first output column; 0 disables
    /// the filter. Kept signed so a bad value is rejected, not wrapped.
    pub min_length: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Single-character output delimiter
    pub delimiter: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            cleaning: CleaningConfig::default(),
            export: ExportConfig::default(),
        }
    }
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self { min_length: 0 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            delimiter: ";".to_string(),
        }
    }
}

impl PrepConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> PrepResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| PrepError::configuration(format!("failed to read config file: {}", e)))?;

        let config: PrepConfig = toml::from_str(&content)
            .map_err(|e| PrepError::configuration(format!("failed to parse config file: {}", e)))?;

        Ok(config)
    }

    /// Default config with environment-variable overrides applied
    pub fn load_from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    pub fn apply_env(&mut self) {
        if let Ok(min_length) = std::env::var("SHEETPREP_MIN_LENGTH") {
            if let Ok(value) = min_length.parse::<i64>() {
                self.cleaning.min_length = value;
            }
        }

        if let Ok(delimiter) = std::env::var("SHEETPREP_DELIMITER") {
            if !delimiter.is_empty() {
                self.export.delimiter = delimiter;
            }
        }
    }

    /// The export delimiter as a single byte, rejecting multi-character
    /// or non-ASCII values
    pub fn delimiter_byte(&self) -> PrepResult<u8> {
        let mut chars = self.export.delimiter.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => Ok(c as u8),
            _ => Err(PrepError::configuration(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.export.delimiter
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historic_behavior() {
        let config = PrepConfig::default();
        assert_eq!(config.export.delimiter, ";");
        assert_eq!(config.cleaning.min_length, 0);
        assert_eq!(config.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn parses_partial_toml() {
        let config: PrepConfig = toml::from_str(
            r#"
            [export]
            delimiter = "\t"
            "#,
        )
        .unwrap();
        assert_eq!(config.delimiter_byte().unwrap(), b'\t');
        assert_eq!(config.cleaning.min_length, 0);
    }

    // Single test for all SHEETPREP_* cases: the process environment is
    // shared, so splitting these up would let parallel tests race
    #[test]
    fn env_overrides_move_the_defaults() {
        std::env::set_var("SHEETPREP_MIN_LENGTH", "6");
        std::env::set_var("SHEETPREP_DELIMITER", ",");
        let mut config = PrepConfig::default();
        config.apply_env();
        assert_eq!(config.cleaning.min_length, 6);
        assert_eq!(config.export.delimiter, ",");

        // load_from_env is default-plus-overrides in one step
        let config = PrepConfig::load_from_env();
        assert_eq!(config.cleaning.min_length, 6);
        assert_eq!(config.export.delimiter, ",");

        // An unparseable minimum length leaves the default untouched
        std::env::set_var("SHEETPREP_MIN_LENGTH", "six");
        let mut config = PrepConfig::default();
        config.apply_env();
        assert_eq!(config.cleaning.min_length, 0);
        assert_eq!(config.export.delimiter, ",");

        // An empty delimiter is ignored too
        std::env::set_var("SHEETPREP_DELIMITER", "");
        let mut config = PrepConfig::default();
        config.apply_env();
        assert_eq!(config.export.delimiter, ";");

        std::env::remove_var("SHEETPREP_MIN_LENGTH");
        std::env::remove_var("SHEETPREP_DELIMITER");
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        let config = PrepConfig {
            export: ExportConfig {
                delimiter: ";;".to_string(),
            },
            ..PrepConfig::default()
        };
        assert!(config.delimiter_byte().is_err());
    }
}
