//! Grid configuration.

use crate::breakpoint::Breakpoint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Per-breakpoint grid settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointConfig {
    /// Number of grid columns.
    pub columns: u32,
    /// Minimum viewport width in pixels.
    pub min_width: u32,
}

/// Grid configuration shared by the resolver, the store and grid surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub breakpoints: BTreeMap<Breakpoint, BreakpointConfig>,
    /// Height of one grid row in pixels.
    pub row_height: u32,
    /// Horizontal and vertical gap between items in pixels.
    pub margin: [u32; 2],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoint::ALL
                .into_iter()
                .map(|bp| {
                    let config = BreakpointConfig {
                        columns: bp.default_columns(),
                        min_width: bp.default_min_width(),
                    };
                    (bp, config)
                })
                .collect(),
            row_height: 20,
            margin: [24, 24],
        }
    }
}

impl GridConfig {
    /// Column count for a breakpoint.
    pub fn columns(&self, breakpoint: Breakpoint) -> u32 {
        self.breakpoints
            .get(&breakpoint)
            .map(|c| c.columns)
            .unwrap_or_else(|| breakpoint.default_columns())
    }

    /// The largest breakpoint whose minimum width fits the viewport.
    pub fn breakpoint_for_width(&self, viewport_width: u32) -> Breakpoint {
        Breakpoint::ALL
            .into_iter()
            .find(|bp| {
                let min_width = self
                    .breakpoints
                    .get(bp)
                    .map(|c| c.min_width)
                    .unwrap_or_else(|| bp.default_min_width());
                min_width <= viewport_width
            })
            .unwrap_or(Breakpoint::Xxs)
    }

    /// Check that every breakpoint is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for bp in Breakpoint::ALL {
            if self.columns(bp) == 0 {
                return Err(ConfigError::Invalid(format!("breakpoint {} has zero columns", bp)));
            }
        }
        let canonical = self.columns(Breakpoint::CANONICAL);
        if let Some(bp) = Breakpoint::ALL.into_iter().find(|bp| self.columns(*bp) > canonical) {
            return Err(ConfigError::Invalid(format!(
                "breakpoint {} has more columns than {}",
                bp,
                Breakpoint::CANONICAL
            )));
        }
        if self.row_height == 0 {
            return Err(ConfigError::Invalid("row height must be positive".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a configuration from JSON.
    ///
    /// Breakpoints and fields missing from the JSON keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let parsed: GridConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let mut config = GridConfig::default();
        config.breakpoints.extend(parsed.breakpoints);
        config.row_height = parsed.row_height;
        config.margin = parsed.margin;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns() {
        let config = GridConfig::default();
        let columns: Vec<_> = Breakpoint::ALL.iter().map(|bp| config.columns(*bp)).collect();
        assert_eq!(columns, vec![12, 10, 6, 4, 2]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_breakpoint_for_width() {
        let config = GridConfig::default();
        assert_eq!(config.breakpoint_for_width(1920), Breakpoint::Lg);
        assert_eq!(config.breakpoint_for_width(1200), Breakpoint::Lg);
        assert_eq!(config.breakpoint_for_width(1000), Breakpoint::Md);
        assert_eq!(config.breakpoint_for_width(800), Breakpoint::Sm);
        assert_eq!(config.breakpoint_for_width(500), Breakpoint::Xs);
        assert_eq!(config.breakpoint_for_width(320), Breakpoint::Xxs);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GridConfig::from_json(
            r#"{ "breakpoints": { "sm": { "columns": 8, "min_width": 700 } } }"#,
        )
        .unwrap();
        assert_eq!(config.columns(Breakpoint::Sm), 8);
        assert_eq!(config.columns(Breakpoint::Lg), 12);
        assert_eq!(config.row_height, 20);
        assert_eq!(config.breakpoint_for_width(750), Breakpoint::Sm);
    }

    #[test]
    fn test_rejects_zero_columns() {
        let result = GridConfig::from_json(
            r#"{ "breakpoints": { "xs": { "columns": 0, "min_width": 480 } } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_wider_than_canonical() {
        let result = GridConfig::from_json(
            r#"{ "breakpoints": { "md": { "columns": 16, "min_width": 996 } } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.json");
        fs::write(&path, r#"{ "row_height": 30 }"#).unwrap();
        let config = GridConfig::load(&path).unwrap();
        assert_eq!(config.row_height, 30);

        let missing = GridConfig::load(&dir.path().join("missing.json"));
        assert!(matches!(missing, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(GridConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }
}
