//! Run configuration, loaded from TOML.
//!
//! Every field has a default, so an empty document describes the reference
//! arch with the standard station table.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::arch::{validate_stations, ArchPhysicalConstants, OffsetMargins, GATEWAY_STATIONS};
use crate::error::{ConfigError, Result};

/// Top-level configuration for a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArchConfig {
    /// Name of the output component. A previous component with this name is replaced.
    pub name: String,
    pub constants: ConstantsConfig,
    pub margins: OffsetMargins,
    pub features: FeatureSettings,
    /// Horizontal station offsets; the reference table when absent.
    pub stations: Option<Vec<f64>>,
}

impl Default for ArchConfig {
    fn default() -> Self {
        Self {
            name: "Gateway Arch".to_owned(),
            constants: ConstantsConfig::default(),
            margins: OffsetMargins::default(),
            features: FeatureSettings::default(),
            stations: None,
        }
    }
}

/// Physical dimensions in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConstantsConfig {
    pub base_width_feet: f64,
    pub top_width_feet: f64,
    pub height_feet: f64,
    pub span_feet: f64,
}

impl Default for ConstantsConfig {
    fn default() -> Self {
        Self {
            base_width_feet: ArchPhysicalConstants::GATEWAY_BASE_WIDTH_FEET,
            top_width_feet: ArchPhysicalConstants::GATEWAY_TOP_WIDTH_FEET,
            height_feet: ArchPhysicalConstants::GATEWAY_HEIGHT_FEET,
            span_feet: ArchPhysicalConstants::GATEWAY_SPAN_FEET,
        }
    }
}

/// Depths and sizes of the per-section features, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeatureSettings {
    pub notch_depth: f64,
    pub lip_depth: f64,
    pub label_depth: f64,
    pub label_height: f64,
    /// Distance of the label baseline from the longest edge of the label face.
    pub label_inset: f64,
}

impl Default for FeatureSettings {
    fn default() -> Self {
        Self {
            notch_depth: 1.5,
            lip_depth: 1.0,
            label_depth: 0.2,
            label_height: 2.0,
            label_inset: 1.0,
        }
    }
}

impl FeatureSettings {
    /// # Errors
    ///
    /// Returns `ConfigError::Features` if any value is non-finite or non-positive.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let named = [
            ("notch_depth", self.notch_depth),
            ("lip_depth", self.lip_depth),
            ("label_depth", self.label_depth),
            ("label_height", self.label_height),
            ("label_inset", self.label_inset),
        ];
        for (name, value) in named {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Features(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl ArchConfig {
    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source).map_err(ConfigError::from)?)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every section of the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Name("name must not be empty".into()).into());
        }
        self.physical_constants()?;
        self.margins.validate()?;
        self.features.validate()?;
        validate_stations(self.station_table())?;
        Ok(())
    }

    /// Builds the validated physical constants.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Constants` for invalid dimensions.
    pub fn physical_constants(&self) -> Result<ArchPhysicalConstants> {
        let c = &self.constants;
        Ok(ArchPhysicalConstants::new(
            c.base_width_feet,
            c.top_width_feet,
            c.height_feet,
            c.span_feet,
        )?)
    }

    /// The configured station table, or the reference table.
    #[must_use]
    pub fn station_table(&self) -> &[f64] {
        self.stations.as_deref().unwrap_or(&GATEWAY_STATIONS)
    }
}
