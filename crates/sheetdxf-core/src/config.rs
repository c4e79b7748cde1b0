use crate::model::{LayerSpec, INNER_LOOP_LAYER, OUTER_LOOP_LAYER};
use crate::normalize::SegmentPolicy;
use crate::params::ExportTargets;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_ENV: &str = "SHEETDXF_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "sheetdxf.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub join: JoinSettings,
    #[serde(default)]
    pub color: ColorSettings,
    #[serde(default)]
    pub export: ExportSettings,
}

impl Settings {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Explicit path first, then `SHEETDXF_CONFIG`, then `./sheetdxf.toml`.
    /// Falls back to defaults when none of them exists.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(PathBuf::from(path));
        }

        let default_path = env::current_dir()
            .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
            .map_err(|source| ConfigError::Context {
                message: "failed to resolve current directory".to_string(),
                source,
            })?;

        if default_path.is_file() {
            Self::from_file(default_path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_tolerance("join.tolerance", self.join.tolerance)?;
        check_tolerance("color.tolerance", self.color.tolerance)?;
        check_tolerance("export.polyline_tolerance", self.export.polyline_tolerance)?;
        check_color("color.outer_color", self.color.outer_color)?;
        check_color("color.inner_color", self.color.inner_color)?;
        if self.color.outer_layer.trim().is_empty() {
            return Err(ConfigError::invalid("color.outer_layer", "must not be empty"));
        }
        if self.color.inner_layer.trim().is_empty() {
            return Err(ConfigError::invalid("color.inner_layer", "must not be empty"));
        }
        if self
            .color
            .outer_layer
            .eq_ignore_ascii_case(&self.color.inner_layer)
        {
            return Err(ConfigError::invalid(
                "color.inner_layer",
                "must differ from color.outer_layer",
            ));
        }
        if self.export.prefixes.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::invalid("export.prefixes", "entries must not be empty"));
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn check_tolerance(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be a positive finite number, got {value}")))
    }
}

fn check_color(field: &'static str, value: u8) -> Result<(), ConfigError> {
    // 0 is BYBLOCK; 256 (BYLAYER) does not fit in u8.
    if value == 0 {
        Err(ConfigError::invalid(field, "ACI color index must be in 1..=255"))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "LoggingSettings::default_level")]
    pub level: String,
}

impl LoggingSettings {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinSettings {
    pub tolerance: f64,
    pub drop_zero_length: bool,
    pub drop_duplicates: bool,
}

impl JoinSettings {
    pub fn policy(&self) -> SegmentPolicy {
        SegmentPolicy {
            drop_zero_length: self.drop_zero_length,
            drop_duplicates: self.drop_duplicates,
        }
    }
}

impl Default for JoinSettings {
    fn default() -> Self {
        let policy = SegmentPolicy::default();
        Self {
            tolerance: 1e-6,
            drop_zero_length: policy.drop_zero_length,
            drop_duplicates: policy.drop_duplicates,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorSettings {
    pub outer_layer: String,
    pub outer_color: u8,
    pub inner_layer: String,
    pub inner_color: u8,
    /// Closed-polyline vertices closer than this count as one corner.
    pub tolerance: f64,
    /// Defaults to `<source>/colored` when unset.
    pub dest_dir: Option<PathBuf>,
}

impl ColorSettings {
    pub fn outer(&self) -> LayerSpec {
        LayerSpec::new(self.outer_layer.clone(), self.outer_color)
    }

    pub fn inner(&self) -> LayerSpec {
        LayerSpec::new(self.inner_layer.clone(), self.inner_color)
    }
}

impl Default for ColorSettings {
    fn default() -> Self {
        let outer = LayerSpec::outer();
        let inner = LayerSpec::inner();
        Self {
            outer_layer: OUTER_LOOP_LAYER.to_string(),
            outer_color: outer.color_index,
            inner_layer: INNER_LOOP_LAYER.to_string(),
            inner_color: inner.color_index,
            tolerance: 1e-6,
            dest_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub dir: Option<PathBuf>,
    pub dims_file: String,
    pub prefixes: Vec<String>,
    pub exclude: Vec<String>,
    /// Arc-to-polyline deviation handed to the CAD exporter, in mm.
    pub polyline_tolerance: f64,
}

impl ExportSettings {
    pub fn targets(&self) -> ExportTargets {
        ExportTargets::new(self.prefixes.clone(), self.exclude.clone())
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        let targets = ExportTargets::default();
        Self {
            dir: None,
            dims_file: "dims.json".to_string(),
            prefixes: targets.prefixes,
            exclude: targets.exclude,
            polyline_tolerance: 1e-4,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
    #[error("{message}")]
    Context {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
