//! Design parameters handed to the CAD host through a `dims.json` file drop,
//! and the rules that decide which host components get a flat-pattern export.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MIN_PANEL_LENGTH_MM: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignDims {
    #[serde(rename = "Length_Screws")]
    pub length_screws: u32,
    #[serde(rename = "Width_Screws")]
    pub width_screws: u32,
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
}

impl Default for DesignDims {
    fn default() -> Self {
        Self {
            length_screws: 4,
            width_screws: 4,
            length: 200.0,
            width: 400.0,
            height: 100.0,
        }
    }
}

impl DesignDims {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.length_screws == 0 {
            return Err(ParamsError::Invalid {
                name: "Length_Screws",
                message: "must be > 0".to_string(),
            });
        }
        if self.width_screws == 0 {
            return Err(ParamsError::Invalid {
                name: "Width_Screws",
                message: "must be > 0".to_string(),
            });
        }
        for (name, value) in [
            ("Length", self.length),
            ("Width", self.width),
            ("Height", self.height),
        ] {
            if !value.is_finite() || value < MIN_PANEL_LENGTH_MM {
                return Err(ParamsError::Invalid {
                    name,
                    message: format!("must be >= {MIN_PANEL_LENGTH_MM} mm, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// User-parameter expressions in the host's syntax: counts are bare,
    /// lengths carry a `mm` unit.
    pub fn expressions(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Length_Screws", self.length_screws.to_string()),
            ("Width_Screws", self.width_screws.to_string()),
            ("Length", format!("{} mm", self.length)),
            ("Width", format!("{} mm", self.width)),
            ("Height", format!("{} mm", self.height)),
        ]
    }

    pub fn load_or_default(path: &Path) -> Result<Self, ParamsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ParamsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write_dims_file(&self, path: &Path) -> Result<(), ParamsError> {
        self.validate()?;
        let json = serde_json::to_string_pretty(self).map_err(ParamsError::Encode)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ParamsError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }
        fs::write(path, json).map_err(|source| ParamsError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportTargets {
    pub prefixes: Vec<String>,
    pub exclude: Vec<String>,
}

impl Default for ExportTargets {
    fn default() -> Self {
        Self {
            prefixes: vec!["top".to_string(), "side1".to_string(), "side2".to_string()],
            exclude: vec!["mirror".to_string()],
        }
    }
}

impl ExportTargets {
    pub fn new(prefixes: Vec<String>, exclude: Vec<String>) -> Self {
        Self { prefixes, exclude }
    }

    /// Case-insensitive: the occurrence name must start with a prefix and
    /// contain none of the excluded fragments.
    pub fn selects(&self, occurrence_name: &str) -> bool {
        let name = occurrence_name.to_lowercase();
        if self
            .exclude
            .iter()
            .any(|ex| name.contains(&ex.to_lowercase()))
        {
            return false;
        }
        self.prefixes
            .iter()
            .any(|p| name.starts_with(&p.to_lowercase()))
    }
}

/// `Top:1` -> `Top`.
pub fn component_name(occurrence_name: &str) -> &str {
    match occurrence_name.rsplit_once(':') {
        Some((base, idx)) if !idx.is_empty() && idx.chars().all(|c| c.is_ascii_digit()) => base,
        _ => occurrence_name,
    }
}

pub fn flat_dxf_name(component: &str) -> String {
    format!("{component}_flat.dxf")
}

pub fn flat_dxf_path(export_dir: &Path, occurrence_name: &str) -> PathBuf {
    export_dir.join(flat_dxf_name(component_name(occurrence_name)))
}

#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("invalid parameter `{name}`: {message}")]
    Invalid { name: &'static str, message: String },
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed dimensions file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode dimensions: {0}")]
    Encode(#[source] serde_json::Error),
}
