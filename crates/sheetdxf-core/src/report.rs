use crate::geom::BBox2;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const NO_CLOSED_LOOPS: &str = "no_closed_loops";
pub const UNRESOLVED_SEGMENT: &str = "unresolved_segment";
pub const DEGENERATE_LOOP: &str = "degenerate_loop";
pub const DROPPED_SEGMENTS: &str = "dropped_segments";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub code: String,
    pub message: String,
}

impl Warning {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Processed,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorStats {
    pub loops: usize,
    pub outer_area: Option<f64>,
    pub circles: usize,
    pub arcs: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinStatsReport {
    pub segments: usize,
    pub dropped_zero_length: usize,
    pub dropped_duplicates: usize,
    pub polylines_closed: usize,
    pub polylines_open: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join: Option<JoinStatsReport>,
    pub extents: Option<BBox2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub warnings: Vec<Warning>,
}

impl FileReport {
    pub fn processed(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output: Some(output),
            status: FileStatus::Processed,
            color: None,
            join: None,
            extents: None,
            error: None,
            warnings: Vec::new(),
        }
    }

    pub fn skipped(input: PathBuf, reason: impl Into<String>) -> Self {
        Self {
            input,
            output: None,
            status: FileStatus::Skipped,
            color: None,
            join: None,
            extents: None,
            error: Some(reason.into()),
            warnings: Vec::new(),
        }
    }

    pub fn failed(input: PathBuf, error: impl Into<String>) -> Self {
        Self {
            input,
            output: None,
            status: FileStatus::Failed,
            color: None,
            join: None,
            extents: None,
            error: Some(error.into()),
            warnings: Vec::new(),
        }
    }

    pub fn has_warning(&self, code: &str) -> bool {
        self.warnings.iter().any(|w| w.code == code)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub generated_at: Option<String>,
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub files: Vec<FileReport>,
}

impl BatchReport {
    pub fn push(&mut self, report: FileReport) {
        match report.status {
            FileStatus::Processed => self.processed += 1,
            FileStatus::Skipped => self.skipped += 1,
            FileStatus::Failed => self.failed += 1,
        }
        self.files.push(report);
    }

    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}
