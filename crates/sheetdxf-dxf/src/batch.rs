use crate::color::{color_file, ColorConfig};
use crate::error::DrawingError;
use sheetdxf_core::report::{BatchReport, FileReport};
use std::fs;
use std::path::{Path, PathBuf};

pub fn is_dxf(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("dxf"))
}

/// Every regular file directly inside `dir`, sorted by path. Callers decide
/// which of them are drawings.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>, DrawingError> {
    let io_err = |source| DrawingError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Colors each file independently into `dest_dir` under its own file name.
///
/// A file that fails is recorded and the rest still run. Paths that are not
/// DXF files, or whose output would overwrite the input, are skipped.
pub fn color_files(inputs: &[PathBuf], dest_dir: &Path, cfg: &ColorConfig) -> BatchReport {
    let mut batch = BatchReport::default();

    for input in inputs {
        let report = color_one(input, dest_dir, cfg);
        match &report.error {
            Some(err) => tracing::warn!(input = %input.display(), status = ?report.status, "{err}"),
            None => tracing::debug!(input = %input.display(), "done"),
        }
        batch.push(report);
    }

    tracing::info!(
        processed = batch.processed,
        skipped = batch.skipped,
        failed = batch.failed,
        "batch finished"
    );
    batch
}

fn color_one(input: &Path, dest_dir: &Path, cfg: &ColorConfig) -> FileReport {
    if !is_dxf(input) {
        return FileReport::skipped(input.to_path_buf(), "not a .dxf file");
    }
    let Some(name) = input.file_name() else {
        return FileReport::skipped(input.to_path_buf(), "no file name");
    };
    let output = dest_dir.join(name);
    if same_file(input, &output) {
        return FileReport::skipped(input.to_path_buf(), "output would overwrite the input");
    }
    match color_file(input, &output, cfg) {
        Ok(report) => report,
        Err(err) => FileReport::failed(input.to_path_buf(), err.to_string()),
    }
}

/// Colors every DXF directly inside `source_dir` into `dest_dir`. Other files
/// show up in the report as skipped.
pub fn color_dir(source_dir: &Path, dest_dir: &Path, cfg: &ColorConfig) -> Result<BatchReport, DrawingError> {
    if same_dir(source_dir, dest_dir) {
        return Err(DrawingError::SameDirectory {
            path: dest_dir.to_path_buf(),
        });
    }
    fs::create_dir_all(dest_dir).map_err(|source| DrawingError::Io {
        path: dest_dir.to_path_buf(),
        source,
    })?;
    let files = list_files(source_dir)?;
    tracing::info!(
        source = %source_dir.display(),
        dest = %dest_dir.display(),
        files = files.len(),
        "coloring directory"
    );
    Ok(color_files(&files, dest_dir, cfg))
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if !b.exists() {
        return false;
    }
    same_dir(a, b)
}
