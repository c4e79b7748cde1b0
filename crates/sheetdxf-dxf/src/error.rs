use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawingError {
    /// Malformed or unreadable input; aborts that file only.
    #[error("failed to parse DXF {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: dxf::DxfError,
    },
    #[error("failed to write DXF {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: dxf::DxfError,
    },
    #[error("failed to access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("destination {path:?} is the source directory; refusing to overwrite inputs")]
    SameDirectory { path: PathBuf },
}
