pub mod batch;
pub mod color;
pub mod error;
pub mod join;
pub mod read;

pub use batch::{color_dir, color_files, is_dxf, list_files};
pub use color::{color_drawing, color_file, ensure_layer, ColorConfig, ColorOutcome};
pub use error::DrawingError;
pub use join::{join_drawing, join_file};
