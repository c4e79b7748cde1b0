pub mod join;
pub mod loops;

pub use join::{join_segments, JoinConfig, JoinOutcome, JoinStats};
pub use loops::{classify_loops, distinct_ring, outer_index, shoelace_area};
