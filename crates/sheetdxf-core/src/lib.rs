pub mod config;
pub mod geom;
pub mod model;
pub mod normalize;
pub mod params;
pub mod report;
