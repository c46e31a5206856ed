pub mod error;
pub mod geom;
