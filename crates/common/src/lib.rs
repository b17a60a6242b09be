//! Shared value types for the wirecubes scene.
//!
//! Everything here is plain data: cubes differ only in their parameters,
//! never in behavior.

mod types;

pub use types::{CubeInstance, GridCell, LinePrimitive, LineStyle};
