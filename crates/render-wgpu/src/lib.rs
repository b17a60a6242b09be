//! wgpu render backend for the wirecubes scene.
//!
//! Every polyline segment becomes one instance of a screen-space quad. The
//! fragment shader applies anti-aliasing across the line and the dash
//! pattern along it.
//!
//! # Invariants
//! - The instance buffer is built once from the scene; frames never rebuild it.
//! - Back edges precede front edges in the instance buffer, so blending
//!   paints them first.

mod gpu;
mod shaders;

pub use gpu::{SegmentInstance, WgpuRenderer, segment_instances};
