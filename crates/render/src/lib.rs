//! Rendering Adapter: renderer-agnostic interface over a composed scene.
//!
//! # Invariants
//! - Renderers never mutate the scene; presenting the same scene twice gives
//!   the same output.
//! - Back edges are drawn before front edges.
//!
//! Ships a text renderer for logs and tests, and a CPU rasterizer that draws
//! the thick, anti-aliased, dashed lines into an RGBA frame. The GPU backend
//! lives in `wirecubes-render-wgpu`.

mod raster;
mod renderer;
mod style;
mod view;

pub use raster::{Frame, FrameError, SoftwareRenderer};
pub use renderer::{DebugTextRenderer, Renderer};
pub use style::{Dash, LineMaterial, Palette, Rgba};
pub use view::OrthoView;

pub fn crate_info() -> &'static str {
    concat!("wirecubes-render v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
