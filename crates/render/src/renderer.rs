use std::fmt::Write as _;

use wirecubes_common::LineStyle;
use wirecubes_kernel::Scene;

use crate::view::OrthoView;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the composed scene and a view, then produces output.
/// It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene.
    fn render(&self, scene: &Scene, view: &OrthoView) -> Self::Output;
}

/// Text renderer listing the scene's cubes and primitive counts.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    /// Also print every primitive's corner points.
    pub verbose: bool,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &OrthoView) -> String {
        let mut out = String::new();
        let highlight = match scene.highlighted() {
            Some(cube) => cube.cell.to_string(),
            None => format!("none (picked {})", scene.highlight_pick()),
        };
        let _ = writeln!(
            out,
            "=== Scene (cubes={}, primitives={}, amplification={}, highlight={}) ===",
            scene.cubes().len(),
            scene.primitive_count(),
            scene.amplification(),
            highlight,
        );
        let _ = writeln!(
            out,
            "Primitives: front={} highlight={} back={}",
            scene.count_style(LineStyle::Front),
            scene.count_style(LineStyle::FrontHighlight),
            scene.count_style(LineStyle::Back),
        );
        let _ = writeln!(
            out,
            "Camera: ortho {}x{} near={:.0} far={:.0}",
            view.width, view.height, view.near, view.far
        );

        for cube in scene.cubes() {
            let p = cube.position;
            let _ = writeln!(
                out,
                "  cell {} pos=({:.1}, {:.1}, {:.1}) scale={:.2} n={} noise={:.3}{}",
                cube.cell,
                p.x,
                p.y,
                p.z,
                cube.scale,
                cube.subdivisions,
                cube.noise_magnitude,
                if cube.highlighted { " *" } else { "" },
            );
            if self.verbose {
                for prim in scene.primitives_for(cube.cell).unwrap_or_default() {
                    let _ = write!(out, "    {:?}:", prim.style);
                    for q in &prim.points[..4] {
                        let _ = write!(out, " ({:.1}, {:.1}, {:.1})", q.x, q.y, q.z);
                    }
                    out.push('\n');
                }
            }
        }

        out
    }
}
