use wirecubes_common::{GridCell, LineStyle};
use wirecubes_kernel::Scene;

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against a composed scene for debugging and
/// CLI output.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &Scene) -> SceneSummary {
        SceneSummary {
            cube_count: scene.cubes().len(),
            primitive_count: scene.primitive_count(),
            front: scene.count_style(LineStyle::Front),
            front_highlight: scene.count_style(LineStyle::FrontHighlight),
            back: scene.count_style(LineStyle::Back),
            highlighted: scene.highlighted().map(|c| c.cell),
            amplification: scene.amplification(),
        }
    }

    /// Parameters and primitive counts for the cube at `cell`.
    pub fn inspect_cell(scene: &Scene, cell: GridCell) -> Option<CubeInfo> {
        let cube = scene.cube_at(cell)?;
        let prims = scene.primitives_for(cell)?;
        let p = cube.position;
        Some(CubeInfo {
            cell,
            position: [p.x, p.y, p.z],
            scale: cube.scale,
            subdivisions: cube.subdivisions,
            noise_magnitude: cube.noise_magnitude,
            axis: cube.axis.to_array(),
            angle: cube.angle,
            highlighted: cube.highlighted,
            front_primitives: prims.iter().filter(|p| p.style.is_front()).count(),
            back_primitives: prims.iter().filter(|p| !p.style.is_front()).count(),
        })
    }
}

/// Summary of a scene for the inspector.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub cube_count: usize,
    pub primitive_count: usize,
    pub front: usize,
    pub front_highlight: usize,
    pub back: usize,
    pub highlighted: Option<GridCell>,
    pub amplification: f32,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: cubes={} primitives={} (front={} highlight={} back={}) amplification={}x highlighted=",
            self.cube_count,
            self.primitive_count,
            self.front,
            self.front_highlight,
            self.back,
            self.amplification,
        )?;
        match self.highlighted {
            Some(cell) => write!(f, "{cell}"),
            None => write!(f, "none"),
        }
    }
}

/// Detailed info about a single cube.
#[derive(Debug, Clone, PartialEq)]
pub struct CubeInfo {
    pub cell: GridCell,
    pub position: [f32; 3],
    pub scale: f32,
    pub subdivisions: u32,
    pub noise_magnitude: f32,
    pub axis: [f32; 3],
    pub angle: f32,
    pub highlighted: bool,
    pub front_primitives: usize,
    pub back_primitives: usize,
}

impl std::fmt::Display for CubeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cube {} pos=({:.2}, {:.2}, {:.2}) scale={:.2} n={} noise={:.3} axis=({:.2}, {:.2}, {:.2}) angle={:.2} front={} back={}{}",
            self.cell,
            self.position[0],
            self.position[1],
            self.position[2],
            self.scale,
            self.subdivisions,
            self.noise_magnitude,
            self.axis[0],
            self.axis[1],
            self.axis[2],
            self.angle,
            self.front_primitives,
            self.back_primitives,
            if self.highlighted { " [highlight]" } else { "" },
        )
    }
}
