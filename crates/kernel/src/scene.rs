use std::ops::Range;

use wirecubes_common::{CubeInstance, GridCell, LinePrimitive, LineStyle};

use crate::field::NoiseField;
use crate::wireframe::generate_cube_into;

/// The composed, immutable scene: cube parameters plus every emitted primitive.
///
/// Primitives are stored in emission order (cube by cube). Renderers consume
/// them through [`Scene::primitives_in_draw_order`].
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    cubes: Vec<CubeInstance>,
    /// Range of `primitives` emitted for the cube at the same index.
    spans: Vec<Range<usize>>,
    primitives: Vec<LinePrimitive>,
    highlight_pick: GridCell,
    amplification: f32,
}

impl Scene {
    /// Start an empty scene. `highlight_pick` is the cell drawn for
    /// highlighting, which may lie outside the grid.
    pub fn new(highlight_pick: GridCell, amplification: f32) -> Self {
        Self {
            cubes: Vec::new(),
            spans: Vec::new(),
            primitives: Vec::new(),
            highlight_pick,
            amplification,
        }
    }

    /// Generate the wireframe for `cube` and append it.
    pub fn add_cube(&mut self, cube: CubeInstance, noise: &impl NoiseField) {
        let start = self.primitives.len();
        self.primitives.reserve(cube.primitive_count());
        generate_cube_into(&cube, noise, &mut self.primitives);
        self.spans.push(start..self.primitives.len());
        self.cubes.push(cube);
    }

    pub fn cubes(&self) -> &[CubeInstance] {
        &self.cubes
    }

    pub fn primitives(&self) -> &[LinePrimitive] {
        &self.primitives
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    pub fn highlight_pick(&self) -> GridCell {
        self.highlight_pick
    }

    pub fn amplification(&self) -> f32 {
        self.amplification
    }

    pub fn cube_at(&self, cell: GridCell) -> Option<&CubeInstance> {
        self.cubes.iter().find(|c| c.cell == cell)
    }

    /// Primitives emitted for the cube composed at `cell`.
    pub fn primitives_for(&self, cell: GridCell) -> Option<&[LinePrimitive]> {
        let index = self.cubes.iter().position(|c| c.cell == cell)?;
        Some(&self.primitives[self.spans[index].clone()])
    }

    /// The highlighted cube, if the pick landed inside the grid.
    pub fn highlighted(&self) -> Option<&CubeInstance> {
        self.cubes.iter().find(|c| c.highlighted)
    }

    pub fn count_style(&self, style: LineStyle) -> usize {
        self.primitives.iter().filter(|p| p.style == style).count()
    }

    /// Primitives sorted by render order (back edges first). The sort is
    /// stable, so emission order is kept within one render order.
    pub fn primitives_in_draw_order(&self) -> Vec<&LinePrimitive> {
        let mut ordered: Vec<&LinePrimitive> = self.primitives.iter().collect();
        ordered.sort_by_key(|p| p.render_order());
        ordered
    }
}
