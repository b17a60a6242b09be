//! Scene composition over the cube grid.

use glam::Vec3;
use wirecubes_common::{CubeInstance, GridCell};

use crate::config::ComposerConfig;
use crate::field::NoiseField;
use crate::random::RandomSource;
use crate::scene::Scene;

/// Subdivision count grows by one every this many diagonal steps.
const SUBDIVISION_STEP: i32 = 3;

/// Deterministic per-cell parameters, before any random draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellParameters {
    pub position: Vec3,
    pub scale: f32,
    pub subdivisions: u32,
    pub noise_magnitude: f32,
}

/// Builds the full grid of cubes from a noise field and a random source.
#[derive(Debug, Clone, Default)]
pub struct SceneComposer {
    config: ComposerConfig,
}

impl SceneComposer {
    pub fn new(config: ComposerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ComposerConfig {
        &self.config
    }

    /// Compose the scene. Random values are consumed in a fixed order:
    /// highlight x, highlight y, amplification, then per cell (row-major,
    /// `i` outer) axis x, y, z and angle.
    pub fn compose(&self, noise: &impl NoiseField, rng: &mut impl RandomSource) -> Scene {
        let _span = tracing::info_span!("compose_scene").entered();

        let highlight = self.pick_highlight(rng);
        let amplification = self.pick_amplification(rng);
        let r = self.config.grid_radius;
        if !highlight.within(r) {
            tracing::debug!(%highlight, "highlight pick outside the grid");
        }

        let mut scene = Scene::new(highlight, amplification);
        for i in -r..=r {
            for j in -r..=r {
                let cell = GridCell::new(i, j);
                let params = self.cell_parameters(cell, noise, amplification);
                let axis = rng.next_axis();
                let angle = rng.next_angle();
                let cube = CubeInstance {
                    cell,
                    position: params.position,
                    scale: params.scale,
                    subdivisions: params.subdivisions,
                    noise_magnitude: params.noise_magnitude,
                    axis,
                    angle,
                    highlighted: cell == highlight,
                };
                tracing::debug!(
                    %cell,
                    subdivisions = cube.subdivisions,
                    scale = cube.scale,
                    noise_magnitude = cube.noise_magnitude,
                    highlighted = cube.highlighted,
                    "adding cube"
                );
                scene.add_cube(cube, noise);
            }
        }

        tracing::info!(
            cubes = scene.cubes().len(),
            primitives = scene.primitive_count(),
            amplification,
            %highlight,
            "scene composed"
        );
        scene
    }

    /// Draw the highlighted cell. With a positive `highlight_margin` the
    /// pick may fall outside the grid, in which case nothing is highlighted.
    pub fn pick_highlight(&self, rng: &mut impl RandomSource) -> GridCell {
        let reach = self.config.grid_radius + self.config.highlight_margin;
        let span = 2 * reach + 1;
        let mut draw = || {
            let k = (rng.next_unit() * span as f64).floor() as i32;
            k.clamp(0, span - 1) - reach
        };
        let i = draw();
        let j = draw();
        GridCell::new(i, j)
    }

    /// Global noise factor: `amplification` with `amplified_probability`, else 1.
    pub fn pick_amplification(&self, rng: &mut impl RandomSource) -> f32 {
        if rng.next_unit() > 1.0 - self.config.amplified_probability {
            self.config.amplification
        } else {
            1.0
        }
    }

    /// Position, scale, subdivisions and noise magnitude for `cell`.
    pub fn cell_parameters(
        &self,
        cell: GridCell,
        noise: &impl NoiseField,
        amplification: f32,
    ) -> CellParameters {
        let c = &self.config;
        let nx = cell.i as f64 * c.cell_frequency;
        let ny = cell.j as f64 * c.cell_frequency;

        let scale = c.base_scale + noise.sample(nx, ny) as f32 * c.scale_variation;
        let magnitude_seed = noise.sample(nx + c.noise_seed_offset, ny + c.noise_seed_offset)
            as f32
            * c.noise_gain
            * amplification;

        CellParameters {
            position: Vec3::new(
                cell.i as f32 * c.spacing,
                cell.j as f32 * c.spacing,
                c.depth,
            ),
            scale,
            subdivisions: self.subdivisions(cell),
            noise_magnitude: self.diagonal_steps(cell) as f32 * c.gradient_gain * magnitude_seed,
        }
    }

    /// `floor(steps / 3) + 1`, denser towards the `(+r, +r)` corner.
    pub fn subdivisions(&self, cell: GridCell) -> u32 {
        (self.diagonal_steps(cell) / SUBDIVISION_STEP) as u32 + 1
    }

    /// Distance from the `(-r, -r)` corner along the diagonal: `i + r + j + r`.
    fn diagonal_steps(&self, cell: GridCell) -> i32 {
        let r = self.config.grid_radius;
        (cell.i + r + cell.j + r).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ConstantField, SimplexField};
    use crate::random::{ScriptedRandom, SeededRandom};
    use wirecubes_common::LineStyle;

    fn composer() -> SceneComposer {
        SceneComposer::new(ComposerConfig::default())
    }

    #[test]
    fn subdivision_gradient() {
        let c = composer();
        assert_eq!(c.subdivisions(GridCell::new(-2, -2)), 1);
        assert_eq!(c.subdivisions(GridCell::new(0, 0)), 2);
        assert_eq!(c.subdivisions(GridCell::new(2, 2)), 3);
        assert_eq!(c.subdivisions(GridCell::new(-2, 2)), 2);
        assert_eq!(c.subdivisions(GridCell::new(1, 0)), 2);
        assert_eq!(c.subdivisions(GridCell::new(1, 1)), 3);
    }

    #[test]
    fn cell_parameters_without_noise() {
        let c = composer();
        let p = c.cell_parameters(GridCell::new(1, -2), &ConstantField(0.0), 4.0);
        assert_eq!(p.position, Vec3::new(145.0, -290.0, -100.0));
        assert_eq!(p.scale, 30.0);
        assert_eq!(p.noise_magnitude, 0.0);
        assert_eq!(p.subdivisions, 2);
    }

    #[test]
    fn cell_parameters_follow_noise_and_gradient() {
        let c = composer();
        let p = c.cell_parameters(GridCell::new(2, 2), &ConstantField(0.5), 4.0);
        assert_eq!(p.scale, 35.0);
        // 8 steps * 0.1 * (0.5 * 2.5 * 4)
        assert!((p.noise_magnitude - 4.0).abs() < 1e-5);
        let corner = c.cell_parameters(GridCell::new(-2, -2), &ConstantField(0.5), 4.0);
        assert_eq!(corner.noise_magnitude, 0.0);
    }

    #[test]
    fn highlight_pick_covers_grid() {
        let c = composer();
        let mut rng = ScriptedRandom::new(vec![0.0, 0.999_999]);
        assert_eq!(c.pick_highlight(&mut rng), GridCell::new(-2, 2));
        let mut rng = ScriptedRandom::new(vec![0.5, 0.45]);
        assert_eq!(c.pick_highlight(&mut rng), GridCell::new(0, 0));
    }

    #[test]
    fn amplification_probability() {
        let c = composer();
        assert_eq!(c.pick_amplification(&mut ScriptedRandom::new(vec![0.9])), 4.0);
        assert_eq!(c.pick_amplification(&mut ScriptedRandom::new(vec![0.75])), 1.0);
        assert_eq!(c.pick_amplification(&mut ScriptedRandom::new(vec![0.1])), 1.0);
    }

    #[test]
    fn composes_full_grid() {
        let scene = composer().compose(&SimplexField::new(3), &mut SeededRandom::new(9));
        assert_eq!(scene.cubes().len(), 25);
        let expected: usize = scene.cubes().iter().map(|c| c.primitive_count()).sum();
        assert_eq!(scene.primitive_count(), expected);
        assert!(scene.primitives().iter().all(|p| p.is_closed()));
        assert!(scene.cubes().iter().all(|c| c.scale > 0.0 && c.subdivisions >= 1));
    }

    #[test]
    fn at_most_one_highlighted_cube() {
        for seed in 0..20 {
            let scene =
                composer().compose(&SimplexField::new(seed as u32), &mut SeededRandom::new(seed));
            let highlighted = scene.cubes().iter().filter(|c| c.highlighted).count();
            assert_eq!(highlighted, 1);
            assert_eq!(scene.highlighted().unwrap().cell, scene.highlight_pick());
        }
    }

    #[test]
    fn pick_outside_grid_highlights_nothing() {
        let composer = SceneComposer::new(ComposerConfig {
            highlight_margin: 2,
            ..ComposerConfig::default()
        });
        // span is 9 cells: 0.0 maps to -4, outside the grid
        let mut rng = ScriptedRandom::new(vec![0.0, 0.0, 0.1, 0.5]);
        let scene = composer.compose(&ConstantField(0.0), &mut rng);
        assert_eq!(scene.highlight_pick(), GridCell::new(-4, -4));
        assert!(!scene.highlight_pick().within(composer.config().grid_radius));
        assert!(scene.highlighted().is_none());
        assert_eq!(scene.count_style(LineStyle::FrontHighlight), 0);
    }

    #[test]
    fn same_seed_same_scene() {
        let a = composer().compose(&SimplexField::new(17), &mut SeededRandom::new(17));
        let b = composer().compose(&SimplexField::new(17), &mut SeededRandom::new(17));
        assert_eq!(a, b);
    }

    #[test]
    fn random_draw_order_is_fixed() {
        let mut rng = ScriptedRandom::new(vec![0.5]);
        let _ = composer().compose(&ConstantField(0.0), &mut rng);
        assert_eq!(rng.draws(), 3 + 25 * 4);
    }

    #[test]
    fn stubbed_noise_centre_cube() {
        // highlight (0, 0), no amplification, then rotation draws
        let mut rng = ScriptedRandom::new(vec![0.5, 0.5, 0.1, 0.5, 0.5, 1.0, 0.0]);
        let scene = composer().compose(&ConstantField(0.0), &mut rng);

        assert_eq!(scene.amplification(), 1.0);
        let cube = scene.cube_at(GridCell::new(0, 0)).unwrap();
        assert!(cube.highlighted);
        assert_eq!(cube.position, Vec3::new(0.0, 0.0, -100.0));
        assert_eq!(cube.scale, 30.0);
        assert_eq!(cube.subdivisions, 2);
        assert_eq!(cube.noise_magnitude, 0.0);

        let prims = scene.primitives_for(GridCell::new(0, 0)).unwrap();
        assert_eq!(prims.len(), 24);
        let unrotate = cube.rotation().inverse();
        for prim in prims {
            for p in &prim.points {
                let local = unrotate * (*p - cube.position) / cube.scale;
                assert!((local.abs().max_element() - 1.0).abs() < 1e-4);
            }
        }
        assert_eq!(scene.highlighted().map(|c| c.cell), Some(GridCell::new(0, 0)));
    }
}
