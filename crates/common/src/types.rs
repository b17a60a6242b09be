use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Integer coordinates of one slot in the composition grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub i: i32,
    pub j: i32,
}

impl GridCell {
    pub const fn new(i: i32, j: i32) -> Self {
        Self { i, j }
    }

    /// True if the cell lies inside the square window `[-radius, radius]²`.
    pub fn within(&self, radius: i32) -> bool {
        self.i.abs() <= radius && self.j.abs() <= radius
    }
}

impl std::fmt::Display for GridCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.i, self.j)
    }
}

/// Immutable parameters for one wireframe cube.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeInstance {
    /// Grid slot this cube was composed for.
    pub cell: GridCell,
    /// Center in world space.
    pub position: Vec3,
    /// Uniform scale applied to the `[-1, 1]³` canonical cube.
    pub scale: f32,
    /// Subcells per face edge. Always at least 1.
    pub subdivisions: u32,
    /// Amplitude of the per-subcell noise displacement.
    pub noise_magnitude: f32,
    /// Unit axis of the cube's rigid rotation.
    pub axis: Vec3,
    /// Rotation angle in radians.
    pub angle: f32,
    pub highlighted: bool,
}

impl CubeInstance {
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.angle)
    }

    /// Number of primitives the wireframe generator emits for this cube.
    pub fn primitive_count(&self) -> usize {
        let n = self.subdivisions as usize;
        6 * n * n
    }
}

impl Default for CubeInstance {
    fn default() -> Self {
        Self {
            cell: GridCell::new(0, 0),
            position: Vec3::ZERO,
            scale: 1.0,
            subdivisions: 1,
            noise_magnitude: 0.0,
            axis: Vec3::Z,
            angle: 0.0,
            highlighted: false,
        }
    }
}

/// How a line primitive is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineStyle {
    /// Front-facing edge of the highlighted cube.
    FrontHighlight,
    /// Front-facing edge of any other cube.
    Front,
    /// Edge of a face pointing away from the viewer: faded and dashed.
    Back,
}

impl LineStyle {
    /// Draw priority. Higher values are drawn later and win ties.
    pub fn render_order(self) -> u8 {
        match self {
            LineStyle::Back => 1,
            LineStyle::Front | LineStyle::FrontHighlight => 2,
        }
    }

    pub fn is_front(self) -> bool {
        !matches!(self, LineStyle::Back)
    }
}

/// A closed quad outline: four corners plus the first corner repeated.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePrimitive {
    pub points: [Vec3; 5],
    /// Face normal after all rotations. Its z component decided the style.
    pub normal: Vec3,
    pub style: LineStyle,
}

impl LinePrimitive {
    /// Close the quad `corners` into a five-point loop.
    pub fn closed(corners: [Vec3; 4], normal: Vec3, style: LineStyle) -> Self {
        Self {
            points: [corners[0], corners[1], corners[2], corners[3], corners[0]],
            normal,
            style,
        }
    }

    pub fn render_order(&self) -> u8 {
        self.style.render_order()
    }

    pub fn is_closed(&self) -> bool {
        self.points[4] == self.points[0]
    }

    /// Consecutive point pairs of the polyline.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// World-space distance from the first point to each point along the
    /// outline. Dash patterns are laid out along these distances.
    pub fn cumulative_distances(&self) -> [f32; 5] {
        let mut out = [0.0; 5];
        for k in 1..5 {
            out[k] = out[k - 1] + self.points[k - 1].distance(self.points[k]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> [Vec3; 4] {
        [
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn closed_primitive_repeats_first_point() {
        let prim = LinePrimitive::closed(unit_quad(), Vec3::Z, LineStyle::Front);
        assert!(prim.is_closed());
        assert_eq!(prim.segments().count(), 4);
        assert_eq!(prim.cumulative_distances()[4], 8.0);
    }

    #[test]
    fn cumulative_distances_walk_the_outline() {
        let prim = LinePrimitive::closed(unit_quad(), Vec3::Z, LineStyle::Back);
        assert_eq!(prim.cumulative_distances(), [0.0, 2.0, 4.0, 6.0, 8.0]);
    }

    #[test]
    fn back_style_draws_first() {
        assert!(LineStyle::Back.render_order() < LineStyle::Front.render_order());
        assert_eq!(
            LineStyle::Front.render_order(),
            LineStyle::FrontHighlight.render_order()
        );
        assert!(!LineStyle::Back.is_front());
    }

    #[test]
    fn grid_cell_window() {
        assert!(GridCell::new(-2, 2).within(2));
        assert!(!GridCell::new(3, 0).within(2));
        assert_eq!(GridCell::new(1, -1).to_string(), "(1, -1)");
    }

    #[test]
    fn primitive_count_is_six_n_squared() {
        let cube = CubeInstance {
            subdivisions: 3,
            ..CubeInstance::default()
        };
        assert_eq!(cube.primitive_count(), 54);
    }
}
