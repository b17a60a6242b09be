//! Cube wireframe generation.
//!
//! Each face of a cube is split into `N×N` subcells. Every subcell quad is
//! shifted by coherent noise inside the face plane, carried onto its face by
//! the fixed face rotation, then by the cube's own rotation, and finally
//! scaled and translated into world space. The rotated face normal decides
//! whether the quad is drawn as a front or a back edge.

use glam::{Vec2, Vec3};
use wirecubes_common::{CubeInstance, LinePrimitive, LineStyle};

use crate::face::Face;
use crate::field::NoiseField;

/// Noise-space stride per unit of subcell offset along the face's x.
const STRIDE_X: f64 = 17.18;
/// Noise-space stride per unit of subcell offset along the face's y.
const STRIDE_Y: f64 = 81.91;
/// Noise-space shift between consecutive faces.
const FACE_SHIFT: f64 = 0.178;
/// Offset of the second (y displacement) sample.
const DECORRELATE: f64 = 17.898;

/// Front quad of the canonical `[-1, 1]³` cube, counter-clockwise from `(-1, -1)`.
const FRONT_QUAD: [Vec3; 4] = [
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Emit `6·N²` primitives for one cube.
pub fn generate_cube(cube: &CubeInstance, noise: &impl NoiseField) -> Vec<LinePrimitive> {
    let mut out = Vec::with_capacity(cube.primitive_count());
    generate_cube_into(cube, noise, &mut out);
    out
}

/// Like [`generate_cube`], appending to an existing buffer.
pub fn generate_cube_into(
    cube: &CubeInstance,
    noise: &impl NoiseField,
    out: &mut Vec<LinePrimitive>,
) {
    let n = cube.subdivisions.max(1);
    let cube_rotation = cube.rotation();
    let front_style = if cube.highlighted {
        LineStyle::FrontHighlight
    } else {
        LineStyle::Front
    };

    for face in Face::ALL {
        let face_rotation = face.rotation();
        let normal = cube_rotation * (face_rotation * Vec3::Z);
        let style = if normal.z < 0.0 {
            LineStyle::Back
        } else {
            front_style
        };

        for sx in 0..n {
            for sy in 0..n {
                let displacement = subcell_displacement(cube, face, sx, sy, n, noise);
                let corners = subcell_corners(sx, sy, n, displacement).map(|v| {
                    let v = cube_rotation * (face_rotation * v);
                    v * cube.scale + cube.position
                });
                out.push(LinePrimitive::closed(corners, normal, style));
            }
        }
    }
}

/// Noise offset for a whole subcell, in the face's normalized `[0, 1]` space.
///
/// Both sample coordinates are built from `position.x`; the y displacement
/// only differs by [`DECORRELATE`]. Changing this changes the composition.
fn subcell_displacement(
    cube: &CubeInstance,
    face: Face,
    sx: u32,
    sy: u32,
    n: u32,
    noise: &impl NoiseField,
) -> Vec2 {
    let cell = 1.0 / n as f64;
    let (ox, oy) = (sx as f64 * cell, sy as f64 * cell);
    let base = cube.position.x as f64
        + ox * STRIDE_X
        + oy * STRIDE_Y
        + face.index() as f64 * FACE_SHIFT;
    let (nx, ny) = (base, base);

    let magnitude = cube.noise_magnitude as f64;
    Vec2::new(
        (magnitude * noise.sample(nx, ny)) as f32,
        (magnitude * noise.sample(nx + DECORRELATE, ny + DECORRELATE)) as f32,
    )
}

/// Corners of subcell `(sx, sy)` on the front quad, displaced and mapped
/// back to `[-1, 1]`.
fn subcell_corners(sx: u32, sy: u32, n: u32, displacement: Vec2) -> [Vec3; 4] {
    let cell = 1.0 / n as f32;
    let offset = Vec2::new(sx as f32 * cell, sy as f32 * cell);
    FRONT_QUAD.map(|v| {
        let unit = v * 0.5 + Vec3::splat(0.5);
        let xy = unit.truncate() * cell + offset + displacement;
        (xy * 2.0 - Vec2::ONE).extend(unit.z * 2.0 - 1.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{ConstantField, SimplexField};
    use glam::Quat;
    use proptest::prelude::*;
    use wirecubes_common::GridCell;

    fn cube(subdivisions: u32) -> CubeInstance {
        CubeInstance {
            cell: GridCell::new(0, 0),
            position: Vec3::new(10.0, -20.0, -100.0),
            scale: 30.0,
            subdivisions,
            noise_magnitude: 0.0,
            axis: Vec3::Z,
            angle: 0.0,
            highlighted: false,
        }
    }

    fn expected_style(prim: &LinePrimitive, highlighted: bool) -> LineStyle {
        if prim.normal.z < 0.0 {
            LineStyle::Back
        } else if highlighted {
            LineStyle::FrontHighlight
        } else {
            LineStyle::Front
        }
    }

    #[test]
    fn emits_six_n_squared_closed_quads() {
        for n in 1..=4 {
            let prims = generate_cube(&cube(n), &ConstantField(0.0));
            assert_eq!(prims.len(), (6 * n * n) as usize);
            assert!(prims.iter().all(LinePrimitive::is_closed));
        }
    }

    #[test]
    fn undisplaced_cube_is_exact() {
        let c = cube(1);
        let prims = generate_cube(&c, &ConstantField(0.0));
        for prim in &prims {
            for p in &prim.points {
                let local = (*p - c.position) / c.scale;
                for k in 0..3 {
                    assert!((local[k].abs() - 1.0).abs() < 1e-4, "corner {local:?} off the cube");
                }
                assert!(((*p - c.position).length() - c.scale * 3f32.sqrt()).abs() < 1e-3);
            }
        }
    }

    #[test]
    fn subdivided_cube_stays_on_surface() {
        let c = cube(4);
        let prims = generate_cube(&c, &ConstantField(0.0));
        for prim in &prims {
            for p in &prim.points {
                let local = (*p - c.position) / c.scale;
                let max = local.abs().max_element();
                assert!((max - 1.0).abs() < 1e-4);
                // grid lines fall on multiples of 2/N
                for k in 0..3 {
                    let steps = (local[k] + 1.0) * 2.0;
                    assert!((steps - steps.round()).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn identity_rotation_classifies_by_normal() {
        for n in [1, 4] {
            let prims = generate_cube(&cube(n), &ConstantField(0.0));
            for prim in &prims {
                assert_eq!(prim.style, expected_style(prim, false));
            }
            // side faces sit edge-on; only the -Z face points clearly away
            let away = prims.iter().filter(|p| p.normal.z < -0.5).count();
            assert_eq!(away, (n * n) as usize);
            assert!(prims[..(n * n) as usize].iter().all(|p| p.style == LineStyle::Front));
        }
    }

    #[test]
    fn quarter_turn_rotation_classifies_by_normal() {
        for n in [1, 4] {
            let c = CubeInstance {
                axis: Vec3::X,
                angle: std::f32::consts::FRAC_PI_2,
                highlighted: true,
                ..cube(n)
            };
            let prims = generate_cube(&c, &ConstantField(0.0));
            for prim in &prims {
                assert_eq!(prim.style, expected_style(prim, true));
            }
            // a quarter turn about X swings the bottom face to -Z and the top to +Z
            let away: Vec<_> = prims.iter().filter(|p| p.normal.z < -0.5).collect();
            assert_eq!(away.len(), (n * n) as usize);
            assert!(away.iter().all(|p| p.style == LineStyle::Back));
            assert!(prims.iter().any(|p| p.style == LineStyle::FrontHighlight));
        }
    }

    #[test]
    fn highlight_never_touches_back_faces() {
        let c = CubeInstance {
            highlighted: true,
            ..cube(2)
        };
        let prims = generate_cube(&c, &ConstantField(0.0));
        for prim in prims.iter().filter(|p| p.normal.z < 0.0) {
            assert_eq!(prim.style, LineStyle::Back);
        }
        assert!(prims.iter().all(|p| p.style != LineStyle::Front));
    }

    #[test]
    fn constant_noise_shifts_subcells_in_face_plane() {
        let c = CubeInstance {
            noise_magnitude: 0.5,
            ..cube(1)
        };
        let prims = generate_cube(&c, &ConstantField(0.2));
        let front = &prims[Face::Front.index()];
        // displacement of 0.1 in [0,1] space is 0.2 in [-1,1] space
        let expected = c.position + Vec3::new(-0.8, -0.8, 1.0) * c.scale;
        assert!((front.points[0] - expected).length() < 1e-3);
    }

    #[test]
    fn displacement_uses_position_x_for_both_axes() {
        let moved_y = CubeInstance {
            position: Vec3::new(10.0, 400.0, -100.0),
            noise_magnitude: 1.0,
            ..cube(2)
        };
        let base = CubeInstance {
            noise_magnitude: 1.0,
            ..cube(2)
        };
        let field = SimplexField::new(5);
        let a = generate_cube(&base, &field);
        let b = generate_cube(&moved_y, &field);
        let shift = moved_y.position - base.position;
        for (pa, pb) in a.iter().zip(&b) {
            for (x, y) in pa.points.iter().zip(&pb.points) {
                assert!((*y - *x - shift).length() < 1e-3);
            }
        }
    }

    #[test]
    fn rotation_preserves_normals_length() {
        let c = CubeInstance {
            axis: Vec3::new(1.0, 2.0, 3.0).normalize(),
            angle: 1.1,
            ..cube(1)
        };
        let prims = generate_cube(&c, &ConstantField(0.0));
        let rot = Quat::from_axis_angle(c.axis, c.angle);
        for (face, prim) in Face::ALL.iter().zip(&prims) {
            assert!((prim.normal - rot * face.normal()).length() < 1e-5);
            assert!((prim.normal.length() - 1.0).abs() < 1e-5);
        }
    }

    proptest! {
        #[test]
        fn every_cube_yields_closed_classified_quads(
            n in 1u32..5,
            scale in 1.0f32..60.0,
            magnitude in -5.0f32..5.0,
            ax in -1.0f32..1.0,
            ay in -1.0f32..1.0,
            az in -1.0f32..1.0,
            angle in 0.0f32..std::f32::consts::TAU,
            highlighted in any::<bool>(),
            seed in any::<u32>(),
        ) {
            let c = CubeInstance {
                cell: GridCell::new(0, 0),
                position: Vec3::new(ax * 100.0, ay * 100.0, -100.0),
                scale,
                subdivisions: n,
                noise_magnitude: magnitude,
                axis: Vec3::new(ax, ay, az).try_normalize().unwrap_or(Vec3::Z),
                angle,
                highlighted,
            };
            let prims = generate_cube(&c, &SimplexField::new(seed));
            prop_assert_eq!(prims.len(), (6 * n * n) as usize);
            for prim in &prims {
                prop_assert!(prim.is_closed());
                prop_assert_eq!(prim.style, expected_style(prim, highlighted));
            }
        }
    }
}
