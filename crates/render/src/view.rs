use glam::{Mat4, Vec2, Vec3};

/// Orthographic camera at the origin looking down `-Z`.
///
/// The visible extent equals the viewport size, so one world unit maps to
/// one pixel and the composition stays centered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoView {
    pub width: u32,
    pub height: u32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthoView {
    fn default() -> Self {
        Self::square(800)
    }
}

impl OrthoView {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
            near: 1.0,
            far: 1000.0,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        let hw = self.width as f32 * 0.5;
        let hh = self.height as f32 * 0.5;
        Mat4::orthographic_rh(-hw, hw, -hh, hh, self.near, self.far)
    }

    /// Pixel coordinates of a world point, origin top-left, y down.
    pub fn to_screen(&self, p: Vec3) -> Vec2 {
        let ndc = self.view_projection().project_point3(p);
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width as f32,
            (1.0 - ndc.y) * 0.5 * self.height as f32,
        )
    }

    /// Parameter range `[t0, t1]` of the segment `a → b` that lies between
    /// the near and far planes, or `None` if no part of it does.
    pub fn clip_segment(&self, a: Vec3, b: Vec3) -> Option<(f32, f32)> {
        let (da, db) = (-a.z, -b.z);
        let (mut t0, mut t1) = (0.0f32, 1.0f32);
        // keep `sign * (depth(t) - bound) >= 0` for each plane
        for (bound, sign) in [(self.near, 1.0), (self.far, -1.0)] {
            let start = sign * (da - bound);
            let slope = sign * (db - da);
            if slope == 0.0 {
                if start < 0.0 {
                    return None;
                }
            } else if slope > 0.0 {
                t0 = t0.max(-start / slope);
            } else {
                t1 = t1.min(-start / slope);
            }
        }
        (t0 <= t1).then_some((t0, t1))
    }
}
