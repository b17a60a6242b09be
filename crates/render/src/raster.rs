//! CPU rasterizer for thick, anti-aliased, optionally dashed polylines.

use glam::Vec2;
use wirecubes_common::LinePrimitive;
use wirecubes_kernel::Scene;

use crate::renderer::Renderer;
use crate::style::{LineMaterial, Palette, Rgba};
use crate::view::OrthoView;

/// Errors from frame allocation.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("frame must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// Tightly packed RGBA8 image, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Frame {
    /// Allocate a frame filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroSize { width, height });
        }
        let px = background.to_rgba8();
        let pixels = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// Source-over blend of `color` at `coverage` into one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        let src = [color.r, color.g, color.b];
        let i = (y as usize * self.width as usize + x as usize) * 4;
        for (c, s) in src.iter().enumerate() {
            let dst = self.pixels[i + c] as f32 / 255.0;
            let out = dst + (s.clamp(0.0, 1.0) - dst) * alpha;
            self.pixels[i + c] = (out * 255.0).round() as u8;
        }
        self.pixels[i + 3] = 255;
    }

    /// Stroke the segment `a → b` (pixel coordinates). `d0`/`d1` are the
    /// world-space line distances at the endpoints, used for dashing.
    fn stroke_segment(&mut self, a: Vec2, b: Vec2, d0: f32, d1: f32, material: &LineMaterial) {
        let half = material.width * 0.5;
        let reach = half + 1.0;
        let lo = a.min(b) - Vec2::splat(reach);
        let hi = a.max(b) + Vec2::splat(reach);
        if hi.x < 0.0 || hi.y < 0.0 || lo.x >= self.width as f32 || lo.y >= self.height as f32 {
            return;
        }
        let x0 = lo.x.max(0.0).floor() as u32;
        let y0 = lo.y.max(0.0).floor() as u32;
        let x1 = (hi.x.ceil() as u32).min(self.width - 1);
        let y1 = (hi.y.ceil() as u32).min(self.height - 1);

        let ab = b - a;
        let len2 = ab.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len2 > 0.0 {
                    ((p - a).dot(ab) / len2).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let dist = p.distance(a + ab * t);
                let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                if let Some(dash) = material.dash {
                    if !dash.covers(d0 + (d1 - d0) * t) {
                        continue;
                    }
                }
                self.blend(x, y, material.color, coverage);
            }
        }
    }

    /// Stroke the outline of `prim`, keeping only the parts of each segment
    /// between the near and far planes. Returns how many segments were
    /// dropped entirely.
    fn stroke_primitive(
        &mut self,
        prim: &LinePrimitive,
        view: &OrthoView,
        material: &LineMaterial,
    ) -> usize {
        let distances = prim.cumulative_distances();
        let mut dropped = 0;
        for (k, (a, b)) in prim.segments().enumerate() {
            let Some((t0, t1)) = view.clip_segment(a, b) else {
                dropped += 1;
                continue;
            };
            let (d0, d1) = (distances[k], distances[k + 1]);
            self.stroke_segment(
                view.to_screen(a.lerp(b, t0)),
                view.to_screen(a.lerp(b, t1)),
                d0 + (d1 - d0) * t0,
                d0 + (d1 - d0) * t1,
                material,
            );
        }
        dropped
    }
}

/// Deterministic CPU renderer: same scene and view, same bytes.
///
/// Primitives are painted back to front by render order; there is no depth
/// buffer.
#[derive(Debug, Clone, Default)]
pub struct SoftwareRenderer {
    pub palette: Palette,
}

impl SoftwareRenderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Renderer for SoftwareRenderer {
    type Output = Result<Frame, FrameError>;

    fn render(&self, scene: &Scene, view: &OrthoView) -> Result<Frame, FrameError> {
        let _span = tracing::debug_span!("software_render", width = view.width, height = view.height)
            .entered();
        let mut frame = Frame::new(view.width, view.height, self.palette.background)?;

        let mut dropped = 0usize;
        for prim in scene.primitives_in_draw_order() {
            let material = self.palette.material(prim.style);
            dropped += frame.stroke_primitive(prim, view, material);
        }
        if dropped > 0 {
            tracing::debug!(dropped, "segments outside the depth range");
        }
        Ok(frame)
    }
}
