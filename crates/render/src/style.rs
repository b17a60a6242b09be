use wirecubes_common::LineStyle;

/// Non-premultiplied sRGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    /// Multiply the color channels, leaving alpha untouched.
    pub fn scale_rgb(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a)
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Convert sRGB channels to linear, for writing into sRGB render targets.
    pub fn to_linear(self) -> Self {
        let f = |c: f32| {
            if c <= 0.04045 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        Self::new(f(self.r), f(self.g), f(self.b), self.a)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Dash pattern in world units along the polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    pub size: f32,
    pub gap: f32,
}

impl Dash {
    pub fn period(&self) -> f32 {
        self.size + self.gap
    }

    /// True if `distance` along the line falls inside a dash.
    pub fn covers(&self, distance: f32) -> bool {
        distance.rem_euclid(self.period()) < self.size
    }
}

/// How one line style is stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineMaterial {
    pub color: Rgba,
    /// Screen-space width in pixels.
    pub width: f32,
    pub dash: Option<Dash>,
}

/// Background plus one material per line style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgba,
    pub front: LineMaterial,
    pub front_highlight: LineMaterial,
    pub back: LineMaterial,
}

impl Default for Palette {
    fn default() -> Self {
        let paper = Rgba::from_rgb8(241, 231, 222);
        Self {
            background: Rgba::from_rgb8(34, 30, 27),
            front: LineMaterial {
                color: paper,
                width: 2.0,
                dash: None,
            },
            front_highlight: LineMaterial {
                color: Rgba::from_rgb8(255, 120, 85),
                width: 2.0,
                dash: None,
            },
            back: LineMaterial {
                color: paper.scale_rgb(0.175),
                width: 1.5,
                dash: Some(Dash {
                    size: 5.0,
                    gap: 5.0,
                }),
            },
        }
    }
}

impl Palette {
    pub fn material(&self, style: LineStyle) -> &LineMaterial {
        match style {
            LineStyle::Front => &self.front,
            LineStyle::FrontHighlight => &self.front_highlight,
            LineStyle::Back => &self.back,
        }
    }
}
