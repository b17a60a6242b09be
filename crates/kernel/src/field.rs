use noise::{NoiseFn, Simplex};

/// Deterministic 2D coherent noise returning values in roughly `[-1, 1]`.
///
/// One instance is shared by the composer and the wireframe generator for a
/// whole run, passed explicitly rather than reached through global state.
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F: NoiseField + ?Sized> NoiseField for &F {
    fn sample(&self, x: f64, y: f64) -> f64 {
        (**self).sample(x, y)
    }
}

/// Seeded simplex noise.
#[derive(Debug, Clone)]
pub struct SimplexField {
    seed: u32,
    inner: Simplex,
}

impl SimplexField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            inner: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl NoiseField for SimplexField {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.inner.get([x, y])
    }
}

/// Noise stub returning the same value everywhere. `ConstantField(0.0)`
/// turns every displacement and scale perturbation off.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConstantField(pub f64);

impl NoiseField for ConstantField {
    fn sample(&self, _x: f64, _y: f64) -> f64 {
        self.0
    }
}
