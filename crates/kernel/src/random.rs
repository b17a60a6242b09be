use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Source of uniform randomness for composition choices.
///
/// Highlight cell, amplification and per-cube rotations all draw from here,
/// so a scripted source makes composition fully reproducible in tests.
pub trait RandomSource {
    /// Uniform value in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform value in `[-1, 1)`.
    fn next_signed(&mut self) -> f64 {
        self.next_unit() * 2.0 - 1.0
    }

    /// Normalized axis built from three signed draws (x, y, z in that order).
    /// A degenerate zero vector falls back to `+Z`.
    fn next_axis(&mut self) -> Vec3 {
        let x = self.next_signed() as f32;
        let y = self.next_signed() as f32;
        let z = self.next_signed() as f32;
        Vec3::new(x, y, z).try_normalize().unwrap_or(Vec3::Z)
    }

    /// Angle in `[0, 2π)`.
    fn next_angle(&mut self) -> f32 {
        (self.next_unit() * std::f64::consts::TAU) as f32
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// `StdRng`-backed random source.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

/// Master seed for one composition. Both the noise field and the random
/// stream derive from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SceneSeed(pub u64);

impl SceneSeed {
    /// Draw a fresh seed from the thread RNG.
    pub fn fresh() -> Self {
        Self(rand::random())
    }

    pub fn noise_seed(self) -> u32 {
        (splitmix64(self.0) >> 32) as u32
    }

    pub fn random(self) -> SeededRandom {
        SeededRandom::new(splitmix64(self.0 ^ 0x5bd1_e995))
    }
}

impl std::fmt::Display for SceneSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Splitmix64 step, used to decorrelate the streams derived from one seed.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
