//! Scene kernel: composes a grid of noise-deformed wireframe cubes.
//!
//! # Invariants
//! - Composition is pure given a noise field and a random source.
//! - Every emitted primitive is a closed five-point quad outline.
//! - Only front-facing primitives of the highlighted cube use the highlight style.

pub mod composer;
pub mod config;
pub mod face;
pub mod field;
pub mod random;
pub mod scene;
pub mod wireframe;

pub use composer::{CellParameters, SceneComposer};
pub use config::{ComposerConfig, ConfigError};
pub use face::Face;
pub use field::{ConstantField, NoiseField, SimplexField};
pub use random::{RandomSource, SceneSeed, ScriptedRandom, SeededRandom};
pub use scene::Scene;
pub use wireframe::generate_cube;
