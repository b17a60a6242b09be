//! Developer Tooling: read-only inspection of a composed scene.
//!
//! # Invariants
//! - Tools never mutate the scene they inspect.

mod inspector;

pub use inspector::{CubeInfo, SceneInspector, SceneSummary};

pub fn crate_info() -> &'static str {
    concat!("wirecubes-tools v", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("tools"));
    }
}
