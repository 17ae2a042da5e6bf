//! Shared types for the wolfcast raycaster: player pose, packed colors and
//! engine configuration.

pub mod config;
pub mod types;

pub use config::{ConfigError, EngineConfig};
pub use types::{Color, Player};

pub fn crate_info() -> &'static str {
    "wolfcast-common v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("common"));
    }
}
