#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod animate;
pub mod clock;
pub mod config;
pub mod error;
pub mod field;
pub mod geometry;
pub mod math;
pub mod noise;
pub mod phase;
pub mod scene;
pub mod shaders;

pub use config::SceneConfig;
pub use error::VizError;
pub use scene::Scene;

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
mod wasm;
