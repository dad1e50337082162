//! Scene configuration. Every default is the authored value of the
//! experience; a page can override any subset with a JSON block.

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Fixes every random layout when set.
    pub seed: Option<u64>,
    pub scroll: ScrollConfig,
    pub camera: CameraConfig,
    pub render: RenderConfig,
    pub core: CoreConfig,
    pub counts: FieldCounts,
    pub stars: StarConfig,
    pub post: PostConfig,
    pub audio: AudioConfig,
}

impl SceneConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Scrollable height in viewport heights.
    pub pages: f32,
    /// Seconds the offset takes to catch up with the scrollbar.
    pub damping: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self { pages: 5.0, damping: 0.3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    /// Vertical field of view, degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 20.0],
            fov: 50.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub background: String,
    pub max_pixel_ratio: f32,
    pub mobile_max_pixel_ratio: f32,
    /// Viewport width (CSS px) below which the mobile ratio applies.
    pub mobile_breakpoint: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: "#050510".into(),
            max_pixel_ratio: 1.5,
            mobile_max_pixel_ratio: 1.2,
            mobile_breakpoint: 768.0,
        }
    }
}

impl RenderConfig {
    /// Device pixel ratio clamped to `[1, max]` for the viewport width.
    pub fn pixel_ratio(&self, device_ratio: f32, viewport_width: f32) -> f32 {
        let max = if viewport_width < self.mobile_breakpoint {
            self.mobile_max_pixel_ratio
        } else {
            self.max_pixel_ratio
        };
        let ratio = if device_ratio.is_finite() { device_ratio } else { 1.0 };
        ratio.clamp(1.0, max.max(1.0))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub displacement_strength: f32,
    pub color_a: String,
    pub color_b: String,
    pub glow: String,
    pub light_color: String,
    pub light_distance: f32,
    pub light_decay: f32,
    /// Icosahedron subdivision level.
    pub detail: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            displacement_strength: 0.8,
            color_a: "#050505".into(),
            color_b: "#1a1a1a".into(),
            glow: "#ff3300".into(),
            light_color: "#ff6600".into(),
            light_distance: 20.0,
            light_decay: 2.0,
            detail: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldCounts {
    pub shell_rocks: usize,
    pub tunnel_rocks: usize,
    pub rays: usize,
    pub stars: usize,
}

impl Default for FieldCounts {
    fn default() -> Self {
        Self {
            shell_rocks: 80,
            tunnel_rocks: 100,
            rays: 60,
            stars: 600,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub radius: f32,
    pub depth: f32,
    pub factor: f32,
    pub speed: f32,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            radius: 150.0,
            depth: 100.0,
            factor: 6.0,
            speed: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostConfig {
    pub enabled: bool,
    pub bloom_threshold: f32,
    pub bloom_smoothing: f32,
    pub bloom_intensity: f32,
    /// Blur footprint in texels per tap.
    pub bloom_radius: f32,
    pub noise_opacity: f32,
    pub vignette: Option<VignetteConfig>,
}

impl Default for PostConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bloom_threshold: 0.2,
            bloom_smoothing: 0.9,
            bloom_intensity: 1.5,
            bloom_radius: 1.5,
            noise_opacity: 0.02,
            vignette: Some(VignetteConfig::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    pub offset: f32,
    pub darkness: f32,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            offset: 0.1,
            darkness: 0.9,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Drone pitch, Hz.
    pub frequency: f32,
    pub lfo_frequency: f32,
    /// LFO swing applied to the drone pitch, Hz.
    pub lfo_depth: f32,
    pub volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            frequency: 60.0,
            lfo_frequency: 0.1,
            lfo_depth: 50.0,
            volume: 0.5,
        }
    }
}
