//! Scalar easing helpers and the retained transform every animator writes.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Hermite ease between two edges, GLSL argument order.
///
/// Equal edges behave as a step at `edge0` instead of dividing by zero.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let span = edge1 - edge0;
    if span == 0.0 || !span.is_finite() {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / span).clamp(0.0, 1.0);
    if t.is_nan() {
        return 0.0;
    }
    t * t * (3.0 - 2.0 * t)
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Returns `v` if finite, otherwise `fallback`.
pub fn finite_or(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        fallback
    }
}

pub fn finite_vec3_or(v: Vec3, fallback: Vec3) -> Vec3 {
    Vec3::new(
        finite_or(v.x, fallback.x),
        finite_or(v.y, fallback.y),
        finite_or(v.z, fallback.z),
    )
}

/// Frame-rate independent exponential approach used by the camera rig and the
/// scroll tracker: `current` moves toward `target` by `1 - exp(-rate)`.
pub fn damp(current: f32, target: f32, rate: f32) -> f32 {
    if rate <= 0.0 || !rate.is_finite() {
        return current;
    }
    lerp(current, target, 1.0 - (-rate).exp())
}

/// Position / rotation / scale of one rendered node.
///
/// Rotation is an Euler triple applied in XYZ order, the convention the rest
/// of the scene is authored in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }

    /// Replaces non-finite components so a degenerate frame collapses the node
    /// instead of handing NaN to the GPU.
    pub fn sanitized(self) -> Self {
        Self {
            position: finite_vec3_or(self.position, Vec3::ZERO),
            rotation: finite_vec3_or(self.rotation, Vec3::ZERO),
            scale: finite_vec3_or(self.scale, Vec3::ZERO),
        }
    }
}

/// Linear-space RGB from an sRGB `#rrggbb` literal.
pub fn srgb_hex(hex: u32) -> Vec3 {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    Vec3::new(channel(16), channel(8), channel(0))
}

pub fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}

/// Parses `#rrggbb` (leading `#` optional) into linear RGB.
pub fn parse_hex_color(s: &str) -> Option<Vec3> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(srgb_hex)
}
