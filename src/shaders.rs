//! GLSL ES 3.00 programs for every pass, plus CPU mirrors of the core
//! displacement and crack colouring.
//!
//! Sources are assembled at program creation so the noise chunk is shared
//! between the core shader and anything else that needs it.

use glam::Vec3;

use crate::math::smoothstep;
use crate::noise::simplex3;

pub const HEADER: &str = "#version 300 es\nprecision highp float;\n";

/// Simplex 3D noise by Ian McEwan, Ashima Arts.
pub const NOISE_GLSL: &str = r#"
vec4 permute(vec4 x){return mod(((x*34.0)+1.0)*x, 289.0);}
vec4 taylorInvSqrt(vec4 r){return 1.79284291400159 - 0.85373472095314 * r;}

float snoise(vec3 v){
  const vec2  C = vec2(1.0/6.0, 1.0/3.0) ;
  const vec4  D = vec4(0.0, 0.5, 1.0, 2.0);

  vec3 i  = floor(v + dot(v, C.yyy) );
  vec3 x0 = v - i + dot(i, C.xxx) ;

  vec3 g = step(x0.yzx, x0.xyz);
  vec3 l = 1.0 - g;
  vec3 i1 = min( g.xyz, l.zxy );
  vec3 i2 = max( g.xyz, l.zxy );

  vec3 x1 = x0 - i1 + 1.0 * C.xxx;
  vec3 x2 = x0 - i2 + 2.0 * C.xxx;
  vec3 x3 = x0 - D.yyy;

  i = mod(i, 289.0 );
  vec4 p = permute( permute( permute(
             i.z + vec4(0.0, i1.z, i2.z, 1.0 ))
           + i.y + vec4(0.0, i1.y, i2.y, 1.0 ))
           + i.x + vec4(0.0, i1.x, i2.x, 1.0 ));

  float n_ = 1.0/7.0;
  vec3  ns = n_ * D.wyz - D.xzx;

  vec4 j = p - 49.0 * floor(p * ns.z *ns.z);

  vec4 x_ = floor(j * ns.z);
  vec4 y_ = floor(j - 7.0 * x_ );

  vec4 x = x_ *ns.x + ns.yyyy;
  vec4 y = y_ *ns.x + ns.yyyy;
  vec4 h = 1.0 - abs(x) - abs(y);

  vec4 b0 = vec4( x.xy, y.xy );
  vec4 b1 = vec4( x.zw, y.zw );

  vec4 s0 = floor(b0)*2.0 + 1.0;
  vec4 s1 = floor(b1)*2.0 + 1.0;
  vec4 sh = -step(h, vec4(0.0));

  vec4 a0 = b0.xzyw + s0.xzyw*sh.xxyy ;
  vec4 a1 = b1.xzyw + s1.xzyw*sh.zzww ;

  vec3 p0 = vec3(a0.xy,h.x);
  vec3 p1 = vec3(a0.zw,h.y);
  vec3 p2 = vec3(a1.xy,h.z);
  vec3 p3 = vec3(a1.zw,h.w);

  vec4 norm = taylorInvSqrt(vec4(dot(p0,p0), dot(p1,p1), dot(p2, p2), dot(p3,p3)));
  p0 *= norm.x;
  p1 *= norm.y;
  p2 *= norm.z;
  p3 *= norm.w;

  vec4 m = max(0.6 - vec4(dot(x0,x0), dot(x1,x1), dot(x2,x2), dot(x3,x3)), 0.0);
  m = m * m;
  return 42.0 * dot( m*m, vec4( dot(p0,x0), dot(p1,x1),
                                dot(p2,x2), dot(p3,x3) ) );
}
"#;

const CORE_VERTEX_BODY: &str = r#"
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;

uniform mat4 uProjection;
uniform mat4 uView;
uniform mat4 uModel;
uniform float uTime;
uniform float uDisplacementStrength;

out float vNoise;
out vec3 vNormal;

void main() {
  vNormal = normal;

  // detail octave, then the broad shape octave
  float n = snoise(position * 2.0 + uTime * 0.1);
  float n2 = snoise(position * 0.5 + uTime * 0.05);
  float finalNoise = n * 0.5 + n2 * 0.5;

  vec3 newPos = position + normal * finalNoise * uDisplacementStrength;
  gl_Position = uProjection * uView * uModel * vec4(newPos, 1.0);

  vNoise = finalNoise;
}
"#;

const CORE_FRAGMENT_BODY: &str = r#"
uniform vec3 uColorA;
uniform vec3 uColorB;
uniform vec3 uColorGlow;

in float vNoise;
in vec3 vNormal;
out vec4 fragColor;

void main() {
  float crackMix = smoothstep(-0.2, 0.0, vNoise);
  vec3 surfaceColor = mix(uColorA, uColorB, vNoise * 0.5 + 0.5);

  // deep cracks glow, boosted past 1.0 so bloom picks them up
  float glowIntensity = 1.0 - smoothstep(-0.4, 0.1, vNoise);
  vec3 glow = uColorGlow * glowIntensity * 5.0;

  fragColor = vec4(mix(glow, surfaceColor, crackMix), 1.0);
}
"#;

/// Instanced rock lighting: Lambert diffuse with ambient, one directional
/// light and up to `MAX_POINT_LIGHTS` point lights using the inverse-square
/// falloff with a smooth distance cutoff.
pub const MAX_POINT_LIGHTS: usize = 3;

const ROCK_VERTEX_BODY: &str = r#"
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;
layout(location = 2) in mat4 instanceMatrix;

uniform mat4 uProjection;
uniform mat4 uView;
uniform mat4 uModel;

out vec3 vWorldPos;
out vec3 vNormal;

void main() {
  mat4 world = uModel * instanceMatrix;
  vec4 worldPos = world * vec4(position, 1.0);
  vWorldPos = worldPos.xyz;
  vNormal = normalize(mat3(world) * normal);
  gl_Position = uProjection * uView * worldPos;
}
"#;

const ROCK_FRAGMENT_BODY: &str = r#"
#define MAX_POINT_LIGHTS 3
#define RECIPROCAL_PI 0.3183098861837907

uniform vec3 uColor;
uniform bool uFlatShading;
uniform vec3 uAmbient;
uniform vec3 uDirectionalDir;
uniform vec3 uDirectionalColor;
uniform int uPointCount;
uniform vec3 uPointPosition[MAX_POINT_LIGHTS];
uniform vec3 uPointColor[MAX_POINT_LIGHTS];
uniform float uPointDistance[MAX_POINT_LIGHTS];
uniform float uPointDecay[MAX_POINT_LIGHTS];

in vec3 vWorldPos;
in vec3 vNormal;
out vec4 fragColor;

float distanceAttenuation(float d, float cutoff, float decay) {
  float falloff = 1.0 / max(pow(d, decay), 0.01);
  if (cutoff > 0.0) {
    falloff *= pow(clamp(1.0 - pow(d / cutoff, 4.0), 0.0, 1.0), 2.0);
  }
  return falloff;
}

void main() {
  vec3 n = uFlatShading
    ? normalize(cross(dFdx(vWorldPos), dFdy(vWorldPos)))
    : normalize(vNormal);

  vec3 irradiance = uAmbient;
  irradiance += max(dot(n, uDirectionalDir), 0.0) * uDirectionalColor;

  for (int i = 0; i < MAX_POINT_LIGHTS; i++) {
    if (i >= uPointCount) break;
    vec3 toLight = uPointPosition[i] - vWorldPos;
    float d = length(toLight);
    float dotNL = max(dot(n, toLight / max(d, 1e-4)), 0.0);
    irradiance += dotNL * uPointColor[i] * distanceAttenuation(d, uPointDistance[i], uPointDecay[i]);
  }

  fragColor = vec4(irradiance * uColor * RECIPROCAL_PI, 1.0);
}
"#;

const RAY_VERTEX_BODY: &str = r#"
layout(location = 0) in vec3 position;
layout(location = 2) in mat4 instanceMatrix;
layout(location = 6) in float aSpeed;
layout(location = 7) in float aLength;
layout(location = 8) in float aPhase;

uniform mat4 uProjection;
uniform mat4 uView;
uniform mat4 uModel;
uniform float uTime;
uniform float uProgress;

out float vAlpha;
out vec3 vColor;

void main() {
  vec3 scaledPos = position;
  scaledPos.z *= aLength;

  float travel = uProgress * 25.0 * aSpeed;
  travel += aPhase;

  vec3 finalPos = scaledPos + vec3(0.0, 0.0, travel);
  gl_Position = uProjection * uView * uModel * instanceMatrix * vec4(finalPos, 1.0);

  float life = uProgress * (1.0 + aPhase * 0.2);

  vec3 colorBase = vec3(0.1, 0.08, 0.05);
  vec3 colorGlow = vec3(1.0, 0.3, 0.0);
  vec3 colorDark = vec3(0.4, 0.1, 0.0);

  if (life < 0.2) {
    vColor = mix(colorBase, colorGlow, life * 5.0);
  } else {
    vColor = mix(colorGlow, colorDark, (life - 0.2) * 2.0);
  }

  vAlpha = 1.0 - smoothstep(0.5, 0.9, life);
  if (uProgress <= 0.0) vAlpha = 0.0;
}
"#;

const RAY_FRAGMENT_BODY: &str = r#"
in float vAlpha;
in vec3 vColor;
out vec4 fragColor;

void main() {
  fragColor = vec4(vColor, vAlpha);
}
"#;

const STAR_VERTEX_BODY: &str = r#"
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 color;
layout(location = 2) in float size;

uniform mat4 uProjection;
uniform mat4 uView;
uniform mat4 uModel;
uniform float uTime;
uniform float uPixelRatio;

out vec3 vColor;

void main() {
  vColor = color;
  vec4 mvPosition = uView * uModel * vec4(position, 0.5);
  gl_PointSize = size * (30.0 / -mvPosition.z) * (3.0 + sin(uTime + 100.0)) * uPixelRatio;
  gl_Position = uProjection * mvPosition;
}
"#;

const STAR_FRAGMENT_BODY: &str = r#"
in vec3 vColor;
out vec4 fragColor;

void main() {
  float opacity = 1.0 / (1.0 + exp(16.0 * (length(gl_PointCoord - 0.5) - 0.25)));
  fragColor = vec4(vColor, opacity);
}
"#;

/// Fullscreen triangle from `gl_VertexID`, no vertex buffer needed.
const POST_VERTEX_BODY: &str = r#"
out vec2 vUv;

void main() {
  vec2 p = vec2(float((gl_VertexID << 1) & 2), float(gl_VertexID & 2));
  vUv = p;
  gl_Position = vec4(p * 2.0 - 1.0, 0.0, 1.0);
}
"#;

const POST_FRAGMENT_BODY: &str = r#"
uniform sampler2D uScene;
uniform vec2 uTexel;
uniform float uTime;
uniform float uBloomThreshold;
uniform float uBloomSmoothing;
uniform float uBloomIntensity;
uniform float uBloomRadius;
uniform float uNoiseOpacity;
uniform float uVignetteOffset;
uniform float uVignetteDarkness;

in vec2 vUv;
out vec4 fragColor;

vec3 bright(vec2 uv) {
  vec3 c = texture(uScene, uv).rgb;
  float l = dot(c, vec3(0.2126, 0.7152, 0.0722));
  return c * smoothstep(uBloomThreshold, uBloomThreshold + uBloomSmoothing, l);
}

float rand(vec2 co) {
  return fract(sin(dot(co, vec2(12.9898, 78.233))) * 43758.5453);
}

void main() {
  vec3 color = texture(uScene, vUv).rgb;

  vec3 bloom = vec3(0.0);
  float weight = 0.0;
  for (int x = -3; x <= 3; x++) {
    for (int y = -3; y <= 3; y++) {
      vec2 o = vec2(float(x), float(y));
      float w = exp(-dot(o, o) / 8.0);
      bloom += bright(vUv + o * uTexel * uBloomRadius) * w;
      weight += w;
    }
  }
  color += bloom / weight * uBloomIntensity;

  float grain = rand(gl_FragCoord.xy + fract(uTime));
  vec3 screened = 1.0 - (1.0 - color) * (1.0 - vec3(grain));
  color = mix(color, screened, uNoiseOpacity);

  float vignette = 1.0 - smoothstep(uVignetteOffset * 0.799, 0.8, distance(vUv, vec2(0.5)) * (uVignetteDarkness + uVignetteOffset));
  color *= vignette;

  // linear -> sRGB for the canvas
  color = pow(max(color, vec3(0.0)), vec3(1.0 / 2.2));
  fragColor = vec4(color, 1.0);
}
"#;

/// Vertex + fragment source pair for one pass.
#[derive(Clone, Debug)]
pub struct ProgramSource {
    pub label: &'static str,
    pub vertex: String,
    pub fragment: String,
}

pub fn core_program() -> ProgramSource {
    ProgramSource {
        label: "core",
        vertex: format!("{HEADER}{NOISE_GLSL}{CORE_VERTEX_BODY}"),
        fragment: format!("{HEADER}{CORE_FRAGMENT_BODY}"),
    }
}

pub fn rock_program() -> ProgramSource {
    ProgramSource {
        label: "rock",
        vertex: format!("{HEADER}{ROCK_VERTEX_BODY}"),
        fragment: format!("{HEADER}{ROCK_FRAGMENT_BODY}"),
    }
}

pub fn ray_program() -> ProgramSource {
    ProgramSource {
        label: "rays",
        vertex: format!("{HEADER}{RAY_VERTEX_BODY}"),
        fragment: format!("{HEADER}{RAY_FRAGMENT_BODY}"),
    }
}

pub fn star_program() -> ProgramSource {
    ProgramSource {
        label: "stars",
        vertex: format!("{HEADER}{STAR_VERTEX_BODY}"),
        fragment: format!("{HEADER}{STAR_FRAGMENT_BODY}"),
    }
}

pub fn post_program() -> ProgramSource {
    ProgramSource {
        label: "post",
        vertex: format!("{HEADER}{POST_VERTEX_BODY}"),
        fragment: format!("{HEADER}{POST_FRAGMENT_BODY}"),
    }
}

/// Two-octave noise the core vertex stage displaces by.
pub fn displacement_noise(position: Vec3, time: f32) -> f32 {
    let detail = simplex3(position * 2.0 + Vec3::splat(time * 0.1));
    let shape = simplex3(position * 0.5 + Vec3::splat(time * 0.05));
    detail * 0.5 + shape * 0.5
}

/// Displaced vertex position and the noise value handed to the fragment stage.
pub fn displace(position: Vec3, normal: Vec3, time: f32, strength: f32) -> (Vec3, f32) {
    let n = displacement_noise(position, time);
    (position + normal * n * strength, n)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrackPalette {
    pub color_a: Vec3,
    pub color_b: Vec3,
    pub glow: Vec3,
}

/// Fragment colour of the core for an interpolated noise value.
pub fn crack_color(noise: f32, palette: &CrackPalette) -> Vec3 {
    let crack_mix = smoothstep(-0.2, 0.0, noise);
    let surface = palette.color_a.lerp(palette.color_b, noise * 0.5 + 0.5);
    let glow_intensity = 1.0 - smoothstep(-0.4, 0.1, noise);
    let glow = palette.glow * glow_intensity * 5.0;
    glow.lerp(surface, crack_mix)
}
