//! Fast Math: small 3D vector kernel
//!
//! "重い命令を軽い命令に置き換える"
//!
//! Everything spatial in the galaxy is `[f32; 3]`. These helpers keep the
//! hot loops (neighbor scan, projection, framing) on FMA and avoid sqrt
//! wherever a squared comparison is enough.
//!
//! ## Sqrt Elimination
//! For comparisons: |a| < |b|  ↔  a² < b²  (no sqrt needed)

pub type Vec3 = [f32; 3];

/// Fused Multiply-Add: a * b + c
#[inline(always)]
pub fn fma(a: f32, b: f32, c: f32) -> f32 {
    a.mul_add(b, c)
}

/// Squared distance between two points (no sqrt).
#[inline(always)]
pub fn distance_squared(a: Vec3, b: Vec3) -> f32 {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let dz = b[2] - a[2];
    fma(dx, dx, fma(dy, dy, dz * dz))
}

#[inline(always)]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline(always)]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline(always)]
pub fn scale(a: Vec3, k: f32) -> Vec3 {
    [a[0] * k, a[1] * k, a[2] * k]
}

#[inline(always)]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    fma(a[0], b[0], fma(a[1], b[1], a[2] * b[2]))
}

#[inline(always)]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline(always)]
pub fn length(a: Vec3) -> f32 {
    dot(a, a).sqrt()
}

/// Unit vector in the direction of `a`; the zero vector stays zero.
#[inline]
pub fn normalize(a: Vec3) -> Vec3 {
    let len = length(a);
    if len > 0.0 {
        scale(a, 1.0 / len)
    } else {
        [0.0, 0.0, 0.0]
    }
}

/// Linear interpolation using FMA for precision.
/// lerp(a, b, t) = a + t * (b - a) = fma(t, b-a, a)
#[inline(always)]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    fma(t, b - a, a)
}

#[inline(always)]
pub fn lerp3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    [lerp(a[0], b[0], t), lerp(a[1], b[1], t), lerp(a[2], b[2], t)]
}

#[inline(always)]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * (std::f32::consts::PI / 180.0)
}
