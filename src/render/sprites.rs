//! Procedural sprite textures.
//!
//! Generated once at start-up into `image::RgbaImage` buffers and uploaded
//! as egui textures by the app:
//!
//!   - star  (64×64): radial glow used for every star quad
//!   - flare (128×128): softer, wider glow for word markers
//!   - beam  (128×32): horizontal cyan pulse, repeated along the tube

use image::{Rgba, RgbaImage};

/// Gradient stop: offset in [0, 1] and straight (unpremultiplied) RGBA.
pub type Stop = (f32, [u8; 4]);

pub const STAR_STOPS: [Stop; 4] = [
    (0.0, [255, 255, 255, 255]),
    (0.2, [255, 255, 255, 204]),
    (0.5, [255, 255, 255, 26]),
    (1.0, [0, 0, 0, 0]),
];

pub const FLARE_STOPS: [Stop; 4] = [
    (0.0, [255, 255, 255, 255]),
    (0.2, [255, 255, 255, 204]),
    (0.5, [255, 255, 255, 77]),
    (1.0, [0, 0, 0, 0]),
];

pub const BEAM_STOPS: [Stop; 5] = [
    (0.0, [0, 255, 255, 0]),
    (0.2, [0, 255, 255, 51]),
    (0.5, [0, 255, 255, 204]),
    (0.8, [0, 255, 255, 51]),
    (1.0, [0, 255, 255, 0]),
];

/// Sample a piecewise-linear gradient at `t`.
pub fn sample_stops(stops: &[Stop], t: f32) -> [u8; 4] {
    let Some(&(first_t, first_c)) = stops.first() else {
        return [0; 4];
    };
    if t <= first_t {
        return first_c;
    }
    for w in stops.windows(2) {
        let (t0, c0) = w[0];
        let (t1, c1) = w[1];
        if t <= t1 {
            let f = if t1 > t0 { (t - t0) / (t1 - t0) } else { 1.0 };
            let mut out = [0u8; 4];
            for ch in 0..4 {
                let v = c0[ch] as f32 + (c1[ch] as f32 - c0[ch] as f32) * f;
                out[ch] = v.round().clamp(0.0, 255.0) as u8;
            }
            return out;
        }
    }
    stops[stops.len() - 1].1
}

/// Square texture with a radial gradient from the center to the edge
/// midpoint; corners take the last stop.
pub fn radial_gradient(size: u32, stops: &[Stop]) -> RgbaImage {
    let half = size as f32 / 2.0;
    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - half;
        let dy = y as f32 + 0.5 - half;
        let t = (dx * dx + dy * dy).sqrt() / half;
        Rgba(sample_stops(stops, t))
    })
}

/// Texture with a left-to-right gradient, constant down each column.
pub fn horizontal_gradient(width: u32, height: u32, stops: &[Stop]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let t = (x as f32 + 0.5) / width as f32;
        Rgba(sample_stops(stops, t))
    })
}

pub fn star_texture() -> RgbaImage {
    radial_gradient(64, &STAR_STOPS)
}

pub fn flare_texture() -> RgbaImage {
    radial_gradient(128, &FLARE_STOPS)
}

pub fn beam_texture() -> RgbaImage {
    horizontal_gradient(128, 32, &BEAM_STOPS)
}
