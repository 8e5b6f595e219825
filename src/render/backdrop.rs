//! Nebula backdrop: an equirectangular image on a large inward-facing
//! sphere around the origin, drawn before everything else.
//!
//! Loading is optional. The app logs a warning and carries on without a
//! backdrop when the file is missing or cannot be decoded.

use std::path::Path;

use image::RgbaImage;

use crate::error::GalaxyError;
use crate::fast_math::{dot, sub, Vec3};

/// Sphere radius in world units.
pub const BACKDROP_RADIUS: f32 = 2000.0;
pub const WIDTH_SEGMENTS: usize = 64;
pub const HEIGHT_SEGMENTS: usize = 64;
/// Textures wider than this are downscaled on load.
pub const MAX_TEXTURE_WIDTH: u32 = 4096;

/// Read and decode the backdrop image.
pub fn load_backdrop(path: &Path) -> Result<RgbaImage, GalaxyError> {
    let img = image::open(path).map_err(|source| GalaxyError::Asset {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    if w > MAX_TEXTURE_WIDTH {
        let ratio = MAX_TEXTURE_WIDTH as f32 / w as f32;
        let new_h = ((h as f32 * ratio) as u32).max(1);
        log::info!("backdrop {}x{} downscaled to {}x{}", w, h, MAX_TEXTURE_WIDTH, new_h);
        return Ok(image::imageops::resize(
            &rgba,
            MAX_TEXTURE_WIDTH,
            new_h,
            image::imageops::FilterType::Triangle,
        ));
    }
    Ok(rgba)
}

/// Latitude/longitude grid of the backdrop sphere.
///
/// Vertex `(row, col)` lives at `row * (cols + 1) + col`; rows run from the
/// north pole (v = 0) to the south pole (v = 1).
#[derive(Debug, Clone)]
pub struct SphereGrid {
    pub vertices: Vec<Vec3>,
    pub uvs: Vec<[f32; 2]>,
    pub cols: usize,
    pub rows: usize,
}

impl SphereGrid {
    pub fn new(radius: f32, cols: usize, rows: usize) -> Self {
        let mut vertices = Vec::with_capacity((rows + 1) * (cols + 1));
        let mut uvs = Vec::with_capacity((rows + 1) * (cols + 1));
        for row in 0..=rows {
            let v = row as f32 / rows as f32;
            let (sin_v, cos_v) = (v * std::f32::consts::PI).sin_cos();
            for col in 0..=cols {
                let u = col as f32 / cols as f32;
                let (sin_u, cos_u) = (u * std::f32::consts::TAU).sin_cos();
                vertices.push([-radius * cos_u * sin_v, radius * cos_v, radius * sin_u * sin_v]);
                uvs.push([u, v]);
            }
        }
        Self { vertices, uvs, cols, rows }
    }

    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * (self.cols + 1) + col
    }

    /// Quads as `[top-left, top-right, bottom-right, bottom-left]` indices.
    pub fn quads(&self) -> impl Iterator<Item = [usize; 4]> + '_ {
        (0..self.rows).flat_map(move |row| {
            (0..self.cols).map(move |col| {
                [
                    self.index(row, col),
                    self.index(row, col + 1),
                    self.index(row + 1, col + 1),
                    self.index(row + 1, col),
                ]
            })
        })
    }

    /// Inner faces only: a quad is drawn when the eye sees its inside.
    pub fn faces_inward(&self, quad: [usize; 4], eye: Vec3) -> bool {
        let c = quad.iter().fold([0.0f32; 3], |acc, &i| {
            let p = self.vertices[i];
            [acc[0] + p[0] * 0.25, acc[1] + p[1] * 0.25, acc[2] + p[2] * 0.25]
        });
        dot(sub(c, eye), c) > 0.0
    }
}

impl Default for SphereGrid {
    fn default() -> Self {
        Self::new(BACKDROP_RADIUS, WIDTH_SEGMENTS, HEIGHT_SEGMENTS)
    }
}
