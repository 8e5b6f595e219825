//! Navigation panel readout, shown once the sequence is long enough.

use crate::fast_math::{normalize, scale, sub, Vec3};
use crate::galaxy::input::token_id;

/// Words needed before the panel appears.
pub const NAV_THRESHOLD: usize = 6;
pub const STATUS_ACQUIRED: &str = "VECTOR ACQUIRED";

#[derive(Debug, Clone, PartialEq)]
pub struct NavReadout {
    pub token_id: u32,
    /// Last word's position scaled into roughly [-1.5, 1.5]
    pub coords: Vec3,
    /// Unit direction from the second-to-last to the last word
    pub bearing: Vec3,
    pub status: &'static str,
}

impl NavReadout {
    /// `None` until `NAV_THRESHOLD` vertices exist.
    pub fn compute(last_word: &str, vertices: &[Vec3], norm_scale: f32) -> Option<Self> {
        if vertices.len() < NAV_THRESHOLD {
            return None;
        }
        let last = vertices[vertices.len() - 1];
        let prev = vertices[vertices.len() - 2];
        Some(Self {
            token_id: token_id(last_word),
            coords: scale(last, norm_scale),
            bearing: normalize(sub(last, prev)),
            status: STATUS_ACQUIRED,
        })
    }

    pub fn coords_text(&self) -> String {
        format_vec3(self.coords)
    }

    pub fn bearing_text(&self) -> String {
        format_vec3(self.bearing)
    }
}

/// `[x.xxx, y.yyy, z.zzz]`
pub fn format_vec3(v: Vec3) -> String {
    format!("[{:.3}, {:.3}, {:.3}]", v[0], v[1], v[2])
}
