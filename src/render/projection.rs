//! Perspective projection of world points into the viewport.
//!
//! The star buffers are tens of thousands of points per frame, so the
//! bulk projection runs data-parallel over the flat xyz slice with rayon.

use rayon::prelude::*;

use crate::fast_math::{deg_to_rad, Vec3};
use crate::galaxy::camera::{ViewBasis, FAR, FOV_DEG, NEAR};

/// Pixels of slack around the viewport before a point is culled.
pub const CULL_MARGIN: f32 = 64.0;

/// Screen rectangle the scene is drawn into (logical pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width * 0.5, self.y + self.height * 0.5]
    }
}

/// A projected point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub pos: [f32; 2],
    /// Distance along the view axis
    pub depth: f32,
}

/// Camera + viewport, ready to project.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    basis: ViewBasis,
    viewport: Viewport,
    /// Pixels per world unit at depth 1
    focal: f32,
}

impl Projector {
    pub fn new(basis: ViewBasis, viewport: Viewport) -> Self {
        let focal = viewport.height * 0.5 / (deg_to_rad(FOV_DEG) * 0.5).tan();
        Self { basis, viewport, focal }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pixels per world unit at `depth`.
    #[inline]
    pub fn scale_at(&self, depth: f32) -> f32 {
        self.focal / depth
    }

    /// Screen size of an attenuated point sprite: `size * (height / 2) / depth`.
    #[inline]
    pub fn point_size(&self, size: f32, depth: f32) -> f32 {
        size * self.viewport.height * 0.5 / depth
    }

    /// Project without viewport culling; `None` outside the near/far range.
    #[inline]
    pub fn project_unclipped(&self, p: Vec3) -> Option<ScreenPoint> {
        let v = self.basis.to_view(p);
        let depth = v[2];
        if !(NEAR..=FAR).contains(&depth) {
            return None;
        }
        let s = self.focal / depth;
        let [cx, cy] = self.viewport.center();
        Some(ScreenPoint {
            pos: [cx + v[0] * s, cy - v[1] * s],
            depth,
        })
    }

    /// Project and cull against the viewport (with margin).
    #[inline]
    pub fn project(&self, p: Vec3) -> Option<ScreenPoint> {
        let sp = self.project_unclipped(p)?;
        let vp = &self.viewport;
        let inside = sp.pos[0] >= vp.x - CULL_MARGIN
            && sp.pos[0] <= vp.x + vp.width + CULL_MARGIN
            && sp.pos[1] >= vp.y - CULL_MARGIN
            && sp.pos[1] <= vp.y + vp.height + CULL_MARGIN;
        inside.then_some(sp)
    }

    /// Project a flat xyz buffer, keeping the indices of visible points.
    pub fn project_all(&self, positions: &[f32]) -> Vec<(u32, ScreenPoint)> {
        positions
            .par_chunks_exact(3)
            .enumerate()
            .filter_map(|(i, q)| self.project([q[0], q[1], q[2]]).map(|sp| (i as u32, sp)))
            .collect()
    }
}
