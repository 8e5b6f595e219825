//! egui mesh builders for the galaxy scene.
//!
//! Additive glow uses egui's premultiplied-alpha blending: a vertex color
//! with alpha 0 adds its RGB to the framebuffer instead of covering it.
//! Overdriven colors (> 1.0) are clamped only here, at the `Color32`
//! boundary; the session buffers keep the full range.

use egui::{Color32, Mesh, Pos2, Rect, TextureId};

use crate::branchless::color::BEAM_COLOR;
use crate::branchless::clamp_f32;
use crate::galaxy::field::{BackgroundField, PointField};
use crate::galaxy::path::{BeamPath, RADIAL_SEGMENTS};
use crate::galaxy::session::Marker;
use crate::render::backdrop::SphereGrid;
use crate::render::projection::{Projector, ScreenPoint};

/// Sprite size of a clustered star at size attribute 1.0.
pub const STAR_POINT_SIZE: f32 = 6.0;
/// Square size of a background star.
pub const BACKGROUND_POINT_SIZE: f32 = 2.0;
pub const BACKGROUND_OPACITY: f32 = 0.6;
pub const BEAM_OPACITY: f32 = 0.3;
/// Beam texture scroll per frame.
pub const BEAM_SCROLL: f32 = 0.02;
/// Sprites never shrink below this many pixels.
const MIN_SPRITE_PX: f32 = 1.0;

#[inline]
fn full_uv() -> Rect {
    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0))
}

#[inline]
fn channel(c: f32) -> u8 {
    (clamp_f32(c, 0.0, 1.0) * 255.0).round() as u8
}

/// Additive tint (alpha 0 in premultiplied space).
#[inline]
pub fn additive(rgb: [f32; 3], opacity: f32) -> Color32 {
    Color32::from_rgba_premultiplied(
        channel(rgb[0] * opacity),
        channel(rgb[1] * opacity),
        channel(rgb[2] * opacity),
        0,
    )
}

#[inline]
fn sprite_rect(center: [f32; 2], px: f32) -> Rect {
    let half = px.max(MIN_SPRITE_PX) * 0.5;
    Rect::from_center_size(Pos2::new(center[0], center[1]), egui::vec2(half * 2.0, half * 2.0))
}

/// Clustered stars as additive textured quads.
pub fn star_mesh(
    projector: &Projector,
    field: &PointField,
    visible: &[(u32, ScreenPoint)],
    texture: TextureId,
) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    mesh.reserve_triangles(visible.len() * 2);
    mesh.reserve_vertices(visible.len() * 4);
    for &(i, sp) in visible {
        let i = i as usize;
        let px = projector.point_size(STAR_POINT_SIZE * field.sizes[i], sp.depth);
        mesh.add_rect_with_uv(sprite_rect(sp.pos, px), full_uv(), additive(field.color(i), 1.0));
    }
    mesh
}

/// Background stars as small translucent squares (untextured).
pub fn background_mesh(
    projector: &Projector,
    background: &BackgroundField,
    visible: &[(u32, ScreenPoint)],
) -> Mesh {
    let mut mesh = Mesh::default();
    mesh.reserve_triangles(visible.len() * 2);
    mesh.reserve_vertices(visible.len() * 4);
    let alpha = channel(BACKGROUND_OPACITY);
    for &(i, sp) in visible {
        let i = i as usize * 3;
        let c = &background.colors[i..i + 3];
        let color = Color32::from_rgba_unmultiplied(channel(c[0]), channel(c[1]), channel(c[2]), alpha);
        let px = projector.point_size(BACKGROUND_POINT_SIZE, sp.depth);
        mesh.add_colored_rect(sprite_rect(sp.pos, px), color);
    }
    mesh
}

/// Word flares: world-sized sprites facing the camera.
pub fn marker_mesh(projector: &Projector, markers: &[Marker], texture: TextureId) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    for m in markers {
        let Some(sp) = projector.project(m.position) else {
            continue;
        };
        let px = m.scale * projector.scale_at(sp.depth);
        mesh.add_rect_with_uv(sprite_rect(sp.pos, px), full_uv(), additive(m.color, 1.0));
    }
    mesh
}

/// Tube around the beam centerline, texture scrolled by `offset`.
///
/// Quads with any corner outside the near/far range are skipped.
pub fn beam_mesh(projector: &Projector, beam: &BeamPath, offset: f32, texture: TextureId) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    let tint = additive(BEAM_COLOR, BEAM_OPACITY);

    let projected: Vec<[Option<ScreenPoint>; RADIAL_SEGMENTS]> = beam
        .rings
        .iter()
        .map(|ring| ring.map(|p| projector.project_unclipped(p)))
        .collect();

    for i in 0..projected.len().saturating_sub(1) {
        let u0 = beam.u[i] + offset;
        let u1 = beam.u[i + 1] + offset;
        for j in 0..RADIAL_SEGMENTS {
            let k = (j + 1) % RADIAL_SEGMENTS;
            let corners = [projected[i][j], projected[i + 1][j], projected[i + 1][k], projected[i][k]];
            let [Some(a), Some(b), Some(c), Some(d)] = corners else {
                continue;
            };
            let v0 = j as f32 / RADIAL_SEGMENTS as f32;
            let v1 = (j + 1) as f32 / RADIAL_SEGMENTS as f32;

            let base = mesh.vertices.len() as u32;
            for (sp, uv) in [(a, [u0, v0]), (b, [u1, v0]), (c, [u1, v1]), (d, [u0, v1])] {
                mesh.vertices.push(egui::epaint::Vertex {
                    pos: Pos2::new(sp.pos[0], sp.pos[1]),
                    uv: Pos2::new(uv[0], uv[1]),
                    color: tint,
                });
            }
            mesh.add_triangle(base, base + 1, base + 2);
            mesh.add_triangle(base, base + 2, base + 3);
        }
    }
    mesh
}

/// Inside of the nebula sphere.
pub fn backdrop_mesh(projector: &Projector, grid: &SphereGrid, eye: [f32; 3], texture: TextureId) -> Mesh {
    let mut mesh = Mesh::with_texture(texture);
    let projected: Vec<Option<ScreenPoint>> = grid
        .vertices
        .iter()
        .map(|&p| projector.project_unclipped(p))
        .collect();

    for quad in grid.quads() {
        if !grid.faces_inward(quad, eye) {
            continue;
        }
        let corners = quad.map(|i| projected[i]);
        let [Some(_), Some(_), Some(_), Some(_)] = corners else {
            continue;
        };
        let base = mesh.vertices.len() as u32;
        for (&i, sp) in quad.iter().zip(corners.iter().flatten()) {
            let uv = grid.uvs[i];
            mesh.vertices.push(egui::epaint::Vertex {
                pos: Pos2::new(sp.pos[0], sp.pos[1]),
                uv: Pos2::new(uv[0], uv[1]),
                color: Color32::WHITE,
            });
        }
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::galaxy::camera::OrbitCamera;
    use crate::render::projection::Viewport;

    fn projector() -> Projector {
        let mut cam = OrbitCamera::default();
        cam.eye = [0.0, 0.0, 900.0];
        Projector::new(cam.basis(), Viewport { x: 0.0, y: 0.0, width: 800.0, height: 600.0 })
    }

    #[test]
    fn additive_clamps_overdrive_and_zeroes_alpha() {
        let c = additive([4.0, 0.5, -1.0], 1.0);
        assert_eq!(c.r(), 255);
        assert_eq!(c.g(), 128);
        assert_eq!(c.b(), 0);
        assert_eq!(c.a(), 0);
    }

    #[test]
    fn one_quad_per_visible_star() {
        let field = PointField::from_positions(&[[0.0, 0.0, 0.0], [0.0, 0.0, 5_000.0], [20.0, 0.0, 0.0]]);
        let proj = projector();
        let visible = proj.project_all(&field.positions);
        let mesh = star_mesh(&proj, &field, &visible, TextureId::default());
        assert_eq!(visible.len(), 2);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.indices.len(), 12);
    }

    #[test]
    fn beam_mesh_covers_the_tube() {
        let beam = BeamPath::build(&[[-100.0, 0.0, 0.0], [100.0, 0.0, 0.0]]).unwrap();
        let mesh = beam_mesh(&projector(), &beam, 0.0, TextureId::default());
        let quads = (beam.len() - 1) * RADIAL_SEGMENTS;
        assert_eq!(mesh.vertices.len(), quads * 4);
        // Texture scroll shifts u only
        let shifted = beam_mesh(&projector(), &beam, -0.5, TextureId::default());
        assert!((shifted.vertices[0].uv.x - (mesh.vertices[0].uv.x - 0.5)).abs() < 1e-6);
        assert_eq!(shifted.vertices[0].uv.y, mesh.vertices[0].uv.y);
    }

    #[test]
    fn marker_size_scales_with_distance() {
        let proj = projector();
        let near = Marker { star: 0, position: [0.0, 0.0, 300.0], color: [1.0, 0.2, 0.2], scale: 60.0 };
        let far = Marker { position: [0.0, 0.0, -300.0], ..near };
        let mesh = marker_mesh(&proj, &[near, far], TextureId::default());
        let width = |q: usize| mesh.vertices[q * 4 + 1].pos.x - mesh.vertices[q * 4].pos.x;
        assert!(width(0) > width(1));
    }
}
