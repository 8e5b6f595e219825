//! Scene viewport and navigation panel for `GalaxyApp`.
//!
//! - `draw_viewport`: mouse → camera, per-frame easing, scene meshes
//! - `draw_nav_panel`: bottom-right readout once the sequence is long

use eframe::egui;

use semantic_galaxy::render::painter::{
    backdrop_mesh, background_mesh, beam_mesh, marker_mesh, star_mesh, BEAM_SCROLL,
};
use semantic_galaxy::render::projection::{Projector, Viewport};

use crate::ui::{readout_row, ACCENT};

use super::GalaxyApp;

impl GalaxyApp {
    // ── Scene ────────────────────────────────────────────────────────────────

    pub fn draw_viewport(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let rect = response.rect;

        // Left-drag orbits, right-drag pans, wheel zooms
        let delta = response.drag_delta();
        if response.dragged_by(egui::PointerButton::Primary) {
            self.camera.orbit(delta.x, delta.y);
        } else if response.dragged_by(egui::PointerButton::Secondary) {
            self.camera.pan(delta.x, delta.y);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                self.camera.zoom(-scroll);
            }
        }

        self.camera.step();
        self.beam_offset -= BEAM_SCROLL;

        let Some(textures) = self.textures.as_ref() else {
            return;
        };

        let projector = Projector::new(
            self.camera.basis(),
            Viewport {
                x: rect.min.x,
                y: rect.min.y,
                width: rect.width(),
                height: rect.height(),
            },
        );

        if let Some(nebula) = textures.backdrop.as_ref() {
            painter.add(egui::Shape::mesh(backdrop_mesh(
                &projector,
                &self.backdrop_grid,
                self.camera.eye,
                nebula.id(),
            )));
        }

        let background = self.session.background();
        let visible_bg = projector.project_all(&background.positions);
        painter.add(egui::Shape::mesh(background_mesh(&projector, background, &visible_bg)));

        let field = self.session.field();
        let visible = projector.project_all(&field.positions);
        painter.add(egui::Shape::mesh(star_mesh(
            &projector,
            field,
            &visible,
            textures.star.id(),
        )));

        if let Some(beam) = self.session.beam() {
            painter.add(egui::Shape::mesh(beam_mesh(
                &projector,
                beam,
                self.beam_offset,
                textures.beam.id(),
            )));
        }

        painter.add(egui::Shape::mesh(marker_mesh(
            &projector,
            self.session.markers(),
            textures.flare.id(),
        )));

        painter.text(
            rect.right_top() + egui::vec2(-12.0, 10.0),
            egui::Align2::RIGHT_TOP,
            format!("{} visible", visible.len() + visible_bg.len()),
            egui::FontId::monospace(10.0),
            egui::Color32::from_gray(90),
        );
    }

    // ── Navigation panel ─────────────────────────────────────────────────────

    pub fn draw_nav_panel(&self, ctx: &egui::Context) {
        let Some(nav) = self.session.nav() else {
            return;
        };

        let frame = egui::Frame::window(&ctx.style())
            .fill(egui::Color32::from_rgba_unmultiplied(0, 20, 25, 220))
            .stroke(egui::Stroke::new(1.0, ACCENT.gamma_multiply(0.5)))
            .inner_margin(egui::Margin::same(10.0));

        egui::Area::new(egui::Id::new("nav_panel"))
            .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
            .show(ctx, |ui| {
                frame.show(ui, |ui| {
                    ui.label(egui::RichText::new("NAVIGATION").color(ACCENT).strong());
                    ui.separator();
                    readout_row(ui, "TOKEN ID", &nav.token_id.to_string());
                    readout_row(ui, "COORDS  ", &nav.coords_text());
                    readout_row(ui, "BEARING ", &nav.bearing_text());
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(nav.status).monospace().color(ACCENT));
                });
            });
    }
}
