//! Controls panel for `GalaxyApp`.
//!
//! Floating top-left panel: title, word input with the colored overlay,
//! status line and reset. Collapses to a single clickable strip.

use eframe::egui;

use crate::ui::{overlay_job, ACCENT};

use super::GalaxyApp;

impl GalaxyApp {
    pub fn draw_controls(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::window(&ctx.style())
            .fill(egui::Color32::from_rgba_unmultiplied(10, 12, 20, 220))
            .inner_margin(egui::Margin::same(12.0));

        egui::Area::new(egui::Id::new("controls"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(16.0, 16.0))
            .show(ctx, |ui| {
                frame.show(ui, |ui| {
                    if self.controls_minimized {
                        self.draw_minimized(ui);
                    } else {
                        self.draw_expanded(ui);
                    }
                });
            });
    }

    fn draw_minimized(&mut self, ui: &mut egui::Ui) {
        let response = ui
            .add(
                egui::Label::new(egui::RichText::new("SEMANTIC GALAXY  +").color(ACCENT).strong())
                    .sense(egui::Sense::click()),
            )
            .on_hover_text("Show controls");
        if response.clicked() {
            self.controls_minimized = false;
        }
    }

    fn draw_expanded(&mut self, ui: &mut egui::Ui) {
        ui.set_width(360.0);

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("SEMANTIC GALAXY").color(ACCENT).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("_").on_hover_text("Minimize").clicked() {
                    self.controls_minimized = true;
                }
            });
        });
        ui.add_space(6.0);

        // Word input, every word tinted by its sequence color
        let font_id = egui::TextStyle::Monospace.resolve(ui.style());
        let plain = ui.visuals().text_color();
        let mut layouter = |ui: &egui::Ui, text: &str, wrap_width: f32| {
            let mut job = overlay_job(text, font_id.clone(), plain);
            job.wrap.max_width = wrap_width;
            ui.fonts(|f| f.layout_job(job))
        };
        let response = ui.add(
            egui::TextEdit::singleline(&mut self.input_text)
                .hint_text("Type words separated by spaces...")
                .desired_width(f32::INFINITY)
                .layouter(&mut layouter),
        );
        if response.changed() {
            self.sync_input();
        }

        ui.add_space(6.0);
        let status = self.session.status();
        ui.label(egui::RichText::new(status.headline).color(egui::Color32::from_gray(210)));
        if let Some(detail) = status.detail {
            ui.label(egui::RichText::new(detail).small().color(egui::Color32::from_gray(150)));
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Reset").clicked() {
                self.reset();
            }
            let registry = self.session.registry();
            ui.label(
                egui::RichText::new(format!(
                    "{} words · {} stars",
                    registry.len(),
                    self.session.field().len()
                ))
                .small()
                .color(egui::Color32::from_gray(120)),
            );
        });
    }
}
