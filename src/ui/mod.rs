//! Stateless egui helpers shared by the controls and the nav panel.

use eframe::egui;
use egui::text::{LayoutJob, TextFormat};

use semantic_galaxy::galaxy::input::{overlay_rgb, word_spans};

/// Accent used for the nav status and headings.
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 255, 255);

/// Palette RGB → opaque `Color32`, floored the way the overlay expects.
pub fn palette_color(rgb: [f32; 3]) -> egui::Color32 {
    let [r, g, b] = overlay_rgb(rgb);
    egui::Color32::from_rgb(r, g, b)
}

/// Input overlay: each word tinted by its position in the sequence.
pub fn overlay_job(text: &str, font_id: egui::FontId, plain: egui::Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for span in word_spans(text) {
        let color = span.color.map(palette_color).unwrap_or(plain);
        job.append(
            span.text,
            0.0,
            TextFormat {
                font_id: font_id.clone(),
                color,
                ..Default::default()
            },
        );
    }
    job
}

/// `LABEL  value` row in monospace.
pub fn readout_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(label)
                .monospace()
                .small()
                .color(egui::Color32::from_gray(140)),
        );
        ui.label(egui::RichText::new(value).monospace().color(egui::Color32::WHITE));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_job_keeps_text_and_colors_words() {
        let job = overlay_job("red green ", egui::FontId::monospace(14.0), egui::Color32::GRAY);
        assert_eq!(job.text, "red green ");
        assert_eq!(job.sections.len(), 4);
        assert_eq!(job.sections[0].format.color, egui::Color32::from_rgb(255, 51, 51));
        assert_eq!(job.sections[1].format.color, egui::Color32::GRAY);
        assert_eq!(job.sections[2].format.color, egui::Color32::from_rgb(51, 255, 51));
    }
}
