//! `GalaxyApp`: the top-level egui application state.
//!
//! This module declares the `GalaxyApp` struct, its constructor and the
//! `eframe::App` frame loop. Drawing is split across sibling sub-modules:
//!
//! - `controls`: input field with colored overlay, status, reset, collapse
//! - `viewport`: camera input, scene meshes, navigation panel

pub mod controls;
pub mod viewport;

use eframe::egui;
use image::RgbaImage;

use semantic_galaxy::galaxy::camera::{CameraGoal, OrbitCamera};
use semantic_galaxy::galaxy::input::completed_words;
use semantic_galaxy::render::backdrop::SphereGrid;
use semantic_galaxy::render::sprites;
use semantic_galaxy::GalaxySession;

// ─── Application state ───────────────────────────────────────────────────────

pub struct GalaxyApp {
    pub session: GalaxySession,
    pub camera: OrbitCamera,
    /// Raw contents of the input field, partial word included
    pub input_text: String,
    pub controls_minimized: bool,
    /// Beam texture scroll, decremented every frame
    pub beam_offset: f32,
    /// GPU textures, created on the first frame
    pub textures: Option<SceneTextures>,
    /// Decoded nebula waiting for upload
    pub pending_backdrop: Option<RgbaImage>,
    pub backdrop_grid: SphereGrid,
}

pub struct SceneTextures {
    pub star: egui::TextureHandle,
    pub flare: egui::TextureHandle,
    pub beam: egui::TextureHandle,
    pub backdrop: Option<egui::TextureHandle>,
}

impl GalaxyApp {
    pub fn new(mut session: GalaxySession, backdrop: Option<RgbaImage>) -> Self {
        session.reset();
        let mut camera = OrbitCamera::default();
        camera.apply_goal(&session.camera_goal());

        Self {
            session,
            camera,
            input_text: String::new(),
            controls_minimized: false,
            beam_offset: 0.0,
            textures: None,
            pending_backdrop: backdrop,
            backdrop_grid: SphereGrid::default(),
        }
    }

    /// Re-read the completed words and update the session if they changed.
    pub fn sync_input(&mut self) {
        let words = completed_words(&self.input_text);
        if self.session.update(&words).changed() {
            self.camera.apply_goal(&self.session.camera_goal());
        }
    }

    /// Clear the input and return to the overview.
    ///
    /// The view is reset even when the sequence was already empty, so a
    /// panned or zoomed camera always comes back.
    pub fn reset(&mut self) {
        self.input_text.clear();
        self.session.reset();
        self.camera.apply_goal(&CameraGoal::overview());
    }

    fn ensure_textures(&mut self, ctx: &egui::Context) {
        if self.textures.is_some() {
            return;
        }
        let repeat = egui::TextureOptions {
            wrap_mode: egui::TextureWrapMode::Repeat,
            ..egui::TextureOptions::LINEAR
        };
        let backdrop = self.pending_backdrop.take().map(|img| {
            log::info!("backdrop texture {}x{}", img.width(), img.height());
            upload(ctx, "nebula", &img, egui::TextureOptions::LINEAR)
        });

        self.textures = Some(SceneTextures {
            star: upload(ctx, "star", &sprites::star_texture(), egui::TextureOptions::LINEAR),
            flare: upload(ctx, "flare", &sprites::flare_texture(), egui::TextureOptions::LINEAR),
            beam: upload(ctx, "beam", &sprites::beam_texture(), repeat),
            backdrop,
        });
    }
}

fn upload(
    ctx: &egui::Context,
    name: &str,
    img: &RgbaImage,
    options: egui::TextureOptions,
) -> egui::TextureHandle {
    let size = [img.width() as usize, img.height() as usize];
    let image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
    ctx.load_texture(name, image, options)
}

impl eframe::App for GalaxyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_textures(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                self.draw_viewport(ui);
            });

        self.draw_controls(ctx);
        self.draw_nav_panel(ctx);

        // Camera easing and beam scroll run every frame
        ctx.request_repaint();
    }
}
