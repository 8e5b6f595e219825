use std::path::PathBuf;

use clap::Parser;
use eframe::egui;

use semantic_galaxy::config::{self, GalaxyConfig, NeighborIndex};
use semantic_galaxy::render::backdrop::load_backdrop;
use semantic_galaxy::{CollisionPolicy, GalaxySession};

mod app;
mod ui;

use app::GalaxyApp;

// --- CLI Arguments ---
#[derive(Parser, Debug)]
#[command(version, about = "Explore words as stars in a 3D semantic galaxy", long_about = None)]
struct Args {
    /// Seed for a reproducible galaxy (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Stars available for word assignment
    #[arg(long, default_value_t = config::TOTAL_POINTS)]
    points: usize,

    /// Decorative far-field stars
    #[arg(long, default_value_t = config::BACKGROUND_POINTS)]
    background_points: usize,

    /// Number of star clusters
    #[arg(long, default_value_t = config::CLUSTER_COUNT)]
    clusters: usize,

    /// Neighbors highlighted around each word
    #[arg(long, default_value_t = config::NEIGHBOR_COUNT)]
    neighbors: usize,

    /// Equirectangular nebula image for the backdrop
    #[arg(long)]
    nebula: Option<PathBuf>,

    /// Guarantee distinct stars per word by probing for a free one
    #[arg(long)]
    probe_collisions: bool,

    /// Answer neighbor queries from a spatial grid instead of a full scan
    #[arg(long)]
    grid_index: bool,
}

impl Args {
    fn to_config(&self) -> GalaxyConfig {
        GalaxyConfig {
            total_points: self.points,
            background_points: self.background_points,
            cluster_count: self.clusters,
            neighbor_count: self.neighbors,
            seed: self.seed,
            collision_policy: if self.probe_collisions {
                CollisionPolicy::LinearProbe
            } else {
                CollisionPolicy::BoundedRetry
            },
            neighbor_index: if self.grid_index {
                NeighborIndex::Grid
            } else {
                NeighborIndex::BruteForce
            },
            nebula_path: self.nebula.clone(),
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let config = args.to_config();

    let session = match GalaxySession::new(config) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let backdrop = session.config().nebula_path.as_deref().and_then(|path| {
        load_backdrop(path)
            .map_err(|e| log::warn!("continuing without backdrop: {}", e))
            .ok()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Semantic Galaxy",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(GalaxyApp::new(session, backdrop)))
        }),
    )
    .expect("Failed to start Semantic Galaxy");
}
