//! Scene rendering.
//!
//! Everything here is per-frame and read-only with respect to the session:
//!
//! - `projection`: world → screen, rayon-parallel over the star buffers
//! - `painter`: egui meshes (stars, background, flares, beam, nebula)
//! - `sprites`: procedural glow textures
//! - `backdrop`: optional nebula image and its sphere grid

pub mod backdrop;
pub mod painter;
pub mod projection;
pub mod sprites;
