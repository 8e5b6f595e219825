//! Galaxy core: the word-to-star mapping and highlight engine.
//!
//! ```text
//! text ─▶ input ─▶ registry ─▶ neighbors ─▶ session ─▶ render
//!                                   ▲           │
//!                                 field       path / camera / nav
//! ```

pub mod camera;
pub mod field;
pub mod input;
pub mod nav;
pub mod neighbors;
pub mod path;
pub mod registry;
pub mod session;
