pub mod config;
pub mod error;
pub mod galaxy;
pub mod render;

// Deep-Fried Rust: カリッカリ最適化モジュール
pub mod branchless;
pub mod fast_math;

pub use config::GalaxyConfig;
pub use error::GalaxyError;
pub use galaxy::registry::CollisionPolicy;
pub use galaxy::session::{GalaxySession, UpdateOutcome};
