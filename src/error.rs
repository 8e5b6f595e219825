//! Error type for the few fallible edges of the galaxy.
//!
//! Nothing in the highlight path can fail; errors only come from loading
//! decorative assets and from configurations that cannot build a field.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    /// A decorative asset (nebula backdrop) could not be read or decoded.
    #[error("failed to load asset {path:?}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
