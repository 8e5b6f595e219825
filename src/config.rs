//! Galaxy configuration.
//!
//! One plain struct with a `Default` impl carrying the tuned constants.
//! The binary overrides individual fields from CLI flags; library users
//! construct it with struct-update syntax.

use std::path::PathBuf;

use crate::error::GalaxyError;
use crate::galaxy::registry::CollisionPolicy;

/// Which neighbor backend the session queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NeighborIndex {
    /// Scan every star per query
    #[default]
    BruteForce,
    /// Uniform cell grid built once at start-up
    Grid,
}

/// Stars available for word assignment.
pub const TOTAL_POINTS: usize = 40_000;
/// Decorative far-field stars.
pub const BACKGROUND_POINTS: usize = 50_000;
/// Nominal extent of the clustered field (world units).
pub const SPACE_SIZE: f32 = 800.0;
pub const CLUSTER_COUNT: usize = 80;
/// Neighbors highlighted around each word's star.
pub const NEIGHBOR_COUNT: usize = 250;

/// Configuration for building a [`crate::GalaxySession`].
#[derive(Debug, Clone)]
pub struct GalaxyConfig {
    /// Size of the point pool
    pub total_points: usize,
    /// Size of the decorative background shell
    pub background_points: usize,
    /// Extent of the clustered field
    pub space_size: f32,
    /// Number of Gaussian-like blobs
    pub cluster_count: usize,
    /// K for the neighbor highlight
    pub neighbor_count: usize,
    /// Fixed seed for reproducible galaxies (`None` = entropy)
    pub seed: Option<u64>,
    /// How the registry handles an already-claimed star
    pub collision_policy: CollisionPolicy,
    /// Neighbor backend
    pub neighbor_index: NeighborIndex,
    /// Optional equirectangular backdrop image
    pub nebula_path: Option<PathBuf>,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            total_points: TOTAL_POINTS,
            background_points: BACKGROUND_POINTS,
            space_size: SPACE_SIZE,
            cluster_count: CLUSTER_COUNT,
            neighbor_count: NEIGHBOR_COUNT,
            seed: None,
            collision_policy: CollisionPolicy::BoundedRetry,
            neighbor_index: NeighborIndex::BruteForce,
            nebula_path: None,
        }
    }
}

impl GalaxyConfig {
    /// Reject configurations that cannot produce a usable field.
    pub fn validate(&self) -> Result<(), GalaxyError> {
        if self.total_points < 2 {
            return Err(GalaxyError::InvalidConfig(format!(
                "total_points must be at least 2 (got {})",
                self.total_points
            )));
        }
        if self.cluster_count == 0 {
            return Err(GalaxyError::InvalidConfig(
                "cluster_count must be non-zero".into(),
            ));
        }
        if self.neighbor_count == 0 {
            return Err(GalaxyError::InvalidConfig(
                "neighbor_count must be non-zero".into(),
            ));
        }
        if !(self.space_size.is_finite() && self.space_size > 0.0) {
            return Err(GalaxyError::InvalidConfig(format!(
                "space_size must be a positive finite number (got {})",
                self.space_size
            )));
        }
        Ok(())
    }

    /// Scale applied to a star position for the navigation readout.
    pub fn norm_scale(&self) -> f32 {
        1.0 / (self.space_size / 1.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = GalaxyConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.total_points, 40_000);
        assert_eq!(cfg.neighbor_count, 250);
    }

    #[test]
    fn rejects_empty_pool() {
        let cfg = GalaxyConfig { total_points: 1, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(GalaxyError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_clusters_and_neighbors() {
        let cfg = GalaxyConfig { cluster_count: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = GalaxyConfig { neighbor_count: 0, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn norm_scale_matches_space() {
        let cfg = GalaxyConfig::default();
        assert!((cfg.norm_scale() - 1.5 / 800.0).abs() < 1e-9);
    }
}
