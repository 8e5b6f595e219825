//! Point Field Generator.
//!
//! Builds the star pool the words land on:
//!
//! - `CLUSTER_COUNT` anisotropic blobs with random density weights
//! - each star: 50% uniform "noise" blob, 50% weighted cluster pick
//! - position sampled on a per-axis-scaled sphere with sqrt radial falloff
//! - color from the stellar palette × random brightness
//!
//! Storage is structure-of-arrays (`positions`, `base_colors`, `colors`,
//! `sizes`), flat `[x,y,z, x,y,z, ...]` buffers the renderer and the
//! neighbor scan walk sequentially.

use rand::Rng;

use crate::branchless::color::star_palette;
use crate::config::GalaxyConfig;
use crate::fast_math::Vec3;

/// Baseline displayed size of a star.
pub const BASE_SIZE: f32 = 1.0;

/// Generation-time blob; discarded once the stars are placed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub center: Vec3,
    /// Anisotropic radii (rx, ry, rz)
    pub radii: Vec3,
    /// Relative pick weight
    pub density: f32,
}

/// Generate `count` clusters inside a cube of side `space_size * 1.8`.
pub fn generate_clusters<R: Rng + ?Sized>(count: usize, space_size: f32, rng: &mut R) -> Vec<Cluster> {
    (0..count)
        .map(|_| {
            let center = [
                (rng.gen::<f32>() - 0.5) * space_size * 1.8,
                (rng.gen::<f32>() - 0.5) * space_size * 1.8,
                (rng.gen::<f32>() - 0.5) * space_size * 1.8,
            ];
            let radii = [
                50.0 + rng.gen::<f32>() * 200.0,
                50.0 + rng.gen::<f32>() * 200.0,
                50.0 + rng.gen::<f32>() * 200.0,
            ];
            Cluster {
                center,
                radii,
                density: 0.5 + rng.gen::<f32>() * 1.5,
            }
        })
        .collect()
}

/// Weighted pick by cumulative-weight subtraction.
///
/// `r` is a draw in `[0, total_weight)`. Falls back to the first cluster
/// when float rounding leaves a positive remainder after the last one.
pub fn pick_cluster(clusters: &[Cluster], mut r: f32) -> usize {
    for (i, c) in clusters.iter().enumerate() {
        r -= c.density;
        if r <= 0.0 {
            return i;
        }
    }
    0
}

/// Sample a point inside an ellipsoidal blob.
///
/// Uniform azimuth, uniform-on-sphere polar angle `acos(2v-1)`, radial
/// distance `sqrt(w)` so the blob reads as a shell-weighted cloud rather
/// than a bright core.
pub fn sample_in_blob<R: Rng + ?Sized>(center: Vec3, radii: Vec3, rng: &mut R) -> Vec3 {
    let u: f32 = rng.gen();
    let v: f32 = rng.gen();
    let theta = std::f32::consts::TAU * u;
    let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
    let dist = rng.gen::<f32>().sqrt();

    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    [
        center[0] + dist * radii[0] * sin_phi * cos_theta,
        center[1] + dist * radii[1] * sin_phi * sin_theta,
        center[2] + dist * radii[2] * cos_phi,
    ]
}

/// The star pool.
#[derive(Debug, Clone)]
pub struct PointField {
    /// Flat xyz, immutable after generation
    pub positions: Vec<f32>,
    /// Flat rgb as generated, immutable after generation
    pub base_colors: Vec<f32>,
    /// Flat rgb as displayed, rewritten on every visualization update
    pub colors: Vec<f32>,
    /// Displayed size per star
    pub sizes: Vec<f32>,
}

impl PointField {
    /// Generate `config.total_points` stars from `rng`.
    pub fn generate<R: Rng + ?Sized>(config: &GalaxyConfig, rng: &mut R) -> Self {
        let n = config.total_points;
        let space = config.space_size;
        let palette = star_palette();

        let clusters = generate_clusters(config.cluster_count, space, rng);
        let total_weight: f32 = clusters.iter().map(|c| c.density).sum();

        let mut positions = Vec::with_capacity(n * 3);
        let mut base_colors = Vec::with_capacity(n * 3);

        for _ in 0..n {
            let (center, radii) = if rng.gen::<f32>() < 0.5 || clusters.is_empty() {
                // Noise blob for disorder
                let center = [
                    (rng.gen::<f32>() - 0.5) * space * 2.5,
                    (rng.gen::<f32>() - 0.5) * space * 2.5,
                    (rng.gen::<f32>() - 0.5) * space * 2.5,
                ];
                let r = 50.0 + rng.gen::<f32>() * 100.0;
                (center, [r, r, r])
            } else {
                let c = &clusters[pick_cluster(&clusters, rng.gen::<f32>() * total_weight)];
                (c.center, c.radii)
            };

            positions.extend_from_slice(&sample_in_blob(center, radii, rng));

            let star = palette[rng.gen_range(0..palette.len())];
            let brightness = 0.5 + rng.gen::<f32>() * 1.5;
            base_colors.extend_from_slice(&[
                star[0] * brightness,
                star[1] * brightness,
                star[2] * brightness,
            ]);
        }

        let colors = base_colors.clone();
        Self {
            positions,
            base_colors,
            colors,
            sizes: vec![BASE_SIZE; n],
        }
    }

    /// Build a field from explicit positions (base color white).
    pub fn from_positions(points: &[Vec3]) -> Self {
        let positions: Vec<f32> = points.iter().flat_map(|p| p.iter().copied()).collect();
        let base_colors = vec![1.0; points.len() * 3];
        Self {
            positions,
            colors: base_colors.clone(),
            base_colors,
            sizes: vec![BASE_SIZE; points.len()],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        [self.positions[i * 3], self.positions[i * 3 + 1], self.positions[i * 3 + 2]]
    }

    #[inline]
    pub fn base_color(&self, i: usize) -> Vec3 {
        [self.base_colors[i * 3], self.base_colors[i * 3 + 1], self.base_colors[i * 3 + 2]]
    }

    #[inline]
    pub fn color(&self, i: usize) -> Vec3 {
        [self.colors[i * 3], self.colors[i * 3 + 1], self.colors[i * 3 + 2]]
    }

    /// Displayed colors = base × `factor`, sizes = baseline.
    pub fn reset_display(&mut self, factor: f32) {
        for (dst, src) in self.colors.iter_mut().zip(&self.base_colors) {
            *dst = *src * factor;
        }
        self.sizes.fill(BASE_SIZE);
    }
}

/// Far-field decorative shell. Never highlighted.
#[derive(Debug, Clone)]
pub struct BackgroundField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl BackgroundField {
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let palette = star_palette();
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);

        for _ in 0..count {
            let r = 1000.0 + rng.gen::<f32>() * 2000.0;
            let theta = std::f32::consts::TAU * rng.gen::<f32>();
            let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
            positions.extend_from_slice(&[
                r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
                r * phi.cos(),
            ]);

            let col = palette[rng.gen_range(0..palette.len())];
            let dim = 0.3 + rng.gen::<f32>() * 0.3;
            colors.extend_from_slice(&[col[0] * dim, col[1] * dim, col[2] * dim]);
        }

        Self { positions, colors }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> GalaxyConfig {
        GalaxyConfig {
            total_points: 2_000,
            background_points: 500,
            cluster_count: 12,
            ..Default::default()
        }
    }

    #[test]
    fn generates_requested_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let field = PointField::generate(&small_config(), &mut rng);
        assert_eq!(field.len(), 2_000);
        assert_eq!(field.positions.len(), 6_000);
        assert_eq!(field.base_colors.len(), 6_000);
        assert!(field.sizes.iter().all(|&s| s == BASE_SIZE));
        assert_eq!(field.colors, field.base_colors);
    }

    #[test]
    fn same_seed_same_field() {
        let cfg = small_config();
        let a = PointField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(42));
        let b = PointField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(42));
        let c = PointField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(43));
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.base_colors, b.base_colors);
        assert_ne!(a.positions, c.positions);
    }

    #[test]
    fn points_stay_within_generation_bounds() {
        let cfg = small_config();
        let field = PointField::generate(&cfg, &mut ChaCha8Rng::seed_from_u64(1));
        // Noise centers reach 1.25 × space, plus a blob radius of at most 250
        let bound = cfg.space_size * 1.25 + 250.0;
        assert!(field.positions.iter().all(|v| v.is_finite() && v.abs() <= bound));
    }

    #[test]
    fn colors_are_palette_times_brightness() {
        let field = PointField::generate(&small_config(), &mut ChaCha8Rng::seed_from_u64(3));
        let palette = star_palette();
        for i in 0..field.len() {
            let c = field.base_color(i);
            let matched = palette.iter().any(|p| {
                let k = c[2] / p[2];
                (0.5 - 1e-4..2.0 + 1e-4).contains(&k)
                    && (c[0] - p[0] * k).abs() < 1e-4
                    && (c[1] - p[1] * k).abs() < 1e-4
            });
            assert!(matched, "star {} color {:?} not from palette", i, c);
        }
    }

    #[test]
    fn pick_cluster_uses_cumulative_weights() {
        let mk = |density| Cluster { center: [0.0; 3], radii: [1.0; 3], density };
        let clusters = [mk(1.0), mk(2.0), mk(1.0)];
        assert_eq!(pick_cluster(&clusters, 0.5), 0);
        assert_eq!(pick_cluster(&clusters, 1.0), 0);
        assert_eq!(pick_cluster(&clusters, 1.5), 1);
        assert_eq!(pick_cluster(&clusters, 3.5), 2);
        // Rounding overflow falls back to the first cluster
        assert_eq!(pick_cluster(&clusters, 4.5), 0);
    }

    #[test]
    fn blob_samples_stay_inside_ellipsoid() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let center = [10.0, -20.0, 30.0];
        let radii = [50.0, 100.0, 200.0];
        for _ in 0..1_000 {
            let p = sample_in_blob(center, radii, &mut rng);
            let e = ((p[0] - center[0]) / radii[0]).powi(2)
                + ((p[1] - center[1]) / radii[1]).powi(2)
                + ((p[2] - center[2]) / radii[2]).powi(2);
            assert!(e <= 1.0 + 1e-4);
        }
    }

    #[test]
    fn reset_display_dims_and_restores() {
        let mut field = PointField::generate(&small_config(), &mut ChaCha8Rng::seed_from_u64(5));
        field.sizes[10] = 4.0;
        field.reset_display(0.3);
        assert!((field.colors[30] - field.base_colors[30] * 0.3).abs() < 1e-6);
        assert_eq!(field.sizes[10], BASE_SIZE);
        field.reset_display(1.0);
        assert_eq!(field.colors, field.base_colors);
    }

    #[test]
    fn background_shell_radius() {
        let bg = BackgroundField::generate(1_000, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(bg.len(), 1_000);
        for p in bg.positions.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!(r >= 999.0 && r <= 3001.0, "radius {}", r);
        }
    }
}
