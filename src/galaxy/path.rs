//! Connecting beam between consecutive word stars.
//!
//! A centripetal Catmull-Rom spline through the word positions, sampled
//! uniformly by arc length, wrapped in a thin tube. Tube frames use
//! parallel transport so the rings do not twist along the curve.

use crate::fast_math::{add, cross, distance_squared, dot, length, normalize, scale, sub, Vec3};

/// Curve samples per word vertex.
pub const SEGMENTS_PER_VERTEX: usize = 20;
/// Tube radius in world units.
pub const TUBE_RADIUS: f32 = 3.0;
/// Ring vertex count.
pub const RADIAL_SEGMENTS: usize = 8;
/// Arc-length lookup resolution.
const ARC_DIVISIONS: usize = 200;

/// Centripetal Catmull-Rom spline through a fixed set of control points.
#[derive(Debug, Clone)]
pub struct CatmullRom {
    points: Vec<Vec3>,
}

/// Cubic `c0 + c1 t + c2 t² + c3 t³` on one axis.
#[derive(Debug, Clone, Copy)]
struct Cubic([f32; 4]);

impl Cubic {
    fn hermite(x0: f32, x1: f32, t0: f32, t1: f32) -> Self {
        Self([
            x0,
            t0,
            -3.0 * x0 + 3.0 * x1 - 2.0 * t0 - t1,
            2.0 * x0 - 2.0 * x1 + t0 + t1,
        ])
    }

    /// Non-uniform Catmull-Rom segment between `x1` and `x2`.
    fn nonuniform(x0: f32, x1: f32, x2: f32, x3: f32, dt0: f32, dt1: f32, dt2: f32) -> Self {
        let mut t1 = (x1 - x0) / dt0 - (x2 - x0) / (dt0 + dt1) + (x2 - x1) / dt1;
        let mut t2 = (x2 - x1) / dt1 - (x3 - x1) / (dt1 + dt2) + (x3 - x2) / dt2;
        t1 *= dt1;
        t2 *= dt1;
        Self::hermite(x1, x2, t1, t2)
    }

    #[inline]
    fn eval(&self, t: f32) -> f32 {
        let [c0, c1, c2, c3] = self.0;
        c0 + t * (c1 + t * (c2 + t * c3))
    }
}

impl CatmullRom {
    /// `None` below two control points.
    pub fn new(points: Vec<Vec3>) -> Option<Self> {
        if points.len() < 2 {
            return None;
        }
        Some(Self { points })
    }

    /// Point at parameter `t ∈ [0, 1]` (not arc-length uniform).
    pub fn point(&self, t: f32) -> Vec3 {
        let pts = &self.points;
        let l = pts.len();
        let p = (l - 1) as f32 * t.clamp(0.0, 1.0);
        let mut seg = p.floor() as usize;
        let mut weight = p - seg as f32;
        if seg >= l - 1 {
            seg = l - 2;
            weight = 1.0;
        }

        let p1 = pts[seg];
        let p2 = pts[seg + 1];
        // Open ends are extrapolated by reflection
        let p0 = if seg > 0 { pts[seg - 1] } else { sub(scale(p1, 2.0), p2) };
        let p3 = if seg + 2 < l { pts[seg + 2] } else { sub(scale(p2, 2.0), p1) };

        // Centripetal: knot spacing = sqrt(chord length)
        let mut dt0 = distance_squared(p0, p1).powf(0.25);
        let mut dt1 = distance_squared(p1, p2).powf(0.25);
        let mut dt2 = distance_squared(p2, p3).powf(0.25);
        if dt1 < 1e-4 {
            dt1 = 1.0;
        }
        if dt0 < 1e-4 {
            dt0 = dt1;
        }
        if dt2 < 1e-4 {
            dt2 = dt1;
        }

        let mut out = [0.0; 3];
        for a in 0..3 {
            out[a] = Cubic::nonuniform(p0[a], p1[a], p2[a], p3[a], dt0, dt1, dt2).eval(weight);
        }
        out
    }

    /// Cumulative chord lengths over `ARC_DIVISIONS` uniform-t steps.
    fn arc_lengths(&self) -> Vec<f32> {
        let mut lengths = Vec::with_capacity(ARC_DIVISIONS + 1);
        let mut last = self.point(0.0);
        let mut sum = 0.0;
        lengths.push(0.0);
        for i in 1..=ARC_DIVISIONS {
            let current = self.point(i as f32 / ARC_DIVISIONS as f32);
            sum += length(sub(current, last));
            lengths.push(sum);
            last = current;
        }
        lengths
    }

    /// Map arc-length fraction `u` to curve parameter `t`.
    fn u_to_t(lengths: &[f32], u: f32) -> f32 {
        let total = lengths[lengths.len() - 1];
        if total <= 0.0 {
            return u;
        }
        let target = u * total;
        let hi = lengths.partition_point(|&l| l < target).min(lengths.len() - 1);
        if hi == 0 {
            return 0.0;
        }
        let lo = hi - 1;
        let span = lengths[hi] - lengths[lo];
        let frac = if span > 0.0 { (target - lengths[lo]) / span } else { 0.0 };
        (lo as f32 + frac) / (lengths.len() - 1) as f32
    }

    /// `segments + 1` points spaced evenly along the curve.
    pub fn spaced_points(&self, segments: usize) -> Vec<Vec3> {
        let lengths = self.arc_lengths();
        (0..=segments)
            .map(|i| self.point(Self::u_to_t(&lengths, i as f32 / segments as f32)))
            .collect()
    }
}

/// Sampled beam: centerline plus one ring of tube vertices per sample.
#[derive(Debug, Clone)]
pub struct BeamPath {
    /// Centerline, `vertices * SEGMENTS_PER_VERTEX + 1` points
    pub samples: Vec<Vec3>,
    /// Texture coordinate along the beam, 0 → 1
    pub u: Vec<f32>,
    /// Tube rings, one per sample
    pub rings: Vec<[Vec3; RADIAL_SEGMENTS]>,
}

impl BeamPath {
    /// Build the beam through `vertices`; `None` below two.
    pub fn build(vertices: &[Vec3]) -> Option<Self> {
        let curve = CatmullRom::new(vertices.to_vec())?;
        let segments = vertices.len() * SEGMENTS_PER_VERTEX;
        let samples = curve.spaced_points(segments);
        let u = (0..=segments).map(|i| i as f32 / segments as f32).collect();

        let tangents = tangents(&samples);
        let frames = transport_frames(&tangents);
        let rings = samples
            .iter()
            .zip(&frames)
            .map(|(&p, &(n, b))| {
                let mut ring = [[0.0; 3]; RADIAL_SEGMENTS];
                for (j, v) in ring.iter_mut().enumerate() {
                    let angle = j as f32 / RADIAL_SEGMENTS as f32 * std::f32::consts::TAU;
                    let (sin, cos) = angle.sin_cos();
                    let offset = add(scale(n, -cos), scale(b, sin));
                    *v = add(p, scale(offset, TUBE_RADIUS));
                }
                ring
            })
            .collect();

        Some(Self { samples, u, rings })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

fn tangents(samples: &[Vec3]) -> Vec<Vec3> {
    let n = samples.len();
    (0..n)
        .map(|i| {
            let a = samples[i.saturating_sub(1)];
            let b = samples[(i + 1).min(n - 1)];
            normalize(sub(b, a))
        })
        .collect()
}

/// Parallel-transport (normal, binormal) pairs along the tangents.
fn transport_frames(tangents: &[Vec3]) -> Vec<(Vec3, Vec3)> {
    let mut frames = Vec::with_capacity(tangents.len());
    let Some(&t0) = tangents.first() else {
        return frames;
    };

    // Seed with the axis least aligned with the first tangent
    let ax = [t0[0].abs(), t0[1].abs(), t0[2].abs()];
    let seed = if ax[0] <= ax[1] && ax[0] <= ax[2] {
        [1.0, 0.0, 0.0]
    } else if ax[1] <= ax[2] {
        [0.0, 1.0, 0.0]
    } else {
        [0.0, 0.0, 1.0]
    };
    let mut normal = normalize(cross(t0, normalize(cross(t0, seed))));
    frames.push((normal, cross(t0, normal)));

    for w in tangents.windows(2) {
        let (prev, cur) = (w[0], w[1]);
        let axis = cross(prev, cur);
        if length(axis) > f32::EPSILON {
            let axis = normalize(axis);
            let angle = dot(prev, cur).clamp(-1.0, 1.0).acos();
            normal = rotate_about(normal, axis, angle);
        }
        frames.push((normal, cross(cur, normal)));
    }
    frames
}

/// Rodrigues rotation of `v` about unit `axis`.
fn rotate_about(v: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    let term1 = scale(v, cos);
    let term2 = scale(cross(axis, v), sin);
    let term3 = scale(axis, dot(axis, v) * (1.0 - cos));
    add(add(term1, term2), term3)
}
