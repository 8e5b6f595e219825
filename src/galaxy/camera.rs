//! Camera rig: path framing, orbit controls, per-frame smoothing.
//!
//! The camera orbits a target point on a sphere `(theta, phi, radius)`.
//! Input and the visualization updater only move the *goal*; the eye
//! eases toward it by a fixed fraction every frame while always looking
//! straight at the target.

use std::f32::consts::FRAC_PI_2;

use crate::fast_math::{add, cross, deg_to_rad, length, lerp3, normalize, scale, sub, Vec3};

/// Vertical field of view.
pub const FOV_DEG: f32 = 60.0;
pub const NEAR: f32 = 1.0;
pub const FAR: f32 = 5000.0;
/// Extra distance so the framed box does not touch the edges.
pub const FRAME_MARGIN: f32 = 1.2;
/// Box padding around the newest word while the sequence is short.
pub const FRAME_PADDING: f32 = 150.0;
/// Orbit radius of the empty-sequence overview.
pub const DEFAULT_RADIUS: f32 = 900.0;
/// Eye position before the first frame.
pub const INITIAL_EYE: Vec3 = [0.0, 200.0, 900.0];
/// Fraction of the remaining distance covered each frame.
pub const SMOOTHING: f32 = 0.05;

pub const ORBIT_SPEED: f32 = 0.005;
/// Elevation stays this far away from the poles.
pub const PHI_LIMIT: f32 = FRAC_PI_2 - 0.1;
/// Pan distance per pixel, as a fraction of the radius.
pub const PAN_SPEED: f32 = 0.001;
pub const ZOOM_SPEED: f32 = 0.5;
pub const MIN_RADIUS: f32 = 50.0;
pub const MAX_RADIUS: f32 = 3000.0;

const WORLD_UP: Vec3 = [0.0, 1.0, 0.0];

/// Where the camera should end up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraGoal {
    pub target: Vec3,
    /// `None` keeps the current orbit radius
    pub radius: Option<f32>,
}

impl CameraGoal {
    /// Whole-galaxy view used when no word is entered.
    pub fn overview() -> Self {
        Self {
            target: [0.0; 3],
            radius: Some(DEFAULT_RADIUS),
        }
    }
}

/// Frame the axis-aligned box around `vertices`.
///
/// With `pad_last`, the box also covers the last vertex ± `FRAME_PADDING`
/// so a single word is viewed from a sensible distance. A degenerate box
/// (all vertices coincide, no padding) leaves the radius unchanged.
pub fn frame_path(vertices: &[Vec3], pad_last: bool) -> Option<CameraGoal> {
    let last = *vertices.last()?;

    let mut min = [f32::MAX; 3];
    let mut max = [f32::MIN; 3];
    let mut expand = |p: Vec3| {
        for a in 0..3 {
            min[a] = min[a].min(p[a]);
            max[a] = max[a].max(p[a]);
        }
    };
    for &v in vertices {
        expand(v);
    }
    if pad_last {
        expand(add(last, [FRAME_PADDING; 3]));
        expand(sub(last, [FRAME_PADDING; 3]));
    }

    let center = scale(add(min, max), 0.5);
    let size = sub(max, min);
    let max_extent = size[0].max(size[1]).max(size[2]);
    let distance = (max_extent / 2.0 / (deg_to_rad(FOV_DEG) / 2.0).tan()).abs() * FRAME_MARGIN;

    Some(CameraGoal {
        target: center,
        radius: (distance > 0.0).then_some(distance),
    })
}

/// Orthonormal camera frame for projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBasis {
    pub eye: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub forward: Vec3,
}

impl ViewBasis {
    /// Camera-space `(x, y, depth)` of a world point.
    #[inline]
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        let d = sub(p, self.eye);
        [
            crate::fast_math::dot(d, self.right),
            crate::fast_math::dot(d, self.up),
            crate::fast_math::dot(d, self.forward),
        ]
    }
}

/// Orbit camera with eased eye position.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Azimuth around the world up axis
    pub theta: f32,
    /// Elevation; starts at the pole, clamped once the user drags
    pub phi: f32,
    pub radius: f32,
    /// Look-at point (moves immediately)
    pub target: Vec3,
    /// Current eye (eases toward `goal_eye`)
    pub eye: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: FRAC_PI_2,
            radius: DEFAULT_RADIUS,
            target: [0.0; 3],
            eye: INITIAL_EYE,
        }
    }
}

impl OrbitCamera {
    /// Point the rig at a new goal.
    pub fn apply_goal(&mut self, goal: &CameraGoal) {
        self.target = goal.target;
        if let Some(r) = goal.radius {
            self.radius = r;
        }
    }

    /// Eye position implied by the orbit parameters.
    pub fn goal_eye(&self) -> Vec3 {
        let (sin_t, cos_t) = self.theta.sin_cos();
        let (sin_p, cos_p) = self.phi.sin_cos();
        add(
            self.target,
            [
                self.radius * sin_t * cos_p,
                self.radius * sin_p,
                self.radius * cos_t * cos_p,
            ],
        )
    }

    /// Advance one frame of easing.
    pub fn step(&mut self) {
        self.eye = lerp3(self.eye, self.goal_eye(), SMOOTHING);
    }

    /// Left-drag by `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.theta -= dx * ORBIT_SPEED;
        self.phi = (self.phi + dy * ORBIT_SPEED).clamp(-PHI_LIMIT, PHI_LIMIT);
    }

    /// Right-drag by `(dx, dy)` pixels: slide the target in the view plane.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let speed = self.radius * PAN_SPEED;
        let basis = self.basis();
        self.target = add(self.target, scale(basis.right, -dx * speed));
        self.target = add(self.target, scale(basis.up, dy * speed));
    }

    /// Wheel by `delta` (positive = away).
    pub fn zoom(&mut self, delta: f32) {
        self.radius = (self.radius + delta * ZOOM_SPEED).clamp(MIN_RADIUS, MAX_RADIUS);
    }

    /// Current view frame, looking from `eye` at `target`.
    pub fn basis(&self) -> ViewBasis {
        let mut forward = normalize(sub(self.target, self.eye));
        if length(forward) == 0.0 {
            forward = [0.0, 0.0, -1.0];
        }
        let mut right = cross(forward, WORLD_UP);
        if length(right) < 1e-6 {
            // Looking straight up or down: take right from the azimuth
            let (sin_t, cos_t) = self.theta.sin_cos();
            right = [cos_t, 0.0, -sin_t];
        }
        let right = normalize(right);
        let up = normalize(cross(right, forward));
        ViewBasis {
            eye: self.eye,
            right,
            up,
            forward,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fast_math::{distance_squared, dot};

    #[test]
    fn overview_goal() {
        let goal = CameraGoal::overview();
        assert_eq!(goal.target, [0.0; 3]);
        assert_eq!(goal.radius, Some(900.0));
    }

    #[test]
    fn single_padded_vertex_frames_300_cube() {
        let goal = frame_path(&[[10.0, 20.0, 30.0]], true).unwrap();
        assert_eq!(goal.target, [10.0, 20.0, 30.0]);
        // 300 / 2 / tan(30°) * 1.2
        let expected = 150.0 / (30.0f32.to_radians()).tan() * 1.2;
        assert!((goal.radius.unwrap() - expected).abs() < 1e-2);
    }

    #[test]
    fn unpadded_box_uses_largest_extent() {
        let goal = frame_path(&[[0.0, 0.0, 0.0], [400.0, 100.0, -50.0]], false).unwrap();
        assert_eq!(goal.target, [200.0, 50.0, -25.0]);
        let expected = 200.0 / (30.0f32.to_radians()).tan() * 1.2;
        assert!((goal.radius.unwrap() - expected).abs() < 1e-2);
    }

    #[test]
    fn degenerate_box_keeps_radius() {
        assert!(frame_path(&[], true).is_none());
        let goal = frame_path(&[[5.0; 3], [5.0; 3]], false).unwrap();
        assert_eq!(goal.radius, None);

        let mut cam = OrbitCamera::default();
        cam.radius = 420.0;
        cam.apply_goal(&goal);
        assert_eq!(cam.radius, 420.0);
        assert_eq!(cam.target, [5.0; 3]);
    }

    #[test]
    fn goal_eye_sits_on_orbit_sphere() {
        let mut cam = OrbitCamera::default();
        cam.target = [100.0, 0.0, -40.0];
        cam.theta = 0.7;
        cam.phi = 0.3;
        cam.radius = 500.0;
        let d = distance_squared(cam.goal_eye(), cam.target).sqrt();
        assert!((d - 500.0).abs() < 1e-2);
    }

    #[test]
    fn step_eases_five_percent() {
        let mut cam = OrbitCamera::default();
        let goal = cam.goal_eye();
        let before = distance_squared(cam.eye, goal).sqrt();
        cam.step();
        let after = distance_squared(cam.eye, goal).sqrt();
        assert!((after - before * 0.95).abs() < 1e-2);
        for _ in 0..500 {
            cam.step();
        }
        assert!(distance_squared(cam.eye, goal).sqrt() < 1e-2);
    }

    #[test]
    fn orbit_clamps_elevation() {
        let mut cam = OrbitCamera::default();
        cam.orbit(100.0, 10_000.0);
        assert!((cam.theta + 0.5).abs() < 1e-6);
        assert!((cam.phi - PHI_LIMIT).abs() < 1e-6);
        cam.orbit(0.0, -100_000.0);
        assert!((cam.phi + PHI_LIMIT).abs() < 1e-6);
    }

    #[test]
    fn zoom_clamps_radius() {
        let mut cam = OrbitCamera::default();
        cam.zoom(100.0);
        assert_eq!(cam.radius, 950.0);
        cam.zoom(-1e6);
        assert_eq!(cam.radius, MIN_RADIUS);
        cam.zoom(1e6);
        assert_eq!(cam.radius, MAX_RADIUS);
    }

    #[test]
    fn pan_moves_target_in_view_plane() {
        let mut cam = OrbitCamera::default();
        cam.eye = [0.0, 0.0, 900.0];
        cam.pan(10.0, 0.0);
        // Looking down -z: right is +x, dragging right moves the target left
        assert!((cam.target[0] + 9.0).abs() < 1e-4);
        assert!(cam.target[1].abs() < 1e-4 && cam.target[2].abs() < 1e-4);
    }

    #[test]
    fn basis_is_orthonormal_even_looking_straight_down() {
        let mut cam = OrbitCamera::default();
        for eye in [[0.0, 200.0, 900.0], [0.0, 900.0, 0.0]] {
            cam.eye = eye;
            let b = cam.basis();
            for v in [b.right, b.up, b.forward] {
                assert!((length(v) - 1.0).abs() < 1e-4);
            }
            assert!(dot(b.right, b.up).abs() < 1e-4);
            assert!(dot(b.right, b.forward).abs() < 1e-4);
            assert!(dot(b.up, b.forward).abs() < 1e-4);
        }
    }

    #[test]
    fn target_projects_to_view_axis() {
        let cam = OrbitCamera::default();
        let v = cam.basis().to_view(cam.target);
        assert!(v[0].abs() < 1e-3 && v[1].abs() < 1e-3);
        assert!(v[2] > 0.0);
    }
}
