//! End-to-end checks through the public API: text in, highlight state out.

use std::collections::HashSet;

use semantic_galaxy::config::NeighborIndex;
use semantic_galaxy::galaxy::camera::{CameraGoal, OrbitCamera};
use semantic_galaxy::galaxy::input::{completed_words, token_id};
use semantic_galaxy::galaxy::neighbors::find_nearest;
use semantic_galaxy::{CollisionPolicy, GalaxyConfig, GalaxySession, UpdateOutcome};

fn config(seed: u64) -> GalaxyConfig {
    GalaxyConfig {
        total_points: 4_000,
        background_points: 300,
        cluster_count: 16,
        neighbor_count: 80,
        seed: Some(seed),
        ..Default::default()
    }
}

#[test]
fn typing_a_sentence_word_by_word() {
    let mut session = GalaxySession::new(config(1)).unwrap();
    let text = "the quick brown fox jumps over lazy";

    let mut updates = 0;
    for end in 1..=text.len() {
        let words = completed_words(&text[..end]);
        if session.update(&words).changed() {
            updates += 1;
        }
    }
    // First empty update + one per completed word ("lazy" is still partial)
    assert_eq!(updates, 7);
    assert_eq!(session.sequence().len(), 6);
    assert_eq!(session.markers().len(), 6);

    let nav = session.nav().expect("nav visible at six words");
    assert_eq!(nav.token_id, token_id("over"));
    assert!(session.beam().is_some());
}

#[test]
fn same_seed_same_galaxy_and_assignments() {
    let words = ["orion", "lyra", "vega"];
    let mut a = GalaxySession::new(config(99)).unwrap();
    let mut b = GalaxySession::new(config(99)).unwrap();
    a.update(&words);
    b.update(&words);
    assert_eq!(a.field().positions, b.field().positions);
    assert_eq!(a.markers(), b.markers());
    assert_eq!(a.field().colors, b.field().colors);
}

#[test]
fn thousand_words_do_not_collide_on_full_pool() {
    let cfg = GalaxyConfig {
        background_points: 0,
        neighbor_count: 1,
        seed: Some(7),
        ..Default::default()
    };
    let mut session = GalaxySession::new(cfg).unwrap();
    let words: Vec<String> = (0..1_200).map(|i| format!("token{}", i)).collect();
    session.update(&words);

    let stars: HashSet<usize> = session.markers().iter().map(|m| m.star).collect();
    assert_eq!(stars.len(), 1_200);
    assert_eq!(session.registry().used_count(), 1_200);
}

#[test]
fn linear_probe_policy_is_unique_on_a_tiny_pool() {
    let cfg = GalaxyConfig {
        total_points: 10,
        background_points: 0,
        cluster_count: 2,
        neighbor_count: 3,
        seed: Some(3),
        collision_policy: CollisionPolicy::LinearProbe,
        ..Default::default()
    };
    let mut session = GalaxySession::new(cfg).unwrap();
    let words: Vec<String> = (0..10).map(|i| format!("w{}", i)).collect();
    session.update(&words);
    let stars: HashSet<usize> = session.markers().iter().map(|m| m.star).collect();
    assert_eq!(stars.len(), 10);
}

#[test]
fn highlight_state_is_recomputed_not_accumulated() {
    let mut session = GalaxySession::new(config(5)).unwrap();
    session.update(&["alpha", "beta", "gamma"]);
    session.update(&["alpha"]);

    // Only alpha's neighborhood may differ from 30% of base
    let star = session.markers()[0].star;
    let lit: HashSet<usize> = find_nearest(&session.field().positions, star, 80)
        .into_iter()
        .map(|n| n.index)
        .collect();
    let f = session.field();
    for i in (0..f.len()).filter(|i| !lit.contains(i)) {
        let c = f.color(i);
        let b = f.base_color(i);
        for ch in 0..3 {
            assert!((c[ch] - b[ch] * 0.3).abs() < 1e-6);
        }
    }
    assert!(session.beam().is_none());
}

#[test]
fn reset_returns_to_overview_and_camera_follows() {
    let mut session = GalaxySession::new(config(8)).unwrap();
    let mut camera = OrbitCamera::default();

    session.update(&["a", "b"]);
    camera.apply_goal(&session.camera_goal());
    assert_ne!(camera.target, [0.0; 3]);

    assert_eq!(session.reset(), UpdateOutcome::Updated);
    camera.apply_goal(&session.camera_goal());
    assert_eq!(session.camera_goal(), CameraGoal::overview());
    assert_eq!(camera.target, [0.0; 3]);
    assert_eq!(camera.radius, 900.0);
    assert_eq!(session.field().colors, session.field().base_colors);
}

#[test]
fn grid_index_session_agrees_with_brute_force() {
    let words = ["andromeda", "pegasus", "cygnus", "draco", "hydra", "lynx"];
    let mut brute = GalaxySession::new(config(21)).unwrap();
    let mut grid = GalaxySession::new(GalaxyConfig {
        neighbor_index: NeighborIndex::Grid,
        ..config(21)
    })
    .unwrap();
    brute.update(&words);
    grid.update(&words);
    assert_eq!(brute.field().colors, grid.field().colors);
    assert_eq!(brute.field().sizes, grid.field().sizes);
    assert_eq!(brute.nav(), grid.nav());
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = GalaxyConfig { cluster_count: 0, ..config(1) };
    let err = GalaxySession::new(cfg).err().expect("zero clusters must fail");
    assert!(err.to_string().contains("cluster_count"));
}
