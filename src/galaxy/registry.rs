//! Word Identity Registry.
//!
//! Maps each distinct (lowercased) word to one star for the lifetime of
//! the session. Entries are never reassigned or removed.
//!
//! Uniqueness between words is best-effort under the default policy: a
//! random index is redrawn up to `MAX_ATTEMPTS` times while it collides
//! with an already-claimed star, and the last draw is accepted if every
//! attempt collided. `LinearProbe` trades that for a guarantee up to pool
//! exhaustion.

use std::collections::{HashMap, HashSet};

use rand::Rng;

/// Redraw budget for `CollisionPolicy::BoundedRetry`.
pub const MAX_ATTEMPTS: usize = 1000;

/// What to do when a drawn star is already claimed by another word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Redraw up to `MAX_ATTEMPTS` times, then accept the collision.
    #[default]
    BoundedRetry,
    /// Draw once, then scan forward (wrapping) to the next free star.
    /// Unique until every star is claimed.
    LinearProbe,
}

/// Session-scoped word → star index map.
#[derive(Debug, Clone)]
pub struct WordRegistry {
    pool_size: usize,
    policy: CollisionPolicy,
    words: HashMap<String, usize>,
    used: HashSet<usize>,
}

impl WordRegistry {
    pub fn new(pool_size: usize, policy: CollisionPolicy) -> Self {
        Self {
            pool_size,
            policy,
            words: HashMap::new(),
            used: HashSet::new(),
        }
    }

    /// Star index for `word`, assigning one on first sight.
    ///
    /// # Panics
    /// If the registry was built with a pool size of zero.
    pub fn resolve<R: Rng + ?Sized>(&mut self, word: &str, rng: &mut R) -> usize {
        let key = word.to_lowercase();
        if let Some(&idx) = self.words.get(&key) {
            return idx;
        }

        let idx = match self.policy {
            CollisionPolicy::BoundedRetry => self.draw_bounded(rng),
            CollisionPolicy::LinearProbe => self.draw_probing(rng),
        };

        if self.used.contains(&idx) {
            log::debug!("registry: '{}' shares star {} with an earlier word", key, idx);
        } else {
            log::debug!("registry: '{}' -> star {}", key, idx);
        }

        self.used.insert(idx);
        self.words.insert(key, idx);
        idx
    }

    fn draw_bounded<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut idx = rng.gen_range(0..self.pool_size);
        let mut attempts = 1;
        while self.used.contains(&idx) && attempts < MAX_ATTEMPTS {
            idx = rng.gen_range(0..self.pool_size);
            attempts += 1;
        }
        idx
    }

    fn draw_probing<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let start = rng.gen_range(0..self.pool_size);
        (0..self.pool_size)
            .map(|step| (start + step) % self.pool_size)
            .find(|i| !self.used.contains(i))
            .unwrap_or(start)
    }

    /// Number of registered words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Number of distinct stars claimed (≤ `len()` when collisions happened).
    pub fn used_count(&self) -> usize {
        self.used.len()
    }

}
