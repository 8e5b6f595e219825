//! Neighbor Finder.
//!
//! `find_nearest(positions, target, k)` → the `k` stars closest to
//! `target` by Euclidean distance, ascending, target excluded. Ties are
//! broken by ascending star index so results are deterministic.
//!
//! Two interchangeable backends sit behind [`NeighborSearch`]:
//!
//! - [`BruteForce`]: scan every star, partial sort. O(N + k log k).
//! - [`GridIndex`]: uniform cell grid, ring-by-ring expansion with a
//!   conservative lower bound on the distance to unvisited cells. Returns
//!   exactly what `BruteForce` returns.

use std::cmp::Ordering;

use crate::fast_math::{distance_squared, Vec3};

/// One entry of a neighbor set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    /// Squared Euclidean distance to the query star
    pub dist_sq: f32,
}

impl Neighbor {
    #[inline]
    pub fn distance(&self) -> f32 {
        self.dist_sq.sqrt()
    }
}

/// Ascending by distance, then by index.
#[inline]
fn neighbor_order(a: &Neighbor, b: &Neighbor) -> Ordering {
    a.dist_sq
        .total_cmp(&b.dist_sq)
        .then_with(|| a.index.cmp(&b.index))
}

/// Keep the `k` smallest entries of `candidates`, sorted.
fn take_k_smallest(mut candidates: Vec<Neighbor>, k: usize) -> Vec<Neighbor> {
    if k == 0 {
        return Vec::new();
    }
    if candidates.len() > k {
        candidates.select_nth_unstable_by(k - 1, neighbor_order);
        candidates.truncate(k);
    }
    candidates.sort_unstable_by(neighbor_order);
    candidates
}

#[inline]
fn point_at(positions: &[f32], i: usize) -> Vec3 {
    [positions[i * 3], positions[i * 3 + 1], positions[i * 3 + 2]]
}

/// Brute-force k nearest neighbors over a flat xyz buffer.
///
/// `k >= N - 1` returns every other star, sorted.
pub fn find_nearest(positions: &[f32], target: usize, k: usize) -> Vec<Neighbor> {
    let p = point_at(positions, target);
    let candidates: Vec<Neighbor> = positions
        .chunks_exact(3)
        .enumerate()
        .filter(|&(i, _)| i != target)
        .map(|(i, q)| Neighbor {
            index: i,
            dist_sq: distance_squared(p, [q[0], q[1], q[2]]),
        })
        .collect();
    take_k_smallest(candidates, k)
}

/// A k-nearest-neighbor backend over the star pool.
///
/// Implementations must return the same list as [`find_nearest`]:
/// ascending distance, ties by index, target excluded.
pub trait NeighborSearch: Send {
    fn nearest(&self, positions: &[f32], target: usize, k: usize) -> Vec<Neighbor>;

    fn name(&self) -> &'static str;
}

/// Scan-everything backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForce;

impl NeighborSearch for BruteForce {
    fn nearest(&self, positions: &[f32], target: usize, k: usize) -> Vec<Neighbor> {
        find_nearest(positions, target, k)
    }

    fn name(&self) -> &'static str {
        "brute-force"
    }
}

/// Target average stars per cell.
const STARS_PER_CELL: usize = 8;
/// Grid resolution cap per axis.
const MAX_CELLS_PER_AXIS: usize = 96;

/// Uniform grid over the bounding box of the pool.
///
/// Cells are stored CSR-style: `cell_start[c]..cell_start[c + 1]` indexes
/// into `items`.
#[derive(Debug, Clone)]
pub struct GridIndex {
    origin: Vec3,
    cell_size: Vec3,
    dims: [usize; 3],
    cell_start: Vec<u32>,
    items: Vec<u32>,
    len: usize,
}

impl GridIndex {
    /// Build over a flat xyz buffer. The same buffer must be passed to
    /// every query.
    pub fn build(positions: &[f32]) -> Self {
        let len = positions.len() / 3;

        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for q in positions.chunks_exact(3) {
            for a in 0..3 {
                min[a] = min[a].min(q[a]);
                max[a] = max[a].max(q[a]);
            }
        }
        if len == 0 {
            min = [0.0; 3];
            max = [0.0; 3];
        }

        let per_axis = ((len / STARS_PER_CELL).max(1) as f64).cbrt().ceil() as usize;
        let per_axis = per_axis.clamp(1, MAX_CELLS_PER_AXIS);
        let dims = [per_axis; 3];

        let mut cell_size = [1.0f32; 3];
        for a in 0..3 {
            let extent = (max[a] - min[a]).max(1e-3);
            cell_size[a] = extent / dims[a] as f32;
        }

        let mut grid = Self {
            origin: min,
            cell_size,
            dims,
            cell_start: Vec::new(),
            items: Vec::new(),
            len,
        };

        // Counting sort into cells
        let cell_count = dims[0] * dims[1] * dims[2];
        let cell_of: Vec<usize> = positions
            .chunks_exact(3)
            .map(|q| grid.flat(grid.cell_coords([q[0], q[1], q[2]])))
            .collect();
        let mut counts = vec![0u32; cell_count + 1];
        for &c in &cell_of {
            counts[c + 1] += 1;
        }
        for c in 0..cell_count {
            counts[c + 1] += counts[c];
        }
        let mut cursor = counts.clone();
        let mut items = vec![0u32; len];
        for (i, &c) in cell_of.iter().enumerate() {
            items[cursor[c] as usize] = i as u32;
            cursor[c] += 1;
        }

        grid.cell_start = counts;
        grid.items = items;
        grid
    }

    #[inline]
    fn cell_coords(&self, p: Vec3) -> [usize; 3] {
        let mut c = [0usize; 3];
        for a in 0..3 {
            let f = ((p[a] - self.origin[a]) / self.cell_size[a]).floor();
            c[a] = (f.max(0.0) as usize).min(self.dims[a] - 1);
        }
        c
    }

    #[inline]
    fn flat(&self, c: [usize; 3]) -> usize {
        (c[2] * self.dims[1] + c[1]) * self.dims[0] + c[0]
    }

    fn cell_items(&self, c: [usize; 3]) -> &[u32] {
        let f = self.flat(c);
        &self.items[self.cell_start[f] as usize..self.cell_start[f + 1] as usize]
    }

    /// Lower bound on the distance from `p` to any star outside the
    /// visited box `center ± ring`. `None` when the box covers the grid.
    fn unvisited_bound(&self, p: Vec3, center: [usize; 3], ring: usize) -> Option<f32> {
        let mut bound = f32::INFINITY;
        for a in 0..3 {
            if center[a] > ring {
                let face = self.origin[a] + (center[a] - ring) as f32 * self.cell_size[a];
                bound = bound.min(p[a] - face);
            }
            if center[a] + ring + 1 < self.dims[a] {
                let face = self.origin[a] + (center[a] + ring + 1) as f32 * self.cell_size[a];
                bound = bound.min(face - p[a]);
            }
        }
        if bound.is_infinite() {
            None
        } else {
            // Slack for cell assignment rounding at face boundaries
            let slack = 1e-4 * self.cell_size.iter().fold(0.0f32, |m, &s| m.max(s));
            Some((bound - slack).max(0.0))
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl NeighborSearch for GridIndex {
    fn nearest(&self, positions: &[f32], target: usize, k: usize) -> Vec<Neighbor> {
        debug_assert_eq!(positions.len() / 3, self.len, "grid built over a different buffer");
        if k == 0 || self.len < 2 {
            return Vec::new();
        }
        let k = k.min(self.len - 1);

        let p = point_at(positions, target);
        let center = self.cell_coords(p);
        let mut candidates: Vec<Neighbor> = Vec::with_capacity(k * 2);
        let mut ring = 0usize;

        loop {
            // Visit the shell of cells at Chebyshev distance `ring`
            let lo = [
                center[0].saturating_sub(ring),
                center[1].saturating_sub(ring),
                center[2].saturating_sub(ring),
            ];
            let hi = [
                (center[0] + ring).min(self.dims[0] - 1),
                (center[1] + ring).min(self.dims[1] - 1),
                (center[2] + ring).min(self.dims[2] - 1),
            ];
            for z in lo[2]..=hi[2] {
                for y in lo[1]..=hi[1] {
                    for x in lo[0]..=hi[0] {
                        let on_shell = x.abs_diff(center[0]) == ring
                            || y.abs_diff(center[1]) == ring
                            || z.abs_diff(center[2]) == ring;
                        if !on_shell {
                            continue;
                        }
                        for &i in self.cell_items([x, y, z]) {
                            let i = i as usize;
                            if i == target {
                                continue;
                            }
                            candidates.push(Neighbor {
                                index: i,
                                dist_sq: distance_squared(p, point_at(positions, i)),
                            });
                        }
                    }
                }
            }

            match self.unvisited_bound(p, center, ring) {
                None => break,
                Some(bound) if candidates.len() >= k => {
                    let mut kth = candidates.clone();
                    kth.select_nth_unstable_by(k - 1, neighbor_order);
                    if kth[k - 1].dist_sq < bound * bound {
                        break;
                    }
                }
                Some(_) => {}
            }
            ring += 1;
        }

        take_k_smallest(candidates, k)
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn line(n: usize) -> Vec<f32> {
        (0..n).flat_map(|i| [i as f32, 0.0, 0.0]).collect()
    }

    fn random_cloud(n: usize, seed: u64) -> Vec<f32> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n * 3).map(|_| rng.gen_range(-500.0..500.0)).collect()
    }

    #[test]
    fn returns_k_sorted_excluding_target() {
        let pos = random_cloud(3_000, 1);
        let result = find_nearest(&pos, 17, 250);
        assert_eq!(result.len(), 250);
        assert!(result.iter().all(|n| n.index != 17));
        for w in result.windows(2) {
            assert!(w[0].dist_sq <= w[1].dist_sq);
        }
    }

    #[test]
    fn nearest_on_a_line() {
        let pos = line(10);
        let result = find_nearest(&pos, 5, 4);
        let idx: Vec<usize> = result.iter().map(|n| n.index).collect();
        // 4 and 6 tie at 1, 3 and 7 tie at 4: lower index first
        assert_eq!(idx, vec![4, 6, 3, 7]);
        assert_eq!(result[0].dist_sq, 1.0);
        assert_eq!(result[2].dist_sq, 4.0);
        assert_eq!(result[3].distance(), 2.0);
    }

    #[test]
    fn k_beyond_pool_returns_everyone_else() {
        let pos = line(6);
        let result = find_nearest(&pos, 0, 50);
        assert_eq!(result.len(), 5);
        let idx: Vec<usize> = result.iter().map(|n| n.index).collect();
        assert_eq!(idx, vec![1, 2, 3, 4, 5]);
        assert!(find_nearest(&pos, 0, 0).is_empty());
    }

    #[test]
    fn duplicate_points_are_ordered_by_index() {
        let pos = vec![0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0];
        let result = find_nearest(&pos, 0, 3);
        let idx: Vec<usize> = result.iter().map(|n| n.index).collect();
        assert_eq!(idx, vec![1, 2, 3]);
    }

    #[test]
    fn grid_matches_brute_force() {
        let pos = random_cloud(5_000, 7);
        let grid = GridIndex::build(&pos);
        assert_eq!(grid.len(), 5_000);
        for &target in &[0usize, 1, 99, 2_500, 4_999] {
            for &k in &[1usize, 10, 250] {
                let expected = BruteForce.nearest(&pos, target, k);
                let got = grid.nearest(&pos, target, k);
                assert_eq!(got, expected, "target {} k {}", target, k);
            }
        }
    }

    #[test]
    fn grid_handles_clustered_and_degenerate_input() {
        // Tight cluster plus far outliers, and a flat plane (zero z extent)
        let mut pos = random_cloud(500, 3);
        for v in pos.iter_mut() {
            *v *= 0.01;
        }
        pos.extend_from_slice(&[1_000.0, 1_000.0, 1_000.0, -1_000.0, 0.0, 0.0]);
        let grid = GridIndex::build(&pos);
        assert_eq!(grid.nearest(&pos, 500, 5), find_nearest(&pos, 500, 5));
        assert_eq!(grid.nearest(&pos, 3, 40), find_nearest(&pos, 3, 40));

        let plane: Vec<f32> = (0..400).flat_map(|i| [(i % 20) as f32, (i / 20) as f32, 0.0]).collect();
        let grid = GridIndex::build(&plane);
        assert_eq!(grid.nearest(&plane, 210, 12), find_nearest(&plane, 210, 12));
    }

    #[test]
    fn grid_k_beyond_pool() {
        let pos = line(30);
        let grid = GridIndex::build(&pos);
        let got = grid.nearest(&pos, 29, 1_000);
        assert_eq!(got.len(), 29);
        assert_eq!(got, find_nearest(&pos, 29, 1_000));
    }

    #[test]
    fn huge_k_is_capped_to_the_pool() {
        let pos = line(12);
        let grid = GridIndex::build(&pos);
        assert_eq!(grid.nearest(&pos, 0, usize::MAX).len(), 11);
        assert_eq!(find_nearest(&pos, 0, usize::MAX).len(), 11);
    }
}
