//! Randomness for bagging: bootstrap resamples and per-node candidate draws.
//!
//! All generators are explicit `Xoshiro256PlusPlus` instances threaded through
//! the trainer; there is no ambient global seed. Each tree derives its own
//! generator from `(seed, tree_index)` so trees can be grown in any order, or
//! in parallel, and still reproduce the sequential ensemble exactly.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Derive the generator for one tree from the run seed.
///
/// SplitMix64-style mixing of the tree index keeps per-tree seeds
/// decorrelated even though the run seeds are small integers.
pub fn tree_rng(seed: u64, tree_index: u32) -> Xoshiro256PlusPlus {
    let mut z = seed ^ (u64::from(tree_index).wrapping_add(1)).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    Xoshiro256PlusPlus::seed_from_u64(z ^ (z >> 31))
}

/// Draw a bootstrap resample: `n_rows` indices sampled with replacement.
pub fn bootstrap_indices(rng: &mut Xoshiro256PlusPlus, n_rows: usize) -> Vec<u32> {
    (0..n_rows).map(|_| rng.gen_range(0..n_rows) as u32).collect()
}

/// Rows absent from a bootstrap resample (the out-of-bag set).
pub fn out_of_bag(indices: &[u32], n_rows: usize) -> Vec<u32> {
    let mut in_bag = vec![false; n_rows];
    for &i in indices {
        in_bag[i as usize] = true;
    }
    (0..n_rows as u32).filter(|&r| !in_bag[r as usize]).collect()
}

/// Per-node split-candidate draws.
///
/// Keeps a reusable pool of predictor indices; each draw is a partial
/// Fisher-Yates shuffle selecting `mtry` distinct predictors. The candidate
/// slice is in drawn order, which is also the tie-break order during split
/// search.
#[derive(Debug, Clone)]
pub struct CandidateSampler {
    pool: Vec<u32>,
    mtry: usize,
}

impl CandidateSampler {
    /// Create a sampler over `n_features` predictors drawing `mtry` at a time.
    pub fn new(n_features: usize, mtry: usize) -> Self {
        debug_assert!(mtry >= 1 && mtry <= n_features);
        Self {
            pool: (0..n_features as u32).collect(),
            mtry,
        }
    }

    /// Draw a fresh candidate set for one node.
    pub fn draw(&mut self, rng: &mut Xoshiro256PlusPlus) -> &[u32] {
        let n = self.pool.len();
        for i in 0..self.mtry {
            let j = rng.gen_range(i..n);
            self.pool.swap(i, j);
        }
        &self.pool[..self.mtry]
    }
}
