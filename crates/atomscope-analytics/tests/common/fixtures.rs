//! Seeded data generators.

use atomscope_analytics::{AtomVector, Dataset};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Centers of the three well-separated blobs produced by [`blob_dataset`].
pub const BLOB_CENTERS: [[f64; 3]; 3] = [[0.0, 0.0, 0.0], [10.0, 10.0, 0.0], [0.0, 10.0, 10.0]];

/// `count` rows of `dimension` components drawn uniformly from `[-1, 1)`.
pub fn random_rows(count: usize, dimension: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..dimension).map(|_| rng.gen_range(-1.0..1.0)).collect())
        .collect()
}

/// `per_blob` points around each of [`BLOB_CENTERS`], jittered by at most 0.5
/// per component. Points are interleaved blob by blob.
pub fn blob_dataset(per_blob: usize, seed: u64) -> Dataset {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut vectors = Vec::with_capacity(per_blob * BLOB_CENTERS.len());
    for i in 0..per_blob {
        for (b, center) in BLOB_CENTERS.iter().enumerate() {
            let components = center
                .iter()
                .map(|c| c + rng.gen_range(-0.5..0.5))
                .collect();
            vectors.push(AtomVector::new((i * BLOB_CENTERS.len() + b) as u64, components));
        }
    }
    Dataset::new(vectors)
}

/// Blob index of the point at `index` in a [`blob_dataset`].
pub fn blob_of(index: usize) -> usize {
    index % BLOB_CENTERS.len()
}
