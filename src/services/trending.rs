use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

use crate::services::catalog::Catalog;

/// Draws the "you may also like" row
///
/// Samples `count` distinct titles from the first `pool_size` catalog entries
/// using a generator seeded with `seed`, then drops `exclude` if it was drawn.
/// The row can therefore come back one short.
pub fn sample(
    catalog: &Catalog,
    pool_size: usize,
    count: usize,
    seed: u64,
    exclude: Option<&str>,
) -> Vec<String> {
    let pool: Vec<&str> = catalog.titles().take(pool_size).collect();
    let mut rng = StdRng::seed_from_u64(seed);

    pool.choose_multiple(&mut rng, count)
        .filter(|title| Some(**title) != exclude)
        .map(|title| title.to_string())
        .collect()
}
