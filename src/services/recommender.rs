use std::cmp::Ordering;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Recommendation,
    services::{catalog::Catalog, similarity::SimilarityMatrix},
};

/// Ranks catalog movies by precomputed similarity to a query movie
///
/// Catalog and matrix dimensions are checked once at construction, so
/// `recommend` never has to re-validate them.
#[derive(Debug, Clone)]
pub struct Recommender {
    catalog: Arc<Catalog>,
    matrix: Arc<SimilarityMatrix>,
}

impl Recommender {
    pub fn new(catalog: Arc<Catalog>, matrix: Arc<SimilarityMatrix>) -> AppResult<Self> {
        matrix.validate_dimensions(catalog.size())?;
        Ok(Self { catalog, matrix })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns up to `k` movies most similar to `title`, best first
    ///
    /// Equal scores keep ascending index order. NaN and infinite scores rank
    /// below every finite score. Only addressable rows are returned, so the
    /// query title never appears, not even through a duplicate row, and the
    /// result is shorter than `k` when the catalog has too few other movies.
    pub fn recommend(&self, title: &str, k: usize) -> AppResult<Vec<Recommendation>> {
        if k == 0 {
            return Err(AppError::InvalidInput(
                "Recommendation count must be at least 1".to_string(),
            ));
        }

        let query = self.catalog.index_of(title)?;
        let row = self.matrix.row(query).ok_or(AppError::OutOfRange {
            index: query,
            size: self.matrix.row_count(),
        })?;

        let mut ranked: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        // sort_by is stable, which gives the index tie-break
        ranked.sort_by(|a, b| rank_order(a.1, b.1));

        ranked
            .into_iter()
            .filter(|(index, _)| *index != query && self.catalog.is_addressable(*index))
            .take(k)
            .map(|(index, score)| {
                Ok(Recommendation {
                    title: self.catalog.title_at(index)?.to_string(),
                    score,
                })
            })
            .collect()
    }
}

/// Descending by score with non-finite scores last
fn rank_order(a: f32, b: f32) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.total_cmp(&a),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}
