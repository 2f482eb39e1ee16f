use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{AppError, AppResult};

/// Precomputed pairwise similarity scores, indexed by catalog position
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    pub fn new(rows: Vec<Vec<f32>>) -> Self {
        Self { rows }
    }

    /// Reads a JSON array of rows, each an array of numbers
    pub fn from_json_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AppError::Data(format!(
                "Failed to open similarity matrix {}: {}",
                path.display(),
                e
            ))
        })?;

        let rows: Vec<Vec<f32>> = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            AppError::Data(format!(
                "Failed to parse similarity matrix {}: {}",
                path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %path.display(),
            rows = rows.len(),
            "Loaded similarity matrix"
        );

        Ok(Self::new(rows))
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Checks that the matrix is `size` × `size`
    pub fn validate_dimensions(&self, size: usize) -> AppResult<()> {
        if self.rows.len() != size {
            return Err(AppError::Data(format!(
                "Similarity matrix has {} rows but the catalog has {} movies",
                self.rows.len(),
                size
            )));
        }

        if let Some((index, row)) = self.rows.iter().enumerate().find(|(_, r)| r.len() != size) {
            return Err(AppError::Data(format!(
                "Similarity matrix row {} has {} scores but the catalog has {} movies",
                index,
                row.len(),
                size
            )));
        }

        Ok(())
    }
}
