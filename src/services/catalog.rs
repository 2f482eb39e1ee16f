use std::collections::HashMap;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
};

/// Immutable title ↔ index table
///
/// A movie's index is its position in the source dataset and addresses the
/// matching row and column of the similarity matrix. Rows with a blank title
/// keep their position but cannot be looked up by title.
#[derive(Debug, Clone)]
pub struct Catalog {
    titles: Vec<String>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog from dataset records in their given order
    pub fn load(records: impl IntoIterator<Item = MovieRecord>) -> AppResult<Self> {
        let titles: Vec<String> = records.into_iter().map(|r| r.title).collect();

        if titles.is_empty() {
            return Err(AppError::Data("Movie dataset is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(titles.len());
        for (position, title) in titles.iter().enumerate() {
            if is_usable(title) {
                // First occurrence wins for duplicate titles
                index.entry(title.clone()).or_insert(position);
            }
        }

        if index.is_empty() {
            return Err(AppError::Data(
                "Movie dataset contains no usable titles".to_string(),
            ));
        }

        if index.len() < titles.len() {
            tracing::warn!(
                rows = titles.len(),
                addressable = index.len(),
                "Dataset contains blank or duplicate titles"
            );
        }

        Ok(Self { titles, index })
    }

    /// Reads a CSV dataset with a `title` (or `original_title`) column
    pub fn from_csv_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path).map_err(|e| {
            AppError::Data(format!("Failed to open dataset {}: {}", path.display(), e))
        })?;

        let mut records = Vec::new();
        for (row, result) in reader.deserialize::<MovieRecord>().enumerate() {
            let record = result.map_err(|e| {
                AppError::Data(format!("Failed to parse dataset row {}: {}", row + 1, e))
            })?;
            records.push(record);
        }

        let catalog = Self::load(records)?;
        tracing::info!(
            path = %path.display(),
            movies = catalog.size(),
            "Loaded movie catalog"
        );

        Ok(catalog)
    }

    /// Exact, case-sensitive title lookup
    pub fn index_of(&self, title: &str) -> AppResult<usize> {
        self.index
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' is not in the catalog", title)))
    }

    pub fn title_at(&self, index: usize) -> AppResult<&str> {
        self.titles
            .get(index)
            .map(String::as_str)
            .ok_or(AppError::OutOfRange {
                index,
                size: self.titles.len(),
            })
    }

    /// Number of dataset rows, including rows that are not addressable by title
    pub fn size(&self) -> usize {
        self.titles.len()
    }

    /// Whether the row at `index` can be shown to and picked by a user
    ///
    /// Blank rows and later repeats of a title are not addressable; a title
    /// always refers to its first row.
    pub fn is_addressable(&self, index: usize) -> bool {
        self.titles
            .get(index)
            .is_some_and(|title| self.index.get(title.as_str()) == Some(&index))
    }

    /// Addressable titles in index order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles
            .iter()
            .enumerate()
            .filter(|(position, _)| self.is_addressable(*position))
            .map(|(_, title)| title.as_str())
    }
}

fn is_usable(title: &str) -> bool {
    !title.trim().is_empty()
}
