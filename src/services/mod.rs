pub mod catalog;
pub mod pages;
pub mod providers;
pub mod recommender;
pub mod similarity;
pub mod trending;

pub use catalog::Catalog;
pub use recommender::Recommender;
pub use similarity::SimilarityMatrix;
