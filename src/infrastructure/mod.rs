pub mod embeddings;
pub mod extractors;
pub mod generation;
pub mod sqlite;
