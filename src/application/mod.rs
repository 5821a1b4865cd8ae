pub mod ingest;
pub mod rank;
pub mod recommend;
pub mod select;
pub mod stats;
