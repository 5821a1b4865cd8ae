pub mod interaction_repo;
pub mod migrations;
pub mod vector_index;
