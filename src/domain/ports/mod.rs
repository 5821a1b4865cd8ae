pub mod embedding_port;
pub mod interaction_recorder;
pub mod symptom_extractor;
pub mod text_generator;
pub mod vector_index;
