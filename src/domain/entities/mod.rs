pub mod indexed_entry;
pub mod interaction;
pub mod recommendation;
pub mod symptom_record;
