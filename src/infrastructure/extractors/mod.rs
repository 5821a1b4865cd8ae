pub mod chain;
pub mod keyword;
pub mod ner;
