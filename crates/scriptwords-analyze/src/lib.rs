pub mod tokenize;
pub mod analyzer;

pub use analyzer::{AnalyzeError, Analyzer, Operation, DEFAULT_OPERATION};
pub use tokenize::tokenize;
