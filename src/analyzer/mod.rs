//! Analysis engine for determining version increments from commits

pub mod increment_analyzer;

pub use increment_analyzer::{classify, resolve, IncrementAnalyzer};
