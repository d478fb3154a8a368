//! Failure classification

pub mod classifier;

pub use classifier::{classify, classify_failure};
