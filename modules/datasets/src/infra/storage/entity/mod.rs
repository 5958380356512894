pub mod dataset;
pub mod prediction;
