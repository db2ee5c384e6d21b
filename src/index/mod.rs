pub mod indexer;
pub mod inverted;
pub mod posting;
pub mod term;
