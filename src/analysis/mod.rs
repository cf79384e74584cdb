//! Analysis modules.
//!
//! Aggregation of the sales table and the recommendations derived from it.

pub mod aggregator;
pub mod recommender;

pub use aggregator::*;
pub use recommender::*;
