//! Position evaluation for Hex
//!
//! - [`distance`]: 0/1-weighted shortest path from a player's edge to the other
//! - [`heuristic`]: distance differential used for move ordering and leaves
//! - [`score`]: terminal score bounds shared with the search

pub mod distance;
pub mod heuristic;
pub mod score;

pub use distance::{distance, unreachable_distance};
pub use heuristic::evaluate;
pub use score::Score;
