//! Search module for the Hex AI
//!
//! Contains:
//! - Candidate generation with one-ply move ordering
//! - Negamax with alpha-beta pruning and a shrinking candidate limit

pub mod candidates;
pub mod negamax;

pub use candidates::{generate_candidates, opening_moves, Candidate};
pub use negamax::{SearchResult, SearchStats, Searcher};
