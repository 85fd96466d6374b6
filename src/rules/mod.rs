//! Game rules for Hex
//!
//! Hex has a single rule beyond "place a stone on an empty cell": the first
//! player to join their two edges wins.

pub mod win;

pub use win::{check_winner, find_winning_path, has_connection};
