//! Chess rules engine: move validation and application on an 8×8 board.
//!
//! Layering, bottom to top: movement geometry, attack detection, check-aware
//! legality, then move application and legal-move enumeration.

pub mod board;
pub mod error;
pub mod logger;
pub mod perft;
pub mod types;

pub use board::Board;
pub use error::MoveError;
pub use logger::ChessLogger;
pub use types::*;
