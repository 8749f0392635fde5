#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    reason = "positions and board dimensions are bounded by `u8`"
)]

//! Rule engine for standard chess.
//!
//! [`ChessMatch`] is the entry point: it answers which cells a piece could
//! move to and performs moves, enforcing turn order, check safety, castling,
//! en passant and promotion.

pub mod board;
pub mod chess_match;
pub mod chess_position;
pub mod color;
pub mod error;
pub mod grid;
pub mod piece;
pub mod position;
pub mod state;

#[cfg(test)]
mod fuzz;

pub use crate::{
    chess_match::ChessMatch,
    chess_position::ChessPosition,
    color::Color,
    error::{BoardError, MatchError},
    piece::{ColoredPieceKind, PieceKind},
    state::MatchState,
};
