use derive_more::{Display, Error, From};

use crate::{chess_position::ChessPosition, color::Color, piece::PieceKind, position::Position};

/// Structural violations of the [`Board`](crate::board::Board) contract.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum BoardError {
    #[display("a board needs at least 1 row and 1 column, found {rows}x{columns}")]
    InvalidDimensions { rows: u8, columns: u8 },
    #[display("position {_0} doesn't exist on the board")]
    OutOfBounds(#[error(not(source))] Position),
    #[display("position {_0} is already occupied by a piece")]
    Occupied(#[error(not(source))] Position),
}

/// Rule violations reported by [`ChessMatch`](crate::chess_match::ChessMatch).
///
/// The match is left untouched whenever one of these is returned.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Error, From)]
pub enum MatchError {
    #[display("there is no piece on {_0}")]
    NoPieceAtSource(#[error(not(source))] ChessPosition),
    #[display("the piece on {position} belongs to {owner}, choose one of yours")]
    WrongPlayerPiece { position: ChessPosition, owner: Color },
    #[display("the piece on {_0} has no moves available")]
    NoMovesAvailable(#[error(not(source))] ChessPosition),
    #[display("the piece on {source} cannot move to {target}")]
    IllegalTarget {
        #[error(not(source))]
        source: ChessPosition,
        target: ChessPosition,
    },
    #[display("you are not allowed to put yourself in check")]
    SelfCheckViolation,
    #[display("the match is over")]
    GameOver,
    #[display("a pawn cannot be promoted to {_0}")]
    InvalidPromotion(#[error(not(source))] PieceKind),
    #[display("there is no {_0} king on the board")]
    MissingKing(#[error(not(source))] Color),
    #[display("there is more than one {_0} king on the board")]
    DuplicateKing(#[error(not(source))] Color),
    #[display("the {_0} king is in check but it is not {_0}'s turn")]
    OpponentInCheck(#[error(not(source))] Color),
    #[display("{_0}")]
    #[from]
    Board(BoardError),
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ParseChessPositionError {
    #[display("found `{_0}`, characters from `a` to `h` were expected instead")]
    InvalidColumn(#[error(not(source))] char),
    #[display("found `{_0}`, numbers from `1` to `8` were expected instead")]
    InvalidRow(#[error(not(source))] u8),
    #[display("provided string have length of {_0} characters, 2 were expected")]
    NotEnoughCharacter(#[error(not(source))] usize),
    #[display("unexpected `{_0}`")]
    Unexpected(#[error(not(source))] char),
    #[display("position {_0} is outside of the chess board")]
    OutsideOfBoard(#[error(not(source))] Position),
}
