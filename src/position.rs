use std::{
    iter::successors,
    ops::{Add, Mul},
};

use derive_more::Display;

use crate::color::Color;

/// Zero-based coordinate on a [`Board`](crate::board::Board).
///
/// Row 0 is the top of the board, which is the eighth rank in chess terms.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("({row}, {column})")]
pub struct Position {
    pub row: u8,
    pub column: u8,
}
impl Position {
    pub fn new(row: u8, column: u8) -> Self {
        Position { row, column }
    }
    /// Returns `None` when the step leaves the `u8` range. Board bounds are
    /// not checked here.
    pub fn move_by(self, movement: Vector) -> Option<Self> {
        Some(Position {
            row: self.row.checked_add_signed(movement.row)?,
            column: self.column.checked_add_signed(movement.column)?,
        })
    }
    /// Cells visited when walking from this position towards `direction`,
    /// excluding the starting cell.
    pub fn line(self, direction: Vector) -> impl Iterator<Item = Self> {
        debug_assert_ne!(direction, Vector::ZERO);
        successors(self.move_by(direction), move |position| {
            position.move_by(direction)
        })
    }
}

/// A signed step between two [`Position`]s.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display("({row}, {column})")]
pub struct Vector {
    pub row: i8,
    pub column: i8,
}
impl Vector {
    pub const ZERO: Self = Vector::new(0, 0);
    pub const EAST: Self = Vector::new(0, 1);
    pub const WEST: Self = Vector::new(0, -1);

    pub const KNIGHT_MOVES: [Self; 8] = [
        Vector::new(-1, -2),
        Vector::new(-1, 2),
        Vector::new(1, -2),
        Vector::new(1, 2),
        Vector::new(-2, -1),
        Vector::new(-2, 1),
        Vector::new(2, -1),
        Vector::new(2, 1),
    ];
    pub const KING_MOVES: [Self; 8] = [
        Vector::new(-1, -1),
        Vector::new(-1, 0),
        Vector::new(-1, 1),
        Vector::new(0, -1),
        Vector::new(0, 1),
        Vector::new(1, -1),
        Vector::new(1, 0),
        Vector::new(1, 1),
    ];
    pub const ROOK_DIRECTIONS: [Self; 4] = [
        Vector::new(-1, 0),
        Vector::new(1, 0),
        Vector::new(0, -1),
        Vector::new(0, 1),
    ];
    pub const BISHOP_DIRECTIONS: [Self; 4] = [
        Vector::new(-1, -1),
        Vector::new(-1, 1),
        Vector::new(1, -1),
        Vector::new(1, 1),
    ];
    pub const QUEEN_DIRECTIONS: [Self; 8] = Vector::KING_MOVES;

    pub const fn new(row: i8, column: i8) -> Self {
        Vector { row, column }
    }
    /// One step towards the opponent's side for a pawn of `color`.
    pub fn pawn_forward(color: Color) -> Self {
        match color {
            Color::White => Vector::new(-1, 0),
            Color::Black => Vector::new(1, 0),
        }
    }
    pub fn pawn_attacks(color: Color) -> [Self; 2] {
        let forward = Vector::pawn_forward(color);
        [forward + Vector::WEST, forward + Vector::EAST]
    }
}
impl Add<Self> for Vector {
    type Output = Vector;

    fn add(self, rhs: Self) -> Self::Output {
        Vector::new(self.row + rhs.row, self.column + rhs.column)
    }
}
impl Mul<i8> for Vector {
    type Output = Vector;

    fn mul(self, rhs: i8) -> Self::Output {
        Vector::new(self.row * rhs, self.column * rhs)
    }
}
#[cfg(test)]
mod test {
    use crate::{
        color::Color,
        position::{Position, Vector},
    };

    #[test]
    fn move_by_stops_at_zero() {
        assert_eq!(Position::new(0, 3).move_by(Vector::new(-1, 0)), None);
        assert_eq!(
            Position::new(4, 3).move_by(Vector::new(-1, 2)),
            Some(Position::new(3, 5))
        );
    }
    #[test]
    fn line_excludes_origin() {
        let line: Vec<_> = Position::new(2, 2)
            .line(Vector::new(-1, -1))
            .collect();
        assert_eq!(line, [Position::new(1, 1), Position::new(0, 0)]);
    }
    #[test]
    fn pawns_advance_towards_each_other() {
        assert_eq!(
            Vector::pawn_forward(Color::White) + Vector::pawn_forward(Color::Black),
            Vector::ZERO
        );
        assert_eq!(
            Vector::pawn_attacks(Color::Black),
            [Vector::new(1, -1), Vector::new(1, 1)]
        );
        assert_eq!(Vector::pawn_forward(Color::White) * 2, Vector::new(-2, 0));
    }
}
