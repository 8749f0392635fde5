use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use crate::{error::ParseChessPositionError, position::Position};

/// A square in algebraic notation, such as `e4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPosition {
    column: char,
    row: u8,
}
impl ChessPosition {
    pub fn new(column: char, row: u8) -> Result<Self, ParseChessPositionError> {
        if !('a'..='h').contains(&column) {
            return Err(ParseChessPositionError::InvalidColumn(column));
        }
        if !(1..=8).contains(&row) {
            return Err(ParseChessPositionError::InvalidRow(row));
        }
        Ok(ChessPosition { column, row })
    }
    pub fn column(self) -> char {
        self.column
    }
    pub fn row(self) -> u8 {
        self.row
    }
    pub fn to_position(self) -> Position {
        Position::new(8 - self.row, self.column as u8 - b'a')
    }
    /// All 64 squares, from `a8` to `h1` in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..8).flat_map(|row| {
            (0..8).map(move |column| ChessPosition {
                column: (b'a' + column) as char,
                row: 8 - row,
            })
        })
    }
}
impl TryFrom<Position> for ChessPosition {
    type Error = ParseChessPositionError;

    fn try_from(value: Position) -> Result<Self, Self::Error> {
        if value.row >= 8 || value.column >= 8 {
            return Err(ParseChessPositionError::OutsideOfBoard(value));
        }
        Ok(ChessPosition {
            column: (b'a' + value.column) as char,
            row: 8 - value.row,
        })
    }
}
impl From<ChessPosition> for Position {
    fn from(value: ChessPosition) -> Self {
        value.to_position()
    }
}
impl Display for ChessPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column, self.row)?;
        Ok(())
    }
}
impl FromStr for ChessPosition {
    type Err = ParseChessPositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let Some(column) = chars.next() else {
            return Err(ParseChessPositionError::NotEnoughCharacter(0));
        };
        let Some(row) = chars.next() else {
            return Err(ParseChessPositionError::NotEnoughCharacter(1));
        };
        if let Some(c) = chars.next() {
            return Err(ParseChessPositionError::Unexpected(c));
        }
        let row = match row.to_digit(10) {
            Some(row) => row as u8,
            None => return Err(ParseChessPositionError::Unexpected(row)),
        };
        ChessPosition::new(column, row)
    }
}
#[cfg(test)]
mod test {
    use test_strategy::proptest;

    use crate::{
        chess_position::ChessPosition, error::ParseChessPositionError, position::Position,
    };

    #[test]
    fn corners_map_to_grid_corners() {
        let a8: ChessPosition = "a8".parse().unwrap();
        let h1: ChessPosition = "h1".parse().unwrap();
        assert_eq!(a8.to_position(), Position::new(0, 0));
        assert_eq!(h1.to_position(), Position::new(7, 7));
        assert_eq!(
            ChessPosition::new('e', 2).unwrap().to_position(),
            Position::new(6, 4)
        );
    }
    #[test]
    fn every_square_round_trips() {
        let all: Vec<_> = ChessPosition::all().collect();
        assert_eq!(all.len(), 64);
        for position in all {
            let text = position.to_string();
            assert_eq!(text.parse(), Ok(position));
            assert_eq!(ChessPosition::try_from(position.to_position()), Ok(position));
        }
    }
    #[test]
    fn invalid_squares_are_rejected() {
        assert_eq!(
            "i1".parse::<ChessPosition>(),
            Err(ParseChessPositionError::InvalidColumn('i'))
        );
        assert_eq!(
            "a9".parse::<ChessPosition>(),
            Err(ParseChessPositionError::InvalidRow(9))
        );
        assert_eq!(
            "a".parse::<ChessPosition>(),
            Err(ParseChessPositionError::NotEnoughCharacter(1))
        );
        assert_eq!(
            "a1x".parse::<ChessPosition>(),
            Err(ParseChessPositionError::Unexpected('x'))
        );
        assert_eq!(
            ChessPosition::try_from(Position::new(8, 0)),
            Err(ParseChessPositionError::OutsideOfBoard(Position::new(8, 0)))
        );
    }
    #[proptest]
    fn positions_round_trip(#[strategy(0u8..8)] row: u8, #[strategy(0u8..8)] column: u8) {
        let position = Position::new(row, column);
        let chess_position = ChessPosition::try_from(position).unwrap();
        assert_eq!(chess_position.to_position(), position);
    }
}
