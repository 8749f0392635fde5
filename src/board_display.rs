use std::fmt::{self, Display, Formatter};

use chess_arbiter::{
    Color, ColoredPieceKind,
    grid::{Grid, MoveMatrix},
    position::Position,
};

const WHITE: &str = "\x1b[30;107m";
const BLACK: &str = "\x1b[30;47m";
const HIGHLIGHTED: &str = "\x1b[30;103m";
const RESET: &str = "\x1b[0m";

pub struct BoardDisplay<'a, 'b> {
    pub pieces: &'a Grid<Option<ColoredPieceKind>>,
    pub view: Color,
    pub highlighted: Option<&'a MoveMatrix>,
    pub info: &'b str,
}
fn cell_color(position: Position) -> Color {
    match (position.row + position.column) % 2 {
        0 => Color::White,
        _ => Color::Black,
    }
}
impl Display for BoardDisplay<'_, '_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rows = self.pieces.rows();
        let columns = self.pieces.columns();
        let mut lines = self.info.lines().fuse();
        for row in 0..rows {
            let row = match self.view {
                Color::White => row,
                Color::Black => rows - 1 - row,
            };
            for column in 0..columns {
                let column = match self.view {
                    Color::White => column,
                    Color::Black => columns - 1 - column,
                };
                let position = Position::new(row, column);
                let highlighted = self
                    .highlighted
                    .is_some_and(|matrix| matrix.possible_move(position));
                let color = if highlighted {
                    HIGHLIGHTED
                } else {
                    match cell_color(position) {
                        Color::White => WHITE,
                        Color::Black => BLACK,
                    }
                };
                let figurine = self.pieces[position].map_or(' ', ColoredPieceKind::figurine);
                write!(f, "{color}{figurine} {RESET}")?;
            }
            write!(f, "{}", rows - row)?;
            if let Some(line) = lines.next() {
                write!(f, " {line}")?;
            }
            writeln!(f)?;
        }
        let files = (b'a'..b'a' + columns).map(char::from);
        let files: Vec<_> = match self.view {
            Color::White => files.collect(),
            Color::Black => files.rev().collect(),
        };
        for file in files {
            write!(f, "{file} ")?;
        }
        if let Some(line) = lines.next() {
            write!(f, "  {line}")?;
        }
        writeln!(f)?;
        for line in lines {
            writeln!(f, "                  {line}")?;
        }
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use chess_arbiter::{ChessMatch, Color};

    use crate::board_display::BoardDisplay;

    #[test]
    fn starting_position_is_drawn_from_white_side() {
        let chess_match = ChessMatch::new();
        let pieces = chess_match.pieces();
        let text = BoardDisplay {
            pieces: &pieces,
            view: Color::White,
            highlighted: None,
            info: "white plays",
        }
        .to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert!(lines[0].contains('♜'));
        assert!(lines[0].ends_with("8 white plays"));
        assert!(lines[7].contains('♔'));
        assert!(lines[8].starts_with("a b c d e f g h"));
    }
    #[test]
    fn flipped_view_starts_with_first_rank() {
        let chess_match = ChessMatch::new();
        let pieces = chess_match.pieces();
        let text = BoardDisplay {
            pieces: &pieces,
            view: Color::Black,
            highlighted: None,
            info: "",
        }
        .to_string();
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].ends_with('1'));
        assert!(lines[8].starts_with("h g f e d c b a"));
    }
}
