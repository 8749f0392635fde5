use std::{
    fmt::{self, Formatter, Write as _},
    io::{self, BufRead, Write, stderr, stdin, stdout},
    str::FromStr,
};

use chess_arbiter::{
    ChessMatch, ChessPosition, Color, MatchState, PieceKind, error::ParseChessPositionError,
    grid::MoveMatrix,
};
use derive_more::{Display, Error, From};
use tracing::{debug, info};

use crate::board_display::BoardDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Input {
    Help,
    Flip,
    Restart,
    Quit,
    Coord(ChessPosition),
    Move {
        source: ChessPosition,
        target: ChessPosition,
        promotion: Option<PieceKind>,
    },
}
impl fmt::Display for Input {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Input::Help => write!(f, "help")?,
            Input::Flip => write!(f, "flip")?,
            Input::Restart => write!(f, "restart")?,
            Input::Quit => write!(f, "quit")?,
            Input::Coord(position) => write!(f, "{position}")?,
            Input::Move {
                source,
                target,
                promotion,
            } => {
                write!(f, "{source}{target}")?;
                if let Some(promotion) = promotion {
                    write!(f, "{}", promotion.lowercase())?;
                }
            }
        }
        Ok(())
    }
}
impl FromStr for Input {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "help" => Ok(Input::Help),
            "flip" => Ok(Input::Flip),
            "restart" => Ok(Input::Restart),
            "quit" => Ok(Input::Quit),
            "" => Err(ParseInputError::Empty),
            s => {
                let mut chars = s.chars();
                let source: String = chars.by_ref().take(2).collect();
                let source = source.parse()?;
                if chars.as_str().is_empty() {
                    return Ok(Input::Coord(source));
                }
                let target: String = chars.by_ref().take(2).collect();
                let target = target.parse()?;
                let promotion = match (chars.next(), chars.next()) {
                    (None, _) => None,
                    (Some(c), None) => Some(
                        PieceKind::from_char(c).ok_or(ParseInputError::UnknownPiece(c))?,
                    ),
                    (Some(_), Some(c)) => return Err(ParseInputError::Unexpected(c)),
                };
                Ok(Input::Move {
                    source,
                    target,
                    promotion,
                })
            }
        }
    }
}
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error, From)]
enum ParseInputError {
    #[display("empty input")]
    Empty,
    #[display("unknown piece `{_0}`")]
    UnknownPiece(#[error(not(source))] char),
    #[display("unexpected `{_0}`")]
    Unexpected(#[error(not(source))] char),
    #[display("{_0}")]
    #[from]
    Position(ParseChessPositionError),
}

const HELP: &str = "\
flip           - flip the board
restart        - reset to starting position
quit           - quit the game
e2             - view possible moves
e2e4           - play the move
e7e8n          - move and promote (queen when omitted)
e1g1           - perform castling";

fn status(chess_match: &ChessMatch, info: &mut String) {
    info.clear();
    match chess_match.state() {
        MatchState::InProgress => {
            writeln!(info, "{} plays", chess_match.current_player()).unwrap();
        }
        state => writeln!(info, "{state}").unwrap(),
    }
    if chess_match.check() && !chess_match.checkmate() {
        writeln!(info, "check!").unwrap();
    }
    for color in Color::ALL {
        let captured: String = chess_match
            .captured_pieces()
            .filter(|piece| piece.color == color)
            .map(|piece| piece.figurine())
            .collect();
        if !captured.is_empty() {
            writeln!(info, "{color} lost {captured}").unwrap();
        }
    }
}
fn last_move(source: ChessPosition, target: ChessPosition) -> MoveMatrix {
    let mut highlighted = MoveMatrix::new(8, 8, false);
    highlighted[source.to_position()] = true;
    highlighted[target.to_position()] = true;
    highlighted
}
pub fn repl(view: Color) -> io::Result<()> {
    run(stdin().lock(), stdout().lock(), stderr().lock(), view)
}
fn run(
    input: impl BufRead,
    mut output: impl Write,
    mut error: impl Write,
    mut view: Color,
) -> io::Result<()> {
    let mut lines = input.lines();

    let mut chess_match = ChessMatch::new();
    let mut info = String::new();
    let mut highlighted: Option<MoveMatrix> = None;
    let mut first_time = true;
    loop {
        status(&chess_match, &mut info);
        if first_time {
            info.push_str("type `help` for instructions\n");
            first_time = false;
        }
        writeln!(
            output,
            "{}",
            BoardDisplay {
                pieces: &chess_match.pieces(),
                view,
                highlighted: highlighted.as_ref(),
                info: &info,
            },
        )?;
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(text) = lines.next() else {
                return Ok(());
            };
            let text = text?;
            let input = match text.trim().parse() {
                Ok(input) => input,
                Err(err) => {
                    writeln!(error, "Error: {err}")?;
                    writeln!(error, "for available command, enter `help`")?;
                    continue;
                }
            };
            debug!(%input, "command");
            match input {
                Input::Help => {
                    writeln!(output, "{HELP}")?;
                    continue;
                }
                Input::Flip => view = !view,
                Input::Restart => {
                    chess_match = ChessMatch::new();
                    highlighted = None;
                    info!("new match");
                }
                Input::Quit => return Ok(()),
                Input::Coord(position) => match chess_match.possible_moves(position) {
                    Ok(moves) => highlighted = Some(moves),
                    Err(err) => {
                        writeln!(error, "Error: {err}")?;
                        continue;
                    }
                },
                Input::Move {
                    source,
                    target,
                    promotion,
                } => {
                    let result = chess_match.perform_move_with_promotion(
                        source,
                        target,
                        promotion.unwrap_or(PieceKind::Queen),
                    );
                    match result {
                        Ok(captured) => {
                            if let Some(captured) = captured {
                                writeln!(output, "{captured} captured")?;
                            }
                            if let Some(promoted) = chess_match.promoted() {
                                writeln!(output, "pawn promoted to {}", promoted.kind)?;
                            }
                            highlighted = Some(last_move(source, target));
                        }
                        Err(err) => {
                            writeln!(error, "Error: {err}")?;
                            continue;
                        }
                    }
                }
            }
            break;
        }
    }
}
#[cfg(test)]
mod test {
    use chess_arbiter::{ChessPosition, Color, PieceKind, error::ParseChessPositionError};

    use crate::repl::{Input, ParseInputError, run};

    fn square(text: &str) -> ChessPosition {
        text.parse().unwrap()
    }
    fn session(script: &str) -> (String, String) {
        let mut output = Vec::new();
        let mut error = Vec::new();
        run(script.as_bytes(), &mut output, &mut error, Color::White).unwrap();
        (
            String::from_utf8(output).unwrap(),
            String::from_utf8(error).unwrap(),
        )
    }
    #[test]
    fn parse_commands() {
        assert_eq!("help".parse(), Ok(Input::Help));
        assert_eq!("e2".parse(), Ok(Input::Coord(square("e2"))));
        assert_eq!(
            "e2e4".parse(),
            Ok(Input::Move {
                source: square("e2"),
                target: square("e4"),
                promotion: None,
            })
        );
        assert_eq!(
            "e7e8n".parse(),
            Ok(Input::Move {
                source: square("e7"),
                target: square("e8"),
                promotion: Some(PieceKind::Knight),
            })
        );
    }
    #[test]
    fn parse_errors() {
        assert_eq!("".parse::<Input>(), Err(ParseInputError::Empty));
        assert_eq!(
            "e7e8x".parse::<Input>(),
            Err(ParseInputError::UnknownPiece('x'))
        );
        assert_eq!(
            "e7e8qq".parse::<Input>(),
            Err(ParseInputError::Unexpected('q'))
        );
        assert_eq!(
            "z2".parse::<Input>(),
            Err(ParseInputError::Position(
                ParseChessPositionError::InvalidColumn('z')
            ))
        );
    }
    #[test]
    fn display_matches_parse() {
        for text in ["help", "flip", "restart", "quit", "e2", "e2e4", "e7e8n"] {
            let input: Input = text.parse().unwrap();
            assert_eq!(input.to_string(), text);
        }
    }
    #[test]
    fn session_plays_and_reports_errors() {
        let (output, error) = session("e2e4\ne2e4\ne7e5\nquit\n");
        assert!(output.contains("white plays"));
        assert!(output.contains("black plays"));
        assert_eq!(error.lines().count(), 1);
        assert!(error.starts_with("Error: "));
    }
    #[test]
    fn session_ends_at_end_of_input() {
        let (output, error) = session("help\n");
        assert!(output.contains("e2e4           - play the move"));
        assert!(error.is_empty());
    }
    #[test]
    fn session_announces_checkmate() {
        let (output, error) = session("f2f3\ne7e5\ng2g4\nd8h4\ne2e4\n");
        assert!(output.contains("checkmate, black wins"));
        assert_eq!(error.lines().count(), 1);
    }
}
