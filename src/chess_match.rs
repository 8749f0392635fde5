use tracing::{debug, info, instrument, trace};

use crate::{
    board::{Board, PieceIndex},
    chess_position::ChessPosition,
    color::Color,
    error::{BoardError, MatchError},
    grid::{Grid, MoveMatrix},
    piece::{Castling, ChessPiece, ColoredPieceKind, MoveContext, PieceKind, promotion_row},
    position::Position,
    state::MatchState,
};

/// Everything [`ChessMatch::make_move`] changed, so that it can be undone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExecutedMove {
    piece: PieceIndex,
    source: Position,
    target: Position,
    captured: Option<(PieceIndex, Position)>,
    castling_rook: Option<(PieceIndex, Position, Position)>,
}

/// The authoritative arbiter of a chess game.
///
/// A match owns its board and every piece ever placed on it. Captured pieces
/// stay in the board's arena with their `captured` flag raised, so capture and
/// rollback never allocate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMatch {
    board: Board<ChessPiece>,
    turn: u32,
    current_player: Color,
    checked: Option<Color>,
    state: MatchState,
    en_passant_vulnerable: Option<PieceIndex>,
    promoted: Option<PieceIndex>,
}
impl Default for ChessMatch {
    fn default() -> Self {
        ChessMatch::new()
    }
}
impl ChessMatch {
    /// A match in the standard starting position, white to move.
    pub fn new() -> Self {
        let mut placements = Vec::with_capacity(32);
        for (color, back_row, pawn_row) in [(Color::White, 1, 2), (Color::Black, 8, 7)] {
            for (column, kind) in ('a'..='h').zip(PieceKind::STARTING_CONFIGURATION) {
                placements.push((column, back_row, ColoredPieceKind::new(color, kind)));
                placements.push((
                    column,
                    pawn_row,
                    ColoredPieceKind::new(color, PieceKind::Pawn),
                ));
            }
        }
        let mut board = Board::new(8, 8).unwrap_or_else(|err| unreachable!("{err}"));
        for (column, row, piece) in placements {
            let index = board.add(ChessPiece::new(piece.color, piece.kind));
            let position = Position::new(8 - row, column as u8 - b'a');
            board
                .place_piece(index, position)
                .unwrap_or_else(|err| unreachable!("{err}"));
        }
        ChessMatch::from_board(board, Color::White)
    }
    /// A match starting from an arbitrary set of unmoved pieces.
    ///
    /// Each side needs exactly one king, and the side not to move must not be
    /// in check. A setup where `current_player` is already mated is over from the start.
    pub fn with_pieces(
        current_player: Color,
        placements: impl IntoIterator<Item = (ChessPosition, ColoredPieceKind)>,
    ) -> Result<Self, MatchError> {
        let mut board = Board::new(8, 8)?;
        for (position, piece) in placements {
            let index = board.add(ChessPiece::new(piece.color, piece.kind));
            board.place_piece(index, position.to_position())?;
        }
        for color in Color::ALL {
            let kings = board
                .all_pieces()
                .filter(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
                .count();
            match kings {
                0 => return Err(MatchError::MissingKing(color)),
                1 => {}
                _ => return Err(MatchError::DuplicateKing(color)),
            }
        }
        let mut chess_match = ChessMatch::from_board(board, current_player);
        let opponent = !current_player;
        if chess_match.test_check(opponent) {
            return Err(MatchError::OpponentInCheck(opponent));
        }
        if chess_match.test_check(current_player) {
            chess_match.checked = Some(current_player);
            if chess_match.test_checkmate(current_player) {
                chess_match.state = MatchState::Checkmate(opponent);
            }
        }
        Ok(chess_match)
    }
    fn from_board(board: Board<ChessPiece>, current_player: Color) -> Self {
        ChessMatch {
            board,
            turn: 1,
            current_player,
            checked: None,
            state: MatchState::InProgress,
            en_passant_vulnerable: None,
            promoted: None,
        }
    }
    pub fn turn(&self) -> u32 {
        self.turn
    }
    pub fn current_player(&self) -> Color {
        self.current_player
    }
    /// Whether the side to move is in check.
    pub fn check(&self) -> bool {
        self.checked.is_some()
    }
    pub fn checkmate(&self) -> bool {
        self.state.is_over()
    }
    pub fn state(&self) -> MatchState {
        self.state
    }
    pub fn en_passant_vulnerable(&self) -> Option<ChessPosition> {
        self.en_passant_vulnerable
            .and_then(|index| self.chess_position_of(index))
    }
    /// The piece a pawn was promoted to by the last move.
    pub fn promoted(&self) -> Option<ColoredPieceKind> {
        self.promoted
            .map(|index| self.board[index].colored_kind())
    }
    /// The board as a grid of pieces, row 0 being the eighth rank.
    pub fn pieces(&self) -> Grid<Option<ColoredPieceKind>> {
        self.board
            .map(|piece| piece.map(|piece| piece.colored_kind()))
    }
    pub fn pieces_on_the_board(&self) -> impl Iterator<Item = (ChessPosition, ColoredPieceKind)> {
        self.board.placed_pieces().filter_map(|(position, _, piece)| {
            Some((
                ChessPosition::try_from(position).ok()?,
                piece.colored_kind(),
            ))
        })
    }
    pub fn captured_pieces(&self) -> impl Iterator<Item = ColoredPieceKind> {
        self.board
            .all_pieces()
            .filter(|(_, piece)| piece.captured)
            .map(|(_, piece)| piece.colored_kind())
    }
    /// Cells the piece on `source` could move to. Moves that would expose the
    /// mover's king are still included; [`ChessMatch::perform_move`] rejects them.
    pub fn possible_moves(&self, source: ChessPosition) -> Result<MoveMatrix, MatchError> {
        let position = source.to_position();
        let index = self.validate_source_position(source)?;
        Ok(self.board[index].possible_moves(position, &self.context()))
    }
    /// Moves a piece, promoting to a queen when a pawn reaches the last row.
    ///
    /// Returns the captured piece, if any.
    pub fn perform_move(
        &mut self,
        source: ChessPosition,
        target: ChessPosition,
    ) -> Result<Option<ColoredPieceKind>, MatchError> {
        self.perform_move_with_promotion(source, target, PieceKind::Queen)
    }
    /// Like [`ChessMatch::perform_move`], with the piece a promoted pawn turns
    /// into supplied by the caller.
    #[instrument(level = "debug", skip(self), fields(player = %self.current_player, turn = self.turn), err)]
    pub fn perform_move_with_promotion(
        &mut self,
        source: ChessPosition,
        target: ChessPosition,
        promotion: PieceKind,
    ) -> Result<Option<ColoredPieceKind>, MatchError> {
        if self.state.is_over() {
            return Err(MatchError::GameOver);
        }
        if !PieceKind::PROMOTION_CHOICES.contains(&promotion) {
            return Err(MatchError::InvalidPromotion(promotion));
        }
        self.validate_source_position(source)?;
        self.validate_target_position(source, target)?;

        let executed = self.make_move(source.to_position(), target.to_position())?;
        if self.test_check(self.current_player) {
            self.undo_move(executed)?;
            debug!("rejected, the move exposes the king");
            return Err(MatchError::SelfCheckViolation);
        }
        let moved = self.board[executed.piece];
        if let Some((_, from, to)) = executed.castling_rook {
            debug!(%from, %to, "castling");
        }
        if let Some((_, position)) = executed.captured
            && position != executed.target
        {
            debug!(%position, "en passant");
        }

        self.promoted = None;
        if moved.kind == PieceKind::Pawn
            && executed.target.row == promotion_row(moved.color, self.board.rows())
        {
            self.board[executed.piece].kind = promotion;
            self.promoted = Some(executed.piece);
            debug!(%promotion, "pawn promoted");
        }

        let double_step = i16::from(executed.target.row) - i16::from(executed.source.row);
        self.en_passant_vulnerable =
            (moved.kind == PieceKind::Pawn && double_step.abs() == 2).then_some(executed.piece);

        let opponent = !self.current_player;
        self.checked = self.test_check(opponent).then_some(opponent);
        if self.test_checkmate(opponent) {
            self.state = MatchState::Checkmate(self.current_player);
            info!(winner = %self.current_player, "checkmate");
        } else {
            self.next_turn();
        }

        Ok(executed
            .captured
            .map(|(index, _)| self.board[index].colored_kind()))
    }
    fn context(&self) -> MoveContext<'_> {
        MoveContext {
            board: &self.board,
            en_passant_vulnerable: self.en_passant_vulnerable,
            checked: self.checked,
        }
    }
    fn chess_position_of(&self, index: PieceIndex) -> Option<ChessPosition> {
        ChessPosition::try_from(self.board.position_of(index)?).ok()
    }
    fn validate_source_position(&self, source: ChessPosition) -> Result<PieceIndex, MatchError> {
        let position = source.to_position();
        let Some(index) = self.board.piece(position)? else {
            return Err(MatchError::NoPieceAtSource(source));
        };
        let piece = self.board[index];
        if piece.color != self.current_player {
            return Err(MatchError::WrongPlayerPiece {
                position: source,
                owner: piece.color,
            });
        }
        if !piece.is_there_any_possible_move(position, &self.context()) {
            return Err(MatchError::NoMovesAvailable(source));
        }
        Ok(index)
    }
    fn validate_target_position(
        &self,
        source: ChessPosition,
        target: ChessPosition,
    ) -> Result<(), MatchError> {
        let position = source.to_position();
        let Some(index) = self.board.piece(position)? else {
            return Err(MatchError::NoPieceAtSource(source));
        };
        if self.board[index].possible_move(position, target.to_position(), &self.context()) {
            Ok(())
        } else {
            Err(MatchError::IllegalTarget { source, target })
        }
    }
    fn next_turn(&mut self) {
        self.turn += 1;
        self.current_player = !self.current_player;
    }
    fn make_move(&mut self, source: Position, target: Position) -> Result<ExecutedMove, BoardError> {
        let Some(index) = self.board.remove_piece(source)? else {
            panic!("no piece to move on {source}");
        };
        let piece = self.board[index];
        self.board[index].move_count += 1;

        let mut captured = self.board.remove_piece(target)?.map(|index| (index, target));
        if piece.kind == PieceKind::Pawn && source.column != target.column && captured.is_none() {
            let beside = Position::new(source.row, target.column);
            captured = self.board.remove_piece(beside)?.map(|index| (index, beside));
        }
        self.board.place_piece(index, target)?;
        if let Some((captured, _)) = captured {
            self.board[captured].captured = true;
        }

        let mut castling_rook = None;
        if piece.kind == PieceKind::King
            && let Some((from, to)) = Castling::from_king_move(source, target)
                .and_then(|castling| castling.rook_move(source))
            && let Some(rook) = self.board.remove_piece(from)?
        {
            self.board.place_piece(rook, to)?;
            self.board[rook].move_count += 1;
            castling_rook = Some((rook, from, to));
        }
        Ok(ExecutedMove {
            piece: index,
            source,
            target,
            captured,
            castling_rook,
        })
    }
    fn undo_move(&mut self, executed: ExecutedMove) -> Result<(), BoardError> {
        let ExecutedMove {
            piece,
            source,
            target,
            captured,
            castling_rook,
        } = executed;
        self.board.remove_piece(target)?;
        self.board[piece].move_count -= 1;
        self.board.place_piece(piece, source)?;

        if let Some((captured, position)) = captured {
            self.board.place_piece(captured, position)?;
            self.board[captured].captured = false;
        }
        if let Some((rook, from, to)) = castling_rook {
            self.board.remove_piece(to)?;
            self.board.place_piece(rook, from)?;
            self.board[rook].move_count -= 1;
        }
        Ok(())
    }
    /// Plays a move, lets `probe` observe the result, then takes it back.
    fn simulate<R>(
        &mut self,
        source: Position,
        target: Position,
        probe: impl FnOnce(&Self) -> R,
    ) -> Result<R, BoardError> {
        let executed = self.make_move(source, target)?;
        let result = probe(self);
        self.undo_move(executed)?;
        Ok(result)
    }
    fn live_pieces(&self, color: Color) -> impl Iterator<Item = (Position, PieceIndex, ChessPiece)> {
        self.board
            .placed_pieces()
            .filter(move |(_, _, piece)| piece.color == color && !piece.captured)
            .map(|(position, index, piece)| (position, index, *piece))
    }
    fn king(&self, color: Color) -> Position {
        self.live_pieces(color)
            .find(|(_, _, piece)| piece.kind == PieceKind::King)
            .map(|(position, _, _)| position)
            .unwrap_or_else(|| panic!("there is no {color} king on the board"))
    }
    fn test_check(&self, color: Color) -> bool {
        let king = self.king(color);
        let context = self.context();
        self.live_pieces(!color)
            .any(|(position, _, piece)| piece.possible_move(position, king, &context))
    }
    fn test_checkmate(&mut self, color: Color) -> bool {
        if !self.test_check(color) {
            return false;
        }
        let candidates: Vec<_> = self
            .live_pieces(color)
            .map(|(position, _, piece)| (position, piece.possible_moves(position, &self.context())))
            .collect();
        for (source, matrix) in candidates {
            for target in matrix.targets() {
                let still_checked = self
                    .simulate(source, target, |chess_match| chess_match.test_check(color))
                    .unwrap_or_else(|err| panic!("simulating {source} to {target}: {err}"));
                if !still_checked {
                    trace!(%source, %target, "escape found");
                    return false;
                }
            }
        }
        true
    }
}
