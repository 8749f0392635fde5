use derive_more::Display;

use crate::{
    board::{Board, PieceIndex},
    color::Color,
    grid::MoveMatrix,
    position::{Position, Vector},
};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    #[display("pawn")]
    Pawn,
    #[display("knight")]
    Knight,
    #[display("bishop")]
    Bishop,
    #[display("rook")]
    Rook,
    #[display("queen")]
    Queen,
    #[display("king")]
    King,
}
impl PieceKind {
    pub const PROMOTION_CHOICES: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];
    pub const STARTING_CONFIGURATION: [Self; 8] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
    ];
    pub fn uppercase(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
    pub fn lowercase(self) -> char {
        self.uppercase().to_ascii_lowercase()
    }
    pub fn from_char(c: char) -> Option<Self> {
        let piece = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(piece)
    }
}

/// What a presentation layer needs to draw a piece.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[display("{color} {kind}")]
pub struct ColoredPieceKind {
    pub color: Color,
    pub kind: PieceKind,
}
impl ColoredPieceKind {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        ColoredPieceKind { color, kind }
    }
    pub fn figurine(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::King) => '♔',
            (Color::Black, PieceKind::Pawn) => '♟',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::King) => '♚',
        }
    }
}

/// A chess piece as stored on the match [`Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessPiece {
    pub kind: PieceKind,
    pub color: Color,
    pub move_count: u32,
    pub captured: bool,
}

/// The parts of the match state that move generation depends on.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board<ChessPiece>,
    /// Pawn that has just advanced two rows and may be taken en passant.
    pub en_passant_vulnerable: Option<PieceIndex>,
    /// Side whose king is currently attacked.
    pub checked: Option<Color>,
}
impl MoveContext<'_> {
    fn piece(&self, position: Position) -> Option<(PieceIndex, &ChessPiece)> {
        self.board.occupant(position)
    }
    fn is_vacant(&self, position: Position) -> bool {
        self.board.position_exists(position) && self.piece(position).is_none()
    }
}

impl ChessPiece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        ChessPiece {
            kind,
            color,
            move_count: 0,
            captured: false,
        }
    }
    pub fn colored_kind(self) -> ColoredPieceKind {
        ColoredPieceKind::new(self.color, self.kind)
    }
    /// Every cell this piece standing on `position` could reach, regardless of
    /// whose turn it is and of the safety of its own king.
    pub fn possible_moves(self, position: Position, context: &MoveContext) -> MoveMatrix {
        let board = context.board;
        let mut matrix = MoveMatrix::new(board.rows(), board.columns(), false);
        match self.kind {
            PieceKind::Pawn => self.pawn_moves(position, context, &mut matrix),
            PieceKind::Knight => {
                self.step_moves(position, context, &Vector::KNIGHT_MOVES, &mut matrix);
            }
            PieceKind::Bishop => {
                self.directional_moves(position, context, &Vector::BISHOP_DIRECTIONS, &mut matrix);
            }
            PieceKind::Rook => {
                self.directional_moves(position, context, &Vector::ROOK_DIRECTIONS, &mut matrix);
            }
            PieceKind::Queen => {
                self.directional_moves(position, context, &Vector::QUEEN_DIRECTIONS, &mut matrix);
            }
            PieceKind::King => {
                self.step_moves(position, context, &Vector::KING_MOVES, &mut matrix);
                self.castling_moves(position, context, &mut matrix);
            }
        }
        matrix
    }
    pub fn possible_move(self, position: Position, target: Position, context: &MoveContext) -> bool {
        self.possible_moves(position, context).possible_move(target)
    }
    pub fn is_there_any_possible_move(self, position: Position, context: &MoveContext) -> bool {
        self.possible_moves(position, context)
            .is_there_any_possible_move()
    }
    fn is_opponent(self, other: &ChessPiece) -> bool {
        other.color != self.color
    }
    fn can_move(self, destination: Position, context: &MoveContext) -> bool {
        context.board.position_exists(destination)
            && context
                .piece(destination)
                .is_none_or(|(_, piece)| self.is_opponent(piece))
    }
    fn step_moves(
        self,
        position: Position,
        context: &MoveContext,
        moves: &[Vector],
        matrix: &mut MoveMatrix,
    ) {
        for destination in moves
            .iter()
            .filter_map(|movement| position.move_by(*movement))
        {
            if self.can_move(destination, context) {
                matrix[destination] = true;
            }
        }
    }
    fn directional_moves(
        self,
        position: Position,
        context: &MoveContext,
        directions: &[Vector],
        matrix: &mut MoveMatrix,
    ) {
        for direction in directions {
            for destination in position
                .line(*direction)
                .take_while(|destination| context.board.position_exists(*destination))
            {
                match context.piece(destination) {
                    None => matrix[destination] = true,
                    Some((_, piece)) => {
                        if self.is_opponent(piece) {
                            matrix[destination] = true;
                        }
                        break;
                    }
                }
            }
        }
    }
    fn pawn_moves(self, position: Position, context: &MoveContext, matrix: &mut MoveMatrix) {
        let forward = Vector::pawn_forward(self.color);
        if let Some(single) = position.move_by(forward)
            && context.is_vacant(single)
        {
            matrix[single] = true;
            if self.move_count == 0
                && position.row == starting_row(self.color, context.board.rows())
                && let Some(double) = single.move_by(forward)
                && context.is_vacant(double)
            {
                matrix[double] = true;
            }
        }
        for attack in Vector::pawn_attacks(self.color) {
            if let Some(destination) = position.move_by(attack)
                && context
                    .piece(destination)
                    .is_some_and(|(_, piece)| self.is_opponent(piece))
            {
                matrix[destination] = true;
            }
        }
        for side in [Vector::WEST, Vector::EAST] {
            let Some(beside) = position.move_by(side) else {
                continue;
            };
            let Some((index, piece)) = context.piece(beside) else {
                continue;
            };
            if Some(index) == context.en_passant_vulnerable
                && piece.kind == PieceKind::Pawn
                && self.is_opponent(piece)
                && let Some(destination) = beside.move_by(forward)
                && context.is_vacant(destination)
            {
                matrix[destination] = true;
            }
        }
    }
    fn castling_moves(self, position: Position, context: &MoveContext, matrix: &mut MoveMatrix) {
        if self.move_count != 0 || context.checked == Some(self.color) {
            return;
        }
        for side in [Castling::Kingside, Castling::Queenside] {
            let direction = side.direction();
            let Some(rook) = position.move_by(direction * side.rook_distance()) else {
                continue;
            };
            let rook_ready = context.piece(rook).is_some_and(|(_, piece)| {
                piece.kind == PieceKind::Rook
                    && piece.color == self.color
                    && piece.move_count == 0
            });
            let path_clear = position
                .line(direction)
                .take_while(|cell| *cell != rook)
                .all(|cell| context.is_vacant(cell));
            if rook_ready
                && path_clear
                && let Some(destination) = position.move_by(direction * 2)
            {
                matrix[destination] = true;
            }
        }
    }
}
/// Row where pawns of `color` start on a board with `rows` rows.
pub fn starting_row(color: Color, rows: u8) -> u8 {
    match color {
        Color::White => rows.saturating_sub(2),
        Color::Black => 1,
    }
}
/// Row where pawns of `color` get promoted on a board with `rows` rows.
pub fn promotion_row(color: Color, rows: u8) -> u8 {
    match color {
        Color::White => 0,
        Color::Black => rows - 1,
    }
}

/// The two castling flavors, named after the rook taking part in them.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Castling {
    #[display("kingside")]
    Kingside,
    #[display("queenside")]
    Queenside,
}
impl Castling {
    /// Which castling a king move from `source` to `target` is, if any.
    pub fn from_king_move(source: Position, target: Position) -> Option<Self> {
        if source.row != target.row {
            return None;
        }
        match i16::from(target.column) - i16::from(source.column) {
            2 => Some(Castling::Kingside),
            -2 => Some(Castling::Queenside),
            _ => None,
        }
    }
    pub fn direction(self) -> Vector {
        match self {
            Castling::Kingside => Vector::EAST,
            Castling::Queenside => Vector::WEST,
        }
    }
    /// Columns between the king and its rook before castling.
    pub fn rook_distance(self) -> i8 {
        match self {
            Castling::Kingside => 3,
            Castling::Queenside => 4,
        }
    }
    /// Where the rook comes from and goes to, for a king leaving `king`.
    pub fn rook_move(self, king: Position) -> Option<(Position, Position)> {
        let direction = self.direction();
        Some((
            king.move_by(direction * self.rook_distance())?,
            king.move_by(direction)?,
        ))
    }
}
