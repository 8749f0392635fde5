use chess::{Board, BoardStatus, ChessMove, File, MoveGen, Piece, Rank, Square};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rustc_hash::FxHashSet;

use crate::{ChessMatch, ChessPosition, MatchError, PieceKind};

type Move = (ChessPosition, ChessPosition);

fn to_square(position: ChessPosition) -> Square {
    Square::make_square(
        Rank::from_index(usize::from(position.row()) - 1),
        File::from_index(usize::from(position.column() as u8 - b'a')),
    )
}
fn from_square(square: Square) -> ChessPosition {
    let column = char::from(b'a' + square.get_file().to_index() as u8);
    let row = square.get_rank().to_index() as u8 + 1;
    ChessPosition::new(column, row).unwrap()
}
fn is_castling(source: ChessPosition, target: ChessPosition, king: bool) -> bool {
    king && (source.column() as i8 - target.column() as i8).abs() == 2
}
/// Legal moves of the side to move, castling and underpromotion aside.
fn legal_moves(chess_match: &ChessMatch) -> Vec<Move> {
    let mut moves = Vec::new();
    for (source, piece) in chess_match.pieces_on_the_board() {
        if piece.color != chess_match.current_player() {
            continue;
        }
        let matrix = match chess_match.possible_moves(source) {
            Ok(matrix) => matrix,
            Err(MatchError::NoMovesAvailable(_)) => continue,
            Err(err) => panic!("{source}: {err}"),
        };
        for target in matrix.targets() {
            let target = ChessPosition::try_from(target).unwrap();
            if is_castling(source, target, piece.kind == PieceKind::King) {
                continue;
            }
            if chess_match.clone().perform_move(source, target).is_ok() {
                moves.push((source, target));
            }
        }
    }
    moves
}
fn reference_moves(board: &Board) -> FxHashSet<Move> {
    MoveGen::new_legal(board)
        .filter(|movement| movement.get_promotion().is_none_or(|piece| piece == Piece::Queen))
        .map(|movement| {
            (
                from_square(movement.get_source()),
                from_square(movement.get_dest()),
            )
        })
        .filter(|&(source, target)| {
            let king = board.piece_on(to_square(source)) == Some(Piece::King);
            !is_castling(source, target, king)
        })
        .collect()
}
fn reference_move(board: &Board, (source, target): Move) -> ChessMove {
    let pawn = board.piece_on(to_square(source)) == Some(Piece::Pawn);
    let promotion = (pawn && matches!(target.row(), 1 | 8)).then_some(Piece::Queen);
    ChessMove::new(to_square(source), to_square(target), promotion)
}
fn play_random_match(seed: u64, max_plies: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut chess_match = ChessMatch::new();
    let mut board = Board::default();
    for ply in 0..max_plies {
        match board.status() {
            BoardStatus::Checkmate => {
                assert!(chess_match.checkmate(), "seed {seed}, ply {ply}: mate missed");
                return;
            }
            BoardStatus::Stalemate => return,
            BoardStatus::Ongoing => {
                assert!(!chess_match.checkmate(), "seed {seed}, ply {ply}: false mate");
            }
        }
        assert_eq!(
            chess_match.check(),
            board.checkers().popcnt() > 0,
            "seed {seed}, ply {ply}"
        );
        let moves = legal_moves(&chess_match);
        let expected = reference_moves(&board);
        let found: FxHashSet<_> = moves.iter().copied().collect();
        if let Some((source, target)) = found.difference(&expected).next() {
            panic!("seed {seed}, ply {ply}: {source}{target} is not legal");
        }
        if let Some((source, target)) = expected.difference(&found).next() {
            panic!("seed {seed}, ply {ply}: {source}{target} not found");
        }
        if moves.is_empty() {
            return;
        }
        let movement = moves[rng.random_range(0..moves.len())];
        board = board.make_move_new(reference_move(&board, movement));
        chess_match.perform_move(movement.0, movement.1).unwrap();
    }
}
#[test]
fn agrees_with_reference_move_generator() {
    for seed in 0..32 {
        play_random_match(seed, 200);
    }
}
