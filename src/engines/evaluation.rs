use crate::chess_boards::chess_board::{ChessBoard, ChessField, Color, Piece, PieceType};

/// Static scoring of a position. Positive values favour `perspective`.
pub trait Evaluator {
    fn piece_value(&self, piece: Piece, field: ChessField) -> i32;

    fn evaluate_board(&self, board: &ChessBoard, perspective: Color) -> i32 {
        board
            .all_pieces_with_coordinates()
            .map(|(field, piece)| {
                let value = self.piece_value(piece, field);
                if piece.color == perspective {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

/// Material count, optionally refined by piece-square tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterialEvaluator {
    positional: bool,
}

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self { positional: false }
    }

    pub fn positional() -> Self {
        Self { positional: true }
    }

    pub fn material_value(kind: PieceType) -> i32 {
        match kind {
            PieceType::Pawn => 10,
            PieceType::Knight => 30,
            PieceType::Bishop => 30,
            PieceType::Rook => 50,
            PieceType::Queen => 90,
            PieceType::King => 900,
        }
    }

    // Tables read from the owner's side: row 0 is the opponent's back rank,
    // column 0 the a-file.

    #[rustfmt::skip]
    const PAWN_SQUARE_TABLE: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0],
    [  5,   5,   5,   5,   5,   5,   5,   5],
    [  1,   2,   2,   3,   3,   2,   2,   1],
    [  0,   0,   1,   2,   2,   1,   0,   0],
    [  0,   0,   1,   2,   2,   1,   0,   0],
    [  0,   0,   0,   1,   1,   0,   0,   0],
    [  0,   0,   0,  -2,  -2,   0,   0,   0],
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

    #[rustfmt::skip]
    const KNIGHT_SQUARE_TABLE: [[i32; 8]; 8] = [
    [ -5,  -4,  -3,  -3,  -3,  -3,  -4,  -5],
    [ -4,  -2,   0,   0,   0,   0,  -2,  -4],
    [ -3,   0,   1,   2,   2,   1,   0,  -3],
    [ -3,   1,   2,   3,   3,   2,   1,  -3],
    [ -3,   0,   2,   3,   3,   2,   0,  -3],
    [ -3,   1,   1,   2,   2,   1,   1,  -3],
    [ -4,  -2,   0,   1,   1,   0,  -2,  -4],
    [ -5,  -4,  -3,  -3,  -3,  -3,  -4,  -5],
];

    #[rustfmt::skip]
    const BISHOP_SQUARE_TABLE: [[i32; 8]; 8] = [
    [ -2,  -1,  -1,  -1,  -1,  -1,  -1,  -2],
    [ -1,   0,   0,   0,   0,   0,   0,  -1],
    [ -1,   0,   1,   1,   1,   1,   0,  -1],
    [ -1,   1,   1,   1,   1,   1,   1,  -1],
    [ -1,   0,   1,   1,   1,   1,   0,  -1],
    [ -1,   1,   1,   1,   1,   1,   1,  -1],
    [ -1,   1,   0,   0,   0,   0,   1,  -1],
    [ -2,  -1,  -1,  -1,  -1,  -1,  -1,  -2],
];

    #[rustfmt::skip]
    const KING_SQUARE_TABLE: [[i32; 8]; 8] = [
    [ -3,  -4,  -4,  -5,  -5,  -4,  -4,  -3],
    [ -3,  -4,  -4,  -5,  -5,  -4,  -4,  -3],
    [ -3,  -4,  -4,  -5,  -5,  -4,  -4,  -3],
    [ -3,  -4,  -4,  -5,  -5,  -4,  -4,  -3],
    [ -2,  -3,  -3,  -4,  -4,  -3,  -3,  -2],
    [ -1,  -2,  -2,  -2,  -2,  -2,  -2,  -1],
    [  2,   2,   0,   0,   0,   0,   2,   2],
    [  2,   3,   1,   0,   0,   1,   3,   2],
];

    fn position_value(kind: PieceType, color: Color, field: ChessField) -> i32 {
        let psq_row = match color {
            Color::White => 7 - field.row as usize,
            Color::Black => field.row as usize,
        };
        let file = 7 - field.col as usize;
        match kind {
            PieceType::Pawn => Self::PAWN_SQUARE_TABLE[psq_row][file],
            PieceType::Knight => Self::KNIGHT_SQUARE_TABLE[psq_row][file],
            PieceType::Bishop => Self::BISHOP_SQUARE_TABLE[psq_row][file],
            PieceType::King => Self::KING_SQUARE_TABLE[psq_row][file],
            PieceType::Rook | PieceType::Queen => 0,
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn piece_value(&self, piece: Piece, field: ChessField) -> i32 {
        let material = Self::material_value(piece.kind);
        if self.positional && field.is_on_board() {
            material + Self::position_value(piece.kind, piece.color, field)
        } else {
            material
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_position_is_balanced() {
        let board = ChessBoard::new();
        for evaluator in [MaterialEvaluator::new(), MaterialEvaluator::positional()] {
            assert_eq!(evaluator.evaluate_board(&board, Color::White), 0);
            assert_eq!(evaluator.evaluate_board(&board, Color::Black), 0);
        }
    }

    #[test]
    fn test_knight_against_pawn() {
        let mut board = ChessBoard::empty();
        board.place_piece(ChessField::new(3, 4), Piece::new(Color::White, PieceType::Knight)).unwrap();
        board.place_piece(ChessField::new(1, 3), Piece::new(Color::Black, PieceType::Pawn)).unwrap();
        let evaluator = MaterialEvaluator::new();
        assert_eq!(evaluator.evaluate_board(&board, Color::White), 20);
        assert_eq!(evaluator.evaluate_board(&board, Color::Black), -20);
    }

    #[test]
    fn test_perspectives_are_opposite() {
        let board =
            ChessBoard::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();
        for evaluator in [MaterialEvaluator::new(), MaterialEvaluator::positional()] {
            assert_eq!(
                evaluator.evaluate_board(&board, Color::White),
                -evaluator.evaluate_board(&board, Color::Black)
            );
        }
    }

    #[test]
    fn test_mirrored_position_scores_the_same() {
        let white = ChessBoard::from_fen("4k3/8/8/8/3N4/8/1P6/4K3 w - - 0 1").unwrap();
        let black = ChessBoard::from_fen("4k3/1p6/8/3n4/8/8/8/4K3 b - - 0 1").unwrap();
        let evaluator = MaterialEvaluator::positional();
        assert_eq!(
            evaluator.evaluate_board(&white, Color::White),
            evaluator.evaluate_board(&black, Color::Black)
        );
    }

    #[test]
    fn test_positional_prefers_centralized_knight() {
        let evaluator = MaterialEvaluator::positional();
        let knight = Piece::new(Color::White, PieceType::Knight);
        let center = ChessField::from_algebraic("e4").unwrap();
        let corner = ChessField::from_algebraic("h1").unwrap();
        assert!(evaluator.piece_value(knight, center) > evaluator.piece_value(knight, corner));
        assert_eq!(MaterialEvaluator::new().piece_value(knight, corner), 30);
    }
}
