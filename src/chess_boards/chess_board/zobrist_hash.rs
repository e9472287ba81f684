use super::{ChessBoard, ChessField, Color, Piece, Square};
use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use std::sync::Arc;

const BOARD_SIZE: usize = 8;

pub struct ZobristHash {
    piece_keys: [[[u64; BOARD_SIZE * BOARD_SIZE]; 6]; 2],
    side_to_move_key: u64,
    castling_keys: [u64; 4],
    en_passant_keys: [u64; BOARD_SIZE],
}

impl ZobristHash {
    fn new(seed: u64) -> Self {
        let mut rng = Pcg64::seed_from_u64(seed);

        let mut piece_keys = [[[0; BOARD_SIZE * BOARD_SIZE]; 6]; 2];
        for color_keys in &mut piece_keys {
            for piece_type_keys in color_keys {
                for square_key in piece_type_keys {
                    *square_key = rng.gen();
                }
            }
        }

        let side_to_move_key = rng.gen();

        let mut castling_keys = [0; 4];
        for key in &mut castling_keys {
            *key = rng.gen();
        }

        // One key per column of the en passant target.
        let mut en_passant_keys = [0; BOARD_SIZE];
        for file in &mut en_passant_keys {
            *file = rng.gen();
        }

        ZobristHash {
            piece_keys,
            side_to_move_key,
            castling_keys,
            en_passant_keys,
        }
    }

    /// Full recomputation. `ChessBoard::make_move` keeps `hash` up to date
    /// incrementally; this is the reference it must agree with.
    pub fn calculate_hash(&self, board: &ChessBoard) -> u64 {
        let mut hash = 0;

        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                if let Square::Occupied(piece) = board.squares[row][col] {
                    hash = self.update_piece(hash, piece, ChessField::new(row as u8, col as u8));
                }
            }
        }

        if board.active_color == Color::Black {
            hash = self.update_active_side(hash);
        }
        hash = self.update_castling(hash, board.castling_rights);
        self.update_en_passant(hash, board.en_passant)
    }

    /// Toggles a piece on or off a field. The `moved` flag is not part of the key.
    pub fn update_piece(&self, hash: u64, piece: Piece, field: ChessField) -> u64 {
        let square_index = field.row as usize * BOARD_SIZE + field.col as usize;
        hash ^ self.piece_keys[piece.color.index()][piece.kind.index()][square_index]
    }

    pub fn update_active_side(&self, hash: u64) -> u64 {
        hash ^ self.side_to_move_key
    }

    pub fn update_castling(&self, hash: u64, castling_rights: [bool; 4]) -> u64 {
        castling_rights
            .iter()
            .zip(self.castling_keys.iter())
            .filter(|(right, _)| **right)
            .fold(hash, |hash, (_, key)| hash ^ key)
    }

    pub fn update_en_passant(&self, hash: u64, en_passant: Option<ChessField>) -> u64 {
        match en_passant {
            Some(field) => hash ^ self.en_passant_keys[field.col as usize],
            None => hash,
        }
    }
}

lazy_static! {
    pub static ref ZOBRIST: Arc<ZobristHash> = Arc::new(ZobristHash::new(42));
}
