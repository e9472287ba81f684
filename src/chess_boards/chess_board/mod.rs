pub mod errors;
pub mod fen;
pub mod model;
pub mod zobrist_hash;
pub use errors::ChessError;
pub use model::{
    to_algebraic_square, CastlingSide, ChessField, Color, GameOutcome, Move, MoveKind, Piece, PieceType, Square,
    KING_HOME_COL, PROMOTION_PIECES,
};
pub use zobrist_hash::{ZobristHash, ZOBRIST};

mod chess_board;
mod move_generation;
mod pieces;
#[cfg(test)]
pub mod test_utils;
pub use chess_board::{ChessBoard, UndoInfo};
