use super::{ChessField, Color, GameOutcome, PieceType};
use thiserror::Error;

/// Everything the rules engine can refuse to do. A rejected operation never
/// leaves the board partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("square {0} is off the board")]
    OutOfBounds(ChessField),

    #[error("there is no piece on {0}")]
    EmptySquare(ChessField),

    #[error("the piece on {0} does not belong to the side to move")]
    NotYourTurn(ChessField),

    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: ChessField, to: ChessField },

    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceType),

    #[error("game is already over: {0}")]
    GameOver(GameOutcome),

    #[error("the {0} king is already on the board")]
    DuplicateKing(Color),

    #[error("invalid FEN string: {0}")]
    InvalidFen(String),

    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),
}
