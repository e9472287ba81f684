pub mod chess_boards;
pub mod engines;

pub use chess_boards::chess_board::{ChessBoard, ChessError, ChessField, Color, GameOutcome, Move, Piece, PieceType};
pub use chess_boards::perft::{perft, perft_divide};
pub use engines::{choose_move, AlphaBetaEngine, ChessEngine, MinMaxEngine, SearchConfig, SearchResult};
