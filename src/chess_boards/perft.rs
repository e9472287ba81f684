use crate::chess_boards::chess_board::{ChessBoard, Move};

/// Counts the leaf nodes of the legal move tree `depth` plies deep. The board
/// is walked with make/unmake and left as it was found.
pub fn perft(board: &mut ChessBoard, depth: u8) -> u64 {
    if depth == 0 {
        return 1u64;
    }

    let side = board.active_color;
    let moves = board.get_all_legal_moves(side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut node_count = 0u64;
    for mv in moves {
        let undo = board.make_move(mv);
        node_count += perft(board, depth - 1);
        board.unmake_move(&undo);
    }
    node_count
}

/// Per root move node counts, in generation order.
pub fn perft_divide(board: &mut ChessBoard, depth: u8) -> Vec<(Move, u64)> {
    let side = board.active_color;
    let moves = board.get_all_legal_moves(side);
    moves
        .into_iter()
        .map(|mv| {
            let undo = board.make_move(mv);
            let count = perft(board, depth.saturating_sub(1));
            board.unmake_move(&undo);
            (mv, count)
        })
        .collect()
}
