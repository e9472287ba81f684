use super::zobrist_hash::ZOBRIST;
use super::ChessBoard;
use super::{CastlingSide, ChessError, ChessField, Color, Piece, PieceType, Square, KING_HOME_COL};

pub const INITIAL_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn invalid(reason: String) -> ChessError {
    ChessError::InvalidFen(reason)
}

/// Parses a FEN string and sets up a ChessBoard. The half-move clock and
/// full-move number may be omitted.
pub fn from_fen(fen: &str) -> Result<ChessBoard, ChessError> {
    let mut board = ChessBoard::empty();
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 4 && parts.len() != 6 {
        return Err(invalid(format!("expected 4 or 6 fields, got {}", parts.len())));
    }

    let rows: Vec<&str> = parts[0].split('/').collect();
    if rows.len() != 8 {
        return Err(invalid(String::from("expected 8 rows")));
    }

    for (row_index, row) in rows.iter().enumerate() {
        let board_row = 7 - row_index as u8;
        let mut file = 0u8;

        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
            } else {
                let kind = PieceType::from_char(c).ok_or_else(|| invalid(format!("invalid piece character {}", c)))?;
                let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
                if file > 7 {
                    return Err(invalid(format!("too many squares in row {}", row_index + 1)));
                }
                board.place_piece(ChessField::new(board_row, 7 - file), Piece::new(color, kind))?;
                file += 1;
            }
            if file > 8 {
                return Err(invalid(format!("too many squares in row {}", row_index + 1)));
            }
        }
        if file != 8 {
            return Err(invalid(format!("too few squares in row {}", row_index + 1)));
        }
    }

    board.active_color = match parts[1] {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(invalid(format!("invalid active color {}", other))),
    };

    if parts[2] != "-" && !parts[2].chars().all(|c| "KQkq".contains(c)) {
        return Err(invalid(format!("invalid castling rights {}", parts[2])));
    }
    board.castling_rights = [
        parts[2].contains('K'),
        parts[2].contains('Q'),
        parts[2].contains('k'),
        parts[2].contains('q'),
    ];

    board.en_passant = if parts[3] == "-" {
        None
    } else {
        Some(ChessField::from_algebraic(parts[3]).map_err(|_| invalid(format!("invalid en passant square {}", parts[3])))?)
    };

    if parts.len() == 6 {
        board.halfmove_clock = parts[4]
            .parse::<u16>()
            .map_err(|_| invalid(format!("halfmove clock is not a valid number: {}", parts[4])))?;
        board.fullmove_number = parts[5]
            .parse::<u16>()
            .map_err(|_| invalid(format!("fullmove number is not a valid number: {}", parts[5])))?;
    }

    settle_moved_flags(&mut board);
    board.hash = ZOBRIST.calculate_hash(&board);
    Ok(board)
}

/// FEN has no notion of a moved piece. A pawn off its start row has moved; a
/// king or rook has moved unless a castling right still depends on it.
fn settle_moved_flags(board: &mut ChessBoard) {
    for row in 0..8u8 {
        for col in 0..8u8 {
            let field = ChessField::new(row, col);
            if let Square::Occupied(piece) = board.square(field) {
                let unmoved = match piece.kind {
                    PieceType::Pawn => row == piece.color.pawn_row(),
                    PieceType::King => {
                        field == ChessField::new(piece.color.home_row(), KING_HOME_COL)
                            && CastlingSide::BOTH
                                .iter()
                                .any(|side| board.castling_rights[side.rights_index(piece.color)])
                    }
                    PieceType::Rook => CastlingSide::BOTH.iter().any(|side| {
                        field == ChessField::new(piece.color.home_row(), side.rook_col())
                            && board.castling_rights[side.rights_index(piece.color)]
                    }),
                    _ => true,
                };
                board.squares[row as usize][col as usize] = Square::Occupied(Piece {
                    moved: !unmoved,
                    ..piece
                });
            }
        }
    }
}

pub fn to_fen(board: &ChessBoard) -> String {
    let mut board_representation = String::new();

    for row in (0..8).rev() {
        let mut empty_count = 0;

        // FEN lists files a to h, which is column 7 down to 0.
        for col in (0..8).rev() {
            match board.squares[row][col] {
                Square::Occupied(piece) => {
                    if empty_count > 0 {
                        board_representation.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    board_representation.push(piece.to_char());
                }
                Square::Empty => {
                    empty_count += 1;
                }
            }
        }

        if empty_count > 0 {
            board_representation.push_str(&empty_count.to_string());
        }

        if row > 0 {
            board_representation.push('/');
        }
    }

    let active_color = if board.active_color == Color::White { "w" } else { "b" };

    let mut castling: String = "KQkq"
        .chars()
        .zip(board.castling_rights.iter())
        .filter(|(_, right)| **right)
        .map(|(c, _)| c)
        .collect();
    if castling.is_empty() {
        castling = "-".to_string();
    }

    let en_passant_square = match board.en_passant {
        Some(square) => square.as_algebraic(),
        None => "-".to_string(),
    };

    format!(
        "{} {} {} {} {} {}",
        board_representation, active_color, castling, en_passant_square, board.halfmove_clock, board.fullmove_number
    )
}
