use super::{CastlingSide, ChessBoard, ChessField, Piece, PieceType, Square, KING_HOME_COL};

pub const KNIGHT_MOVES: [(i8, i8); 8] = [(2, -1), (2, 1), (1, 2), (1, -2), (-1, -2), (-1, 2), (-2, -1), (-2, 1)];
pub const KING_MOVES: [(i8, i8); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1), (-1, 0), (1, 0)];

/// Candidate move generation for a single piece. None of these know about
/// self-check; `ChessBoard::get_all_legal_moves` filters them.
impl Piece {
    /// Reachable empty squares.
    pub fn peaceful_moves(&self, board: &ChessBoard, at: ChessField) -> Vec<ChessField> {
        match self.kind {
            PieceType::Pawn => self.pawn_peaceful_moves(board, at),
            PieceType::Knight => Self::empty_steps(board, at, &KNIGHT_MOVES),
            PieceType::Bishop => Self::sliding_peaceful_moves(board, at, &BISHOP_DIRECTIONS),
            PieceType::Rook => Self::sliding_peaceful_moves(board, at, &ROOK_DIRECTIONS),
            PieceType::Queen => Self::sliding_peaceful_moves(board, at, &QUEEN_DIRECTIONS),
            PieceType::King => {
                let mut moves = Self::empty_steps(board, at, &KING_MOVES);
                moves.extend(self.castling_moves(board, at));
                moves
            }
        }
    }

    /// Reachable squares holding an opposing piece, plus the en passant square.
    pub fn piece_takes(&self, board: &ChessBoard, at: ChessField) -> Vec<ChessField> {
        match self.kind {
            PieceType::Pawn => self.pawn_takes(board, at),
            PieceType::Knight => self.capture_steps(board, at, &KNIGHT_MOVES),
            PieceType::Bishop => self.sliding_takes(board, at, &BISHOP_DIRECTIONS),
            PieceType::Rook => self.sliding_takes(board, at, &ROOK_DIRECTIONS),
            PieceType::Queen => self.sliding_takes(board, at, &QUEEN_DIRECTIONS),
            PieceType::King => self.capture_steps(board, at, &KING_MOVES),
        }
    }

    /// Peaceful moves followed by takes.
    pub fn all_moves(&self, board: &ChessBoard, at: ChessField) -> Vec<ChessField> {
        let mut moves = self.peaceful_moves(board, at);
        moves.extend(self.piece_takes(board, at));
        moves
    }

    fn is_opponent(&self, square: Square) -> bool {
        matches!(square, Square::Occupied(p) if p.color != self.color)
    }

    fn pawn_peaceful_moves(&self, board: &ChessBoard, at: ChessField) -> Vec<ChessField> {
        let mut moves = Vec::new();
        let forward = self.color.forward();

        if let Some(one_step) = at.offset(forward, 0) {
            if board.square(one_step) == Square::Empty {
                moves.push(one_step);

                if !self.moved && at.row == self.color.pawn_row() {
                    if let Some(two_steps) = one_step.offset(forward, 0) {
                        if board.square(two_steps) == Square::Empty {
                            moves.push(two_steps);
                        }
                    }
                }
            }
        }
        moves
    }

    fn pawn_takes(&self, board: &ChessBoard, at: ChessField) -> Vec<ChessField> {
        let forward = self.color.forward();
        [-1, 1]
            .into_iter()
            .filter_map(|d_col| at.offset(forward, d_col))
            .filter(|&target| match board.square(target) {
                Square::Occupied(_) => self.is_opponent(board.square(target)),
                Square::Empty => self.can_take_en_passant(board, at, target),
            })
            .collect()
    }

    fn can_take_en_passant(&self, board: &ChessBoard, at: ChessField, target: ChessField) -> bool {
        if board.en_passant != Some(target) || board.active_color != self.color {
            return false;
        }
        matches!(
            board.square(ChessField::new(at.row, target.col)),
            Square::Occupied(p) if p.kind == PieceType::Pawn && p.color != self.color
        )
    }

    fn empty_steps(board: &ChessBoard, at: ChessField, offsets: &[(i8, i8)]) -> Vec<ChessField> {
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| at.offset(d_row, d_col))
            .filter(|&field| board.square(field) == Square::Empty)
            .collect()
    }

    fn capture_steps(&self, board: &ChessBoard, at: ChessField, offsets: &[(i8, i8)]) -> Vec<ChessField> {
        offsets
            .iter()
            .filter_map(|&(d_row, d_col)| at.offset(d_row, d_col))
            .filter(|&field| self.is_opponent(board.square(field)))
            .collect()
    }

    fn sliding_peaceful_moves(board: &ChessBoard, at: ChessField, directions: &[(i8, i8)]) -> Vec<ChessField> {
        let mut moves = Vec::new();
        for &(d_row, d_col) in directions {
            moves.extend(ray(at, d_row, d_col).take_while(|&field| board.square(field) == Square::Empty));
        }
        moves
    }

    fn sliding_takes(&self, board: &ChessBoard, at: ChessField, directions: &[(i8, i8)]) -> Vec<ChessField> {
        directions
            .iter()
            .filter_map(|&(d_row, d_col)| ray(at, d_row, d_col).find(|&field| board.square(field) != Square::Empty))
            .filter(|&blocker| self.is_opponent(board.square(blocker)))
            .collect()
    }

    fn castling_moves(&self, board: &ChessBoard, at: ChessField) -> Vec<ChessField> {
        let home_row = self.color.home_row();
        if self.moved || at != ChessField::new(home_row, KING_HOME_COL) {
            return Vec::new();
        }
        let opponent = self.color.opposite();

        CastlingSide::BOTH
            .into_iter()
            .filter(|side| board.castling_rights[side.rights_index(self.color)])
            .filter(|side| {
                matches!(
                    board.square(ChessField::new(home_row, side.rook_col())),
                    Square::Occupied(rook) if rook.kind == PieceType::Rook && rook.color == self.color && !rook.moved
                )
            })
            .filter(|side| {
                side.empty_cols()
                    .iter()
                    .all(|&col| board.square(ChessField::new(home_row, col)) == Square::Empty)
            })
            .filter(|side| {
                !side
                    .king_path_cols()
                    .iter()
                    .any(|&col| board.is_square_attacked_by_color(ChessField::new(home_row, col), opponent))
            })
            .map(|side| ChessField::new(home_row, side.king_target_col()))
            .collect()
    }
}

/// Fields along a direction, nearest first, up to the board edge.
pub(crate) fn ray(from: ChessField, d_row: i8, d_col: i8) -> impl Iterator<Item = ChessField> {
    std::iter::successors(from.offset(d_row, d_col), move |field| field.offset(d_row, d_col))
}
