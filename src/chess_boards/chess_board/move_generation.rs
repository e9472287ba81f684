use super::pieces::{ray, KING_MOVES, KNIGHT_MOVES, QUEEN_DIRECTIONS};
use super::{ChessBoard, ChessField, Color, Move, MoveKind, Piece, PieceType, Square, PROMOTION_PIECES};

fn get_piece_value(piece: &PieceType) -> i32 {
    match piece {
        PieceType::Pawn => 1,
        PieceType::Knight => 3,
        PieceType::Bishop => 3,
        PieceType::Rook => 5,
        PieceType::Queen => 9,
        PieceType::King => 15,
    }
}

impl ChessBoard {
    /// Pieces of one color with their fields, row by row.
    pub fn pieces_with_coordinates(&self, color: Color) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        self.all_pieces_with_coordinates()
            .filter(move |(_, piece)| piece.color == color)
    }

    pub fn all_pieces_with_coordinates(&self) -> impl Iterator<Item = (ChessField, Piece)> + '_ {
        (0..8u8).flat_map(move |row| {
            (0..8u8).filter_map(move |col| {
                let field = ChessField::new(row, col);
                self.square(field).piece().map(|piece| (field, piece))
            })
        })
    }

    pub fn is_valid_piece(&self, field: ChessField) -> bool {
        field.is_on_board() && !self.is_empty(field)
    }

    /// Candidate destinations of the piece on `field`, self-check not considered.
    pub fn get_valid_piece_moves(&self, field: ChessField) -> Vec<ChessField> {
        match self.square(field) {
            Square::Occupied(piece) if field.is_on_board() => piece.all_moves(self, field),
            _ => Vec::new(),
        }
    }

    /// Every candidate move of `side`, classified and with promotions expanded.
    pub fn generate_candidate_moves(&self, side: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        for (field, piece) in self.pieces_with_coordinates(side) {
            moves.extend(self.candidate_moves_from(field, piece));
        }
        moves
    }

    fn candidate_moves_from(&self, from: ChessField, piece: Piece) -> Vec<Move> {
        let mut moves = Vec::new();
        for to in piece.all_moves(self, from) {
            let mv = Move::between(from, to);
            match self.classify_move(from, to, None) {
                MoveKind::Promotion(_) => {
                    moves.extend(PROMOTION_PIECES.iter().map(|&kind| mv.with_kind(MoveKind::Promotion(kind))));
                }
                kind => moves.push(mv.with_kind(kind)),
            }
        }
        moves
    }

    fn is_legal_for(&mut self, mv: Move, side: Color) -> bool {
        let undo = self.make_move(mv);
        let legal = !self.is_king_attacked(side);
        self.unmake_move(&undo);
        legal
    }

    /// Candidates of `side` that do not leave its own king attacked. The board
    /// is unchanged afterwards.
    pub fn get_all_legal_moves(&mut self, side: Color) -> Vec<Move> {
        self.generate_candidate_moves(side)
            .into_iter()
            .filter(|&mv| self.is_legal_for(mv, side))
            .collect()
    }

    /// Legal moves of whichever piece stands on `field`.
    pub fn get_legal_moves_from(&mut self, field: ChessField) -> Vec<Move> {
        match self.square(field) {
            Square::Occupied(piece) if field.is_on_board() => self
                .candidate_moves_from(field, piece)
                .into_iter()
                .filter(|&mv| self.is_legal_for(mv, piece.color))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Stops at the first legal move found.
    pub fn has_legal_move(&mut self, side: Color) -> bool {
        self.generate_candidate_moves(side)
            .into_iter()
            .any(|mv| self.is_legal_for(mv, side))
    }

    /// Most valuable victim first, least valuable attacker second. Quiet moves
    /// score zero, so a stable sort keeps their generation order.
    pub fn capture_score(&self, mv: &Move) -> i32 {
        let victim = match mv.kind {
            MoveKind::EnPassant => Some(PieceType::Pawn),
            _ => self.square(mv.to).piece().map(|p| p.kind),
        };
        match (self.square(mv.from).piece(), victim) {
            (Some(attacker), Some(victim)) => 100 * get_piece_value(&victim) - get_piece_value(&attacker.kind),
            _ => 0,
        }
    }

    pub fn is_king_attacked(&self, side: Color) -> bool {
        match self.find_king_position(side) {
            Some(king) => self.is_square_attacked_by_color(king, side.opposite()),
            None => false,
        }
    }

    /// Scans outward from `field` for pieces of `attacker` that could capture
    /// there. Works for empty fields, which castling needs.
    pub fn is_square_attacked_by_color(&self, field: ChessField, attacker: Color) -> bool {
        for &(d_row, d_col) in &QUEEN_DIRECTIONS {
            let diagonal = d_row != 0 && d_col != 0;
            let blocker = ray(field, d_row, d_col).find_map(|f| self.square(f).piece());
            if let Some(piece) = blocker {
                if piece.color == attacker {
                    match piece.kind {
                        PieceType::Queen => return true,
                        PieceType::Bishop if diagonal => return true,
                        PieceType::Rook if !diagonal => return true,
                        _ => {}
                    }
                }
            }
        }

        let holds = |offsets: &[(i8, i8)], kind: PieceType| {
            offsets.iter().filter_map(|&(d_row, d_col)| field.offset(d_row, d_col)).any(|f| {
                matches!(self.square(f), Square::Occupied(p) if p.color == attacker && p.kind == kind)
            })
        };

        // An attacking pawn stands one step behind the field from its own point of view.
        let pawn_offsets = [(-attacker.forward(), -1), (-attacker.forward(), 1)];

        holds(&pawn_offsets, PieceType::Pawn)
            || holds(&KNIGHT_MOVES, PieceType::Knight)
            || holds(&KING_MOVES, PieceType::King)
    }
}
