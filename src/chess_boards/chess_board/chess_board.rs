use super::zobrist_hash::ZOBRIST;
use super::{
    fen, CastlingSide, ChessError, ChessField, Color, GameOutcome, Move, MoveKind, Piece, PieceType, Square,
    KING_HOME_COL, PROMOTION_PIECES,
};

/// Back rank from column 0 (h-file) to column 7 (a-file).
const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::King,
    PieceType::Queen,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessBoard {
    pub squares: [[Square; 8]; 8],
    pub active_color: Color,
    /// K, Q, k, q
    pub castling_rights: [bool; 4],
    pub en_passant: Option<ChessField>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub hash: u64,
    pub king_positions: [Option<ChessField>; 2],
    /// Real game moves, most recent last. Search never touches it.
    pub history: Vec<UndoInfo>,
    /// Hashes of the positions before each entry of `history`.
    pub position_history: Vec<u64>,
}

/// Everything needed to take a move back. Returned by `make_move` and consumed
/// by `unmake_move`; the pair must be used in strict stack order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoInfo {
    pub mv: Move,
    pub moved_piece: Option<Piece>,
    pub captured: Option<(ChessField, Piece)>,
    pub rook_move: Option<(ChessField, ChessField, Piece)>,
    pub castling_rights: [bool; 4],
    pub en_passant: Option<ChessField>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
    pub king_positions: [Option<ChessField>; 2],
    pub hash: u64,
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl ChessBoard {
    /// Creates an empty chess board, White to move, no castling rights.
    pub fn empty() -> Self {
        let mut board = Self {
            squares: [[Square::Empty; 8]; 8],
            active_color: Color::White,
            castling_rights: [false; 4],
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            hash: 0,
            king_positions: [None; 2],
            history: Vec::new(),
            position_history: Vec::new(),
        };
        board.hash = ZOBRIST.calculate_hash(&board);
        board
    }

    /// The standard starting arrangement.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.put(ChessField::new(color.home_row(), col as u8), Piece::new(color, *kind));
                board.put(ChessField::new(color.pawn_row(), col as u8), Piece::new(color, PieceType::Pawn));
            }
        }
        board.castling_rights = [true; 4];
        board.hash = ZOBRIST.calculate_hash(&board);
        board
    }

    /// Delegates FEN parsing to the `fen` module.
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        fen::from_fen(fen)
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }

    /// Puts `piece` on `field`, replacing whatever stood there. A second king
    /// of the same color is rejected.
    pub fn place_piece(&mut self, field: ChessField, piece: Piece) -> Result<(), ChessError> {
        if !field.is_on_board() {
            return Err(ChessError::OutOfBounds(field));
        }
        if piece.kind == PieceType::King {
            if let Some(king) = self.king_positions[piece.color.index()] {
                if king != field {
                    return Err(ChessError::DuplicateKing(piece.color));
                }
            }
        }
        self.remove_piece(field)?;
        self.put(field, piece);
        Ok(())
    }

    pub fn remove_piece(&mut self, field: ChessField) -> Result<Option<Piece>, ChessError> {
        if !field.is_on_board() {
            return Err(ChessError::OutOfBounds(field));
        }
        let removed = self.square(field).piece();
        if let Some(piece) = removed {
            self.hash = ZOBRIST.update_piece(self.hash, piece, field);
            self.set_square(field, Square::Empty);
            if piece.kind == PieceType::King {
                self.king_positions[piece.color.index()] = None;
            }
        }
        Ok(removed)
    }

    fn put(&mut self, field: ChessField, piece: Piece) {
        self.hash = ZOBRIST.update_piece(self.hash, piece, field);
        self.set_square(field, Square::Occupied(piece));
        if piece.kind == PieceType::King {
            self.king_positions[piece.color.index()] = Some(field);
        }
    }

    /// Content of `field`; off-board fields read as empty.
    pub fn square(&self, field: ChessField) -> Square {
        self.squares
            .get(field.row as usize)
            .and_then(|row| row.get(field.col as usize))
            .copied()
            .unwrap_or(Square::Empty)
    }

    pub fn is_empty(&self, field: ChessField) -> bool {
        self.square(field) == Square::Empty
    }

    fn set_square(&mut self, field: ChessField, square: Square) {
        self.squares[field.row as usize][field.col as usize] = square;
    }

    pub fn find_king_position(&self, color: Color) -> Option<ChessField> {
        self.king_positions[color.index()]
    }

    /// Works out castling, en passant and promotion from the board geometry.
    /// A pawn reaching the last row without an explicit choice becomes a queen.
    pub fn classify_move(&self, from: ChessField, to: ChessField, promotion: Option<PieceType>) -> MoveKind {
        match self.square(from).piece() {
            Some(piece) if piece.kind == PieceType::King => {
                if from.col == KING_HOME_COL && from.row == to.row && (from.col as i8 - to.col as i8).abs() == 2 {
                    MoveKind::Castle
                } else {
                    MoveKind::Normal
                }
            }
            Some(piece) if piece.kind == PieceType::Pawn => {
                if to.row == piece.color.promotion_row() {
                    MoveKind::Promotion(promotion.unwrap_or(PieceType::Queen))
                } else if from.col != to.col && self.is_empty(to) {
                    MoveKind::EnPassant
                } else {
                    MoveKind::Normal
                }
            }
            _ => MoveKind::Normal,
        }
    }

    /// Applies `mv` without any legality checks and returns what is needed to
    /// take it back. The move kind is re-derived from the board, so plain
    /// `from`/`to` moves castle and promote correctly.
    pub fn make_move(&mut self, mv: Move) -> UndoInfo {
        let kind = self.classify_move(mv.from, mv.to, mv.promotion());
        let mv = mv.with_kind(kind);
        let mut undo = UndoInfo {
            mv,
            moved_piece: self.square(mv.from).piece(),
            captured: None,
            rook_move: None,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            king_positions: self.king_positions,
            hash: self.hash,
        };

        let zobrist = &*ZOBRIST;
        let mut hash = zobrist.update_castling(self.hash, self.castling_rights);
        hash = zobrist.update_en_passant(hash, self.en_passant);
        self.en_passant = None;

        if let Some(piece) = undo.moved_piece {
            let capture_field = match kind {
                MoveKind::EnPassant => ChessField::new(mv.from.row, mv.to.col),
                _ => mv.to,
            };
            if let Square::Occupied(captured) = self.square(capture_field) {
                hash = zobrist.update_piece(hash, captured, capture_field);
                self.set_square(capture_field, Square::Empty);
                if captured.kind == PieceType::King {
                    self.king_positions[captured.color.index()] = None;
                }
                undo.captured = Some((capture_field, captured));
            }

            hash = zobrist.update_piece(hash, piece, mv.from);
            self.set_square(mv.from, Square::Empty);
            let landed = Piece {
                kind: mv.promotion().unwrap_or(piece.kind),
                moved: true,
                ..piece
            };
            hash = zobrist.update_piece(hash, landed, mv.to);
            self.set_square(mv.to, Square::Occupied(landed));

            if piece.kind == PieceType::King {
                self.king_positions[piece.color.index()] = Some(mv.to);
                for side in CastlingSide::BOTH {
                    self.castling_rights[side.rights_index(piece.color)] = false;
                }
            }

            if kind == MoveKind::Castle {
                if let Some(side) = CastlingSide::from_king_target(mv.to.col) {
                    let rook_from = ChessField::new(mv.from.row, side.rook_col());
                    let rook_to = ChessField::new(mv.from.row, side.rook_target_col());
                    if let Square::Occupied(rook) = self.square(rook_from) {
                        hash = zobrist.update_piece(hash, rook, rook_from);
                        self.set_square(rook_from, Square::Empty);
                        let moved_rook = Piece { moved: true, ..rook };
                        hash = zobrist.update_piece(hash, moved_rook, rook_to);
                        self.set_square(rook_to, Square::Occupied(moved_rook));
                        undo.rook_move = Some((rook_from, rook_to, rook));
                    }
                }
            }

            // A rook leaving or being taken on its corner ends that castling right.
            self.revoke_corner_rights(mv.from);
            self.revoke_corner_rights(mv.to);

            if piece.kind == PieceType::Pawn && (mv.to.row as i8 - mv.from.row as i8).abs() == 2 {
                self.en_passant = Some(ChessField::new((mv.from.row + mv.to.row) / 2, mv.from.col));
            }

            if piece.kind == PieceType::Pawn || undo.captured.is_some() {
                self.halfmove_clock = 0;
            } else {
                self.halfmove_clock = self.halfmove_clock.saturating_add(1);
            }
        }

        if self.active_color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.active_color = self.active_color.opposite();

        hash = zobrist.update_active_side(hash);
        hash = zobrist.update_castling(hash, self.castling_rights);
        hash = zobrist.update_en_passant(hash, self.en_passant);
        self.hash = hash;

        undo
    }

    /// Restores the board to exactly the state before the matching `make_move`.
    pub fn unmake_move(&mut self, undo: &UndoInfo) {
        self.active_color = self.active_color.opposite();

        if let Some(piece) = undo.moved_piece {
            self.set_square(undo.mv.to, Square::Empty);
            self.set_square(undo.mv.from, Square::Occupied(piece));

            if let Some((rook_from, rook_to, rook)) = undo.rook_move {
                self.set_square(rook_to, Square::Empty);
                self.set_square(rook_from, Square::Occupied(rook));
            }
            if let Some((field, captured)) = undo.captured {
                self.set_square(field, Square::Occupied(captured));
            }
        }

        self.castling_rights = undo.castling_rights;
        self.en_passant = undo.en_passant;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.king_positions = undo.king_positions;
        self.hash = undo.hash;
    }

    fn revoke_corner_rights(&mut self, field: ChessField) {
        let right = match (field.row, field.col) {
            (0, 0) => 0,
            (0, 7) => 1,
            (7, 0) => 2,
            (7, 7) => 3,
            _ => return,
        };
        self.castling_rights[right] = false;
    }

    /// The single validated entry point for changing the game. With
    /// `simulated` set only the board-level checks apply and the move is not
    /// recorded; the caller takes it back with `unmake_move`.
    pub fn move_piece(
        &mut self,
        source: ChessField,
        destination: ChessField,
        simulated: bool,
    ) -> Result<UndoInfo, ChessError> {
        self.move_piece_with_promotion(source, destination, None, simulated)
    }

    pub fn move_piece_with_promotion(
        &mut self,
        source: ChessField,
        destination: ChessField,
        promotion: Option<PieceType>,
        simulated: bool,
    ) -> Result<UndoInfo, ChessError> {
        for field in [source, destination] {
            if !field.is_on_board() {
                return Err(ChessError::OutOfBounds(field));
            }
        }
        let piece = self.square(source).piece().ok_or(ChessError::EmptySquare(source))?;
        if let Some(kind) = promotion {
            if !PROMOTION_PIECES.contains(&kind) {
                return Err(ChessError::InvalidPromotion(kind));
            }
        }
        if !self.get_valid_piece_moves(source).contains(&destination) {
            return Err(ChessError::IllegalMove {
                from: source,
                to: destination,
            });
        }
        let kind = self.classify_move(source, destination, promotion);
        if let (Some(choice), false) = (promotion, matches!(kind, MoveKind::Promotion(_))) {
            return Err(ChessError::InvalidPromotion(choice));
        }
        let mv = Move::between(source, destination).with_kind(kind);

        if simulated {
            return Ok(self.make_move(mv));
        }

        let outcome = self.checkmate_stalemate_checker();
        if outcome.is_terminal() {
            return Err(ChessError::GameOver(outcome));
        }
        if piece.color != self.active_color {
            return Err(ChessError::NotYourTurn(source));
        }
        if !self.get_legal_moves_from(source).contains(&mv) {
            return Err(ChessError::IllegalMove {
                from: source,
                to: destination,
            });
        }

        self.position_history.push(self.hash);
        let undo = self.make_move(mv);
        self.history.push(undo);
        Ok(undo)
    }

    /// Takes back the last real game move.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        self.unmake_move(&undo);
        self.position_history.pop();
        Some(undo.mv)
    }

    pub fn checkmate_stalemate_checker(&mut self) -> GameOutcome {
        let side = self.active_color;
        let attacked = self.is_king_attacked(side);
        match (self.has_legal_move(side), attacked) {
            (false, true) => GameOutcome::Checkmate,
            (false, false) => GameOutcome::Stalemate,
            (true, true) => GameOutcome::Check,
            (true, false) => GameOutcome::Ongoing,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.is_draw_by_fifty_move_rule() || self.is_threefold_repetition()
    }

    pub fn is_draw_by_fifty_move_rule(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// The current position occurred at least twice before in the game.
    pub fn is_threefold_repetition(&self) -> bool {
        self.position_history.iter().filter(|&&hash| hash == self.hash).count() >= 2
    }

    pub fn render_to_string(&self) -> String {
        let mut board_representation = String::new();
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");
        board_representation.push_str("  ┌───┬───┬───┬───┬───┬───┬───┬───┐\n");

        for row in (0..8).rev() {
            board_representation.push_str(&format!("{} │", row + 1));
            // The a-file is column 7.
            for col in (0..8).rev() {
                let square = match &self.squares[row][col] {
                    Square::Empty => ' ',
                    Square::Occupied(piece) => piece.to_char(),
                };
                board_representation.push_str(&format!(" {} │", square));
            }
            board_representation.push_str(&format!(" {}\n", row + 1));

            if row > 0 {
                board_representation.push_str("  ├───┼───┼───┼───┼───┼───┼───┼───┤\n");
            }
        }

        board_representation.push_str("  └───┴───┴───┴───┴───┴───┴───┴───┘\n");
        board_representation.push_str("    a   b   c   d   e   f   g   h  \n");

        board_representation
    }
}
