use super::ChessError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Row delta of a pawn step.
    pub fn forward(&self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn home_row(&self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn pawn_row(&self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    pub fn promotion_row(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Pieces a pawn may turn into, in the order moves are generated.
pub const PROMOTION_PIECES: [PieceType; 4] = [PieceType::Queen, PieceType::Rook, PieceType::Bishop, PieceType::Knight];

impl PieceType {
    pub fn index(&self) -> usize {
        match self {
            PieceType::Pawn => 0,
            PieceType::Knight => 1,
            PieceType::Bishop => 2,
            PieceType::Rook => 3,
            PieceType::Queen => 4,
            PieceType::King => 5,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceType::Pawn => write!(f, "P"),
            PieceType::Knight => write!(f, "N"),
            PieceType::Bishop => write!(f, "B"),
            PieceType::Rook => write!(f, "R"),
            PieceType::Queen => write!(f, "Q"),
            PieceType::King => write!(f, "K"),
        }
    }
}

/// A piece standing on the board. `moved` is set once the piece leaves its square
/// and feeds the pawn double step and castling eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    pub moved: bool,
}

impl Piece {
    pub fn new(color: Color, kind: PieceType) -> Self {
        Self { color, kind, moved: false }
    }

    pub fn to_char(&self) -> char {
        let c = self.kind.to_string().chars().next().unwrap_or('?');
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Occupied(Piece),
    Empty,
}

impl Square {
    pub fn piece(&self) -> Option<Piece> {
        match self {
            Square::Occupied(piece) => Some(*piece),
            Square::Empty => None,
        }
    }

    /// Tri-state ownership: white, black or nobody.
    pub fn owner(&self) -> Option<Color> {
        self.piece().map(|p| p.color)
    }
}

/// Board coordinate. Row 0 is White's back rank; column 0 is the h-file and
/// column 7 the a-file, so both kings start on column 3.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct ChessField {
    pub row: u8,
    pub col: u8,
}

impl ChessField {
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    pub fn is_on_board(&self) -> bool {
        self.row < 8 && self.col < 8
    }

    /// The field `d_row`/`d_col` away, or `None` when that leaves the board.
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<ChessField> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(ChessField::new(row as u8, col as u8))
        } else {
            None
        }
    }

    pub fn from_algebraic(algebraic: &str) -> Result<Self, ChessError> {
        let mut chars = algebraic.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => {
                let row = rank as u8 - b'1';
                let col = 7 - (file as u8 - b'a');
                Ok(Self { row, col })
            }
            _ => Err(ChessError::InvalidAlgebraic(algebraic.to_string())),
        }
    }

    pub fn as_algebraic(&self) -> String {
        to_algebraic_square(self.row, self.col)
    }
}

impl fmt::Display for ChessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u8, u8)> for ChessField {
    fn from((row, col): (u8, u8)) -> Self {
        ChessField::new(row, col)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub enum MoveKind {
    Normal,
    Castle,
    EnPassant,
    Promotion(PieceType),
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash)]
pub struct Move {
    pub from: ChessField,
    pub to: ChessField,
    pub kind: MoveKind,
}

impl Move {
    pub fn new(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Self {
        Self::between(ChessField::new(from_row, from_col), ChessField::new(to_row, to_col))
    }

    pub fn between(from: ChessField, to: ChessField) -> Self {
        Self {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }

    pub fn with_kind(mut self, kind: MoveKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn promotion(&self) -> Option<PieceType> {
        match self.kind {
            MoveKind::Promotion(piece) => Some(piece),
            _ => None,
        }
    }

    pub fn as_algebraic(&self) -> String {
        let base_move = format!("{}{}", self.from.as_algebraic(), self.to.as_algebraic());
        if let Some(promo) = self.promotion() {
            base_move + &promo.to_string().to_lowercase()
        } else {
            base_move
        }
    }

    /// Parses long algebraic notation such as `e2e4` or `g7g8n`. Castling,
    /// en passant and default promotions are classified by the board when the
    /// move is applied.
    pub fn from_algebraic(algebraic: &str) -> Result<Self, ChessError> {
        if !algebraic.is_ascii() || !(4..=5).contains(&algebraic.len()) {
            return Err(ChessError::InvalidAlgebraic(algebraic.to_string()));
        }
        let from = ChessField::from_algebraic(&algebraic[0..2])?;
        let to = ChessField::from_algebraic(&algebraic[2..4])?;

        let kind = match algebraic.chars().nth(4) {
            None => MoveKind::Normal,
            Some(c) => match PieceType::from_char(c) {
                Some(piece) if PROMOTION_PIECES.contains(&piece) => MoveKind::Promotion(piece),
                _ => return Err(ChessError::InvalidAlgebraic(algebraic.to_string())),
            },
        };
        Ok(Self { from, to, kind })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_algebraic())
    }
}

/// Classification of the position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameOutcome {
    /// Numeric encoding: checkmate `0`, stalemate `1`, anything else `-1`.
    pub fn code(&self) -> i8 {
        match self {
            GameOutcome::Checkmate => 0,
            GameOutcome::Stalemate => 1,
            GameOutcome::Ongoing | GameOutcome::Check => -1,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GameOutcome::Checkmate | GameOutcome::Stalemate)
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::Ongoing => write!(f, "ongoing"),
            GameOutcome::Check => write!(f, "check"),
            GameOutcome::Checkmate => write!(f, "checkmate"),
            GameOutcome::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// The two castling directions, described in board columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastlingSide {
    King,
    Queen,
}

pub const KING_HOME_COL: u8 = 3;

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::King, CastlingSide::Queen];

    pub fn rook_col(&self) -> u8 {
        match self {
            CastlingSide::King => 0,
            CastlingSide::Queen => 7,
        }
    }

    pub fn king_target_col(&self) -> u8 {
        match self {
            CastlingSide::King => 1,
            CastlingSide::Queen => 5,
        }
    }

    pub fn rook_target_col(&self) -> u8 {
        match self {
            CastlingSide::King => 2,
            CastlingSide::Queen => 4,
        }
    }

    /// Columns between king and rook that must be empty.
    pub fn empty_cols(&self) -> &'static [u8] {
        match self {
            CastlingSide::King => &[1, 2],
            CastlingSide::Queen => &[4, 5, 6],
        }
    }

    /// Columns the king stands on, crosses or lands on; none may be attacked.
    pub fn king_path_cols(&self) -> &'static [u8] {
        match self {
            CastlingSide::King => &[3, 2, 1],
            CastlingSide::Queen => &[3, 4, 5],
        }
    }

    /// Index into `ChessBoard::castling_rights` (K, Q, k, q).
    pub fn rights_index(&self, color: Color) -> usize {
        match (color, self) {
            (Color::White, CastlingSide::King) => 0,
            (Color::White, CastlingSide::Queen) => 1,
            (Color::Black, CastlingSide::King) => 2,
            (Color::Black, CastlingSide::Queen) => 3,
        }
    }

    pub fn from_king_target(col: u8) -> Option<Self> {
        CastlingSide::BOTH.into_iter().find(|side| side.king_target_col() == col)
    }
}

pub fn to_algebraic_square(row: u8, col: u8) -> String {
    let file = (b'a' + 7u8.saturating_sub(col)) as char;
    let rank = (row as u16 + 1).to_string();
    format!("{}{}", file, rank)
}
