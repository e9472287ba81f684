use crate::chess_boards::chess_board::{ChessBoard, Color, Move};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use std::collections::BTreeMap;
use std::time::Duration;

pub mod engine_alpha_beta;
pub mod engine_minmax;
pub mod evaluation;

pub use engine_alpha_beta::AlphaBetaEngine;
pub use engine_minmax::MinMaxEngine;
pub use evaluation::{Evaluator, MaterialEvaluator};

/// Called once per finished iteration of an iterative search.
pub type InfoCallback = fn(depth: u8, best_eval: i32, nodes: u64, elapsed: Duration, pv: String);

/// Score of delivering mate at the root. A mate found `ply` plies deep scores
/// `MATE_SCORE - ply`, so shorter mates win.
pub const MATE_SCORE: i32 = 1_000_000;
pub const DRAW: i32 = 0;
const MIN_EVALUATION: i32 = i32::MIN + 1; // +1 is important because -MIN is not a i32 number

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Plies to search, the root move included.
    pub depth: u8,
    /// Once this many nodes are visited, remaining nodes are evaluated statically.
    pub max_nodes: Option<u64>,
    /// Shuffles the root moves with a seeded generator when set.
    pub shuffle_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            max_nodes: None,
            shuffle_seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Move,
    /// From the point of view of the side to move at the root.
    pub score: i32,
    pub node_count: u64,
    pub depth: u8,
    pub principal_variation: Vec<Move>,
}

impl SearchResult {
    pub fn principal_variation_string(&self) -> String {
        self.principal_variation
            .iter()
            .map(|mv| mv.as_algebraic())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub trait ChessEngine {
    fn name(&self) -> &str;
    /// Searches the position of the side to move. The board is restored
    /// before returning; `None` when that side has no legal move.
    fn find_best_move(&mut self, board: &mut ChessBoard) -> Option<SearchResult>;
}

/// Legal moves of the side to move in generation order, or shuffled by `seed`.
pub(crate) fn root_moves(board: &mut ChessBoard, shuffle_seed: Option<u64>) -> Vec<Move> {
    let side = board.active_color;
    let mut moves = board.get_all_legal_moves(side);
    if let Some(seed) = shuffle_seed {
        moves.shuffle(&mut Pcg64::seed_from_u64(seed));
    }
    moves
}

/// Position counts along the game and the current search path.
#[derive(Debug, Default, Clone)]
pub(crate) struct RepetitionTable {
    counts: BTreeMap<u64, u8>,
}

impl RepetitionTable {
    pub fn from_board(board: &ChessBoard) -> Self {
        let mut table = Self::default();
        for &hash in &board.position_history {
            table.insert(hash);
        }
        table.insert(board.hash);
        table
    }

    pub fn count(&self, hash: u64) -> u8 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    /// A third occurrence ends the game in a draw.
    pub fn is_repetition(&self, hash: u64) -> bool {
        self.count(hash) >= 2
    }

    pub fn insert(&mut self, hash: u64) {
        *self.counts.entry(hash).or_insert(0) += 1;
    }

    pub fn remove(&mut self, hash: u64) {
        if let Some(count) = self.counts.get_mut(&hash) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.counts.remove(&hash);
            }
        }
    }
}

/// Triangular principal variation table indexed by ply.
#[derive(Debug, Default, Clone)]
pub(crate) struct PrincipalVariation {
    lines: Vec<Vec<Move>>,
}

impl PrincipalVariation {
    pub fn reset(&mut self, depth: u8) {
        self.lines = vec![Vec::new(); depth as usize + 2];
    }

    pub fn clear_ply(&mut self, ply: usize) {
        if let Some(line) = self.lines.get_mut(ply) {
            line.clear();
        }
    }

    pub fn save(&mut self, mv: Move, ply: usize) {
        let tail = self.lines.get(ply + 1).cloned().unwrap_or_default();
        if let Some(line) = self.lines.get_mut(ply) {
            line.clear();
            line.push(mv);
            line.extend(tail);
        }
    }

    pub fn root_line(&self) -> Vec<Move> {
        self.lines.first().cloned().unwrap_or_default()
    }
}

/// Picks a move for `side` with an alpha-beta search `depth` plies deep,
/// scoring positions by material and piece placement. `None` when `side` is
/// not to move or has no legal move. The board is left unchanged.
pub fn choose_move(board: &mut ChessBoard, side: Color, depth: u8) -> Option<Move> {
    if side != board.active_color {
        return None;
    }
    let config = SearchConfig {
        depth,
        ..SearchConfig::default()
    };
    let mut engine = AlphaBetaEngine::with_evaluator(config, MaterialEvaluator::positional());
    engine.find_best_move(board).map(|result| result.best_move)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_boards::chess_board::{ChessField, GameOutcome};

    #[test]
    fn test_choose_move_wrong_side() {
        let mut board = ChessBoard::new();
        assert_eq!(choose_move(&mut board, Color::Black, 2), None);
    }

    #[test]
    fn test_choose_move_without_legal_moves() {
        let mut board = ChessBoard::from_fen("1k6/8/8/8/8/1r6/7r/K7 w - - 0 1").unwrap();
        assert_eq!(choose_move(&mut board, Color::White, 3), None);
        let mut board = ChessBoard::from_fen("1k6/8/8/8/8/8/PPn5/KN6 w - - 0 1").unwrap();
        assert_eq!(choose_move(&mut board, Color::White, 3), None);
    }

    #[test]
    fn test_choose_move_mates_in_one() {
        let mut board = ChessBoard::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
        let before = board.clone();
        let mv = choose_move(&mut board, Color::White, 3).unwrap();
        assert_eq!(board, before);
        assert_eq!(mv.as_algebraic(), "a1a8");

        board.move_piece(mv.from, mv.to, false).unwrap();
        assert_eq!(board.checkmate_stalemate_checker(), GameOutcome::Checkmate);
    }

    #[test]
    fn test_choose_move_takes_hanging_queen() {
        let mut board = ChessBoard::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let mv = choose_move(&mut board, Color::White, 1).unwrap();
        assert_eq!(mv.to, ChessField::from_algebraic("d5").unwrap());
    }

    #[test]
    fn test_root_moves_shuffle_is_reproducible() {
        let mut board = ChessBoard::new();
        let ordered = root_moves(&mut board, None);
        let first = root_moves(&mut board, Some(7));
        let second = root_moves(&mut board, Some(7));
        assert_eq!(first, second);
        let mut sorted_first = first.clone();
        let mut sorted_ordered = ordered.clone();
        sorted_first.sort();
        sorted_ordered.sort();
        assert_eq!(sorted_first, sorted_ordered);
    }

    #[test]
    fn test_repetition_table_counts() {
        let mut table = RepetitionTable::default();
        table.insert(5);
        table.insert(5);
        assert!(table.is_repetition(5));
        table.remove(5);
        assert_eq!(table.count(5), 1);
        table.remove(5);
        table.remove(5);
        assert_eq!(table.count(5), 0);
    }

    #[test]
    fn test_principal_variation_table() {
        let mut pv = PrincipalVariation::default();
        pv.reset(3);
        let a = Move::new(1, 3, 3, 3);
        let b = Move::new(6, 3, 4, 3);
        pv.save(b, 1);
        pv.save(a, 0);
        assert_eq!(pv.root_line(), vec![a, b]);
        pv.clear_ply(0);
        assert!(pv.root_line().is_empty());
    }
}
