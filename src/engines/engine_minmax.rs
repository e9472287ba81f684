use crate::chess_boards::chess_board::{ChessBoard, Move};
use crate::engines::evaluation::{Evaluator, MaterialEvaluator};
use crate::engines::{
    root_moves, ChessEngine, PrincipalVariation, RepetitionTable, SearchConfig, SearchResult, DRAW, MATE_SCORE,
    MIN_EVALUATION,
};

/// Plain negamax over every legal move. Slow, but it is the reference the
/// pruned search is checked against.
pub struct MinMaxEngine<E: Evaluator = MaterialEvaluator> {
    config: SearchConfig,
    evaluator: E,
    node_count: u64,
    repetition_map: RepetitionTable,
    principal_variation: PrincipalVariation,
}

impl MinMaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, MaterialEvaluator::new())
    }
}

impl<E: Evaluator> MinMaxEngine<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        Self {
            config,
            evaluator,
            node_count: 0,
            repetition_map: RepetitionTable::default(),
            principal_variation: PrincipalVariation::default(),
        }
    }

    fn budget_exhausted(&self) -> bool {
        matches!(self.config.max_nodes, Some(max) if self.node_count >= max)
    }

    fn negamax(&mut self, board: &mut ChessBoard, depth: u8, ply: usize) -> i32 {
        self.node_count += 1;
        self.principal_variation.clear_ply(ply);

        let side = board.active_color;
        let moves = board.get_all_legal_moves(side);
        if moves.is_empty() {
            return if board.is_king_attacked(side) {
                -(MATE_SCORE - ply as i32)
            } else {
                DRAW
            };
        }
        // Mate outranks a repetition or the fifty-move limit reached by the same move.
        let hash = board.hash;
        if self.repetition_map.is_repetition(hash) || board.is_draw_by_fifty_move_rule() {
            return DRAW;
        }
        if depth == 0 || self.budget_exhausted() {
            return self.evaluator.evaluate_board(board, side);
        }

        self.repetition_map.insert(hash);
        let mut max_score = MIN_EVALUATION;
        for mv in moves {
            let undo = board.make_move(mv);
            let score = -self.negamax(board, depth - 1, ply + 1);
            board.unmake_move(&undo);

            if score > max_score {
                max_score = score;
                self.principal_variation.save(mv, ply);
            }
        }
        self.repetition_map.remove(hash);

        max_score
    }
}

impl<E: Evaluator> ChessEngine for MinMaxEngine<E> {
    fn name(&self) -> &str {
        "MinMax"
    }

    fn find_best_move(&mut self, board: &mut ChessBoard) -> Option<SearchResult> {
        let depth = self.config.depth.max(1);
        self.node_count = 0;
        self.repetition_map = RepetitionTable::from_board(board);
        self.principal_variation.reset(depth);

        let mut best: Option<(Move, i32)> = None;
        for mv in root_moves(board, self.config.shuffle_seed) {
            let undo = board.make_move(mv);
            let score = -self.negamax(board, depth - 1, 1);
            board.unmake_move(&undo);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
                self.principal_variation.save(mv, 0);
            }
        }

        best.map(|(best_move, score)| SearchResult {
            best_move,
            score,
            node_count: self.node_count,
            depth,
            principal_variation: self.principal_variation.root_line(),
        })
    }
}
