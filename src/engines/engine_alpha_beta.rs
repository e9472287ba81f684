use crate::chess_boards::chess_board::ChessBoard;
use crate::engines::evaluation::{Evaluator, MaterialEvaluator};
use crate::engines::{
    root_moves, ChessEngine, InfoCallback, PrincipalVariation, RepetitionTable, SearchConfig, SearchResult, DRAW,
    MATE_SCORE, MIN_EVALUATION,
};
use std::time::Instant;

pub const MAX_PLY: u8 = 20;

pub struct AlphaBetaEngine<E: Evaluator = MaterialEvaluator> {
    config: SearchConfig,
    evaluator: E,
    node_count: u64,
    repetition_map: RepetitionTable,
    principal_variation: PrincipalVariation,
}

impl AlphaBetaEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_evaluator(config, MaterialEvaluator::new())
    }
}

impl<E: Evaluator> AlphaBetaEngine<E> {
    pub fn with_evaluator(config: SearchConfig, evaluator: E) -> Self {
        AlphaBetaEngine {
            config: SearchConfig {
                depth: config.depth.min(MAX_PLY),
                ..config
            },
            evaluator,
            node_count: 0,
            repetition_map: RepetitionTable::default(),
            principal_variation: PrincipalVariation::default(),
        }
    }

    /// Fixed depth search of the side to move. Depth 0 is searched as 1.
    pub fn search(&mut self, board: &mut ChessBoard, depth: u8) -> Option<SearchResult> {
        let depth = depth.clamp(1, MAX_PLY);
        self.node_count = 0;
        self.repetition_map = RepetitionTable::from_board(board);
        self.principal_variation.reset(depth);

        let mut best_move = None;
        let mut best_score = MIN_EVALUATION;
        let mut alpha = MIN_EVALUATION;

        for mv in root_moves(board, self.config.shuffle_seed) {
            let undo = board.make_move(mv);
            let score = -self.negamax(board, depth - 1, MIN_EVALUATION, -alpha, 1);
            board.unmake_move(&undo);

            if score > best_score {
                alpha = score;
                best_score = score;
                best_move = Some(mv);
                self.principal_variation.save(mv, 0);
            }
        }

        best_move.map(|best_move| SearchResult {
            best_move,
            score: best_score,
            node_count: self.node_count,
            depth,
            principal_variation: self.principal_variation.root_line(),
        })
    }

    /// Searches depth 1, 2, ... up to the configured depth and reports each
    /// finished iteration. The last result wins.
    pub fn find_best_move_iterative(
        &mut self,
        board: &mut ChessBoard,
        info_callback: Option<InfoCallback>,
    ) -> Option<SearchResult> {
        let start_time = Instant::now();
        let mut total_node_count = 0;
        let mut best = None;

        for depth in 1..=self.config.depth.max(1) {
            let Some(mut result) = self.search(board, depth) else {
                break;
            };
            total_node_count += result.node_count;
            result.node_count = total_node_count;
            if let Some(callback) = info_callback {
                callback(
                    depth,
                    result.score,
                    total_node_count,
                    start_time.elapsed(),
                    result.principal_variation_string(),
                );
            }
            // A forced mate will not get any better with more depth.
            let mate_found = result.score.abs() >= MATE_SCORE - MAX_PLY as i32;
            best = Some(result);
            if mate_found {
                break;
            }
        }

        best
    }

    fn budget_exhausted(&self) -> bool {
        matches!(self.config.max_nodes, Some(max) if self.node_count >= max)
    }

    fn negamax(&mut self, board: &mut ChessBoard, depth: u8, alpha: i32, beta: i32, ply: usize) -> i32 {
        self.node_count += 1;
        self.principal_variation.clear_ply(ply);

        let side = board.active_color;
        let mut moves = board.get_all_legal_moves(side);
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

        // Captures first, so cut-offs come early.
        moves.sort_by_cached_key(|mv| -board.capture_score(mv));

        self.repetition_map.insert(hash);
        let mut alpha = alpha;
        let mut max_score = MIN_EVALUATION;

        for mv in moves {
            let undo = board.make_move(mv);
            let score = -self.negamax(board, depth - 1, -beta, -alpha, ply + 1);
            board.unmake_move(&undo);

            if score > max_score {
                max_score = score;
                if score > alpha {
                    alpha = score;
                    self.principal_variation.save(mv, ply);
                    if alpha >= beta {
                        // Beta cutoff fail soft
                        break;
                    }
                }
            }
        }

        self.repetition_map.remove(hash);
        max_score
    }
}

impl<E: Evaluator> ChessEngine for AlphaBetaEngine<E> {
    fn name(&self) -> &str {
        "AlphaBeta"
    }

    fn find_best_move(&mut self, board: &mut ChessBoard) -> Option<SearchResult> {
        let depth = self.config.depth;
        self.search(board, depth)
    }
}
