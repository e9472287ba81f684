use rookery::chess_boards::chess_board::fen::INITIAL_POSITION;
use rookery::engines::{Evaluator, MaterialEvaluator};
use rookery::{choose_move, ChessBoard, ChessError, ChessField, Color, GameOutcome, Piece, PieceType};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn field(row: u8, col: u8) -> ChessField {
    ChessField::new(row, col)
}

fn sorted(mut fields: Vec<ChessField>) -> Vec<ChessField> {
    fields.sort();
    fields
}

fn knight_offsets() -> Vec<ChessField> {
    sorted(vec![
        field(5, 3),
        field(5, 5),
        field(4, 6),
        field(4, 2),
        field(2, 2),
        field(2, 6),
        field(1, 3),
        field(1, 5),
    ])
}

#[test]
fn fools_mate() {
    let mut board = ChessBoard::new();
    for (from, to) in [
        (field(1, 2), field(2, 2)),
        (field(6, 3), field(4, 3)),
        (field(1, 1), field(3, 1)),
        (field(7, 4), field(3, 0)),
    ] {
        assert!(!board.checkmate_stalemate_checker().is_terminal());
        board.move_piece(from, to, false).unwrap();
    }
    let outcome = board.checkmate_stalemate_checker();
    assert_eq!(outcome, GameOutcome::Checkmate);
    assert_eq!(outcome.code(), 0);
    assert_eq!(board.active_color, Color::White);

    let before = board.clone();
    assert!(matches!(
        board.move_piece(field(1, 3), field(3, 3), false),
        Err(ChessError::GameOver(GameOutcome::Checkmate))
    ));
    assert_eq!(board, before);
}

#[test]
fn knight_on_empty_board() {
    let mut board = ChessBoard::empty();
    let knight = Piece::new(Color::White, PieceType::Knight);
    board.place_piece(field(3, 4), knight).unwrap();

    assert_eq!(sorted(board.get_valid_piece_moves(field(3, 4))), knight_offsets());
    assert_eq!(sorted(knight.peaceful_moves(&board, field(3, 4))), knight_offsets());
    assert!(knight.piece_takes(&board, field(3, 4)).is_empty());
}

#[test]
fn knight_in_the_corner_stays_on_board() {
    let mut board = ChessBoard::empty();
    let knight = Piece::new(Color::Black, PieceType::Knight);
    board.place_piece(field(0, 0), knight).unwrap();
    assert_eq!(sorted(knight.all_moves(&board, field(0, 0))), vec![field(1, 2), field(2, 1)]);
}

#[test]
fn knight_surrounded_by_opposing_pawns() {
    let mut board = ChessBoard::empty();
    let knight = Piece::new(Color::White, PieceType::Knight);
    board.place_piece(field(3, 4), knight).unwrap();
    for target in knight_offsets() {
        board.place_piece(target, Piece::new(Color::Black, PieceType::Pawn)).unwrap();
    }

    assert_eq!(sorted(knight.piece_takes(&board, field(3, 4))), knight_offsets());
    assert!(knight.peaceful_moves(&board, field(3, 4)).is_empty());
}

#[test]
fn knight_moves_split_into_takes_and_peaceful_moves() {
    let mut board = ChessBoard::empty();
    let knight = Piece::new(Color::White, PieceType::Knight);
    board.place_piece(field(3, 4), knight).unwrap();
    board.place_piece(field(5, 3), Piece::new(Color::Black, PieceType::Bishop)).unwrap();
    board.place_piece(field(1, 5), Piece::new(Color::Black, PieceType::Rook)).unwrap();
    board.place_piece(field(2, 2), Piece::new(Color::White, PieceType::Pawn)).unwrap();

    let takes = sorted(knight.piece_takes(&board, field(3, 4)));
    let peaceful = sorted(knight.peaceful_moves(&board, field(3, 4)));
    assert_eq!(takes, vec![field(1, 5), field(5, 3)]);
    assert_eq!(peaceful.len(), 5);
    assert!(takes.iter().all(|target| !peaceful.contains(target)));

    let mut union = takes;
    union.extend(peaceful);
    assert_eq!(sorted(union), sorted(knight.all_moves(&board, field(3, 4))));
}

#[test]
fn evaluation_of_knight_against_pawn() {
    let mut board = ChessBoard::empty();
    board.place_piece(field(3, 4), Piece::new(Color::White, PieceType::Knight)).unwrap();
    board.place_piece(field(6, 0), Piece::new(Color::Black, PieceType::Pawn)).unwrap();
    let evaluator = MaterialEvaluator::new();
    assert_eq!(evaluator.evaluate_board(&board, Color::White), 20);
    assert_eq!(evaluator.evaluate_board(&board, Color::Black), -20);
}

#[test]
fn evaluation_is_symmetric_in_perspective() {
    let fens = [INITIAL_POSITION, KIWIPETE, "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"];
    for fen in fens {
        let board = ChessBoard::from_fen(fen).unwrap();
        for evaluator in [MaterialEvaluator::new(), MaterialEvaluator::positional()] {
            assert_eq!(
                evaluator.evaluate_board(&board, Color::White),
                -evaluator.evaluate_board(&board, Color::Black),
                "{}",
                fen
            );
        }
    }
}

#[test]
fn every_move_can_be_taken_back() {
    for fen in [INITIAL_POSITION, KIWIPETE, "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1"] {
        let mut board = ChessBoard::from_fen(fen).unwrap();
        let before = board.clone();
        let side = board.active_color;
        for mv in board.get_all_legal_moves(side) {
            board
                .move_piece_with_promotion(mv.from, mv.to, mv.promotion(), false)
                .unwrap();
            assert_ne!(board, before);
            assert_eq!(board.undo_last_move(), Some(mv));
            assert_eq!(board, before, "{} {}", fen, mv.as_algebraic());
        }
    }
}

fn assert_no_self_check(board: &mut ChessBoard, depth: u8) {
    if depth == 0 {
        return;
    }
    let side = board.active_color;
    for mv in board.get_all_legal_moves(side) {
        let undo = board.make_move(mv);
        assert!(!board.is_king_attacked(side), "{} leaves the king in check", mv.as_algebraic());
        assert_no_self_check(board, depth - 1);
        board.unmake_move(&undo);
    }
}

#[test]
fn legal_moves_never_leave_the_king_attacked() {
    for fen in [
        KIWIPETE,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
    ] {
        let mut board = ChessBoard::from_fen(fen).unwrap();
        assert_no_self_check(&mut board, 2);
    }
}

#[test]
fn outcome_reporting() {
    let mut mated = ChessBoard::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert_eq!(mated.checkmate_stalemate_checker().code(), 0);

    let mut stalemated = ChessBoard::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
    assert_eq!(stalemated.checkmate_stalemate_checker(), GameOutcome::Stalemate);
    assert_eq!(stalemated.checkmate_stalemate_checker().code(), 1);

    let mut checked = ChessBoard::from_fen("k7/8/8/8/8/8/8/R6K b - - 0 1").unwrap();
    assert_eq!(checked.checkmate_stalemate_checker(), GameOutcome::Check);
    assert_eq!(checked.checkmate_stalemate_checker().code(), -1);

    let mut start = ChessBoard::new();
    assert_eq!(start.checkmate_stalemate_checker(), GameOutcome::Ongoing);
}

#[test]
fn engine_plays_the_mating_move() {
    let mut board = ChessBoard::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    let mv = choose_move(&mut board, Color::White, 2).unwrap();
    board.move_piece(mv.from, mv.to, false).unwrap();
    assert_eq!(board.checkmate_stalemate_checker().code(), 0);
}

#[test]
fn engine_answers_a_short_game() {
    let mut board = ChessBoard::new();
    for _ in 0..6 {
        let side = board.active_color;
        assert_eq!(choose_move(&mut board, side.opposite(), 2), None);
        let mv = choose_move(&mut board, side, 2).unwrap();
        assert!(board.get_all_legal_moves(side).contains(&mv));
        board
            .move_piece_with_promotion(mv.from, mv.to, mv.promotion(), false)
            .unwrap();
    }
    assert_eq!(board.position_history.len(), 6);
    assert_eq!(board.fullmove_number, 4);
}

#[test]
fn engine_has_nothing_to_play_when_mated() {
    let mut board = ChessBoard::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        let from = ChessField::from_algebraic(from).unwrap();
        let to = ChessField::from_algebraic(to).unwrap();
        board.move_piece(from, to, false).unwrap();
    }
    assert_eq!(choose_move(&mut board, Color::White, 3), None);
}
