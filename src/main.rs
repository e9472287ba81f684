use std::process::ExitCode;
use std::time::{Duration, Instant};

use rookery::chess_boards::chess_board::fen::INITIAL_POSITION;
use rookery::engines::{InfoCallback, MaterialEvaluator};
use rookery::{perft_divide, AlphaBetaEngine, ChessBoard, ChessError, ChessEngine, Move, SearchConfig};

use clap::arg;
use clap::command;
use clap::ArgMatches;
use clap::Command;

use tabled::settings::Style;
use tabled::Table;
use tabled::Tabled;

const MAX_SELFPLAY_MOVES: u16 = 300;

fn main() -> ExitCode {
    let matches = command!()
        .version("v0.1.0")
        .propagate_version(true)
        .arg(arg!(
            -d --debug "Turn debugging information on"
        ))
        .subcommand(
            Command::new("benchmark")
                .about("Searches a position at increasing depth")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(
                    "1rb2rk1/p4ppp/1p1qp1n1/3n2N1/2pP4/2P3P1/PPQ2PBP/R1B1R1K1 w - - 4 17",
                ))
                .arg(
                    arg!(-x --depth <d> "Deepest search")
                        .default_value("5")
                        .value_parser(clap::value_parser!(u8)),
                ),
        )
        .subcommand(
            Command::new("selfplay")
                .about("Lets the engine play against itself")
                .arg(arg!(-f --fen <FEN> "Board position").default_value(INITIAL_POSITION))
                .arg(
                    arg!(-x --depth <d> "Search depth in plies")
                        .default_value("3")
                        .value_parser(clap::value_parser!(u8)),
                )
                .arg(arg!(-n --nodes <n> "Node budget per move").value_parser(clap::value_parser!(u64)))
                .arg(arg!(-s --seed <seed> "Shuffle root moves with this seed").value_parser(clap::value_parser!(u64))),
        )
        .subcommand(
            Command::new("perft")
                .about("Run Perft test")
                .arg(
                    arg!(
                    -f --fen <FEN> "Board position"
                            )
                    .default_value(INITIAL_POSITION),
                )
                .arg(
                    arg!(
                    -x --depth <d> "depth"
                            )
                    .default_value("3")
                    .value_parser(clap::value_parser!(u8)),
                )
                .arg(
                    arg!(
                    -m --moves <moves> "List of moves"
                            )
                    .num_args(1..)
                    .value_parser(clap::value_parser!(String)),
                ),
        )
        .get_matches();

    let debug = matches.get_flag("debug");

    let result = match matches.subcommand() {
        Some(("benchmark", arg_matches)) => benchmark(arg_matches),
        Some(("selfplay", arg_matches)) => selfplay(arg_matches, debug),
        Some(("perft", arg_matches)) => perft(arg_matches),
        _ => selfplay(&ArgMatches::default(), debug),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}

fn fen_argument(arg_matches: &ArgMatches) -> &str {
    arg_matches
        .try_get_one::<String>("fen")
        .ok()
        .flatten()
        .map_or(INITIAL_POSITION, String::as_str)
}

fn depth_argument(arg_matches: &ArgMatches, default: u8) -> u8 {
    arg_matches.try_get_one::<u8>("depth").ok().flatten().copied().unwrap_or(default)
}

fn print_info(depth: u8, best_eval: i32, nodes: u64, elapsed: Duration, pv: String) {
    println!(
        "info depth {} score {} nodes {} time {} pv {}",
        depth,
        best_eval,
        nodes,
        elapsed.as_millis(),
        pv
    );
}

#[derive(Tabled)]
struct BenchmarkRow {
    ply: u8,
    score: i32,
    node_count: u64,
    elapsed_time: f32,
    knodes_per_sec: f32,
    best_move: String,
}

fn benchmark(arg_matches: &ArgMatches) -> Result<(), ChessError> {
    let mut board = ChessBoard::from_fen(fen_argument(arg_matches))?;
    let max_depth = depth_argument(arg_matches, 5);
    let mut table_rows = Vec::new();
    for depth in 1..=max_depth {
        let start_time = Instant::now();
        let config = SearchConfig {
            depth,
            ..SearchConfig::default()
        };
        let mut engine = AlphaBetaEngine::with_evaluator(config, MaterialEvaluator::positional());
        let Some(result) = engine.find_best_move(&mut board) else {
            println!("No best move found!");
            break;
        };
        let elapsed = start_time.elapsed();
        table_rows.push(BenchmarkRow {
            ply: depth,
            score: result.score,
            node_count: result.node_count,
            elapsed_time: elapsed.as_secs_f32(),
            knodes_per_sec: result.node_count as f32 / elapsed.as_secs_f32().max(f32::EPSILON) / 1000f32,
            best_move: result.best_move.as_algebraic(),
        });
        if elapsed.as_secs() > 10 {
            break;
        }
    }
    println!("{}", Table::new(table_rows).with(Style::modern()));
    Ok(())
}

fn selfplay(arg_matches: &ArgMatches, debug: bool) -> Result<(), ChessError> {
    let mut board = ChessBoard::from_fen(fen_argument(arg_matches))?;
    let config = SearchConfig {
        depth: depth_argument(arg_matches, 3),
        max_nodes: arg_matches.try_get_one::<u64>("nodes").ok().flatten().copied(),
        shuffle_seed: arg_matches.try_get_one::<u64>("seed").ok().flatten().copied(),
    };
    let info_callback: Option<InfoCallback> = if debug { Some(print_info as InfoCallback) } else { None };

    println!("{}", board.render_to_string());
    for ply in 1..=MAX_SELFPLAY_MOVES {
        let outcome = board.checkmate_stalemate_checker();
        if outcome.is_terminal() {
            println!("Game over: {:?} ({}), {:?} to move", outcome, outcome.code(), board.active_color);
            return Ok(());
        }
        if board.is_draw() {
            println!("Draw after {}", board.to_fen());
            return Ok(());
        }

        let mut engine = AlphaBetaEngine::with_evaluator(config, MaterialEvaluator::positional());
        let Some(result) = engine.find_best_move_iterative(&mut board, info_callback) else {
            break;
        };
        let mover = board.active_color;
        let mv = result.best_move;
        board.move_piece_with_promotion(mv.from, mv.to, mv.promotion(), false)?;
        println!(
            "{}. {:?} {} (score {}, nodes {})",
            ply,
            mover,
            mv.as_algebraic(),
            result.score,
            result.node_count
        );
        if debug {
            println!("{}", board.render_to_string());
        }
    }
    println!("Stopped after {} moves: {}", MAX_SELFPLAY_MOVES, board.to_fen());
    Ok(())
}

fn perft(arg_matches: &ArgMatches) -> Result<(), ChessError> {
    let fen = fen_argument(arg_matches);
    let depth = depth_argument(arg_matches, 3);
    let moves = arg_matches
        .get_many::<String>("moves")
        .unwrap_or_default()
        .filter(|&v| !v.is_empty())
        .collect::<Vec<_>>();
    println!("Perft test for {} moves {:?} with depth {}", fen, moves, depth);

    let mut board = ChessBoard::from_fen(fen)?;
    for m in moves {
        let mv = Move::from_algebraic(m)?;
        board.move_piece_with_promotion(mv.from, mv.to, mv.promotion(), false)?;
    }

    let mut result_moves = perft_divide(&mut board, depth)
        .into_iter()
        .map(|(mv, count)| (mv.as_algebraic(), count))
        .collect::<Vec<_>>();
    result_moves.sort();

    let mut num_nodes = 0;
    for (m, c) in result_moves {
        println!("{}: {}", m, c);
        num_nodes += c;
    }
    println!("\nNodes searched: {}", num_nodes);
    Ok(())
}
