use std::io::{self, Write};
use std::path::Path;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use tresko::evaluation::{Evaluator, EvaluatorKind};
use tresko::position::{Board, Player};
use tresko::search::{AlphaBeta, Difficulty};
use tresko::tune;
use tresko::tune::dataset;

const DATASET_PATH: &str = "data/tictactoe_dataset.csv";
const GENERATED_GAMES: usize = 1000;

fn main() {
    init_logging();

    println!("play: Play against the alpha-beta AI");
    println!("aimatch: Watch the heuristic and model evaluators play each other");
    println!("gen-data: Generate a training dataset from random self-play");

    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    match input.trim() {
        "play" => play_human(),
        "aimatch" => ai_match(),
        "gen-data" => gen_data(),
        s => println!("Unknown option \"{}\"", s),
    }
}

fn init_logging() {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log::LevelFilter::Info)
        .chain(io::stderr())
        .apply()
        .unwrap();
}

fn make_evaluator(kind: EvaluatorKind) -> Evaluator {
    match kind {
        EvaluatorKind::Heuristic => Evaluator::heuristic(),
        EvaluatorKind::LinearModel => {
            Evaluator::model(tune::train_or_default(Path::new(DATASET_PATH)))
        }
    }
}

fn parse_evaluator_kind(input: &str) -> Option<EvaluatorKind> {
    match input.trim().to_lowercase().as_str() {
        "heuristic" => Some(EvaluatorKind::Heuristic),
        "model" => Some(EvaluatorKind::LinearModel),
        _ => None,
    }
}

fn parse_difficulty(input: &str) -> Option<Difficulty> {
    match input.trim().to_lowercase().as_str() {
        "easy" => Some(Difficulty::Easy),
        "normal" => Some(Difficulty::Normal),
        "hard" => Some(Difficulty::Hard),
        _ => None,
    }
}

/// Play a game against the engine through stdin. The human plays X.
fn play_human() {
    let kind = loop {
        let input = prompt("Evaluator (heuristic/model)");
        match parse_evaluator_kind(&input) {
            Some(kind) => break kind,
            None => println!("Unknown option \"{}\"", input),
        }
    };
    let difficulty = loop {
        let input = prompt("Difficulty (easy/normal/hard)");
        match parse_difficulty(&input) {
            Some(difficulty) => break difficulty,
            None => println!("Unknown option \"{}\"", input),
        }
    };
    println!("Playing {:?} with the {:?} evaluator", difficulty, kind);

    let mut engine = AlphaBeta::new(make_evaluator(kind));
    let mut board = Board::default();

    loop {
        println!("{}", board);
        let input = prompt("Your move (row col)");
        let mut coordinates = input
            .split_whitespace()
            .map(|word| word.parse::<usize>());
        match (coordinates.next(), coordinates.next()) {
            (Some(Ok(row)), Some(Ok(col))) if board.is_valid_move(row, col) => {
                board.make_move(row, col, Player::X);
            }
            _ => {
                println!("Illegal move \"{}\"", input);
                continue;
            }
        }
        if print_result_if_over(&board) {
            return;
        }

        match engine.find_best_move(&mut board, Player::O, difficulty) {
            Some(mv) => {
                println!(
                    "AI played {} ({} nodes, {} prunes)",
                    mv,
                    engine.nodes_evaluated(),
                    engine.prune_count()
                );
                board.make_move(mv.row, mv.col, Player::O);
            }
            None => unreachable!("No move available on a non-terminal board"),
        }
        if print_result_if_over(&board) {
            return;
        }
    }
}

/// The heuristic evaluator as X against the model evaluator as O, both at
/// Hard difficulty. Perfect play from both sides should always draw.
fn ai_match() {
    let mut heuristic_engine = AlphaBeta::new(Evaluator::heuristic());
    let mut model_engine = AlphaBeta::new(make_evaluator(EvaluatorKind::LinearModel));

    let mut board = Board::default();
    let mut side_to_move = Player::X;

    while !board.is_terminal() {
        let engine = match side_to_move {
            Player::X => &mut heuristic_engine,
            _ => &mut model_engine,
        };
        let mv = engine
            .find_best_move(&mut board, side_to_move, Difficulty::Hard)
            .unwrap();
        board.make_move(mv.row, mv.col, side_to_move);
        print!("{} {}: ", side_to_move, mv);
        io::stdout().flush().unwrap();
        side_to_move = side_to_move.opponent();
    }
    println!();
    println!("{}", board);
    print_result_if_over(&board);
}

fn gen_data() {
    let mut rng = SmallRng::from_entropy();
    let samples = dataset::generate_samples(GENERATED_GAMES, &mut rng);
    if let Some(parent) = Path::new(DATASET_PATH).parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            println!("Failed to create {}: {}", parent.display(), err);
            return;
        }
    }
    match dataset::write_samples_to_file(Path::new(DATASET_PATH), &samples) {
        Ok(()) => println!("Wrote {} samples to {}", samples.len(), DATASET_PATH),
        Err(err) => println!("Failed to write {}: {}", DATASET_PATH, err),
    }
}

fn prompt(question: &str) -> String {
    print!("{}: ", question);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}

fn print_result_if_over(board: &Board) -> bool {
    match board.winner() {
        Player::Empty if board.is_full() => println!("Draw!"),
        Player::Empty => return false,
        winner => println!("{} wins!", winner),
    }
    true
}
