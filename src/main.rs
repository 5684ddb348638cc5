use anyhow::{Context, Result};
use clap::Parser;
use sabre_core::{Color, DrawReason, GameStatus, STARTING_FEN};
use sabre_engine::{Engine, SearchConfig, SearchResult, mate_in_plies};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Analyse a chess position, or let the engine play itself from it.
#[derive(Debug, Parser)]
#[command(name = "sabre", version)]
struct Args {
    /// Position to start from.
    #[arg(long, default_value = STARTING_FEN)]
    fen: String,

    /// Search depth in plies.
    #[arg(long, default_value_t = 4)]
    depth: i32,

    /// Play both sides until the game ends.
    #[arg(long)]
    self_play: bool,

    /// Move cap for self-play.
    #[arg(long, default_value_t = 200)]
    max_moves: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(fen = %args.fen, depth = args.depth, "sabre starting");

    let mut engine = Engine::new(SearchConfig::default());
    engine
        .set_position(&args.fen)
        .with_context(|| format!("invalid position {:?}", args.fen))?;

    if args.self_play {
        self_play(&mut engine, args.depth, args.max_moves);
    } else {
        analyse(&mut engine, args.depth);
    }
    Ok(())
}

fn analyse(engine: &mut Engine, depth: i32) {
    let mover = engine.board().side_to_move();
    let result = engine.search(depth);
    match result.best_move {
        Some(mv) => println!("bestmove {mv} score {}", white_score(&result, mover)),
        None => println!("no move: {}", describe(engine.board().status())),
    }
    println!(
        "nodes {} tt entries {} tt bytes {}",
        engine.positions_searched(),
        engine.tt_len(),
        engine.tt_memory_bytes()
    );
}

fn self_play(engine: &mut Engine, depth: i32, max_moves: u32) {
    let mut played = Vec::new();
    while played.len() < max_moves as usize {
        let mover = engine.board().side_to_move();
        let result = engine.search(depth);
        let Some(mv) = result.best_move else {
            break;
        };
        info!(ply = played.len() + 1, %mv, score = %white_score(&result, mover), "played");
        engine.play(mv);
        played.push(mv.to_uci());
    }

    println!("{}", played.join(" "));
    let status = engine.board().status();
    println!("{} ({})", result_tag(status, engine.board().side_to_move()), describe(status));
}

/// Score from White's point of view, with forced mates shown as `#N` moves.
fn white_score(result: &SearchResult, mover: Color) -> String {
    let score = match mover {
        Color::White => result.score,
        Color::Black => -result.score,
    };
    match mate_in_plies(score) {
        Some(plies) => {
            let moves = (plies + 1) / 2;
            if score > 0 { format!("#{moves}") } else { format!("#-{moves}") }
        }
        None => format!("{score:+}"),
    }
}

fn result_tag(status: GameStatus, to_move: Color) -> &'static str {
    match status {
        GameStatus::Checkmate if to_move == Color::White => "0-1",
        GameStatus::Checkmate => "1-0",
        GameStatus::Stalemate | GameStatus::Draw(_) => "1/2-1/2",
        GameStatus::Ongoing => "*",
    }
}

fn describe(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Ongoing => "game in progress",
        GameStatus::Checkmate => "checkmate",
        GameStatus::Stalemate => "stalemate",
        GameStatus::Draw(DrawReason::InsufficientMaterial) => "draw by insufficient material",
        GameStatus::Draw(DrawReason::FiftyMoveRule) => "draw by fifty-move rule",
        GameStatus::Draw(DrawReason::Repetition) => "draw by repetition",
    }
}
