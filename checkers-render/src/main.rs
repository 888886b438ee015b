//! Replay a move script against a checkers board and print the text dump.
//!
//! Usage:
//!   # Starting position
//!   cargo run --release --bin render -- --dimension 10
//!
//!   # Replay a script on both storage backends and check they agree
//!   cargo run --release --bin render -- --backend both --moves "2,2-SE 5,5-NW 3,3xSE"
//!
//! Script tokens (whitespace separated):
//!   r,c-DIR   step one tile
//!   r,cxDIR   jump an opponent piece
//!   r,c>DIR   step, or jump if the step is refused

use std::fmt;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};

use checkers_core::{
    new_board, BoardKind, BoundsPolicy, CheckerBoard, Direction, GameConfig, Player, Position,
};

// ============================================================================
// Command line
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "render", about = "Replay a move script and print the board")]
struct Args {
    /// Board side length (even, 8 to 16)
    #[arg(short, long, default_value_t = 8)]
    dimension: usize,

    /// Storage backend to replay on
    #[arg(short, long, value_enum, default_value_t = Backend::Dense)]
    backend: Backend,

    /// Player symbols, player one first (e.g. "xo")
    #[arg(short, long, default_value = "xo", value_parser = parse_players)]
    players: Players,

    /// Derive the sparse board's extent from occupied tiles
    #[arg(long)]
    occupancy_bounds: bool,

    /// Move script, e.g. "2,0-SE 5,1-NE 3,1xSE"
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Print only the final board
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Backend {
    Dense,
    Sparse,
    Both,
}

impl Backend {
    fn kinds(self) -> Vec<BoardKind> {
        match self {
            Backend::Dense => vec![BoardKind::Dense],
            Backend::Sparse => vec![BoardKind::Sparse],
            Backend::Both => vec![BoardKind::Dense, BoardKind::Sparse],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Players {
    one: char,
    two: char,
}

fn parse_players(s: &str) -> std::result::Result<Players, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next(), chars.next()) {
        (Some(one), Some(two), None) => Ok(Players { one, two }),
        _ => Err(format!("expected exactly two symbols, got {s:?}")),
    }
}

// ============================================================================
// Move notation parser
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Action {
    Step,
    Jump,
    StepOrJump,
}

impl Action {
    fn marker(self) -> char {
        match self {
            Action::Step => '-',
            Action::Jump => 'x',
            Action::StepOrJump => '>',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ScriptMove {
    from: Position,
    action: Action,
    dir: Direction,
}

impl fmt::Display for ScriptMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.from, self.action.marker(), self.dir)
    }
}

/// Parse a single token like "2,0-SE", "3,3xSW" or "5,1>NE"
fn parse_move(s: &str) -> Result<ScriptMove> {
    let s = s.trim();
    let split = s
        .find(['-', 'x', 'X', '>'])
        .ok_or_else(|| anyhow!("{s:?}: missing '-', 'x' or '>'"))?;
    let action = match &s[split..=split] {
        "-" => Action::Step,
        ">" => Action::StepOrJump,
        _ => Action::Jump,
    };
    let from = parse_coords(&s[..split]).with_context(|| format!("{s:?}: bad coordinates"))?;
    let dir: Direction = s[split + 1..].parse().with_context(|| format!("{s:?}: bad direction"))?;
    Ok(ScriptMove { from, action, dir })
}

/// Parse "r,c" into a position
fn parse_coords(s: &str) -> Result<Position> {
    let (row, col) = s.split_once(',').ok_or_else(|| anyhow!("expected row,col"))?;
    let row: i32 = row.trim().parse()?;
    let col: i32 = col.trim().parse()?;
    Ok(Position::new(row, col))
}

/// Parse a whitespace separated script
fn parse_moves(s: &str) -> Result<Vec<ScriptMove>> {
    s.split_whitespace().map(parse_move).collect()
}

/// Apply one scripted move, returning where the piece ended up
fn play(board: &mut dyn CheckerBoard, mv: ScriptMove) -> Position {
    match mv.action {
        Action::Step => board.move_piece(mv.from, mv.dir),
        Action::Jump => board.jump_piece(mv.from, mv.dir),
        Action::StepOrJump => {
            let to = board.move_piece(mv.from, mv.dir);
            if to == mv.from {
                board.jump_piece(mv.from, mv.dir)
            } else {
                to
            }
        }
    }
}

fn player_name(player: Player) -> &'static str {
    match player {
        Player::One => "one",
        Player::Two => "two",
    }
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();
    debug!("{args:?}");

    let mut config = GameConfig::new(args.dimension).with_players(args.players.one, args.players.two);
    if args.occupancy_bounds {
        config = config.with_bounds(BoundsPolicy::Occupancy);
    }
    let script = parse_moves(&args.moves)?;

    let mut boards = args
        .backend
        .kinds()
        .into_iter()
        .map(|kind| new_board(kind, config))
        .collect::<checkers_core::Result<Vec<_>>>()
        .context("cannot build board")?;
    info!("replaying {} moves on {} board(s)", script.len(), boards.len());

    for (i, mv) in script.iter().enumerate() {
        let results: Vec<Position> = boards.iter_mut().map(|b| play(b.as_mut(), *mv)).collect();
        let to = results[0];
        if results.iter().any(|&p| p != to) {
            bail!("step {} ({mv}): backends disagree: {results:?}", i + 1);
        }
        if !args.quiet {
            if to == mv.from {
                println!("{:>3}. {mv}: refused", i + 1);
            } else {
                println!("{:>3}. {mv}: {} -> {to}", i + 1, mv.from);
            }
        }
    }

    let text = boards[0].render();
    if boards.iter().any(|b| b.render() != text) {
        bail!("backends render different boards");
    }
    print!("{text}");

    if let Some(winner) = boards[0].winner() {
        println!("Player {} ({}) has won!", player_name(winner), config.symbol(winner));
    }
    Ok(())
}
