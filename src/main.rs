use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use crossterm::style::{style, Stylize};
use fifteen_solver::{
    board::{BLANK, SIZE},
    directions, is_solvable, is_solvable_classic, translate, try_solve, Board,
};
use log::{warn, LevelFilter};
use rand::{rngs::StdRng, SeedableRng};

const SAMPLE_BOARD: &str = "1 9 6 2 10 5 11 4 3 14 8 7 13 15 12 0";

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// The tile that slides at each step
    Labels,
    /// The direction the tile slides at each step
    Directions,
    /// The pair of cells swapped at each step
    Transpositions,
}

#[derive(Parser, Debug)]
#[command(name = "fifteen-solver")]
#[command(about = "Solves the 15 puzzle by composing 3-cycles", long_about = None)]
struct Args {
    /// Sixteen labels, row by row, with 0 for the blank
    #[arg(short, long, default_value = SAMPLE_BOARD, conflicts_with = "shuffle")]
    board: String,

    /// Solve a random solvable board instead
    #[arg(long)]
    shuffle: bool,

    /// Seed for the random board
    #[arg(long, requires = "shuffle")]
    seed: Option<u64>,

    /// How to print the solution
    #[arg(short, long, value_enum, default_value_t = Format::Labels)]
    format: Format,

    /// Print the board after every move
    #[arg(long)]
    steps: bool,

    /// Log more, repeat for even more
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

/// The board as a grid, with the blank dimmed and `moved` highlighted.
fn render(board: &Board, moved: Option<usize>) -> String {
    let mut out = String::new();
    for (cell, &val) in board.cells().iter().enumerate() {
        let text = format!("{:2}", val);
        let styled = if Some(cell) == moved {
            style(text).bold().yellow().to_string()
        } else if val == BLANK {
            style(text).dark_grey().to_string()
        } else {
            text
        };
        out.push_str(&styled);
        out.push(if cell % SIZE == SIZE - 1 { '\n' } else { ' ' });
    }
    out
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let board = if args.shuffle {
        let mut rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Board::shuffled(&mut rng)
    } else {
        args.board
            .parse::<Board>()
            .with_context(|| format!("Invalid board {:?}", args.board))?
    };

    println!("Initial Puzzle:\n{}", render(&board, None));

    if is_solvable(&board) != is_solvable_classic(&board) {
        warn!(
            "Parity of the whole board says solvable = {}, but with the blank's row taken into account it is {}",
            is_solvable(&board),
            is_solvable_classic(&board)
        );
    }

    let solution = try_solve(&board)?;
    println!("Found solution with: {} moves", solution.len());

    let printed: Vec<String> = match args.format {
        Format::Labels => translate(&board, &solution)
            .iter()
            .map(u8::to_string)
            .collect(),
        Format::Directions => directions(&board, &solution)
            .iter()
            .map(ToString::to_string)
            .collect(),
        Format::Transpositions => solution.iter().map(ToString::to_string).collect(),
    };
    println!("{}", printed.join(" "));

    if args.steps {
        let mut current = board;
        for (&transposition, label) in solution.iter().zip(translate(&board, &solution)) {
            current.apply(transposition);
            println!("{}\n{}", label, render(&current, Some(current.position(label))));
        }
    }

    Ok(())
}
