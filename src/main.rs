mod repl;
mod tui;
mod worker;

use clap::Parser;
use rubik_sim::{generate_scramble, parse_sequence, Cube, DEFAULT_MAX_DEPTH};

use repl::Repl;
use tui::Renderer;

/// Rubik's cube simulator and short-scramble solver
///
/// If no subcommand is given, an interactive session is started.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    #[command(subcommand)]
    subcommand: Option<Subcommand>,

    /// Longest solution the solver will look for.
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print stickers as letters instead of coloured blocks.
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Subcommand {
    /// Print a random scramble.
    Scramble {
        /// Number of moves.
        #[arg(short, long, default_value_t = 20, allow_negative_numbers = true)]
        length: i64,
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Also print the scrambled cube.
        #[arg(long)]
        show: bool,
    },
    /// Apply moves to a solved cube and search for a solution.
    Solve {
        /// Moves to apply, such as `R U R' U'`.
        #[arg(required = true, allow_hyphen_values = true)]
        moves: Vec<String>,
    },
}

fn main() -> eyre::Result<()> {
    env_logger::builder().init();

    let args = Args::parse();
    let renderer = Renderer::new(!args.no_color);

    match args.subcommand {
        Some(Subcommand::Scramble { length, seed, show }) => {
            let moves = generate_scramble(length, seed)?;
            println!("{moves}");
            if show {
                print!("{}", renderer.render(&Cube::new().apply_sequence(&moves)));
            }
        }
        Some(Subcommand::Solve { moves }) => {
            let moves = parse_sequence(&moves.join(" "))?;
            let cube = Cube::new().apply_sequence(&moves);
            print!("{}", renderer.render(&cube));
            let outcome = worker::run_search(cube, args.max_depth)?;
            println!("{}", worker::describe(&outcome));
        }
        None => Repl::new(args.max_depth, renderer).run()?,
    }

    Ok(())
}
