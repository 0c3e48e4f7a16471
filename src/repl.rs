use std::io::{self, Write};
use std::str::FromStr;

use eyre::{eyre, Result, WrapErr};
use rubik_sim::{generate_scramble, parse_sequence, Cube, MoveHistory, MoveSequence, SearchOutcome};

use crate::tui::Renderer;
use crate::worker;

/// Scramble length used by `scramble` without an argument; short enough for
/// the solver to finish.
const DEFAULT_SCRAMBLE_LENGTH: i64 = 5;

const HELP: &str = "\
commands:
  <moves>       apply moves, e.g. R U R' U'
  undo, redo    step through the move history
  reset         return to the solved cube
  scramble [N]  reset and apply N random moves
  solve [D]     search for a solution of at most D moves and apply it
  show          print the cube
  help          print this message
  quit          leave";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Moves(MoveSequence),
    Undo,
    Redo,
    Reset,
    Scramble(Option<i64>),
    Solve(Option<usize>),
    Show,
    Help,
    Quit,
}

impl Command {
    /// Returns `None` for a blank line. Anything that isn't a keyword is read
    /// as a move sequence.
    fn parse(line: &str) -> Result<Option<Self>> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let command = match word {
            "undo" | "u" => Command::Undo,
            "redo" => Command::Redo,
            "reset" => Command::Reset,
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "scramble" => Command::Scramble(parse_arg(words.next(), "scramble length")?),
            "solve" => Command::Solve(parse_arg(words.next(), "depth")?),
            _ => return Ok(Some(Command::Moves(parse_sequence(line)?))),
        };
        if let Some(extra) = words.next() {
            return Err(eyre!("unexpected argument {extra:?}"));
        }
        Ok(Some(command))
    }
}

fn parse_arg<T>(arg: Option<&str>, what: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    arg.map(|a| a.parse().wrap_err_with(|| format!("bad {what} {a:?}")))
        .transpose()
}

/// Interactive session around one live cube.
pub struct Repl {
    cube: Cube,
    history: MoveHistory,
    max_depth: usize,
    renderer: Renderer,
}

impl Repl {
    pub fn new(max_depth: usize, renderer: Renderer) -> Self {
        Self {
            cube: Cube::new(),
            history: MoveHistory::new(),
            max_depth,
            renderer,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{HELP}\n");
        self.show();
        let stdin = io::stdin();
        loop {
            print!("> ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                return Ok(());
            }
            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    println!("{e:#}");
                    continue;
                }
            };
            if command == Command::Quit {
                return Ok(());
            }
            self.execute(command)?;
        }
    }

    fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Moves(moves) => {
                self.cube = self.cube.apply_sequence(&moves);
                self.history.record_all(&moves);
                self.show();
            }
            Command::Undo => match self.history.undo() {
                Some(mv) => {
                    self.cube.twist(mv);
                    self.show();
                }
                None => println!("nothing to undo"),
            },
            Command::Redo => match self.history.redo() {
                Some(mv) => {
                    self.cube.twist(mv);
                    self.show();
                }
                None => println!("nothing to redo"),
            },
            Command::Reset => {
                self.cube.reset();
                self.history.clear();
                self.show();
            }
            Command::Scramble(length) => {
                let moves = generate_scramble(length.unwrap_or(DEFAULT_SCRAMBLE_LENGTH), None);
                match moves {
                    Ok(moves) => {
                        println!("scramble: {moves}");
                        self.cube = Cube::new().apply_sequence(&moves);
                        self.history.clear();
                        self.show();
                    }
                    Err(e) => println!("{e}"),
                }
            }
            Command::Solve(depth) => {
                let outcome = worker::run_search(self.cube, depth.unwrap_or(self.max_depth))?;
                println!("{}", worker::describe(&outcome));
                if let SearchOutcome::Found(moves) = outcome {
                    if !moves.is_empty() {
                        self.cube = self.cube.apply_sequence(&moves);
                        self.history.record_all(&moves);
                        self.show();
                    }
                }
            }
            Command::Show => self.show(),
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
        Ok(())
    }

    fn show(&self) {
        print!("{}", self.renderer.render(&self.cube));
        if self.cube.is_solved() {
            println!("solved");
        }
    }
}
