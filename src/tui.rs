use std::io::{self, Write};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::{Color as TermColor, Stylize};
use crossterm::terminal;
use crossterm::tty::IsTty;
use rubik_sim::{Color, Cube, Face};

/// Draws cubes as an unfolded net, in colour when stdout is a terminal.
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Self {
        Self {
            color: color && io::stdout().is_tty(),
        }
    }

    pub fn render(&self, cube: &Cube) -> String {
        if !self.color {
            return cube.to_string();
        }

        let mut out = String::new();
        let row = |out: &mut String, face: Face, r: usize| {
            for c in 0..3 {
                let color = term_color(cube.sticker(face, r * 3 + c));
                out.push_str(&"  ".on(color).to_string());
            }
        };
        for r in 0..3 {
            out.push_str("      ");
            row(&mut out, Face::U, r);
            out.push('\n');
        }
        for r in 0..3 {
            for face in [Face::L, Face::F, Face::R, Face::B] {
                row(&mut out, face, r);
            }
            out.push('\n');
        }
        for r in 0..3 {
            out.push_str("      ");
            row(&mut out, Face::D, r);
            out.push('\n');
        }
        out
    }
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::White => TermColor::White,
        Color::Yellow => TermColor::Yellow,
        Color::Orange => TermColor::Rgb {
            r: 255,
            g: 140,
            b: 0,
        },
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Blue => TermColor::DarkBlue,
    }
}

/// Puts the terminal in raw mode so Esc or Ctrl-C can be read while a search
/// runs. Raw mode is left again when this is dropped.
///
/// When stdin is not a terminal nothing is watched and
/// [`cancel_requested`](Self::cancel_requested) is always false.
pub struct CancelKeys {
    raw: bool,
}

impl CancelKeys {
    pub fn watch() -> Self {
        let raw = io::stdin().is_tty()
            && match terminal::enable_raw_mode() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("can't watch for cancel keys: {e}");
                    false
                }
            };
        Self { raw }
    }

    pub fn is_watching(&self) -> bool {
        self.raw
    }

    /// Prints a line; raw mode needs an explicit carriage return.
    pub fn println(&self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        if self.raw {
            write!(stdout, "{text}\r\n")?;
        } else {
            writeln!(stdout, "{text}")?;
        }
        stdout.flush()
    }

    /// Drains pending key events and reports whether any asked to cancel.
    pub fn cancel_requested(&self) -> io::Result<bool> {
        if !self.raw {
            return Ok(false);
        }
        let mut requested = false;
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                requested |= is_cancel_key(key);
            }
        }
        Ok(requested)
    }
}

impl Drop for CancelKeys {
    fn drop(&mut self) {
        if self.raw {
            if let Err(e) = terminal::disable_raw_mode() {
                log::error!("error leaving raw mode: {e}");
            }
        }
    }
}

fn is_cancel_key(key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}
