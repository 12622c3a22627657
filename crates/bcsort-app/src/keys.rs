//! Operator keystroke input
//!
//! Two sources satisfy [`KeySource`]: a raw single-keystroke reader for
//! interactive terminals, and a line-buffered reader that needs Enter.

use std::io::{self, BufRead, IsTerminal};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// One keystroke from the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    Char(char),
    /// Ctrl-C, Esc, or end of input
    Exit,
}

pub trait KeySource {
    /// Block until the operator presses a key
    fn read_key(&mut self) -> io::Result<KeyPress>;
}

/// Raw-mode reader: no Enter needed, no echo
#[derive(Debug, Default)]
pub struct RawKeySource;

struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl KeySource for RawKeySource {
    fn read_key(&mut self) -> io::Result<KeyPress> {
        let _guard = RawModeGuard::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(KeyPress::Exit)
                }
                KeyCode::Char(c) => return Ok(KeyPress::Char(c)),
                KeyCode::Esc => return Ok(KeyPress::Exit),
                _ => continue,
            }
        }
    }
}

/// Line-buffered reader: the first non-blank character of each line counts
pub struct LineKeySource<R> {
    reader: R,
}

impl<R: BufRead> LineKeySource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineKeySource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> KeySource for LineKeySource<R> {
    fn read_key(&mut self) -> io::Result<KeyPress> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(KeyPress::Exit);
            }
            if let Some(c) = line.trim().chars().next() {
                return Ok(KeyPress::Char(c));
            }
        }
    }
}

/// Pick the input source once at startup. Raw mode is used when stdin is a
/// terminal that supports it, unless `force_line` is set.
pub fn select_key_source(force_line: bool) -> Box<dyn KeySource> {
    if !force_line && io::stdin().is_terminal() && raw_mode_available() {
        tracing::debug!("using single-keystroke input");
        Box::new(RawKeySource)
    } else {
        tracing::debug!("using line-buffered input");
        Box::new(LineKeySource::stdin())
    }
}

fn raw_mode_available() -> bool {
    match terminal::enable_raw_mode() {
        Ok(()) => terminal::disable_raw_mode().is_ok(),
        Err(e) => {
            tracing::debug!("raw terminal mode unavailable: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_source_takes_first_character() {
        let mut keys = LineKeySource::new(Cursor::new("b\n  coach\n"));
        assert_eq!(keys.read_key().unwrap(), KeyPress::Char('b'));
        assert_eq!(keys.read_key().unwrap(), KeyPress::Char('c'));
    }

    #[test]
    fn test_line_source_skips_blank_lines() {
        let mut keys = LineKeySource::new(Cursor::new("\n   \nM\n"));
        assert_eq!(keys.read_key().unwrap(), KeyPress::Char('M'));
    }

    #[test]
    fn test_line_source_eof_is_exit() {
        let mut keys = LineKeySource::new(Cursor::new("O"));
        assert_eq!(keys.read_key().unwrap(), KeyPress::Char('O'));
        assert_eq!(keys.read_key().unwrap(), KeyPress::Exit);
    }
}
