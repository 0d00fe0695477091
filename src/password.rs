// Copyright (c) 2026 rezky_nightky

use std::fmt;
use std::io::{self, stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use sha2::{Digest, Sha256};

pub const PROMPT: &str = "Enter password: ";

const SALT: &[u8] = b"glyphrain exit lock";

// Only the salted digest is kept.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret([u8; 32]);

impl Secret {
    pub fn from_text(text: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(SALT);
        hasher.update(text.as_bytes());
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        Self(digest)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

pub fn read_hidden(mut next_key: impl FnMut() -> io::Result<KeyEvent>) -> io::Result<String> {
    let mut text = String::new();
    loop {
        let key = next_key()?;
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(text),
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(
                    io::ErrorKind::Interrupted,
                    "password entry interrupted",
                ));
            }
            KeyCode::Char(c) => text.push(c),
            _ => {}
        }
    }
}

fn next_terminal_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            return Ok(key);
        }
    }
}

// Raw mode keeps the typed text off the screen.
pub fn prompt() -> io::Result<Secret> {
    let mut out = stdout();
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    terminal::enable_raw_mode()?;
    let text = read_hidden(next_terminal_key);
    let _ = terminal::disable_raw_mode();
    writeln!(out)?;

    Ok(Secret::from_text(&text?))
}
