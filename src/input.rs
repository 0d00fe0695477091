// Copyright (c) 2026 rezky_nightky

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::charset::GlyphToggle;
use crate::line::Direction;
use crate::runtime::{BoldMode, ColorMode, Hue, ScrollMode, BASE_HUES};

pub trait Input {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

pub struct Keyboard;

impl Input for Keyboard {
    fn poll_key(&mut self) -> io::Result<Option<KeyEvent>> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => return Ok(Some(k)),
                // Resizes are picked up by the display.
                _ => continue,
            }
        }
        Ok(None)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Delay(u8),
    Bold(BoldMode),
    Color(Hue),
    LeadColor(Hue),
    Background(Hue),
    ToggleAsync,
    ToggleColorMode(ColorMode),
    NextColorMode,
    ToggleDoubleSpace,
    ToggleItalic,
    ToggleGlyphs(GlyphToggle),
    Scroll(ScrollMode),
    RestoreDefaults,
    Freeze,
    Quit,
}

impl Command {
    pub fn is_quit(self) -> bool {
        self == Command::Quit
    }
}

// r t y u i o p, in base hue order.
const HUE_KEYS: [char; 7] = ['r', 't', 'y', 'u', 'i', 'o', 'p'];

fn hue_for_key(c: char) -> Option<Hue> {
    let lower = c.to_ascii_lowercase();
    HUE_KEYS
        .iter()
        .position(|&k| k == lower)
        .map(|i| BASE_HUES[i])
}

pub fn command_for(key: KeyEvent) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::Background(Hue::Black)),
            KeyCode::Char(c) => hue_for_key(c).map(Command::Background),
            _ => None,
        };
    }

    let cmd = match key.code {
        KeyCode::Esc => Command::Quit,
        KeyCode::Tab => Command::NextColorMode,
        KeyCode::Down => Command::Scroll(ScrollMode::Falling(Direction::Down)),
        KeyCode::Up => Command::Scroll(ScrollMode::Falling(Direction::Up)),
        KeyCode::Left => Command::Scroll(ScrollMode::Falling(Direction::Left)),
        KeyCode::Right => Command::Scroll(ScrollMode::Falling(Direction::Right)),
        KeyCode::Char(c) => match c {
            '0'..='9' => Command::Delay(c as u8 - b'0'),
            'q' | 'Q' => Command::Quit,
            'b' => Command::Bold(BoldMode::Random),
            'B' => Command::Bold(BoldMode::All),
            'n' | 'N' => Command::Bold(BoldMode::Off),
            'a' => Command::ToggleAsync,
            'm' => Command::ToggleColorMode(ColorMode::Multiple),
            'M' => Command::ToggleColorMode(ColorMode::Random),
            'c' => Command::ToggleColorMode(ColorMode::Cycle),
            'l' => Command::ToggleDoubleSpace,
            'j' => Command::ToggleItalic,
            'e' => Command::ToggleGlyphs(GlyphToggle::Extended),
            'E' => Command::ToggleGlyphs(GlyphToggle::ExtendedOnly),
            'k' => Command::ToggleGlyphs(GlyphToggle::Katakana),
            'K' => Command::ToggleGlyphs(GlyphToggle::KatakanaOnly),
            'z' => Command::ToggleGlyphs(GlyphToggle::Binary),
            'x' => Command::Scroll(ScrollMode::OldSchool),
            'd' | 'D' => Command::RestoreDefaults,
            'f' => Command::Freeze,
            c if c.is_ascii_lowercase() => Command::Color(hue_for_key(c)?),
            c if c.is_ascii_uppercase() => Command::LeadColor(hue_for_key(c)?),
            _ => return None,
        },
        _ => return None,
    };
    Some(cmd)
}

pub const COMMAND_HELP: &[(&str, &str)] = &[
    ("0-9", "speed, 0 fastest"),
    ("b / B / n", "bold random / bold all / bold off"),
    ("r t y u i o p", "color: red green blue yellow magenta cyan white"),
    ("R T Y U I O P", "lead color, same order"),
    ("Ctrl + r..p, Ctrl + b", "background color, same order / black"),
    ("a", "toggle async scroll"),
    ("m / M / c", "toggle multiple / random / cycling colors"),
    ("Tab", "next color mode"),
    ("l", "toggle double-spaced columns"),
    ("j", "toggle italic"),
    ("e / E", "toggle extended glyphs / extended only"),
    ("k / K", "toggle katakana / katakana only"),
    ("z", "toggle binary"),
    ("arrows", "rain direction"),
    ("x", "old-school scrolling"),
    ("d", "restore defaults"),
    ("f", "freeze"),
    ("q / Esc", "quit"),
];
