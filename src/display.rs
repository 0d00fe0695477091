// Copyright (c) 2026 rezky_nightky

use std::io;

use crossterm::style::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
}

impl Style {
    pub fn plain(fg: Color, bg: Color) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            italic: false,
        }
    }
}

pub trait Display {
    fn put(&mut self, row: u16, col: u16, glyph: char, style: Style);

    fn size(&self) -> (u16, u16);

    // True when the real size differs from `(rows, cols)`. Adopts the new size.
    fn detect_resize(&mut self, rows: u16, cols: u16) -> io::Result<bool>;

    fn clear(&mut self);

    fn refresh(&mut self) -> io::Result<()>;

    fn set_background(&mut self, glyph: char, style: Style);
}
