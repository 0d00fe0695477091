// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, ExecutableCommand, QueueableCommand,
};
use tracing::debug;

use crate::cell::Cell;
use crate::display::{Display, Style};
use crate::frame::Frame;

pub struct Screen {
    stdout: Stdout,
    frame: Frame,
    blank: Cell,
    keep_last_frame: bool,
}

fn default_blank() -> Cell {
    Cell::new(' ', Style::plain(Color::White, Color::Black))
}

impl Screen {
    // With `keep_last_frame` the rain runs on the main screen and stays there on exit.
    pub fn new(keep_last_frame: bool) -> Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: Result<()> = (|| {
            if !keep_last_frame {
                out.execute(terminal::EnterAlternateScreen)?;
            }
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }

        let (cols, rows) = terminal::size()?;
        let blank = default_blank();
        Ok(Self {
            stdout: out,
            frame: Frame::new(cols, rows, blank),
            blank,
            keep_last_frame,
        })
    }
}

impl Display for Screen {
    fn put(&mut self, row: u16, col: u16, glyph: char, style: Style) {
        self.frame.set(col, row, Cell::new(glyph, style));
    }

    fn size(&self) -> (u16, u16) {
        (self.frame.height, self.frame.width)
    }

    fn detect_resize(&mut self, rows: u16, cols: u16) -> Result<bool> {
        let (w, h) = terminal::size()?;
        let changed = (h, w) != (rows, cols);
        if (h, w) != (self.frame.height, self.frame.width) {
            debug!(rows = h, cols = w, "terminal resized");
            self.frame = Frame::new(w, h, self.blank);
        }
        Ok(changed)
    }

    fn clear(&mut self) {
        self.frame.clear_with(self.blank);
    }

    fn refresh(&mut self) -> Result<()> {
        draw(&mut self.stdout, &mut self.frame)
    }

    fn set_background(&mut self, glyph: char, style: Style) {
        self.blank = Cell::new(glyph, style);
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = write_exit(&mut self.stdout, self.keep_last_frame, self.frame.height);
        let _ = terminal::disable_raw_mode();
    }
}

// The bottom row is never drawn on, so the shell prompt can land there.
fn write_exit(out: &mut impl Write, keep_last_frame: bool, rows: u16) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    out.queue(cursor::Show)?;
    out.queue(terminal::EnableLineWrap)?;
    if keep_last_frame {
        out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    } else {
        out.queue(terminal::LeaveAlternateScreen)?;
    }
    out.flush()
}

#[derive(Default)]
struct Pen {
    style: Option<Style>,
    pos: Option<(u16, u16)>,
}

impl Pen {
    fn apply(&mut self, out: &mut impl Write, style: Style) -> Result<()> {
        let cur = self.style;
        if cur.map(|s| s.fg) != Some(style.fg) {
            out.queue(SetForegroundColor(style.fg))?;
        }
        if cur.map(|s| s.bg) != Some(style.bg) {
            out.queue(SetBackgroundColor(style.bg))?;
        }
        if cur.map(|s| s.bold) != Some(style.bold) {
            out.queue(SetAttribute(if style.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            }))?;
        }
        if cur.map(|s| s.italic) != Some(style.italic) {
            out.queue(SetAttribute(if style.italic {
                Attribute::Italic
            } else {
                Attribute::NoItalic
            }))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn print(&mut self, out: &mut impl Write, x: u16, y: u16, cell: Cell, width: u16) -> Result<()> {
        if self.pos != Some((x, y)) {
            out.queue(cursor::MoveTo(x, y))?;
        }
        self.apply(out, cell.style)?;
        out.queue(Print(cell.ch))?;
        let next = x.saturating_add(1);
        self.pos = (next < width).then_some((next, y));
        Ok(())
    }
}

pub fn draw(out: &mut impl Write, frame: &mut Frame) -> Result<()> {
    let mut pen = Pen::default();
    let width = frame.width;

    if frame.is_dirty_all() {
        for y in 0..frame.height {
            for x in 0..width {
                let Some(cell) = frame.get(x, y) else {
                    continue;
                };
                pen.print(out, x, y, cell, width)?;
            }
        }
    } else {
        let mut dirty = frame.dirty_indices().to_vec();
        dirty.sort_unstable();
        for idx in dirty {
            let x = (idx % width as usize) as u16;
            let y = (idx / width as usize) as u16;
            pen.print(out, x, y, frame.cell_at_index(idx), width)?;
        }
    }

    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(ResetColor)?;
    out.flush()?;
    frame.clear_dirty();
    Ok(())
}

pub fn restore_terminal_best_effort() {
    let _ = write_exit(&mut stdout(), false, 0);
    let _ = terminal::disable_raw_mode();
}
