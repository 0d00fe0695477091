// Copyright (c) 2026 rezky_nightky

use tracing::debug;

use crate::dice::Dice;
use crate::line::{Field, FallingLine, Line, OldStyleLine};
use crate::runtime::ScrollMode;

pub const SPAWN_PER_TICK: usize = 2;

const MIN_FREE: usize = 3;

// Every seeded coordinate is either in `free` or owned by exactly one line.
#[derive(Debug)]
pub struct LinePool {
    lines: Vec<Line>,
    free: Vec<u16>,
    field: Field,
    scroll: ScrollMode,
    spacing: u16,
}

fn cross_extent(field: Field, scroll: ScrollMode) -> u16 {
    if scroll.is_horizontal() {
        field.rows.saturating_sub(1)
    } else {
        field.cols
    }
}

fn seed_free(field: Field, scroll: ScrollMode, spacing: u16) -> Vec<u16> {
    (0..cross_extent(field, scroll))
        .step_by(spacing.max(1) as usize)
        .collect()
}

impl LinePool {
    pub fn new(field: Field, scroll: ScrollMode, spacing: u16) -> Self {
        Self {
            lines: Vec::new(),
            free: seed_free(field, scroll, spacing),
            field,
            scroll,
            spacing,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn scroll(&self) -> ScrollMode {
        self.scroll
    }

    #[cfg(test)]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut [Line] {
        &mut self.lines
    }

    pub fn free(&self) -> &[u16] {
        &self.free
    }

    pub fn active(&self) -> usize {
        self.lines.len()
    }

    fn has_room(&self) -> bool {
        let cross = cross_extent(self.field, self.scroll) as usize;
        self.lines.len() < cross.saturating_sub(1) && self.free.len() > MIN_FREE
    }

    pub fn spawn(&mut self, glyphs: &[char], dice: &mut impl Dice) -> usize {
        let mut spawned = 0;
        while spawned < SPAWN_PER_TICK && self.has_room() {
            let last = self.free.len() as i32 - 1;
            let i = dice.roll(0, last).clamp(0, last) as usize;
            let coord = self.free.swap_remove(i);
            let line = match self.scroll {
                ScrollMode::Falling(direction) => {
                    Line::Falling(FallingLine::new(coord, self.field, direction, dice))
                }
                ScrollMode::OldSchool => {
                    Line::OldSchool(OldStyleLine::new(coord, self.field, glyphs, dice))
                }
            };
            self.lines.push(line);
            spawned += 1;
        }
        spawned
    }

    pub fn retire_finished(&mut self) -> usize {
        let before = self.lines.len();
        let free = &mut self.free;
        self.lines.retain(|line| {
            if line.okay_to_delete() {
                free.push(line.coord());
                false
            } else {
                true
            }
        });
        before - self.lines.len()
    }

    pub fn reset(&mut self, field: Field, scroll: ScrollMode, spacing: u16) {
        debug!(
            rows = field.rows,
            cols = field.cols,
            ?scroll,
            spacing,
            dropped = self.lines.len(),
            "line pool reset"
        );
        *self = LinePool::new(field, scroll, spacing);
    }

    pub fn clear(&mut self) {
        self.reset(self.field, self.scroll, self.spacing);
    }
}
