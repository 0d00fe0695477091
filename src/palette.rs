// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::dice::Dice;
use crate::runtime::{BoldMode, ColorMode, Hue, Settings, BASE_HUES};

pub const CYCLE_PERIOD: u32 = 500;

pub fn hue_color(hue: Hue) -> Color {
    match hue {
        Hue::Red => Color::Red,
        Hue::Green => Color::Green,
        Hue::Blue => Color::Blue,
        Hue::Yellow => Color::Yellow,
        Hue::Magenta => Color::Magenta,
        Hue::Cyan => Color::Cyan,
        Hue::White => Color::White,
        Hue::Black => Color::Black,
    }
}

pub fn random_hue(dice: &mut impl Dice) -> Hue {
    dice.pick(&BASE_HUES).copied().unwrap_or(Hue::Green)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorCycle {
    period: u32,
    countdown: u32,
    index: usize,
}

impl ColorCycle {
    pub fn new(period: u32) -> Self {
        let period = period.max(1);
        Self {
            period,
            countdown: period,
            index: 0,
        }
    }

    pub fn starting_at(period: u32, hue: Hue) -> Self {
        let mut cycle = Self::new(period);
        cycle.index = BASE_HUES.iter().position(|&h| h == hue).unwrap_or(0);
        cycle
    }

    pub fn tick(&mut self) -> bool {
        self.countdown -= 1;
        if self.countdown > 0 {
            return false;
        }
        self.countdown = self.period;
        self.index = (self.index + 1) % BASE_HUES.len();
        true
    }

    pub fn hue(&self) -> Hue {
        BASE_HUES[self.index]
    }
}

impl Default for ColorCycle {
    fn default() -> Self {
        Self::new(CYCLE_PERIOD)
    }
}

pub fn body_color(
    settings: &Settings,
    line_hue: Hue,
    cycle: &ColorCycle,
    dice: &mut impl Dice,
) -> Color {
    if let Some(index) = settings.color_override {
        return Color::AnsiValue(index);
    }
    let hue = match settings.color_mode {
        ColorMode::Single => settings.color,
        ColorMode::Multiple => line_hue,
        ColorMode::Random => random_hue(dice),
        ColorMode::Cycle => cycle.hue(),
    };
    hue_color(hue)
}

pub fn body_bold(mode: BoldMode, line_bold: Option<bool>, dice: &mut impl Dice) -> bool {
    match mode {
        BoldMode::Off => false,
        BoldMode::All => true,
        BoldMode::Random => match line_bold {
            Some(bold) => bold,
            None => dice.roll(0, 9) <= 2,
        },
    }
}
