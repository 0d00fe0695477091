// Copyright (c) 2026 rezky_nightky

use std::time::Duration;

use crate::charset::GlyphChoice;
use crate::line::Direction;

pub const DELAY_TABLE_MS: [u64; 10] = [5, 10, 25, 40, 55, 70, 85, 100, 115, 130];

pub const DEFAULT_DELAY: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoldMode {
    Off,
    Random,
    All,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Single,
    Multiple,
    Random,
    Cycle,
}

impl ColorMode {
    pub fn next(self) -> Self {
        match self {
            ColorMode::Single => ColorMode::Multiple,
            ColorMode::Multiple => ColorMode::Random,
            ColorMode::Random => ColorMode::Cycle,
            ColorMode::Cycle => ColorMode::Single,
        }
    }

    pub fn toggled(self, mode: ColorMode) -> Self {
        if self == mode {
            ColorMode::Single
        } else {
            mode
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hue {
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
    Black,
}

pub const BASE_HUES: [Hue; 7] = [
    Hue::Red,
    Hue::Green,
    Hue::Blue,
    Hue::Yellow,
    Hue::Magenta,
    Hue::Cyan,
    Hue::White,
];

impl Hue {
    pub fn name(self) -> &'static str {
        match self {
            Hue::Red => "red",
            Hue::Green => "green",
            Hue::Blue => "blue",
            Hue::Yellow => "yellow",
            Hue::Magenta => "magenta",
            Hue::Cyan => "cyan",
            Hue::White => "white",
            Hue::Black => "black",
        }
    }

    pub fn parse(s: &str) -> Option<Hue> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Hue::Red),
            "green" => Some(Hue::Green),
            "blue" => Some(Hue::Blue),
            "yellow" => Some(Hue::Yellow),
            "magenta" => Some(Hue::Magenta),
            "cyan" => Some(Hue::Cyan),
            "white" => Some(Hue::White),
            "black" => Some(Hue::Black),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollMode {
    Falling(Direction),
    OldSchool,
}

impl ScrollMode {
    pub fn is_horizontal(self) -> bool {
        matches!(
            self,
            ScrollMode::Falling(Direction::Left) | ScrollMode::Falling(Direction::Right)
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub delay: u8,
    pub bold: BoldMode,
    pub italic: bool,
    pub color_mode: ColorMode,
    pub color: Hue,
    pub lead_color: Hue,
    pub lead_matches_body: bool,
    pub background: Hue,
    pub color_override: Option<u8>,
    pub scroll: ScrollMode,
    pub double_space: bool,
    pub bg_char: char,
    pub glyphs: GlyphChoice,
    pub async_scroll: bool,
    pub screen_saver: bool,
    pub disable_keys: bool,
    pub wakeup: bool,
    pub run_timer: Option<Duration>,
    pub start_timer: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            bold: BoldMode::Off,
            italic: false,
            color_mode: ColorMode::Single,
            color: Hue::Green,
            lead_color: Hue::White,
            lead_matches_body: false,
            background: Hue::Black,
            color_override: None,
            scroll: ScrollMode::Falling(Direction::Down),
            double_space: false,
            bg_char: ' ',
            glyphs: GlyphChoice::default(),
            async_scroll: false,
            screen_saver: false,
            disable_keys: false,
            wakeup: false,
            run_timer: None,
            start_timer: None,
        }
    }
}

impl Settings {
    pub fn frame_delay(&self) -> Duration {
        let tier = (self.delay as usize).min(DELAY_TABLE_MS.len() - 1);
        Duration::from_millis(DELAY_TABLE_MS[tier])
    }

    pub fn spacing(&self) -> u16 {
        if self.double_space {
            2
        } else {
            1
        }
    }

    // Session flags survive. Returns true when the line layout changed.
    pub fn restore_defaults(&mut self) -> bool {
        let defaults = Settings::default();
        let relayout = self.scroll != defaults.scroll || self.double_space != defaults.double_space;
        *self = Settings {
            screen_saver: self.screen_saver,
            disable_keys: self.disable_keys,
            wakeup: self.wakeup,
            run_timer: self.run_timer,
            start_timer: self.start_timer,
            ..defaults
        };
        relayout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_tiers_map_to_table() {
        let mut s = Settings::default();
        assert_eq!(s.frame_delay(), Duration::from_millis(55));
        s.delay = 0;
        assert_eq!(s.frame_delay(), Duration::from_millis(5));
        s.delay = 9;
        assert_eq!(s.frame_delay(), Duration::from_millis(130));
    }

    #[test]
    fn color_mode_cycles_through_all_modes() {
        let mut m = ColorMode::Single;
        let mut seen = Vec::new();
        for _ in 0..4 {
            m = m.next();
            seen.push(m);
        }
        assert_eq!(
            seen,
            vec![
                ColorMode::Multiple,
                ColorMode::Random,
                ColorMode::Cycle,
                ColorMode::Single
            ]
        );
    }

    #[test]
    fn toggling_active_color_mode_returns_to_single() {
        assert_eq!(ColorMode::Random.toggled(ColorMode::Random), ColorMode::Single);
        assert_eq!(ColorMode::Cycle.toggled(ColorMode::Multiple), ColorMode::Multiple);
    }

    #[test]
    fn hue_parse_is_case_insensitive() {
        assert_eq!(Hue::parse("BLUE"), Some(Hue::Blue));
        assert_eq!(Hue::parse("CyAn"), Some(Hue::Cyan));
        assert_eq!(Hue::parse("purple"), None);
    }

    #[test]
    fn restore_defaults_keeps_session_flags() {
        let mut s = Settings {
            screen_saver: true,
            run_timer: Some(Duration::from_secs(3)),
            color: Hue::Red,
            bold: BoldMode::All,
            scroll: ScrollMode::OldSchool,
            ..Settings::default()
        };
        assert!(s.restore_defaults());
        assert!(s.screen_saver);
        assert_eq!(s.run_timer, Some(Duration::from_secs(3)));
        assert_eq!(s.color, Hue::Green);
        assert_eq!(s.bold, BoldMode::Off);
        assert!(!s.restore_defaults());
    }
}
