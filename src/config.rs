// Copyright (c) 2026 rezky_nightky

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::charset::GlyphChoice;
use crate::input::COMMAND_HELP;
use crate::line::Direction;
use crate::runtime::{BoldMode, ColorMode, Hue, ScrollMode, Settings, BASE_HUES, DEFAULT_DELAY};

pub fn color_enabled_stdout() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if matches!(std::env::var("CLICOLOR").ok().as_deref(), Some("0")) {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn parse_delay(s: &str) -> Result<u8, String> {
    match s.trim().parse::<u8>() {
        Ok(v) if v <= 9 => Ok(v),
        _ => Err(format!("{} is not a delay between 0 and 9", s)),
    }
}

fn parse_hue(s: &str) -> Result<Hue, String> {
    Hue::parse(s).ok_or_else(|| format!("{} is not a color (see --list-colors)", s))
}

fn parse_line_hue(s: &str) -> Result<Hue, String> {
    let hue = parse_hue(s)?;
    if hue == Hue::Black {
        return Err("black is only valid as a background".to_string());
    }
    Ok(hue)
}

fn parse_seconds(s: &str) -> Result<u64, String> {
    match s.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(format!("{} is not a positive number of seconds", s)),
    }
}

fn parse_color_number(s: &str) -> Result<u8, String> {
    match s.trim().parse::<u8>() {
        Ok(v) if v >= 1 => Ok(v),
        _ => Err(format!("{} is not a color number between 1 and 255", s)),
    }
}

fn parse_bg_char(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => Ok(c),
        _ => Err(format!("{:?} must be exactly one printable character", s)),
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "glyphrain", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'd',
        long = "delay",
        default_value_t = DEFAULT_DELAY,
        value_parser = parse_delay,
        help_heading = "GENERAL",
        help = "Delay tier (min 0 max 9): 0 fastest, 9 slowest"
    )]
    pub delay: u8,

    #[arg(
        short = 's',
        long = "screensaver",
        help_heading = "GENERAL",
        help = "Screen saver mode (any key exits)"
    )]
    pub screensaver: bool,

    #[arg(
        short = 'a',
        long = "async",
        help_heading = "GENERAL",
        help = "Asynchronous scrolling: each line moves at its own pace"
    )]
    pub async_scroll: bool,

    #[arg(
        short = 'S',
        long = "start-timer",
        value_name = "SECONDS",
        value_parser = parse_seconds,
        help_heading = "GENERAL",
        help = "Wait SECONDS before starting"
    )]
    pub start_timer: Option<u64>,

    #[arg(
        short = 'R',
        long = "run-timer",
        value_name = "SECONDS",
        value_parser = parse_seconds,
        help_heading = "GENERAL",
        help = "Stop after SECONDS"
    )]
    pub run_timer: Option<u64>,

    #[arg(
        long = "wakeup",
        help_heading = "GENERAL",
        help = "Show the wake-up messages every once in a while"
    )]
    pub wakeup: bool,

    #[arg(
        short = 'p',
        long = "password",
        help_heading = "GENERAL",
        help = "Ask for a password before starting; quitting asks for it again"
    )]
    pub password: bool,

    #[arg(
        short = 'W',
        long = "do-not-clear",
        help_heading = "GENERAL",
        help = "Leave the last frame on screen when exiting"
    )]
    pub do_not_clear: bool,

    #[arg(
        long = "disable-keys",
        help_heading = "GENERAL",
        help = "Ignore every key except quit"
    )]
    pub disable_keys: bool,

    #[arg(
        short = 'b',
        long = "bold",
        help_heading = "APPEARANCE",
        help = "Random bold characters"
    )]
    pub bold: bool,

    #[arg(
        short = 'B',
        long = "bold-all",
        help_heading = "APPEARANCE",
        help = "All characters bold (overrides -b)"
    )]
    pub bold_all: bool,

    #[arg(
        short = 'j',
        long = "italic",
        help_heading = "APPEARANCE",
        help = "Italic characters"
    )]
    pub italic: bool,

    #[arg(
        short = 'C',
        long = "color",
        default_value = "green",
        value_parser = parse_line_hue,
        help_heading = "APPEARANCE",
        help = "Rain color (see --list-colors)"
    )]
    pub color: Hue,

    #[arg(
        short = 'L',
        long = "lead-color",
        default_value = "white",
        value_parser = parse_line_hue,
        help_heading = "APPEARANCE",
        help = "Lead character color"
    )]
    pub lead_color: Hue,

    #[arg(
        short = 'O',
        long = "over-ride",
        help_heading = "APPEARANCE",
        help = "Draw the lead character in the rain color instead of the lead color"
    )]
    pub over_ride: bool,

    #[arg(
        long = "background",
        default_value = "black",
        value_parser = parse_hue,
        help_heading = "APPEARANCE",
        help = "Background color"
    )]
    pub background: Hue,

    #[arg(
        long = "color-number",
        value_name = "N",
        value_parser = parse_color_number,
        help_heading = "APPEARANCE",
        help = "Rain color as a 256-color palette number (min 1 max 255), replaces --color"
    )]
    pub color_number: Option<u8>,

    #[arg(
        short = 'm',
        long = "multiple",
        help_heading = "APPEARANCE",
        help = "One random color per line"
    )]
    pub multiple: bool,

    #[arg(
        short = 'M',
        long = "random",
        help_heading = "APPEARANCE",
        help = "Random color per character"
    )]
    pub random: bool,

    #[arg(
        short = 'c',
        long = "cycle",
        help_heading = "APPEARANCE",
        help = "Cycle through the colors"
    )]
    pub cycle: bool,

    #[arg(
        long = "bg-char",
        value_name = "CHAR",
        default_value = " ",
        value_parser = parse_bg_char,
        help_heading = "APPEARANCE",
        help = "Character used to fill the background"
    )]
    pub bg_char: char,

    #[arg(
        short = 'l',
        long = "double-space",
        help_heading = "LAYOUT",
        help = "Leave an empty column between lines"
    )]
    pub double_space: bool,

    #[arg(
        short = 'v',
        long = "reverse",
        help_heading = "LAYOUT",
        help = "Rain upwards"
    )]
    pub reverse: bool,

    #[arg(long = "scroll-right", help_heading = "LAYOUT", help = "Rain to the right")]
    pub scroll_right: bool,

    #[arg(long = "scroll-left", help_heading = "LAYOUT", help = "Rain to the left")]
    pub scroll_left: bool,

    #[arg(
        short = 'o',
        long = "old-school",
        help_heading = "LAYOUT",
        help = "Old-school scrolling"
    )]
    pub old_school: bool,

    #[arg(
        short = 'e',
        long = "extended",
        help_heading = "CHARSET",
        help = "Add extended Latin characters"
    )]
    pub extended: bool,

    #[arg(
        short = 'E',
        long = "extended-only",
        help_heading = "CHARSET",
        help = "Only extended Latin characters"
    )]
    pub extended_only: bool,

    #[arg(
        short = 'k',
        long = "katakana",
        help_heading = "CHARSET",
        help = "Add katakana"
    )]
    pub katakana: bool,

    #[arg(
        short = 'K',
        long = "katakana-only",
        help_heading = "CHARSET",
        help = "Only katakana"
    )]
    pub katakana_only: bool,

    #[arg(
        short = 'z',
        long = "zero-one",
        help_heading = "CHARSET",
        help = "Only zeros and ones"
    )]
    pub zero_one: bool,

    #[arg(
        long = "seed",
        help_heading = "DEBUG",
        help = "Seed the random generator for a reproducible run"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "log-file",
        value_name = "PATH",
        help_heading = "DEBUG",
        help = "Write logs to PATH (filter with GLYPHRAIN_LOG)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "list-colors",
        help_heading = "HELP",
        help = "List available colors and exit"
    )]
    pub list_colors: bool,

    #[arg(
        long = "list-commands",
        help_heading = "HELP",
        help = "List the keys available while running and exit"
    )]
    pub list_commands: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(long = "version", help_heading = "HELP", help = "Print version and exit")]
    pub version: bool,
}

impl Args {
    fn color_mode(&self) -> ColorMode {
        if self.multiple {
            ColorMode::Multiple
        } else if self.random {
            ColorMode::Random
        } else if self.cycle {
            ColorMode::Cycle
        } else {
            ColorMode::Single
        }
    }

    fn scroll(&self) -> ScrollMode {
        if self.old_school {
            ScrollMode::OldSchool
        } else if self.scroll_left {
            ScrollMode::Falling(Direction::Left)
        } else if self.scroll_right {
            ScrollMode::Falling(Direction::Right)
        } else if self.reverse {
            ScrollMode::Falling(Direction::Up)
        } else {
            ScrollMode::Falling(Direction::Down)
        }
    }

    pub fn settings(&self) -> Settings {
        let bold = if self.bold_all {
            BoldMode::All
        } else if self.bold {
            BoldMode::Random
        } else {
            BoldMode::Off
        };

        Settings {
            delay: self.delay,
            bold,
            italic: self.italic,
            color_mode: self.color_mode(),
            color: self.color,
            lead_color: self.lead_color,
            lead_matches_body: self.over_ride,
            background: self.background,
            color_override: self.color_number,
            scroll: self.scroll(),
            double_space: self.double_space,
            bg_char: self.bg_char,
            glyphs: GlyphChoice {
                extended: self.extended,
                extended_only: self.extended_only,
                katakana: self.katakana,
                katakana_only: self.katakana_only,
                binary: self.zero_one,
            },
            async_scroll: self.async_scroll,
            screen_saver: self.screensaver,
            disable_keys: self.disable_keys,
            wakeup: self.wakeup,
            run_timer: self.run_timer.map(Duration::from_secs),
            start_timer: self.start_timer.map(Duration::from_secs),
        }
    }
}

fn print_heading(title: &str) {
    if color_enabled_stdout() {
        println!("\x1b[1;36m{}\x1b[0m", title);
    } else {
        println!("{}", title);
    }
}

pub fn print_list_colors() {
    print_heading("AVAILABLE COLORS:");
    for hue in BASE_HUES {
        println!("{}", hue.name());
    }
    println!("{}         (background only)", Hue::Black.name());
}

pub fn print_list_commands() {
    print_heading("COMMANDS AVAILABLE DURING RUN:");
    for (keys, what) in COMMAND_HELP {
        println!("{:<24}{}", keys, what);
    }
}
