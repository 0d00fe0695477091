// Copyright (c) 2026 rezky_nightky

use std::thread;
use std::time::Instant;

use crossterm::event::KeyEvent;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::charset::build_glyphs;
use crate::dice::Dice;
use crate::display::{Display, Style};
use crate::error::{check_size, Result};
use crate::input::{command_for, Command, Input};
use crate::line::{Field, Tick};
use crate::palette::{body_bold, body_color, hue_color, ColorCycle, CYCLE_PERIOD};
use crate::pool::LinePool;
use crate::runtime::{ColorMode, Hue, Settings};
use crate::wake::{WakeStep, WakeUp, TEXT_COL, TEXT_ROW};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Frozen,
    Stopped,
}

pub struct Rain<D: Dice = StdRng> {
    settings: Settings,
    field: Field,
    pool: LinePool,
    glyphs: Vec<char>,
    dice: D,
    cycle: ColorCycle,
    wake: Option<WakeUp>,
    state: State,
    relayout: bool,
    repaint: bool,
}

fn background_style(settings: &Settings) -> Style {
    let fg = match settings.color_override {
        Some(index) => crossterm::style::Color::AnsiValue(index),
        None => hue_color(settings.color),
    };
    Style::plain(fg, hue_color(settings.background))
}

fn lead_style(settings: &Settings) -> Style {
    Style {
        fg: hue_color(settings.lead_color),
        bg: hue_color(settings.background),
        bold: true,
        italic: settings.italic,
    }
}

fn line_lead_style(
    settings: &Settings,
    hue: Hue,
    cycle: &ColorCycle,
    dice: &mut impl Dice,
) -> Style {
    let mut style = lead_style(settings);
    if settings.lead_matches_body {
        style.fg = body_color(settings, hue, cycle, dice);
    }
    style
}

fn body_style(
    settings: &Settings,
    hue: Hue,
    own_bold: Option<bool>,
    cycle: &ColorCycle,
    dice: &mut impl Dice,
) -> Style {
    Style {
        fg: body_color(settings, hue, cycle, dice),
        bg: hue_color(settings.background),
        bold: body_bold(settings.bold, own_bold, dice),
        italic: settings.italic,
    }
}

fn random_glyph(glyphs: &[char], dice: &mut impl Dice) -> char {
    dice.pick(glyphs).copied().unwrap_or('0')
}

impl<D: Dice> Rain<D> {
    pub fn new(settings: Settings, display: &mut impl Display, mut dice: D) -> Result<Self> {
        let (rows, cols) = display.size();
        check_size(rows, cols)?;
        let field = Field::new(rows, cols);

        let glyphs = build_glyphs(settings.glyphs.charset());
        let pool = LinePool::new(field, settings.scroll, settings.spacing());
        let cycle = ColorCycle::starting_at(CYCLE_PERIOD, settings.color);
        let wake = settings.wakeup.then(|| WakeUp::new(&mut dice));

        display.set_background(settings.bg_char, background_style(&settings));
        display.clear();
        info!(rows, cols, glyphs = glyphs.len(), "rain started");

        Ok(Self {
            settings,
            field,
            pool,
            glyphs,
            dice,
            cycle,
            wake,
            state: State::Running,
            relayout: false,
            repaint: false,
        })
    }

    pub fn stop(&mut self) {
        self.state = State::Stopped;
    }

    pub fn tick(&mut self, display: &mut impl Display) -> Result<()> {
        if self.state == State::Stopped {
            return Ok(());
        }

        if display.detect_resize(self.field.rows, self.field.cols)? {
            let (rows, cols) = display.size();
            check_size(rows, cols)?;
            info!(rows, cols, "resized");
            self.field = Field::new(rows, cols);
            self.relayout = true;
        }
        if self.repaint {
            display.set_background(self.settings.bg_char, background_style(&self.settings));
            display.clear();
            self.repaint = false;
        }
        if self.relayout {
            self.pool
                .reset(self.field, self.settings.scroll, self.settings.spacing());
            display.clear();
            self.relayout = false;
            debug!(
                field = ?self.pool.field(),
                scroll = ?self.pool.scroll(),
                free = self.pool.free().len(),
                "relayout"
            );
        }

        if self.state == State::Frozen {
            return Ok(display.refresh()?);
        }

        let waking = self.wake.as_ref().is_some_and(WakeUp::is_running);
        if !waking {
            self.pool.spawn(&self.glyphs, &mut self.dice);
            if self.settings.color_mode == ColorMode::Cycle && self.cycle.tick() {
                debug!(hue = self.cycle.hue().name(), "color cycled");
            }
            self.advance_lines(display);
            self.pool.retire_finished();
        }
        self.wake_step(display);

        Ok(display.refresh()?)
    }

    fn advance_lines(&mut self, display: &mut impl Display) {
        let settings = &self.settings;
        let glyphs = &self.glyphs;
        let cycle = &self.cycle;
        let dice = &mut self.dice;
        let blank = background_style(settings);

        for line in self.pool.lines_mut() {
            if settings.async_scroll && !line.async_scroll_turn() {
                continue;
            }
            let hue = line.color();
            let own_bold = line.own_bold();

            match line.advance_tick(glyphs, dice) {
                Tick::Falling(t) => {
                    if let Some(p) = t.erase {
                        display.put(p.row, p.col, settings.bg_char, blank);
                    }
                    if let Some(p) = t.next {
                        let style = body_style(settings, hue, own_bold, cycle, dice);
                        display.put(p.row, p.col, random_glyph(glyphs, dice), style);
                    }
                    if let Some(p) = t.lead {
                        let style = line_lead_style(settings, hue, cycle, dice);
                        display.put(p.row, p.col, random_glyph(glyphs, dice), style);
                    }
                }
                Tick::OldSchool(t) => {
                    if let Some(p) = t.erase {
                        display.put(p.row, p.col, settings.bg_char, blank);
                    }
                    for c in &t.body {
                        let style = body_style(settings, hue, own_bold, cycle, dice);
                        display.put(c.pos.row, c.pos.col, c.glyph, style);
                    }
                    if let Some(c) = t.lead {
                        let style = line_lead_style(settings, hue, cycle, dice);
                        display.put(c.pos.row, c.pos.col, c.glyph, style);
                    }
                }
            }
        }
    }

    fn wake_step(&mut self, display: &mut impl Display) {
        let Some(wake) = self.wake.as_mut() else {
            return;
        };
        match wake.tick(&mut self.dice) {
            WakeStep::Idle | WakeStep::Hold => {}
            WakeStep::Begin => {
                info!("wake-up sequence");
                display.clear();
            }
            WakeStep::NextMessage => display.clear(),
            WakeStep::Type { offset, ch } => {
                let col = TEXT_COL.saturating_add(offset);
                if TEXT_ROW < self.field.rows && col < self.field.cols {
                    display.put(TEXT_ROW, col, ch, lead_style(&self.settings));
                }
            }
            WakeStep::End => {
                display.clear();
                self.pool.clear();
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.settings.screen_saver {
            debug!("key pressed in screen saver mode");
            self.stop();
            return;
        }
        let Some(cmd) = command_for(key) else {
            return;
        };
        if self.settings.disable_keys && !cmd.is_quit() {
            return;
        }
        self.apply(cmd);
    }

    pub fn apply(&mut self, cmd: Command) {
        debug!(?cmd, "command");
        let s = &mut self.settings;
        match cmd {
            Command::Delay(d) => s.delay = d,
            Command::Bold(mode) => s.bold = mode,
            Command::Color(hue) => {
                s.color = hue;
                s.color_override = None;
            }
            Command::LeadColor(hue) => s.lead_color = hue,
            Command::Background(hue) => {
                s.background = hue;
                self.repaint = true;
            }
            Command::ToggleAsync => s.async_scroll = !s.async_scroll,
            Command::ToggleColorMode(mode) => {
                s.color_mode = s.color_mode.toggled(mode);
                self.cycle = ColorCycle::starting_at(CYCLE_PERIOD, s.color);
            }
            Command::NextColorMode => {
                s.color_mode = s.color_mode.next();
                self.cycle = ColorCycle::starting_at(CYCLE_PERIOD, s.color);
            }
            Command::ToggleDoubleSpace => {
                s.double_space = !s.double_space;
                self.relayout = true;
            }
            Command::ToggleItalic => s.italic = !s.italic,
            Command::ToggleGlyphs(which) => {
                s.glyphs.toggle(which);
                self.glyphs = build_glyphs(s.glyphs.charset());
            }
            Command::Scroll(mode) => {
                s.scroll = mode;
                self.relayout = true;
            }
            Command::RestoreDefaults => {
                self.relayout |= s.restore_defaults();
                self.glyphs = build_glyphs(s.glyphs.charset());
                self.cycle = ColorCycle::starting_at(CYCLE_PERIOD, s.color);
                self.repaint = true;
            }
            Command::Freeze => {
                self.state = match self.state {
                    State::Running => State::Frozen,
                    State::Frozen => State::Running,
                    State::Stopped => State::Stopped,
                };
            }
            Command::Quit => self.stop(),
        }
    }

    pub fn run(&mut self, display: &mut impl Display, input: &mut impl Input) -> Result<()> {
        let started = Instant::now();
        while self.state != State::Stopped {
            self.tick(display)?;

            if let Some(limit) = self.settings.run_timer {
                if started.elapsed() >= limit {
                    info!(?limit, "run timer expired");
                    self.stop();
                    break;
                }
            }

            if let Some(key) = input.poll_key()? {
                self.handle_key(key);
            }
            if self.state == State::Stopped {
                break;
            }

            thread::sleep(self.settings.frame_delay());
        }
        info!(active = self.pool.active(), "rain stopped");
        Ok(())
    }
}
