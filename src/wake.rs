// Copyright (c) 2026 rezky_nightky

use crate::dice::Dice;

pub const MESSAGES: [&str; 4] = [
    "Wake up, Neo...",
    "The Matrix has you...",
    "Follow the white rabbit.",
    "Knock, knock, Neo.",
];

pub const HOLD_TICKS: u32 = 40;

pub const MIN_IDLE_TICKS: i32 = 1500;
pub const MAX_IDLE_TICKS: i32 = 3000;

pub const TEXT_ROW: u16 = 1;
pub const TEXT_COL: u16 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WakeStep {
    Idle,
    Begin,
    Type { offset: u16, ch: char },
    Hold,
    NextMessage,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Waiting { countdown: u32 },
    Typing { message: usize, typed: usize, held: u32 },
}

#[derive(Clone, Debug)]
pub struct WakeUp {
    phase: Phase,
}

fn idle_ticks(dice: &mut impl Dice) -> u32 {
    dice.roll(MIN_IDLE_TICKS, MAX_IDLE_TICKS).max(1) as u32
}

impl WakeUp {
    pub fn new(dice: &mut impl Dice) -> Self {
        Self {
            phase: Phase::Waiting {
                countdown: idle_ticks(dice),
            },
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, Phase::Typing { .. })
    }

    pub fn tick(&mut self, dice: &mut impl Dice) -> WakeStep {
        match self.phase {
            Phase::Waiting { countdown } => {
                if countdown > 1 {
                    self.phase = Phase::Waiting {
                        countdown: countdown - 1,
                    };
                    return WakeStep::Idle;
                }
                self.phase = Phase::Typing {
                    message: 0,
                    typed: 0,
                    held: 0,
                };
                WakeStep::Begin
            }
            Phase::Typing {
                message,
                typed,
                held,
            } => {
                let text = MESSAGES[message];
                if let Some(ch) = text.chars().nth(typed) {
                    self.phase = Phase::Typing {
                        message,
                        typed: typed + 1,
                        held,
                    };
                    return WakeStep::Type {
                        offset: typed as u16,
                        ch,
                    };
                }
                if held < HOLD_TICKS {
                    self.phase = Phase::Typing {
                        message,
                        typed,
                        held: held + 1,
                    };
                    return WakeStep::Hold;
                }
                if message + 1 < MESSAGES.len() {
                    self.phase = Phase::Typing {
                        message: message + 1,
                        typed: 0,
                        held: 0,
                    };
                    return WakeStep::NextMessage;
                }
                self.phase = Phase::Waiting {
                    countdown: idle_ticks(dice),
                };
                WakeStep::End
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::Loaded;

    #[test]
    fn countdown_is_clamped_to_range() {
        let w = WakeUp::new(&mut Loaded(0));
        assert_eq!(
            w.phase,
            Phase::Waiting {
                countdown: MIN_IDLE_TICKS as u32
            }
        );
        let w = WakeUp::new(&mut Loaded(i32::MAX));
        assert_eq!(
            w.phase,
            Phase::Waiting {
                countdown: MAX_IDLE_TICKS as u32
            }
        );
    }

    #[test]
    fn begins_after_countdown() {
        let mut d = Loaded(0);
        let mut w = WakeUp::new(&mut d);
        for _ in 0..MIN_IDLE_TICKS - 1 {
            assert_eq!(w.tick(&mut d), WakeStep::Idle);
        }
        assert!(!w.is_running());
        assert_eq!(w.tick(&mut d), WakeStep::Begin);
        assert!(w.is_running());
    }

    #[test]
    fn full_sequence_types_every_message_then_rearms() {
        let mut d = Loaded(0);
        let mut w = WakeUp::new(&mut d);
        while w.tick(&mut d) != WakeStep::Begin {}

        let mut typed = vec![String::new()];
        let mut holds = 0;
        loop {
            match w.tick(&mut d) {
                WakeStep::Type { offset, ch } => {
                    let cur = typed.last_mut().unwrap();
                    assert_eq!(offset as usize, cur.len());
                    cur.push(ch);
                }
                WakeStep::Hold => holds += 1,
                WakeStep::NextMessage => typed.push(String::new()),
                WakeStep::End => break,
                other => panic!("unexpected step {:?}", other),
            }
        }
        assert_eq!(typed, MESSAGES);
        assert_eq!(holds, HOLD_TICKS as usize * MESSAGES.len());
        assert!(!w.is_running());
        assert_eq!(w.tick(&mut d), WakeStep::Idle);
    }
}
