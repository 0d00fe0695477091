// Copyright (c) 2026 rezky_nightky

use rand::{rngs::StdRng, Rng};

pub trait Dice {
    fn roll(&mut self, low: i32, high: i32) -> i32;

    fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let last = items.len().saturating_sub(1).min(i32::MAX as usize) as i32;
        let i = self.roll(0, last).clamp(0, last) as usize;
        items.get(i)
    }
}

impl Dice for StdRng {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.random_range(low..=high)
    }
}

#[cfg(test)]
#[derive(Clone, Copy, Debug)]
pub struct Loaded(pub i32);

#[cfg(test)]
impl Dice for Loaded {
    fn roll(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.0.clamp(low, high)
    }
}
