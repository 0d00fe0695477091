// Copyright (c) 2026 rezky_nightky

use std::char;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Charset(u32);

impl Charset {
    pub const LETTERS: Charset = Charset(0x1);
    pub const DIGITS: Charset = Charset(0x2);
    pub const PUNCTUATION: Charset = Charset(0x4);
    pub const EXTENDED: Charset = Charset(0x8);
    pub const KATAKANA: Charset = Charset(0x10);
    pub const BINARY: Charset = Charset(0x20);

    pub const DEFAULT: Charset = Charset(0x7);

    pub fn contains(self, other: Charset) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn union(self, other: Charset) -> Charset {
        Charset(self.0 | other.0)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GlyphChoice {
    pub extended: bool,
    pub extended_only: bool,
    pub katakana: bool,
    pub katakana_only: bool,
    pub binary: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphToggle {
    Extended,
    ExtendedOnly,
    Katakana,
    KatakanaOnly,
    Binary,
}

impl GlyphChoice {
    pub fn charset(self) -> Charset {
        if self.binary {
            return Charset::BINARY;
        }
        match (self.extended_only, self.katakana_only) {
            (true, true) => Charset::EXTENDED.union(Charset::KATAKANA),
            (true, false) => Charset::EXTENDED,
            (false, true) => Charset::KATAKANA,
            (false, false) => {
                let mut cs = Charset::DEFAULT;
                if self.extended {
                    cs = cs.union(Charset::EXTENDED);
                }
                if self.katakana {
                    cs = cs.union(Charset::KATAKANA);
                }
                cs
            }
        }
    }

    pub fn toggle(&mut self, which: GlyphToggle) {
        let flag = match which {
            GlyphToggle::Extended => &mut self.extended,
            GlyphToggle::ExtendedOnly => &mut self.extended_only,
            GlyphToggle::Katakana => &mut self.katakana,
            GlyphToggle::KatakanaOnly => &mut self.katakana_only,
            GlyphToggle::Binary => &mut self.binary,
        };
        *flag = !*flag;
    }
}

const PUNCTUATION: &str = "!#$%^&()-+=[]{}|;:<>,.?~`@*_'\\/\"";

// Latin-1 letters that render one cell wide everywhere.
const EXTENDED: &str = "ÀÁÂÃÄÅÆÇÈÉÊËÌÍÎÏÐÑÒÓÔÕÖØÙÚÛÜÝÞßàáâãäåæçèéêëìíîïðñòóôõöøùúûüýþÿ";

fn push_range(out: &mut Vec<char>, start: u32, end: u32) {
    for v in start..=end {
        if let Some(ch) = char::from_u32(v) {
            out.push(ch);
        }
    }
}

pub fn build_glyphs(charset: Charset) -> Vec<char> {
    let mut out: Vec<char> = Vec::new();

    if charset.contains(Charset::BINARY) {
        push_range(&mut out, 0x30, 0x31);
    }
    if charset.contains(Charset::LETTERS) {
        push_range(&mut out, 0x61, 0x7A);
        push_range(&mut out, 0x41, 0x5A);
    }
    if charset.contains(Charset::DIGITS) {
        push_range(&mut out, 0x30, 0x39);
    }
    if charset.contains(Charset::PUNCTUATION) {
        out.extend(PUNCTUATION.chars());
    }
    if charset.contains(Charset::EXTENDED) {
        out.extend(EXTENDED.chars());
    }
    if charset.contains(Charset::KATAKANA) {
        // Halfwidth forms: one terminal cell each.
        push_range(&mut out, 0xFF66, 0xFF9D);
    }

    if out.is_empty() {
        out.push('0');
        out.push('1');
    }

    out
}
