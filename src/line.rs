// Copyright (c) 2026 rezky_nightky

use std::collections::VecDeque;

use crate::dice::Dice;
use crate::palette::random_hue;
use crate::runtime::Hue;

pub const MIN_LENGTH: i32 = 3;
pub const MAX_ASYNC_RATE: i32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Down | Direction::Up)
    }

    fn step(self) -> i32 {
        match self {
            Direction::Down | Direction::Right => 1,
            Direction::Up | Direction::Left => -1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    pub rows: u16,
    pub cols: u16,
}

impl Field {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pos {
    pub row: u16,
    pub col: u16,
}

impl Pos {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

fn random_length(along: u16, dice: &mut impl Dice) -> i32 {
    let high = (along as i32 - 3).max(MIN_LENGTH);
    dice.roll(MIN_LENGTH, high)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FallingTick {
    pub lead: Option<Pos>,
    pub next: Option<Pos>,
    pub erase: Option<Pos>,
    pub retirable: bool,
}

#[derive(Clone, Debug)]
pub struct FallingLine {
    direction: Direction,
    fixed: u16,
    span: i32,
    lead: i32,
    body: i32,
    tail: i32,
    length: i32,
    color: Hue,
    async_count: i32,
    async_rate: i32,
}

impl FallingLine {
    // `coord` is the column for vertical motion and the row for horizontal motion.
    pub fn new(coord: u16, field: Field, direction: Direction, dice: &mut impl Dice) -> Self {
        let along = if direction.is_vertical() {
            field.rows
        } else {
            field.cols
        };
        let span = along as i32 - 1;
        let length = random_length(along, dice);
        let color = random_hue(dice);
        let async_rate = dice.roll(0, MAX_ASYNC_RATE);

        let (lead, body, tail) = match direction.step() {
            1 => (0, -1, -length),
            _ => (span - 1, span, span + length - 1),
        };

        Self {
            direction,
            fixed: coord,
            span,
            lead,
            body,
            tail,
            length,
            color,
            async_count: 0,
            async_rate,
        }
    }

    pub fn coord(&self) -> u16 {
        self.fixed
    }

    pub fn color(&self) -> Hue {
        self.color
    }

    fn visible(&self, p: i32) -> Option<Pos> {
        if p < 0 || p >= self.span {
            return None;
        }
        let p = p as u16;
        Some(if self.direction.is_vertical() {
            Pos::new(p, self.fixed)
        } else {
            Pos::new(self.fixed, p)
        })
    }

    pub fn get_lead(&mut self) -> Option<Pos> {
        let out = self.visible(self.lead);
        self.lead += self.direction.step();
        out
    }

    pub fn get_next(&mut self) -> Option<Pos> {
        let out = self.visible(self.body);
        self.body += self.direction.step();
        out
    }

    pub fn delete_last(&mut self) -> Option<Pos> {
        let out = self.visible(self.tail);
        self.tail += self.direction.step();
        out
    }

    pub fn okay_to_delete(&self) -> bool {
        match self.direction.step() {
            1 => self.tail >= self.span,
            _ => self.tail < 0,
        }
    }

    pub fn async_scroll_turn(&mut self) -> bool {
        if self.async_count == self.async_rate {
            self.async_count = 0;
            true
        } else {
            self.async_count += 1;
            false
        }
    }

    pub fn advance_tick(&mut self) -> FallingTick {
        let lead = self.get_lead();
        let next = self.get_next();
        let erase = self.delete_last();
        FallingTick {
            lead,
            next,
            erase,
            retirable: self.okay_to_delete(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrailCell {
    pub pos: Pos,
    pub glyph: char,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OldTick {
    pub erase: Option<Pos>,
    pub lead: Option<TrailCell>,
    pub body: Vec<TrailCell>,
    pub retirable: bool,
}

#[derive(Clone, Debug)]
pub struct OldStyleLine {
    col: u16,
    span: i32,
    lead_row: i32,
    write_row: i32,
    length: usize,
    lead_glyph: char,
    color: Hue,
    bold: bool,
    // Newest first.
    cells: VecDeque<(u16, char)>,
}

impl OldStyleLine {
    pub fn new(col: u16, field: Field, glyphs: &[char], dice: &mut impl Dice) -> Self {
        let length = random_length(field.rows, dice) as usize;
        let lead_glyph = dice.pick(glyphs).copied().unwrap_or('0');
        let color = random_hue(dice);
        let bold = dice.roll(1, 3) == 1;

        Self {
            col,
            span: field.rows as i32 - 1,
            lead_row: 0,
            write_row: -1,
            length,
            lead_glyph,
            color,
            bold,
            cells: VecDeque::with_capacity(length + 1),
        }
    }

    pub fn coord(&self) -> u16 {
        self.col
    }

    pub fn color(&self) -> Hue {
        self.color
    }

    pub fn bold(&self) -> bool {
        self.bold
    }

    pub fn get_lead(&mut self) -> Option<TrailCell> {
        if self.lead_row >= self.span {
            return None;
        }
        let cell = TrailCell {
            pos: Pos::new(self.lead_row as u16, self.col),
            glyph: self.lead_glyph,
        };
        self.lead_row += 1;
        Some(cell)
    }

    pub fn get_next(&mut self, glyphs: &[char], dice: &mut impl Dice) -> Vec<TrailCell> {
        let before = self.cells.clone();
        let in_view = self.write_row >= 0 && self.write_row < self.span;
        if in_view {
            self.cells.push_front((self.write_row as u16, ' '));
        }
        if self.cells.len() > self.length
            || (self.write_row >= self.span && self.cells.len() >= self.length)
        {
            self.cells.pop_back();
        }
        self.write_row += 1;

        // Each glyph slides one row toward the lead; the top of the trail is fresh.
        for (row, glyph) in self.cells.iter_mut() {
            let above = row
                .checked_sub(1)
                .and_then(|r| before.iter().find(|&&(b, _)| b == r));
            *glyph = match above {
                Some(&(_, g)) => g,
                None => dice.pick(glyphs).copied().unwrap_or('0'),
            };
        }

        self.cells
            .iter()
            .map(|&(row, glyph)| TrailCell {
                pos: Pos::new(row, self.col),
                glyph,
            })
            .collect()
    }

    pub fn delete_last(&mut self) -> Option<Pos> {
        if self.cells.len() >= self.length || self.write_row >= self.length as i32 {
            return self
                .cells
                .pop_back()
                .map(|(row, _)| Pos::new(row, self.col));
        }
        None
    }

    pub fn okay_to_delete(&self) -> bool {
        self.cells.is_empty() && self.write_row >= self.span
    }

    pub fn advance_tick(&mut self, glyphs: &[char], dice: &mut impl Dice) -> OldTick {
        let erase = self.delete_last();
        let lead = self.get_lead();
        let body = self.get_next(glyphs, dice);
        OldTick {
            erase,
            lead,
            body,
            retirable: self.okay_to_delete(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Line {
    Falling(FallingLine),
    OldSchool(OldStyleLine),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Falling(FallingTick),
    OldSchool(OldTick),
}

impl Line {
    pub fn coord(&self) -> u16 {
        match self {
            Line::Falling(l) => l.coord(),
            Line::OldSchool(l) => l.coord(),
        }
    }

    pub fn color(&self) -> Hue {
        match self {
            Line::Falling(l) => l.color(),
            Line::OldSchool(l) => l.color(),
        }
    }

    pub fn okay_to_delete(&self) -> bool {
        match self {
            Line::Falling(l) => l.okay_to_delete(),
            Line::OldSchool(l) => l.okay_to_delete(),
        }
    }

    pub fn own_bold(&self) -> Option<bool> {
        match self {
            Line::Falling(_) => None,
            Line::OldSchool(l) => Some(l.bold()),
        }
    }

    pub fn async_scroll_turn(&mut self) -> bool {
        match self {
            Line::Falling(l) => l.async_scroll_turn(),
            Line::OldSchool(_) => true,
        }
    }

    pub fn advance_tick(&mut self, glyphs: &[char], dice: &mut impl Dice) -> Tick {
        match self {
            Line::Falling(l) => Tick::Falling(l.advance_tick()),
            Line::OldSchool(l) => Tick::OldSchool(l.advance_tick(glyphs, dice)),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::dice::Loaded;

    fn at(row: u16, col: u16) -> Option<Pos> {
        Some(Pos::new(row, col))
    }

    fn cell(row: u16, col: u16, glyph: char) -> TrailCell {
        TrailCell {
            pos: Pos::new(row, col),
            glyph,
        }
    }

    fn falling(coord: u16, rows: u16, cols: u16, d: Direction) -> FallingLine {
        FallingLine::new(coord, Field::new(rows, cols), d, &mut Loaded(3))
    }

    #[test]
    fn new_down_line_starts_above_the_screen() {
        let line = falling(5, 6, 20, Direction::Down);
        assert_eq!(line.span, 5);
        assert_eq!(line.length, 3);
        assert_eq!(line.color, Hue::Yellow);
        assert_eq!(line.async_rate, 3);
        assert_eq!(line.async_count, 0);
        assert_eq!((line.lead, line.body, line.tail), (0, -1, -3));
    }

    #[test]
    fn new_up_line_starts_below_the_screen() {
        let line = falling(5, 6, 20, Direction::Up);
        assert_eq!((line.lead, line.body, line.tail), (4, 5, 7));
    }

    #[test]
    fn new_left_line_starts_right_of_the_screen() {
        let line = falling(5, 20, 6, Direction::Left);
        assert_eq!((line.lead, line.body, line.tail), (4, 5, 7));
        assert_eq!(line.get_lead_preview(), at(5, 4));
    }

    #[test]
    fn lead_goes_quiet_past_the_far_edge() {
        let mut line = falling(5, 20, 20, Direction::Down);
        line.lead = 18;
        assert_eq!(line.get_lead(), at(18, 5));
        assert_eq!(line.get_lead(), None);
        assert_eq!(line.lead, 20);

        let mut line = falling(5, 20, 20, Direction::Up);
        assert_eq!(line.get_lead(), at(18, 5));
        line.lead = 0;
        assert_eq!(line.get_lead(), at(0, 5));
        assert_eq!(line.get_lead(), None);
    }

    #[test]
    fn horizontal_lines_keep_their_row() {
        let mut right = falling(5, 20, 20, Direction::Right);
        assert_eq!(right.get_lead(), at(5, 0));
        assert_eq!(right.get_next(), None);
        assert_eq!(right.get_next(), at(5, 0));
        right.body = 18;
        assert_eq!(right.get_next(), at(5, 18));
        assert_eq!(right.get_next(), None);

        let mut left = falling(5, 20, 20, Direction::Left);
        assert_eq!(left.get_lead(), at(5, 18));
        assert_eq!(left.get_next(), None);
        assert_eq!(left.get_next(), at(5, 18));
    }

    #[test]
    fn delete_cursor_stops_at_the_edge() {
        let mut line = falling(5, 6, 20, Direction::Down);
        assert_eq!(line.delete_last(), None);
        assert_eq!(line.tail, -2);
        line.tail = 4;
        assert_eq!(line.delete_last(), at(4, 5));
        assert_eq!(line.delete_last(), None);
        assert!(line.okay_to_delete());

        let mut line = falling(5, 6, 20, Direction::Up);
        line.tail = 0;
        assert!(!line.okay_to_delete());
        assert_eq!(line.delete_last(), at(0, 5));
        assert!(line.okay_to_delete());
    }

    #[test]
    fn async_turn_comes_once_per_rate_plus_one() {
        let mut line = falling(5, 6, 20, Direction::Down);
        line.async_rate = 1;
        assert!(!line.async_scroll_turn());
        assert!(line.async_scroll_turn());
        assert!(!line.async_scroll_turn());

        for rate in 0..=MAX_ASYNC_RATE {
            line.async_rate = rate;
            line.async_count = 0;
            let turns = (0..(rate + 1) * 10).filter(|_| line.async_scroll_turn()).count();
            assert_eq!(turns, 10);
        }
    }

    #[test]
    fn down_line_full_schedule() {
        let mut line = falling(5, 6, 20, Direction::Down);
        let expected = [
            (at(0, 5), None, None, false),
            (at(1, 5), at(0, 5), None, false),
            (at(2, 5), at(1, 5), None, false),
            (at(3, 5), at(2, 5), at(0, 5), false),
            (at(4, 5), at(3, 5), at(1, 5), false),
            (None, at(4, 5), at(2, 5), false),
            (None, None, at(3, 5), false),
            (None, None, at(4, 5), true),
        ];
        for (i, (lead, next, erase, retirable)) in expected.into_iter().enumerate() {
            let t = line.advance_tick();
            assert_eq!(
                t,
                FallingTick {
                    lead,
                    next,
                    erase,
                    retirable
                },
                "tick {}",
                i + 1
            );
        }
    }

    #[test]
    fn up_line_mirrors_down_line() {
        let mut line = falling(5, 6, 20, Direction::Up);
        let expected = [
            (at(4, 5), None, None, false),
            (at(3, 5), at(4, 5), None, false),
            (at(2, 5), at(3, 5), None, false),
            (at(1, 5), at(2, 5), at(4, 5), false),
            (at(0, 5), at(1, 5), at(3, 5), false),
            (None, at(0, 5), at(2, 5), false),
            (None, None, at(1, 5), false),
            (None, None, at(0, 5), true),
        ];
        for (lead, next, erase, retirable) in expected {
            assert_eq!(
                line.advance_tick(),
                FallingTick {
                    lead,
                    next,
                    erase,
                    retirable
                }
            );
        }
    }

    #[test]
    fn right_and_left_lines_full_schedule() {
        let mut right = falling(5, 20, 6, Direction::Right);
        let mut left = falling(5, 20, 6, Direction::Left);
        let mut right_erased = Vec::new();
        let mut left_erased = Vec::new();
        for tick in 1..=8 {
            let r = right.advance_tick();
            let l = left.advance_tick();
            right_erased.extend(r.erase);
            left_erased.extend(l.erase);
            assert_eq!(r.retirable, tick == 8);
            assert_eq!(l.retirable, tick == 8);
        }
        let cols = |v: &[Pos]| v.iter().map(|p| p.col).collect::<Vec<_>>();
        assert_eq!(cols(&right_erased), vec![0, 1, 2, 3, 4]);
        assert_eq!(cols(&left_erased), vec![4, 3, 2, 1, 0]);
        assert!(right_erased.iter().chain(&left_erased).all(|p| p.row == 5));
    }

    #[test]
    fn old_style_new_line() {
        let line = OldStyleLine::new(5, Field::new(10, 10), &['X'], &mut Loaded(3));
        assert_eq!(line.span, 9);
        assert_eq!(line.write_row, -1);
        assert_eq!(line.lead_row, 0);
        assert_eq!(line.length, 3);
        assert_eq!(line.lead_glyph, 'X');
        assert_eq!(line.color, Hue::Yellow);
        assert!(line.cells.is_empty());
    }

    #[test]
    fn old_style_bold_on_one_in_three() {
        for (face, bold) in [(1, true), (2, false), (3, false)] {
            let line = OldStyleLine::new(5, Field::new(10, 10), &['X'], &mut Loaded(face));
            assert_eq!(line.bold(), bold, "face {}", face);
        }
    }

    #[test]
    fn old_style_lead_stops_at_span() {
        let mut line = OldStyleLine::new(5, Field::new(5, 10), &['X'], &mut Loaded(3));
        assert_eq!(line.get_lead(), Some(cell(0, 5, 'X')));
        assert_eq!(line.get_lead(), Some(cell(1, 5, 'X')));
        line.lead_row = 3;
        assert_eq!(line.get_lead(), Some(cell(3, 5, 'X')));
        assert_eq!(line.get_lead(), None);
    }

    #[test]
    fn old_style_queue_is_bounded_and_drains_off_screen() {
        let mut line = OldStyleLine::new(5, Field::new(5, 10), &['X'], &mut Loaded(3));
        let mut d = Loaded(3);
        let g = ['X'];
        assert_eq!(line.get_next(&g, &mut d), vec![]);
        assert_eq!(line.get_next(&g, &mut d), vec![cell(0, 5, 'X')]);
        assert_eq!(
            line.get_next(&g, &mut d),
            vec![cell(1, 5, 'X'), cell(0, 5, 'X')]
        );
        line.get_next(&g, &mut d);
        assert_eq!(
            line.get_next(&g, &mut d),
            vec![cell(3, 5, 'X'), cell(2, 5, 'X'), cell(1, 5, 'X')]
        );
        assert_eq!(
            line.get_next(&g, &mut d),
            vec![cell(3, 5, 'X'), cell(2, 5, 'X')]
        );
    }

    struct Counting(i32);

    impl Dice for Counting {
        fn roll(&mut self, low: i32, high: i32) -> i32 {
            if high <= low {
                return low;
            }
            let face = low + self.0.rem_euclid(high - low + 1);
            self.0 += 1;
            face
        }
    }

    #[test]
    fn old_style_glyphs_slide_toward_the_lead() {
        let glyphs: Vec<char> = ('a'..='z').collect();
        let mut line = OldStyleLine::new(5, Field::new(6, 10), &glyphs, &mut Loaded(3));
        let mut d = Counting(0);
        let trail = |cells: Vec<TrailCell>| {
            cells
                .into_iter()
                .map(|c| (c.pos.row, c.glyph))
                .collect::<Vec<_>>()
        };

        assert_eq!(trail(line.get_next(&glyphs, &mut d)), vec![]);
        assert_eq!(trail(line.get_next(&glyphs, &mut d)), vec![(0, 'a')]);
        assert_eq!(
            trail(line.get_next(&glyphs, &mut d)),
            vec![(1, 'a'), (0, 'b')]
        );
        assert_eq!(
            trail(line.get_next(&glyphs, &mut d)),
            vec![(2, 'a'), (1, 'b'), (0, 'c')]
        );
        // Full length: the window slides, no new glyph is needed.
        assert_eq!(
            trail(line.get_next(&glyphs, &mut d)),
            vec![(3, 'a'), (2, 'b'), (1, 'c')]
        );
        assert_eq!(d.0, 3);
    }

    #[test]
    fn old_style_lowest_glyph_falls_one_row_per_tick() {
        let glyphs: Vec<char> = ('a'..='z').collect();
        let mut line = OldStyleLine::new(5, Field::new(6, 10), &glyphs, &mut Loaded(3));
        let mut d = Counting(0);
        let mut lowest = Vec::new();
        for _ in 0..6 {
            let t = line.advance_tick(&glyphs, &mut d);
            lowest.push(t.body.first().map(|c| (c.pos.row, c.glyph)));
        }
        assert_eq!(
            lowest,
            vec![
                None,
                Some((0, 'a')),
                Some((1, 'a')),
                Some((2, 'a')),
                Some((3, 'a')),
                Some((4, 'a')),
            ]
        );
    }

    #[test]
    fn old_style_delete_waits_for_full_queue() {
        let mut line = OldStyleLine::new(5, Field::new(5, 10), &['X'], &mut Loaded(3));
        let mut d = Loaded(3);
        assert_eq!(line.delete_last(), None);
        for _ in 0..4 {
            line.get_next(&['X'], &mut d);
        }
        assert_eq!(line.delete_last(), Some(Pos::new(0, 5)));
    }

    #[test]
    fn old_style_okay_to_delete_needs_empty_queue_past_span() {
        let mut line = OldStyleLine::new(5, Field::new(5, 10), &['X'], &mut Loaded(3));
        assert!(!line.okay_to_delete());
        line.write_row = 4;
        assert!(line.okay_to_delete());
        line.cells.push_front((3, 'X'));
        assert!(!line.okay_to_delete());
    }

    #[test]
    fn old_style_full_run() {
        let mut line = OldStyleLine::new(5, Field::new(6, 10), &['X'], &mut Loaded(3));
        let mut d = Loaded(3);
        let rows = |t: &OldTick| t.body.iter().map(|c| c.pos.row).collect::<Vec<_>>();

        let expected: [(Option<u16>, Option<u16>, Vec<u16>, bool); 9] = [
            (None, Some(0), vec![], false),
            (None, Some(1), vec![0], false),
            (None, Some(2), vec![1, 0], false),
            (None, Some(3), vec![2, 1, 0], false),
            (Some(0), Some(4), vec![3, 2, 1], false),
            (Some(1), None, vec![4, 3, 2], false),
            (Some(2), None, vec![4, 3], false),
            (Some(3), None, vec![4], false),
            (Some(4), None, vec![], true),
        ];
        for (round, (erase, lead, body, retirable)) in expected.into_iter().enumerate() {
            let t = line.advance_tick(&['X'], &mut d);
            assert_eq!(t.erase.map(|p| p.row), erase, "round {}", round + 1);
            assert_eq!(t.lead.map(|c| c.pos.row), lead, "round {}", round + 1);
            assert_eq!(rows(&t), body, "round {}", round + 1);
            assert_eq!(t.retirable, retirable, "round {}", round + 1);
        }
    }

    #[test]
    fn line_enum_dispatches_to_variant() {
        let mut line = Line::Falling(falling(2, 6, 20, Direction::Down));
        assert_eq!(line.coord(), 2);
        match line.advance_tick(&['X'], &mut Loaded(3)) {
            Tick::Falling(t) => assert_eq!(t.lead, at(0, 2)),
            Tick::OldSchool(_) => panic!("wrong variant"),
        }

        let mut old = Line::OldSchool(OldStyleLine::new(
            4,
            Field::new(6, 10),
            &['X'],
            &mut Loaded(3),
        ));
        assert!(old.async_scroll_turn());
        assert!(matches!(
            old.advance_tick(&['X'], &mut Loaded(3)),
            Tick::OldSchool(_)
        ));
    }

    impl FallingLine {
        fn get_lead_preview(&self) -> Option<Pos> {
            self.visible(self.lead)
        }
    }

    fn any_direction() -> impl Strategy<Value = Direction> {
        prop_oneof![
            Just(Direction::Down),
            Just(Direction::Up),
            Just(Direction::Left),
            Just(Direction::Right),
        ]
    }

    proptest! {
        #[test]
        fn retirable_exactly_after_span_plus_length(
            extent in 4u16..60,
            face in 0i32..60,
            direction in any_direction(),
        ) {
            let field = Field::new(extent, extent);
            let mut line = FallingLine::new(1, field, direction, &mut Loaded(face));
            let span = extent as i32 - 1;
            let total = span + line.length;
            prop_assert!(!line.okay_to_delete());
            for tick in 1..=total {
                let t = line.advance_tick();
                prop_assert_eq!(t.retirable, tick == total);
            }
        }

        #[test]
        fn visible_trail_never_exceeds_length(
            extent in 4u16..60,
            face in 0i32..60,
            direction in any_direction(),
        ) {
            let field = Field::new(extent, extent);
            let mut line = FallingLine::new(0, field, direction, &mut Loaded(face));
            let mut lit = std::collections::HashSet::new();
            loop {
                let t = line.advance_tick();
                if let Some(p) = t.erase {
                    prop_assert!(lit.remove(&(p.row, p.col)));
                }
                lit.extend(t.lead.map(|p| (p.row, p.col)));
                prop_assert!(lit.len() as i32 <= line.length);
                if t.retirable {
                    break;
                }
            }
            prop_assert!(lit.is_empty());
        }
    }
}
