use std::{
    collections::HashMap,
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    iter,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    DuplicateButtonPosition(char, char, Position),
    ButtonOnGap(char, Position),
    UnreachableTransition(char, char),
    InvalidKey(char),
    NotEndedWithActivate(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::DuplicateButtonPosition(key, other_key, pos) => write!(
                f,
                "Buttons {} and {} occupy the same position{} on keypad.",
                key, other_key, pos
            ),
            Error::ButtonOnGap(key, pos) => write!(
                f,
                "Button {} occupies the gap position{} on keypad.",
                key, pos
            ),
            Error::UnreachableTransition(from_key, to_key) => write!(
                f,
                "No valid move sequence from key {} to key {}.",
                from_key, to_key
            ),
            Error::InvalidKey(key) => write!(f, "Invalid key({}).", key),
            Error::NotEndedWithActivate(keys) => {
                write!(f, "Key sequence({}) isn't ended with key A.", keys)
            }
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub fn key(&self) -> char {
        match self {
            Direction::Up => '^',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Left => '<',
        }
    }

    pub fn from_key(key: char) -> Option<Self> {
        match key {
            '^' => Some(Direction::Up),
            '>' => Some(Direction::Right),
            'v' => Some(Direction::Down),
            '<' => Some(Direction::Left),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    col: usize,
    row: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl Position {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn row(&self) -> usize {
        self.row
    }

    // Origin is the bottom-left corner, so moving up increases the row index.
    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        match dir {
            Direction::Up => Some(Self::new(self.col, self.row + 1)),
            Direction::Right => Some(Self::new(self.col + 1, self.row)),
            Direction::Down if self.row > 0 => Some(Self::new(self.col, self.row - 1)),
            Direction::Left if self.col > 0 => Some(Self::new(self.col - 1, self.row)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Button {
    key: char,
    pos: Position,
}

impl Button {
    pub fn new(key: char, pos: Position) -> Self {
        Self { key, pos }
    }

    pub fn key(&self) -> char {
        self.key
    }

    pub fn pos(&self) -> Position {
        self.pos
    }
}

#[derive(Debug)]
pub struct KeypadLayout {
    buttons: Vec<Button>,
    gap: Position,
}

impl KeypadLayout {
    pub fn new(buttons: Vec<Button>, gap: Position) -> Result<Self, Error> {
        for (ind, button) in buttons.iter().enumerate() {
            if button.pos == gap {
                return Err(Error::ButtonOnGap(button.key, button.pos));
            }

            if let Some(other) = buttons[..ind].iter().find(|other| other.pos == button.pos) {
                return Err(Error::DuplicateButtonPosition(
                    other.key, button.key, button.pos,
                ));
            }
        }

        Ok(Self { buttons, gap })
    }

    pub fn new_numeric() -> Self {
        let buttons = Vec::from([
            Button::new('7', Position::new(0, 3)),
            Button::new('8', Position::new(1, 3)),
            Button::new('9', Position::new(2, 3)),
            Button::new('4', Position::new(0, 2)),
            Button::new('5', Position::new(1, 2)),
            Button::new('6', Position::new(2, 2)),
            Button::new('1', Position::new(0, 1)),
            Button::new('2', Position::new(1, 1)),
            Button::new('3', Position::new(2, 1)),
            Button::new('0', Position::new(1, 0)),
            Button::new('A', Position::new(2, 0)),
        ]);

        Self::new(buttons, Position::new(0, 0))
            .expect("The built-in numeric keypad layout should be well formed.")
    }

    pub fn new_directional() -> Self {
        use Direction::{Down, Left, Right, Up};
        let buttons = Vec::from([
            Button::new(Up.key(), Position::new(1, 1)),
            Button::new('A', Position::new(2, 1)),
            Button::new(Left.key(), Position::new(0, 0)),
            Button::new(Down.key(), Position::new(1, 0)),
            Button::new(Right.key(), Position::new(2, 0)),
        ]);

        Self::new(buttons, Position::new(0, 1))
            .expect("The built-in directional keypad layout should be well formed.")
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    pub fn gap(&self) -> Position {
        self.gap
    }
}

#[derive(Debug)]
pub struct PathTable {
    options: HashMap<(char, char), Vec<String>>,
}

impl PathTable {
    pub fn build(layout: &KeypadLayout) -> Result<Self, Error> {
        let mut options = HashMap::new();
        for from in layout.buttons() {
            for to in layout.buttons() {
                let move_options = Self::move_options(from.pos(), to.pos(), layout.gap());
                if move_options.is_empty() {
                    return Err(Error::UnreachableTransition(from.key(), to.key()));
                }

                options.insert((from.key(), to.key()), move_options);
            }
        }

        Ok(Self { options })
    }

    pub fn options(&self, from_key: char, to_key: char) -> Option<&[String]> {
        self.options
            .get(&(from_key, to_key))
            .map(|move_options| move_options.as_slice())
    }

    pub fn expand(&self, keys: &str) -> Result<Vec<String>, Error> {
        let mut variants = Vec::from([String::new()]);
        let mut last_key = 'A';
        for key in keys.chars() {
            let move_options = self.options(last_key, key).ok_or(Error::InvalidKey(key))?;
            if let [only_option] = move_options {
                for variant in &mut variants {
                    variant.push_str(only_option);
                }
            } else {
                let mut split_variants = Vec::with_capacity(variants.len() * move_options.len());
                for variant in &variants {
                    for move_option in move_options {
                        let mut split_variant = variant.clone();
                        split_variant.push_str(move_option);
                        split_variants.push(split_variant);
                    }
                }

                variants = split_variants;
            }

            last_key = key;
        }

        Ok(variants)
    }

    fn move_options(from: Position, to: Position, gap: Position) -> Vec<String> {
        let (h_dir, h_steps_n) = if to.col() >= from.col() {
            (Direction::Right, to.col() - from.col())
        } else {
            (Direction::Left, from.col() - to.col())
        };
        let (v_dir, v_steps_n) = if to.row() >= from.row() {
            (Direction::Up, to.row() - from.row())
        } else {
            (Direction::Down, from.row() - to.row())
        };
        let horizontal = iter::repeat_n(h_dir.key(), h_steps_n).collect::<String>();
        let vertical = iter::repeat_n(v_dir.key(), v_steps_n).collect::<String>();

        let mut candidates = Vec::from([format!("{}{}", horizontal, vertical)]);
        let row_first = format!("{}{}", vertical, horizontal);
        if row_first != candidates[0] {
            candidates.push(row_first);
        }

        candidates.retain(|moves| Self::avoids_gap(from, moves, gap));
        for candidate in &mut candidates {
            candidate.push('A');
        }

        candidates
    }

    fn avoids_gap(start: Position, moves: &str, gap: Position) -> bool {
        let mut cur_pos = start;
        for dir in moves.chars().filter_map(Direction::from_key) {
            let Some(next_pos) = cur_pos.neighbor(dir) else {
                return false;
            };

            if next_pos == gap {
                return false;
            }

            cur_pos = next_pos;
        }

        true
    }
}

#[derive(Debug)]
pub struct ChainSolver {
    numeric: PathTable,
    directional: PathTable,
    cache: HashMap<(String, usize), usize>,
}

impl ChainSolver {
    pub fn new(numeric: PathTable, directional: PathTable) -> Self {
        Self {
            numeric,
            directional,
            cache: HashMap::new(),
        }
    }

    pub fn for_standard_pads() -> Result<Self, Error> {
        let numeric = PathTable::build(&KeypadLayout::new_numeric())?;
        let directional = PathTable::build(&KeypadLayout::new_directional())?;
        Ok(Self::new(numeric, directional))
    }

    pub fn min_keys_n(&mut self, code: &str, dir_pad_n: usize) -> Result<usize, Error> {
        if !code.ends_with('A') {
            return Err(Error::NotEndedWithActivate(code.to_string()));
        }

        let variants = self.numeric.expand(code)?;
        let mut min_keys_n = None;
        for variant in &variants {
            let keys_n = self.moves_min_keys_n(variant, dir_pad_n)?;
            if min_keys_n.map_or(true, |min_n| keys_n < min_n) {
                min_keys_n = Some(keys_n);
            }
        }

        Ok(min_keys_n.expect("Expanding a code should yield at least one variant."))
    }

    pub fn moves_min_keys_n(&mut self, moves: &str, depth: usize) -> Result<usize, Error> {
        if depth == 0 {
            return Ok(moves.chars().count());
        }

        if !moves.ends_with('A') {
            return Err(Error::NotEndedWithActivate(moves.to_string()));
        }

        // Every robot in the chain rests on key A between two button presses, so
        // each run of moves up to an A is an independent sub-problem.
        let mut total_keys_n = 0;
        for segment in moves.split_inclusive('A') {
            total_keys_n += self.segment_min_keys_n(segment, depth)?;
        }

        Ok(total_keys_n)
    }

    fn segment_min_keys_n(&mut self, segment: &str, depth: usize) -> Result<usize, Error> {
        let cache_key = (segment.to_string(), depth);
        if let Some(keys_n) = self.cache.get(&cache_key) {
            return Ok(*keys_n);
        }

        let mut min_keys_n = None;
        for variant in self.directional.expand(segment)? {
            let keys_n = self.moves_min_keys_n(&variant, depth - 1)?;
            if min_keys_n.map_or(true, |min_n| keys_n < min_n) {
                min_keys_n = Some(keys_n);
            }
        }

        let min_keys_n =
            min_keys_n.expect("Expanding a segment should yield at least one variant.");
        self.cache.insert(cache_key, min_keys_n);

        Ok(min_keys_n)
    }
}

#[derive(Debug, Clone)]
pub struct DoorCode {
    text: String,
}

impl DoorCode {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn number(&self) -> usize {
        let digits_end_ind = self
            .text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.text.len());
        self.text[..digits_end_ind].parse::<usize>().unwrap_or(0)
    }
}

pub fn read_door_codes<P: AsRef<Path>>(path: P) -> Result<Vec<DoorCode>> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    reader
        .lines()
        .enumerate()
        .map(|(ind, line)| {
            line.with_context(|| {
                format!(
                    "Failed to read line {} in given file({}).",
                    ind + 1,
                    path.as_ref().display()
                )
            })
            .map(|s| DoorCode::new(s.as_str()))
        })
        .collect()
}
