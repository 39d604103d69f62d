//! The grid model: squares, derived numbering, and clue slots.

use crate::Direction::{self, Across, Down};
use crate::Error;
use crate::navigator;
use std::fmt::Debug;
use std::fmt::Display;

/// The size of a grid, in squares.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Dimensions {
  pub width: usize,
  pub height: usize,
}

/// What a square holds: black, or white with an optional letter.
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Fill {
  /// A black square where nothing can be entered.
  Black,
  /// A white square with nothing written in it.
  Empty,
  /// A white square with a letter written in it.
  Letter(char),
}

impl Fill {
  /// Whether this is [Fill::Black].
  pub fn is_black(&self) -> bool {
    *self == Self::Black
  }

  /// Whether this is not a black square, i.e. either [Fill::Empty] or
  /// [Fill::Letter].
  pub fn is_white(&self) -> bool {
    !self.is_black()
  }

  pub fn is_empty(&self) -> bool {
    *self == Self::Empty
  }

  /// The letter written in this square, if there is one.
  pub fn letter(&self) -> Option<char> {
    match self {
      Self::Letter(c) => Some(*c),
      _ => None,
    }
  }
}

impl Debug for Fill {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Black => write!(f, "■"),
      Self::Empty => write!(f, " "),
      Self::Letter(c) => write!(f, "{}", c),
    }?;
    Ok(())
  }
}

impl Display for Fill {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{:?}", self)
  }
}

/// A square in a crossword grid: its fill, plus the state the last rebuild
/// derived for it.
///
/// `number` is never set directly; it is assigned by the rebuild pass to
/// squares that start at least one word. `active` marks the cursor square
/// (at most one per grid) and `in_active_word` marks every square of the
/// word the cursor is in, in the current typing direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Square {
  fill: Fill,
  number: Option<u32>,
  active: bool,
  in_active_word: bool,
}

impl Square {
  fn white() -> Self {
    Self {
      fill: Fill::Empty,
      number: None,
      active: false,
      in_active_word: false,
    }
  }

  pub fn fill(&self) -> Fill {
    self.fill
  }

  pub fn is_black(&self) -> bool {
    self.fill.is_black()
  }

  pub fn is_white(&self) -> bool {
    self.fill.is_white()
  }

  /// Whether this square is white and has no letter in it.
  pub fn is_empty(&self) -> bool {
    self.fill.is_empty()
  }

  pub fn letter(&self) -> Option<char> {
    self.fill.letter()
  }

  /// The display number of this square, if it starts a word.
  pub fn number(&self) -> Option<u32> {
    self.number
  }

  /// Whether the cursor is on this square.
  pub fn is_active(&self) -> bool {
    self.active
  }

  /// Whether this square belongs to the word the cursor is in.
  pub fn in_active_word(&self) -> bool {
    self.in_active_word
  }

  /// Makes the square black. Any letter is discarded, and a black square
  /// can be neither active nor part of the active word.
  pub(crate) fn set_black(&mut self) {
    self.fill = Fill::Black;
    self.active = false;
    self.in_active_word = false;
  }

  /// Makes the square white. A letter already present is kept.
  pub(crate) fn set_white(&mut self) {
    if self.fill.is_black() {
      self.fill = Fill::Empty;
    }
  }

  pub(crate) fn set_letter(&mut self, letter: char) {
    self.fill = Fill::Letter(letter);
  }

  pub(crate) fn clear_letter(&mut self) {
    if let Fill::Letter(_) = self.fill {
      self.fill = Fill::Empty;
    }
  }

  pub(crate) fn set_active(&mut self, active: bool) {
    self.active = active;
  }

  pub(crate) fn set_in_active_word(&mut self, in_active_word: bool) {
    self.in_active_word = in_active_word;
  }
}

/// The extent of one word: the flat indices of its first and last squares.
/// For `Across` the indices lie in the same row; for `Down` they share a
/// column and step by the grid width.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ClueRange {
  pub direction: Direction,
  pub start_index: usize,
  pub end_index: usize,
}

/// One clue: the number displayed in its first square, the author's text,
/// and the word it belongs to.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Clue {
  pub number: u32,
  pub text: String,
  pub range: ClueRange,
}

/// The across and down clues of a grid, each list ordered by the flat index
/// of the word's first square.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ClueSet {
  pub across: Vec<Clue>,
  pub down: Vec<Clue>,
}

impl ClueSet {
  pub fn get(&self, direction: Direction) -> &[Clue] {
    match direction {
      Across => &self.across,
      Down => &self.down,
    }
  }
}

/// A crossword grid under construction: `width x height` squares in
/// row-major order, plus the clue slots derived from the block pattern.
///
/// Squares are addressed by flat index `i` in `[0, width * height)`; the row
/// is `i / width` and the column `i % width`. A `Grid` is a snapshot:
/// observers only get `&`-access, and every edit made through the
/// [Editor](crate::Editor) produces a new one via the rebuild pass.
#[derive(Clone, Eq, PartialEq)]
pub struct Grid {
  dimensions: Dimensions,
  squares: Vec<Square>,
  clues: ClueSet,
  across_starts: Vec<usize>,
  down_starts: Vec<usize>,
}

impl Grid {
  /// Creates an all-white grid of the given size, numbered and with an
  /// empty clue for every across and down word.
  pub fn new(width: usize, height: usize) -> Result<Self, Error> {
    if width < 1 || height < 1 {
      return Err(Error::InvalidDimensions { width, height });
    }

    let grid = Self {
      dimensions: Dimensions { width, height },
      squares: vec![Square::white(); width * height],
      clues: ClueSet::default(),
      across_starts: Vec::new(),
      down_starts: Vec::new(),
    };
    Ok(grid.rebuild())
  }

  pub fn dimensions(&self) -> Dimensions {
    self.dimensions
  }

  pub fn width(&self) -> usize {
    self.dimensions.width
  }

  pub fn height(&self) -> usize {
    self.dimensions.height
  }

  /// All squares of the grid, in row-major order.
  pub fn squares(&self) -> &[Square] {
    &self.squares
  }

  pub fn clues(&self) -> &ClueSet {
    &self.clues
  }

  /// The index of the square the cursor is on, if any.
  pub fn active_index(&self) -> Option<usize> {
    self.squares.iter().position(|square| square.active)
  }

  pub(crate) fn check_index(&self, index: usize) -> Result<(), Error> {
    if index < self.squares.len() {
      Ok(())
    } else {
      Err(Error::IndexOutOfBounds {
        index,
        len: self.squares.len(),
      })
    }
  }

  pub(crate) fn col(&self, index: usize) -> usize {
    index % self.dimensions.width
  }

  pub(crate) fn square_mut(&mut self, index: usize) -> &mut Square {
    &mut self.squares[index]
  }

  /// The flat indices of the squares that start a word in `direction`,
  /// ascending. Derived by the rebuild pass.
  pub(crate) fn word_starts(&self, direction: Direction) -> &[usize] {
    match direction {
      Across => &self.across_starts,
      Down => &self.down_starts,
    }
  }

  /// Whether the square starts an across word: white, and either in the
  /// leftmost column or to the right of a black square.
  fn starts_across(&self, index: usize) -> bool {
    self.squares[index].is_white()
      && (self.col(index) == 0 || self.squares[index - 1].is_black())
  }

  /// Whether the square starts a down word: white, and either in the top
  /// row or below a black square.
  fn starts_down(&self, index: usize) -> bool {
    self.squares[index].is_white()
      && (index < self.dimensions.width || self.squares[index - self.dimensions.width].is_black())
  }

  /// The index of the last square of the across word starting at `start`.
  pub(crate) fn across_end(&self, start: usize) -> usize {
    let mut end = start;
    while self.col(end) + 1 < self.dimensions.width && self.squares[end + 1].is_white() {
      end += 1;
    }
    end
  }

  /// The index of the last square of the down word starting at `start`.
  pub(crate) fn down_end(&self, start: usize) -> usize {
    let width = self.dimensions.width;
    let mut end = start;
    while end + width < self.squares.len() && self.squares[end + width].is_white() {
      end += width;
    }
    end
  }

  /// The text of the clue for the word `(direction, start, end)` in this
  /// grid, or the empty string if no clue with exactly that range exists.
  /// Clue lists are ordered by start index, so a binary search suffices.
  fn prior_text(&self, direction: Direction, start: usize, end: usize) -> String {
    let clues = self.clues.get(direction);
    match clues.binary_search_by_key(&start, |clue| clue.range.start_index) {
      Ok(found) if clues[found].range.end_index == end => clues[found].text.clone(),
      _ => String::new(),
    }
  }

  /// Produces a fresh snapshot from this grid's fills: walks the squares in
  /// order, renumbers word starts from 1, enumerates the across and down
  /// clue slots, and carries over clue text for every slot whose range is
  /// unchanged. Fills and cursor marks are copied as they are.
  #[must_use]
  pub(crate) fn rebuild(&self) -> Grid {
    let width = self.dimensions.width;
    let mut squares = self.squares.clone();
    let mut clues = ClueSet::default();
    let mut across_starts = Vec::new();
    let mut down_starts = Vec::new();
    let mut next_number = 1;

    for i in 0..squares.len() {
      if squares[i].is_black() {
        squares[i].number = None;
        continue;
      }

      let starts_across = self.starts_across(i);
      let starts_down = self.starts_down(i);

      squares[i].number = if starts_across || starts_down {
        let number = next_number;
        next_number += 1;
        Some(number)
      } else {
        None
      };

      if let Some(number) = squares[i].number {
        if starts_across {
          let end = self.across_end(i);
          across_starts.push(i);
          clues.across.push(Clue {
            number,
            text: self.prior_text(Across, i, end),
            range: ClueRange {
              direction: Across,
              start_index: i,
              end_index: end,
            },
          });
        }

        if starts_down {
          let end = self.down_end(i);
          down_starts.push(i);
          clues.down.push(Clue {
            number,
            text: self.prior_text(Down, i, end),
            range: ClueRange {
              direction: Down,
              start_index: i,
              end_index: end,
            },
          });
        }
      }
    }

    // Down starts come out in ascending flat order, which is the
    // conventional Down clue order: a down word starts at the topmost
    // square of its column run.

    Grid {
      dimensions: self.dimensions,
      squares,
      clues,
      across_starts,
      down_starts,
    }
  }

  /// Clears the in-active-word mark everywhere, then sets it on every
  /// square of the word containing the active square in `direction`.
  pub(crate) fn mark_active_word(&mut self, direction: Direction) {
    for square in &mut self.squares {
      square.in_active_word = false;
    }
    for i in navigator::active_word_squares(self, direction) {
      self.squares[i].in_active_word = true;
    }
  }

  /// Clears the cursor: no square is active or part of the active word.
  pub(crate) fn clear_active_marks(&mut self) {
    for square in &mut self.squares {
      square.active = false;
      square.in_active_word = false;
    }
  }

  /// Replaces the text of the clue at `slot` in the given direction's list.
  pub(crate) fn set_clue_text(
    &mut self,
    direction: Direction,
    slot: usize,
    text: String,
  ) -> Result<(), Error> {
    let clues = match direction {
      Across => &mut self.clues.across,
      Down => &mut self.clues.down,
    };
    let len = clues.len();
    match clues.get_mut(slot) {
      Some(clue) => {
        clue.text = text;
        Ok(())
      }
      None => Err(Error::IndexOutOfBounds { index: slot, len }),
    }
  }
}

impl Debug for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for row in 0..self.dimensions.height {
      for col in 0..self.dimensions.width {
        write!(f, "{}", self.squares[row * self.dimensions.width + col].fill)?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}

impl Display for Grid {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "\n{:?}", self)
  }
}

#[cfg(test)]
impl Grid {
  /// Builds a grid from a pattern string: `.` is a black square, `-` an
  /// empty white square, and anything else a letter.
  pub(crate) fn from_pattern(width: usize, pattern: &str) -> Grid {
    let height = pattern.chars().count() / width;
    assert_eq!(width * height, pattern.chars().count());

    let mut grid = Grid::new(width, height).unwrap();
    for (i, ch) in pattern.chars().enumerate() {
      grid.squares[i].fill = match ch {
        '.' => Fill::Black,
        '-' => Fill::Empty,
        c => Fill::Letter(c),
      };
    }
    grid.rebuild()
  }
}
