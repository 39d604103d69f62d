//! Word-aware navigation queries over a [Grid].
//!
//! Everything here is a pure function: the grid is never modified, and the
//! same grid always yields the same answer. The [Editor](crate::Editor)
//! uses these to decide where the cursor lands after a letter is typed, a
//! square is erased, or an arrow key is pressed; front ends can call them
//! directly for things like word highlighting.
//!
//! Functions taking an index fail with [Error::IndexOutOfBounds] when the
//! index does not address a square of the grid.

use crate::Direction::{self, Across, Down};
use crate::Error;
use crate::grid::Grid;

/// The index of the square to the left of `index`, or `None` in the
/// leftmost column.
pub fn neighbor_left(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  Ok(if grid.col(index) == 0 { None } else { Some(index - 1) })
}

/// The index of the square to the right of `index`, or `None` in the
/// rightmost column. `index + 1` may be a valid flat index in the next row;
/// that is still `None` here, since neighbors never cross a row boundary.
pub fn neighbor_right(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  Ok(if grid.col(index) + 1 == grid.width() {
    None
  } else {
    Some(index + 1)
  })
}

/// The index of the square above `index`, or `None` in the top row.
pub fn neighbor_above(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  Ok(if index < grid.width() {
    None
  } else {
    Some(index - grid.width())
  })
}

/// The index of the square below `index`, or `None` in the bottom row.
pub fn neighbor_below(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  Ok(if index + grid.width() >= grid.squares().len() {
    None
  } else {
    Some(index + grid.width())
  })
}

/// The nearest white square to the left of `index` in the same row, or
/// `None` if only black squares remain before the edge.
pub fn next_white_left(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  let mut i = index;
  loop {
    if grid.col(i) == 0 {
      return Ok(None);
    }
    i -= 1;
    if grid.squares()[i].is_white() {
      return Ok(Some(i));
    }
  }
}

/// The nearest white square to the right of `index` in the same row, or
/// `None` if only black squares remain before the edge.
pub fn next_white_right(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  let mut i = index;
  loop {
    if grid.col(i) + 1 == grid.width() {
      return Ok(None);
    }
    i += 1;
    if grid.squares()[i].is_white() {
      return Ok(Some(i));
    }
  }
}

/// The nearest white square above `index` in the same column, or `None` if
/// only black squares remain before the edge.
pub fn next_white_above(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  let mut i = index;
  loop {
    if i < grid.width() {
      return Ok(None);
    }
    i -= grid.width();
    if grid.squares()[i].is_white() {
      return Ok(Some(i));
    }
  }
}

/// The nearest white square below `index` in the same column, or `None` if
/// only black squares remain before the edge.
pub fn next_white_below(grid: &Grid, index: usize) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  let mut i = index;
  loop {
    if i + grid.width() >= grid.squares().len() {
      return Ok(None);
    }
    i += grid.width();
    if grid.squares()[i].is_white() {
      return Ok(Some(i));
    }
  }
}

/// The squares of the word containing the active square in `direction`, in
/// grid order. Empty when no square is active.
pub fn active_word_squares(grid: &Grid, direction: Direction) -> Vec<usize> {
  match grid.active_index() {
    Some(active) => word_squares_from(grid, direction, word_start(grid, direction, active)),
    None => Vec::new(),
  }
}

/// The square the cursor should land on after a letter is written at
/// `index`: the first empty white square later in the word containing
/// `index`, then the first empty white square of each following word in
/// `direction`, and `index` itself when no such square exists.
pub fn next_white_empty(grid: &Grid, direction: Direction, index: usize) -> Result<usize, Error> {
  grid.check_index(index)?;

  let start = if grid.squares()[index].is_white() {
    let start = word_start(grid, direction, index);
    let rest = word_squares_from(grid, direction, start);
    if let Some(found) = rest
      .into_iter()
      .find(|&i| i > index && grid.squares()[i].is_empty())
    {
      return Ok(found);
    }
    start
  } else {
    index
  };

  let mut next = next_start_after(grid, direction, start);
  while let Some(word) = next {
    if let Some(found) = word_squares_from(grid, direction, word)
      .into_iter()
      .find(|&i| grid.squares()[i].is_empty())
    {
      return Ok(found);
    }
    next = next_start_after(grid, direction, word);
  }

  Ok(index)
}

/// The square the cursor should land on after a delete on an already-empty
/// square at `index`.
///
/// Across walks backward through the whole grid in row-major order,
/// skipping black squares. Down prefers the square directly above; failing
/// that it lands on the last square of the previous down word. In either
/// direction, `index` itself is returned when nothing qualifies.
pub fn prev_white(grid: &Grid, direction: Direction, index: usize) -> Result<usize, Error> {
  grid.check_index(index)?;

  match direction {
    Across => {
      let mut i = index;
      while i > 0 {
        i -= 1;
        if grid.squares()[i].is_white() {
          return Ok(i);
        }
      }
      Ok(index)
    }
    Down => {
      if index >= grid.width() && grid.squares()[index - grid.width()].is_white() {
        return Ok(index - grid.width());
      }
      match prev_word_start(grid, Down, index)? {
        Some(start) => Ok(grid.down_end(start)),
        None => Ok(index),
      }
    }
  }
}

/// The start of the word that follows the word containing `index` in
/// `direction`, or `None` when that word is the last one.
pub fn next_word_start(
  grid: &Grid,
  direction: Direction,
  index: usize,
) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  let start = if grid.squares()[index].is_white() {
    word_start(grid, direction, index)
  } else {
    index
  };
  Ok(next_start_after(grid, direction, start))
}

/// The start of the word that precedes the word containing `index` in
/// `direction`, or `None` when that word is the first one.
pub fn prev_word_start(
  grid: &Grid,
  direction: Direction,
  index: usize,
) -> Result<Option<usize>, Error> {
  grid.check_index(index)?;
  let start = if grid.squares()[index].is_white() {
    word_start(grid, direction, index)
  } else {
    index
  };
  let starts = grid.word_starts(direction);
  let position = starts.partition_point(|&s| s < start);
  Ok(if position == 0 {
    None
  } else {
    Some(starts[position - 1])
  })
}

/// The first square of the word containing `index` in `direction`: walk
/// backward while the previous square is in the same row (Across) or
/// column (Down) and white.
fn word_start(grid: &Grid, direction: Direction, index: usize) -> usize {
  let mut i = index;
  match direction {
    Across => {
      while grid.col(i) > 0 && grid.squares()[i - 1].is_white() {
        i -= 1;
      }
    }
    Down => {
      while i >= grid.width() && grid.squares()[i - grid.width()].is_white() {
        i -= grid.width();
      }
    }
  }
  i
}

/// The squares of the word starting at `start`, in grid order.
fn word_squares_from(grid: &Grid, direction: Direction, start: usize) -> Vec<usize> {
  match direction {
    Across => (start..=grid.across_end(start)).collect(),
    Down => (start..=grid.down_end(start)).step_by(grid.width()).collect(),
  }
}

/// The first entry of the word-start list for `direction` that lies after
/// `start`.
fn next_start_after(grid: &Grid, direction: Direction, start: usize) -> Option<usize> {
  let starts = grid.word_starts(direction);
  let position = starts.partition_point(|&s| s <= start);
  starts.get(position).copied()
}
