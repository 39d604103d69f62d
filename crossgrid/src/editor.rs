//! The edit controller: turns user intents into grid snapshots.

use crate::Direction::{self, Across};
use crate::Error;
use crate::grid::Grid;
use crate::navigator;

/// How user input is currently interpreted.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EditMode {
  /// Typing writes letters into white squares.
  Text,
  /// Selecting a square toggles it between black and white.
  ToggleBlack,
  /// The grid is display-only while clue text is edited.
  Clues,
}

/// The geometric rule relating a toggled square to its partner square.
/// Toggling one square black or white applies the same color to the
/// partner.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SymmetryMode {
  /// No partner; squares toggle individually.
  None,
  /// 180-degree rotational symmetry, the New York Times convention.
  Rotational,
  /// Left-right mirror symmetry within each row.
  Mirror,
}

/// An arrow key, as forwarded by a front end.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArrowKey {
  Up,
  Down,
  Left,
  Right,
}

/// Applies user edits to a working copy of the current grid and publishes a
/// rebuilt snapshot after each one. When implementing a construction app,
/// this is the main structure you will use.
///
/// The editor holds the current [EditMode], [SymmetryMode], and typing
/// [Direction]. Operations issued in a mode they don't apply to are silently
/// ignored, so a front end may funnel every keystroke through the editor
/// without guarding; an out-of-range square index is an error. After any
/// operation, [grid](Self::grid) returns the newest snapshot.
#[derive(Debug)]
pub struct Editor {
  grid: Grid,
  mode: EditMode,
  symmetry: SymmetryMode,
  direction: Direction,
}

impl Editor {
  /// Creates an editor over a fresh all-white grid, starting the way a new
  /// construction session does: block-toggling mode, rotational symmetry,
  /// typing across.
  pub fn new(width: usize, height: usize) -> Result<Self, Error> {
    Ok(Self {
      grid: Grid::new(width, height)?,
      mode: EditMode::ToggleBlack,
      symmetry: SymmetryMode::Rotational,
      direction: Across,
    })
  }

  /// The current snapshot.
  pub fn grid(&self) -> &Grid {
    &self.grid
  }

  pub fn mode(&self) -> EditMode {
    self.mode
  }

  pub fn symmetry(&self) -> SymmetryMode {
    self.symmetry
  }

  /// The current typing direction. Governs auto-advance and which word the
  /// active-word highlight follows.
  pub fn direction(&self) -> Direction {
    self.direction
  }

  /// Toggles the square at `index` between black and white, along with its
  /// symmetry partner. Only valid in [EditMode::ToggleBlack].
  pub fn toggle_black(&mut self, index: usize) -> Result<(), Error> {
    self.grid.check_index(index)?;
    if self.mode != EditMode::ToggleBlack {
      return Ok(());
    }

    let make_black = self.grid.squares()[index].is_white();
    let mut working = self.grid.clone();
    for i in [Some(index), self.partner(index)].into_iter().flatten() {
      if make_black {
        working.square_mut(i).set_black();
      } else {
        working.square_mut(i).set_white();
      }
    }
    self.grid = working.rebuild();
    Ok(())
  }

  /// Writes a letter into the square at `index` and advances the cursor to
  /// the next empty white square in the current direction. Only valid in
  /// [EditMode::Text].
  ///
  /// Letters are stored uppercased (ASCII only; other glyphs are stored
  /// verbatim) and whitespace is never stored. A square that already has a
  /// letter is left alone: overwriting requires an intervening delete.
  pub fn insert_letter(&mut self, index: usize, letter: char) -> Result<(), Error> {
    self.grid.check_index(index)?;
    if self.mode != EditMode::Text {
      return Ok(());
    }
    let square = &self.grid.squares()[index];
    if square.is_black() || square.letter().is_some() || letter.is_whitespace() {
      return Ok(());
    }

    let mut working = self.grid.clone();
    working.square_mut(index).set_letter(letter.to_ascii_uppercase());
    working.clear_active_marks();
    let next = navigator::next_white_empty(&working, self.direction, index)?;
    working.square_mut(next).set_active(true);
    working.mark_active_word(self.direction);
    self.grid = working.rebuild();
    Ok(())
  }

  /// Deletes from the square at `index`. A letter there is erased in place;
  /// an already-empty square moves the cursor back to the previous white
  /// square in the current direction and erases that one. Only valid in
  /// [EditMode::Text].
  pub fn backspace(&mut self, index: usize) -> Result<(), Error> {
    self.grid.check_index(index)?;
    if self.mode != EditMode::Text {
      return Ok(());
    }

    let mut working = self.grid.clone();
    if working.squares()[index].letter().is_some() {
      working.square_mut(index).clear_letter();
      self.grid = working.rebuild();
      return Ok(());
    }

    working.clear_active_marks();
    let prev = navigator::prev_white(&working, self.direction, index)?;
    working.square_mut(prev).clear_letter();
    if working.squares()[prev].is_white() {
      working.square_mut(prev).set_active(true);
    }
    working.mark_active_word(self.direction);
    self.grid = working.rebuild();
    Ok(())
  }

  /// Moves the cursor to the nearest white square in the arrow's direction,
  /// if there is one. Arrow keys never change the typing direction. Only
  /// valid in [EditMode::Text].
  pub fn arrow(&mut self, index: usize, key: ArrowKey) -> Result<(), Error> {
    self.grid.check_index(index)?;
    if self.mode != EditMode::Text {
      return Ok(());
    }

    let target = match key {
      ArrowKey::Up => navigator::next_white_above(&self.grid, index)?,
      ArrowKey::Down => navigator::next_white_below(&self.grid, index)?,
      ArrowKey::Left => navigator::next_white_left(&self.grid, index)?,
      ArrowKey::Right => navigator::next_white_right(&self.grid, index)?,
    };
    let Some(target) = target else {
      return Ok(());
    };

    let mut working = self.grid.clone();
    working.clear_active_marks();
    working.square_mut(target).set_active(true);
    working.mark_active_word(self.direction);
    self.grid = working.rebuild();
    Ok(())
  }

  /// Swaps the typing direction between across and down and re-highlights
  /// the active word. This is what a space keystroke on an active square
  /// does. Only valid in [EditMode::Text].
  pub fn toggle_direction(&mut self) {
    if self.mode != EditMode::Text {
      return;
    }
    self.direction = !self.direction;
    let mut working = self.grid.clone();
    working.mark_active_word(self.direction);
    self.grid = working.rebuild();
  }

  /// Moves the cursor to the square at `index`. A black square is left
  /// alone.
  pub fn activate(&mut self, index: usize) -> Result<(), Error> {
    self.grid.check_index(index)?;
    if self.grid.squares()[index].is_black() {
      return Ok(());
    }

    let mut working = self.grid.clone();
    working.clear_active_marks();
    working.square_mut(index).set_active(true);
    working.mark_active_word(self.direction);
    self.grid = working.rebuild();
    Ok(())
  }

  /// Switches the edit mode. Any cursor state is dropped: no square stays
  /// active or highlighted.
  pub fn set_mode(&mut self, mode: EditMode) {
    let mut working = self.grid.clone();
    working.clear_active_marks();
    self.grid = working.rebuild();
    self.mode = mode;
  }

  /// Sets the symmetry rule applied by subsequent
  /// [toggle_black](Self::toggle_black) calls. The current grid is not
  /// modified.
  pub fn set_symmetry(&mut self, symmetry: SymmetryMode) {
    self.symmetry = symmetry;
  }

  /// Replaces the text of the clue at position `slot` in the across or down
  /// list.
  pub fn set_clue_text(
    &mut self,
    direction: Direction,
    slot: usize,
    text: String,
  ) -> Result<(), Error> {
    let mut working = self.grid.clone();
    working.set_clue_text(direction, slot, text)?;
    self.grid = working.rebuild();
    Ok(())
  }

  /// The symmetry partner of `index` under the current mode, or `None`
  /// without symmetry. A square may be its own partner (the center of an
  /// odd-sized grid, or the middle column under mirroring); it is edited
  /// once.
  fn partner(&self, index: usize) -> Option<usize> {
    let width = self.grid.width();
    match self.symmetry {
      SymmetryMode::None => None,
      SymmetryMode::Rotational => {
        let partner = self.grid.squares().len() - 1 - index;
        (partner != index).then_some(partner)
      }
      SymmetryMode::Mirror => {
        let partner = index - index % width + (width - 1 - index % width);
        (partner != index).then_some(partner)
      }
    }
  }
}
