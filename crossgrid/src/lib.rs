//! This crate is the core engine for a crossword puzzle construction app.
//! It provides no UI itself, but see `gridtui` for an example of how you can
//! use it to produce a crossword construction app.
//!
//! The engine models a rectangular grid of black and white squares, derives
//! New-York-Times-style numbering and across/down clue slots from the block
//! pattern, and answers the word-aware navigation queries a front end needs
//! to drive a cursor: auto-advance after typing a letter, reverse
//! auto-advance on delete, arrow movement that skips black squares, and
//! active-word highlighting.
//!
//! The [Editor] is the main entry point. It consumes user intents (toggle a
//! square black, write a letter, press an arrow key, swap the typing
//! direction) and publishes a fresh [Grid] snapshot after every edit.
//! Snapshots are read-only; numbering and clue slots are rederived on every
//! edit, while clue text the author has written is carried over whenever the
//! word it belongs to is unchanged.

use Direction::{Across, Down};
use std::ops::Not;

mod editor;
mod grid;
pub mod navigator;

pub use editor::{ArrowKey, EditMode, Editor, SymmetryMode};
pub use grid::{Clue, ClueRange, ClueSet, Dimensions, Fill, Grid, Square};

/// The two crossword directions: `Across` and `Down`
#[derive(Debug, Eq, PartialEq, Hash, Copy, Clone)]
pub enum Direction {
  Across,
  Down,
}

impl Not for Direction {
  type Output = Self;
  fn not(self) -> Self {
    match self {
      Across => Down,
      Down => Across,
    }
  }
}

/// The errors that may be produced by functions in this crate.
#[derive(Debug, Eq, PartialEq)]
pub enum Error {
  /// A grid cannot be created with the given width and height. Both must be
  /// at least 1.
  InvalidDimensions { width: usize, height: usize },
  /// An index outside the valid range was passed to an operation.
  IndexOutOfBounds { index: usize, len: usize },
}
