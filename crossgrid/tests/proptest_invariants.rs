//! Property-based invariant tests for the crossgrid engine.
//!
//! These check structural invariants that must hold for **any** grid the
//! editor can produce, not just the hand-picked ones in the unit tests:
//!
//! 1. Black squares carry no letter and no number.
//! 2. Numbers read 1, 2, ... K in flat-index order with no gaps, and sit
//!    exactly on the squares that start a word.
//! 3. The across and down clue slots partition the white squares.
//! 4. At most one square is active, and the active-word marks cover exactly
//!    the active slot in the current direction.
//! 5. Clue text survives an edit exactly when its word's range does.
//! 6. Toggle sequences under a symmetry mode leave the grid closed under
//!    that symmetry.

use crossgrid::Direction::{Across, Down};
use crossgrid::{ArrowKey, EditMode, Editor, Grid, SymmetryMode, navigator};
use proptest::prelude::*;

/// Dimensions strategy: small enough for fast tests, large enough to get
/// multi-word rows and columns.
fn dims() -> impl Strategy<Value = (usize, usize)> {
  (1usize..=7, 1usize..=7)
}

/// One user intent aimed at a grid with `len` squares.
#[derive(Debug, Clone)]
enum Edit {
  ToggleBlack(usize),
  Insert(usize, char),
  Backspace(usize),
  Arrow(usize, ArrowKey),
  ToggleDirection,
  Activate(usize),
  SetMode(EditMode),
}

fn arrow_key() -> impl Strategy<Value = ArrowKey> {
  prop_oneof![
    Just(ArrowKey::Up),
    Just(ArrowKey::Down),
    Just(ArrowKey::Left),
    Just(ArrowKey::Right),
  ]
}

fn edit_mode() -> impl Strategy<Value = EditMode> {
  prop_oneof![
    Just(EditMode::Text),
    Just(EditMode::ToggleBlack),
    Just(EditMode::Clues),
  ]
}

fn edit(len: usize) -> impl Strategy<Value = Edit> {
  prop_oneof![
    (0..len).prop_map(Edit::ToggleBlack),
    (0..len, proptest::char::range('a', 'z')).prop_map(|(i, c)| Edit::Insert(i, c)),
    (0..len).prop_map(Edit::Backspace),
    (0..len, arrow_key()).prop_map(|(i, k)| Edit::Arrow(i, k)),
    Just(Edit::ToggleDirection),
    (0..len).prop_map(Edit::Activate),
    edit_mode().prop_map(Edit::SetMode),
  ]
}

/// A grid size plus a script of edits addressed to it.
fn editor_script() -> impl Strategy<Value = ((usize, usize), Vec<Edit>)> {
  dims().prop_flat_map(|(width, height)| {
    (
      Just((width, height)),
      proptest::collection::vec(edit(width * height), 0..40),
    )
  })
}

/// A grid size plus a list of squares to toggle.
fn toggle_script() -> impl Strategy<Value = ((usize, usize), Vec<usize>)> {
  dims().prop_flat_map(|(width, height)| {
    (
      Just((width, height)),
      proptest::collection::vec(0..width * height, 0..30),
    )
  })
}

fn apply(editor: &mut Editor, edit: &Edit) {
  let result = match edit {
    Edit::ToggleBlack(i) => editor.toggle_black(*i),
    Edit::Insert(i, c) => editor.insert_letter(*i, *c),
    Edit::Backspace(i) => editor.backspace(*i),
    Edit::Arrow(i, key) => editor.arrow(*i, *key),
    Edit::ToggleDirection => {
      editor.toggle_direction();
      Ok(())
    }
    Edit::Activate(i) => editor.activate(*i),
    Edit::SetMode(mode) => {
      editor.set_mode(*mode);
      Ok(())
    }
  };
  result.expect("generated indices are within the grid");
}

/// Checks every structural invariant of a snapshot. `direction` is the
/// editor's current typing direction, which the active-word marks follow.
fn check_invariants(grid: &Grid, direction: crossgrid::Direction) {
  let width = grid.width();
  let squares = grid.squares();

  assert_eq!(squares.len(), width * grid.height());

  // Numbering: dense from 1, exactly on word starts; nothing on blacks.
  let mut expected_number = 1;
  for (i, square) in squares.iter().enumerate() {
    if square.is_black() {
      assert_eq!(square.letter(), None);
      assert_eq!(square.number(), None);
      continue;
    }
    let starts_across = i % width == 0 || squares[i - 1].is_black();
    let starts_down = i < width || squares[i - width].is_black();
    if starts_across || starts_down {
      assert_eq!(square.number(), Some(expected_number), "square {}", i);
      expected_number += 1;
    } else {
      assert_eq!(square.number(), None, "square {}", i);
    }
  }

  // Slots: in-bounds, white throughout, delimited by blacks or edges, and
  // together a partition of the white squares.
  let mut across_owner = vec![false; squares.len()];
  for clue in &grid.clues().across {
    let (start, end) = (clue.range.start_index, clue.range.end_index);
    assert!(start <= end && end < squares.len());
    assert_eq!(start / width, end / width, "across slot stays in one row");
    assert!(start % width == 0 || squares[start - 1].is_black());
    assert!((end + 1) % width == 0 || squares[end + 1].is_black());
    for i in start..=end {
      assert!(squares[i].is_white());
      assert!(!across_owner[i], "square {} in two across slots", i);
      across_owner[i] = true;
    }
  }
  let mut down_owner = vec![false; squares.len()];
  for clue in &grid.clues().down {
    let (start, end) = (clue.range.start_index, clue.range.end_index);
    assert!(start <= end && end < squares.len());
    assert_eq!(start % width, end % width, "down slot stays in one column");
    assert!(start < width || squares[start - width].is_black());
    assert!(end + width >= squares.len() || squares[end + width].is_black());
    let mut i = start;
    loop {
      assert!(squares[i].is_white());
      assert!(!down_owner[i], "square {} in two down slots", i);
      down_owner[i] = true;
      if i == end {
        break;
      }
      i += width;
    }
  }
  for (i, square) in squares.iter().enumerate() {
    assert_eq!(across_owner[i], square.is_white(), "across ownership of {}", i);
    assert_eq!(down_owner[i], square.is_white(), "down ownership of {}", i);
  }

  // Cursor: at most one active square, always white, and the active-word
  // marks cover exactly its slot in the current direction.
  let active: Vec<usize> = (0..squares.len()).filter(|&i| squares[i].is_active()).collect();
  assert!(active.len() <= 1);
  if let Some(&i) = active.first() {
    assert!(squares[i].is_white());
  }
  let marked: Vec<usize> = (0..squares.len())
    .filter(|&i| squares[i].in_active_word())
    .collect();
  assert_eq!(marked, navigator::active_word_squares(grid, direction));
}

proptest! {
  #[test]
  fn edit_scripts_maintain_every_invariant(((width, height), edits) in editor_script()) {
    let mut editor = Editor::new(width, height).unwrap();
    check_invariants(editor.grid(), editor.direction());
    for edit in &edits {
      apply(&mut editor, edit);
      check_invariants(editor.grid(), editor.direction());
    }
  }

  #[test]
  fn rotational_toggles_stay_closed_under_rotation(((width, height), toggles) in toggle_script()) {
    // A fresh editor already toggles with rotational symmetry.
    let mut editor = Editor::new(width, height).unwrap();
    for &i in &toggles {
      editor.toggle_black(i).unwrap();
    }

    let squares = editor.grid().squares();
    let len = squares.len();
    for i in 0..len {
      prop_assert_eq!(squares[i].is_black(), squares[len - 1 - i].is_black());
    }
  }

  #[test]
  fn mirror_toggles_stay_closed_under_reflection(((width, height), toggles) in toggle_script()) {
    let mut editor = Editor::new(width, height).unwrap();
    editor.set_symmetry(SymmetryMode::Mirror);
    for &i in &toggles {
      editor.toggle_black(i).unwrap();
    }

    let squares = editor.grid().squares();
    for i in 0..squares.len() {
      let mirrored = i - i % width + (width - 1 - i % width);
      prop_assert_eq!(squares[i].is_black(), squares[mirrored].is_black());
    }
  }

  #[test]
  fn across_auto_advance_never_retreats(((width, height), edits) in editor_script()) {
    let mut editor = Editor::new(width, height).unwrap();
    for edit in &edits {
      apply(&mut editor, edit);
    }

    // Across word order coincides with flat order, so the landing square is
    // never earlier than the starting one. (Down has no such guarantee: the
    // next down word can start in a higher row.)
    let grid = editor.grid();
    for i in 0..grid.squares().len() {
      let next = navigator::next_white_empty(grid, Across, i).unwrap();
      prop_assert!(next >= i);
    }
  }

  #[test]
  fn clue_text_survives_exactly_when_its_range_does(
    ((width, height), toggles) in toggle_script(),
    last in prop::num::usize::ANY,
  ) {
    let mut editor = Editor::new(width, height).unwrap();
    for &i in &toggles {
      editor.toggle_black(i).unwrap();
    }

    // Give every slot a distinct text, then apply one more toggle.
    for direction in [Across, Down] {
      for slot in 0..editor.grid().clues().get(direction).len() {
        editor
          .set_clue_text(direction, slot, format!("{:?} {}", direction, slot))
          .unwrap();
      }
    }
    let before = editor.grid().clone();
    editor.toggle_black(last % (width * height)).unwrap();

    for direction in [Across, Down] {
      for clue in editor.grid().clues().get(direction) {
        match before
          .clues()
          .get(direction)
          .iter()
          .find(|prior| prior.range == clue.range)
        {
          Some(prior) => prop_assert_eq!(&clue.text, &prior.text),
          None => prop_assert_eq!(&clue.text, ""),
        }
      }
    }
  }
}
