use std::io;

use clap::Parser;
use crossgrid::Direction::{Across, Down};
use crossgrid::{ArrowKey, Clue, Direction, EditMode, Editor, SymmetryMode};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
  DefaultTerminal, Frame,
  buffer::Buffer,
  layout::{Constraint, Flex, Layout, Rect},
  style::{Color, Modifier, Style, Stylize},
  text::Line,
  widgets::{Block, Padding, Paragraph, Widget},
};
use ratatui_macros::{horizontal, vertical};

const SQUARE_WIDTH: u16 = 5;
const SQUARE_HEIGHT: u16 = 3;

/// Construct crossword puzzles in your terminal.
#[derive(Parser)]
struct Args {
  /// Grid width, in squares.
  #[arg(long, default_value_t = 15)]
  width: usize,

  /// Grid height, in squares.
  #[arg(long, default_value_t = 15)]
  height: usize,

  /// Use the 21x21 NYT Sunday size, overriding --width and --height.
  #[arg(long)]
  sunday: bool,
}

fn main() -> io::Result<()> {
  let args = Args::parse();
  let (width, height) = if args.sunday {
    (21, 21)
  } else {
    (args.width, args.height)
  };

  let editor = Editor::new(width, height).unwrap_or_else(|e| {
    println!("Cannot start a {}x{} grid: {:?}", width, height, e);
    std::process::exit(1);
  });

  let app = App::new(editor);
  let terminal = ratatui::init();
  let result = app.run(terminal);
  ratatui::restore();
  result
}

/// Indicates how a particular square should look.
#[derive(Debug)]
enum SquareStyle {
  /// Default styling
  Standard,
  /// The cursor is positioned on this square.
  Cursor,
  /// The cursor is not on this square, but the word indicated by the cursor
  /// includes this square.
  Word,
}

impl From<SquareStyle> for Style {
  fn from(value: SquareStyle) -> Self {
    let base_style = match value {
      SquareStyle::Standard => Style::new().bg(Color::White),
      SquareStyle::Cursor => Style::new().bg(Color::LightRed),
      SquareStyle::Word => Style::new().bg(Color::LightYellow),
    };
    base_style.fg(Color::Black).add_modifier(Modifier::BOLD)
  }
}

#[derive(Debug)]
struct App {
  editor: Editor,
  /// Cursor for block-toggling mode. Unlike the text cursor it may sit on
  /// black squares.
  block_cursor: usize,
  /// Selected clue in clues mode: a position in the across list, continuing
  /// into the down list.
  clue_selection: usize,
  running: bool,
}

impl App {
  fn new(editor: Editor) -> Self {
    Self {
      editor,
      block_cursor: 0,
      clue_selection: 0,
      running: true,
    }
  }

  pub fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
    while self.running {
      terminal.draw(|frame| self.draw(frame))?;
      self.handle_crossterm_events()?;
    }
    Ok(())
  }

  fn draw(&self, frame: &mut Frame) {
    frame.render_widget(self, frame.area());
  }

  /// Reads the crossterm events and updates the state of [`App`].
  fn handle_crossterm_events(&mut self) -> io::Result<()> {
    match event::read()? {
      // it's important to check KeyEventKind::Press to avoid handling key release events
      Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
      Event::Mouse(_) => {}
      Event::Resize(_, _) => {}
      _ => {}
    }
    Ok(())
  }

  /// Handles the key events and updates the state of [`App`].
  fn on_key_event(&mut self, key: KeyEvent) {
    match (key.modifiers, key.code) {
      (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) | (_, KeyCode::Esc) => {
        self.quit()
      }
      (KeyModifiers::CONTROL, KeyCode::Char('s') | KeyCode::Char('S')) => self.cycle_symmetry(),
      (_, KeyCode::Tab) => self.cycle_mode(),
      _ => match self.editor.mode() {
        EditMode::Text => self.on_text_key(key),
        EditMode::ToggleBlack => self.on_block_key(key),
        EditMode::Clues => self.on_clue_key(key),
      },
    }
  }

  /// Set running to false to quit the application.
  fn quit(&mut self) {
    self.running = false;
  }

  fn cycle_mode(&mut self) {
    let next = match self.editor.mode() {
      EditMode::ToggleBlack => EditMode::Text,
      EditMode::Text => EditMode::Clues,
      EditMode::Clues => EditMode::ToggleBlack,
    };
    self.editor.set_mode(next);

    match next {
      EditMode::Text => {
        // Land the cursor on a white square so typing has somewhere to go.
        if let Some(i) = self.first_white_from(self.block_cursor) {
          self.editor.activate(i).expect("index comes from the grid");
        }
      }
      EditMode::Clues => self.clue_selection = 0,
      EditMode::ToggleBlack => {}
    }
  }

  fn cycle_symmetry(&mut self) {
    let next = match self.editor.symmetry() {
      SymmetryMode::Rotational => SymmetryMode::Mirror,
      SymmetryMode::Mirror => SymmetryMode::None,
      SymmetryMode::None => SymmetryMode::Rotational,
    };
    self.editor.set_symmetry(next);
  }

  /// The first white square at or after `from`, wrapping around the grid.
  fn first_white_from(&self, from: usize) -> Option<usize> {
    let squares = self.editor.grid().squares();
    (from..squares.len())
      .chain(0..from)
      .find(|&i| squares[i].is_white())
  }

  fn on_text_key(&mut self, key: KeyEvent) {
    let Some(active) = self.editor.grid().active_index() else {
      return;
    };
    let result = match key.code {
      KeyCode::Char(' ') => {
        self.editor.toggle_direction();
        Ok(())
      }
      KeyCode::Char(c) => self.editor.insert_letter(active, c),
      KeyCode::Backspace => self.editor.backspace(active),
      KeyCode::Up => self.editor.arrow(active, ArrowKey::Up),
      KeyCode::Down => self.editor.arrow(active, ArrowKey::Down),
      KeyCode::Left => self.editor.arrow(active, ArrowKey::Left),
      KeyCode::Right => self.editor.arrow(active, ArrowKey::Right),
      _ => Ok(()),
    };
    result.expect("the active square is always within the grid");
  }

  fn on_block_key(&mut self, key: KeyEvent) {
    let width = self.editor.grid().width();
    let len = self.editor.grid().squares().len();
    match key.code {
      KeyCode::Left => {
        if self.block_cursor % width > 0 {
          self.block_cursor -= 1;
        }
      }
      KeyCode::Right => {
        if self.block_cursor % width + 1 < width {
          self.block_cursor += 1;
        }
      }
      KeyCode::Up => {
        if self.block_cursor >= width {
          self.block_cursor -= width;
        }
      }
      KeyCode::Down => {
        if self.block_cursor + width < len {
          self.block_cursor += width;
        }
      }
      KeyCode::Char(' ') | KeyCode::Enter => {
        self
          .editor
          .toggle_black(self.block_cursor)
          .expect("the block cursor stays within the grid");
      }
      _ => {}
    }
  }

  fn on_clue_key(&mut self, key: KeyEvent) {
    let clues = self.editor.grid().clues();
    let total = clues.across.len() + clues.down.len();
    if total == 0 {
      return;
    }
    self.clue_selection = self.clue_selection.min(total - 1);

    match key.code {
      KeyCode::Up => self.clue_selection = self.clue_selection.saturating_sub(1),
      KeyCode::Down => {
        if self.clue_selection + 1 < total {
          self.clue_selection += 1;
        }
      }
      KeyCode::Char(c) => {
        let (direction, slot, mut text) = self.selected_clue();
        text.push(c);
        self
          .editor
          .set_clue_text(direction, slot, text)
          .expect("the selection tracks the clue lists");
      }
      KeyCode::Backspace => {
        let (direction, slot, mut text) = self.selected_clue();
        text.pop();
        self
          .editor
          .set_clue_text(direction, slot, text)
          .expect("the selection tracks the clue lists");
      }
      _ => {}
    }
  }

  /// Resolves the clue selection to a direction, a position in that
  /// direction's list, and the current text.
  fn selected_clue(&self) -> (Direction, usize, String) {
    let clues = self.editor.grid().clues();
    if self.clue_selection < clues.across.len() {
      let clue = &clues.across[self.clue_selection];
      (Across, self.clue_selection, clue.text.clone())
    } else {
      let slot = self.clue_selection - clues.across.len();
      (Down, slot, clues.down[slot].text.clone())
    }
  }

  // Determines how a particular square should be styled.
  fn square_style(&self, index: usize) -> SquareStyle {
    let square = &self.editor.grid().squares()[index];
    match self.editor.mode() {
      EditMode::ToggleBlack => {
        if index == self.block_cursor {
          return SquareStyle::Cursor;
        }
      }
      EditMode::Text | EditMode::Clues => {
        if square.is_active() {
          return SquareStyle::Cursor;
        }
        if square.in_active_word() {
          return SquareStyle::Word;
        }
      }
    }
    SquareStyle::Standard
  }

  fn render_square(&self, index: usize, square_area: Rect, buf: &mut Buffer) {
    let square = &self.editor.grid().squares()[index];

    if square.is_black() {
      Block::new()
        .style(Style::new().bg(Color::Black))
        .render(square_area, buf);
      return;
    }

    let number = match square.number() {
      Some(n) => n.to_string(),
      None => String::new(),
    };
    let letter = match square.letter() {
      Some(c) => c.to_string(),
      None => String::new(),
    };
    Paragraph::new(vec![
      Line::from(number).left_aligned(),
      Line::from(letter).centered(),
    ])
    .block(Block::new().style(Style::from(self.square_style(index))))
    .render(square_area, buf);
  }

  /// The clue for the word the cursor is in, in the current direction.
  fn current_clue(&self) -> Option<&Clue> {
    let grid = self.editor.grid();
    let active = grid.active_index()?;
    let width = grid.width();
    match self.editor.direction() {
      Across => grid
        .clues()
        .across
        .iter()
        .find(|c| c.range.start_index <= active && active <= c.range.end_index),
      Down => grid.clues().down.iter().find(|c| {
        c.range.start_index <= active
          && active <= c.range.end_index
          && (active - c.range.start_index) % width == 0
      }),
    }
  }

  fn render_side_pane(&self, area: Rect, buf: &mut Buffer) {
    match self.editor.mode() {
      EditMode::Text => {
        let content = match self.current_clue() {
          Some(clue) => format!(
            "{} {:?}: {}",
            clue.number,
            clue.range.direction,
            if clue.text.is_empty() { "(no clue yet)" } else { &clue.text }
          ),
          None => "Select a square to see its clue.".to_string(),
        };
        Paragraph::new(content)
          .block(
            Block::bordered()
              .title(Line::from("Current clue").centered())
              .padding(Padding::uniform(1)),
          )
          .render(area, buf);
      }
      EditMode::ToggleBlack => {
        let lines = vec![
          Line::from("Arrows move the cursor."),
          Line::from("Space or Enter toggles black/white."),
          Line::from(""),
          Line::from("Symmetry applies the same change"),
          Line::from("to the partner square."),
        ];
        Paragraph::new(lines)
          .block(
            Block::bordered()
              .title(Line::from("Blocks").centered())
              .padding(Padding::uniform(1)),
          )
          .render(area, buf);
      }
      EditMode::Clues => {
        Paragraph::new(self.clue_lines())
          .block(
            Block::bordered()
              .title(Line::from("Clues").centered())
              .padding(Padding::uniform(1)),
          )
          .render(area, buf);
      }
    }
  }

  /// One line per clue, with the selected one highlighted.
  fn clue_lines(&self) -> Vec<Line<'_>> {
    let clues = self.editor.grid().clues();
    let mut lines = vec![Line::from("Across".bold())];
    let mut position = 0;
    for (heading, list) in [(None, &clues.across), (Some("Down"), &clues.down)] {
      if let Some(heading) = heading {
        lines.push(Line::from(""));
        lines.push(Line::from(heading.bold()));
      }
      for clue in list {
        let mut line = Line::from(format!("{}. {}", clue.number, clue.text));
        if position == self.clue_selection {
          line = line.style(Style::new().add_modifier(Modifier::REVERSED));
        }
        lines.push(line);
        position += 1;
      }
    }
    lines
  }

  fn status_line(&self) -> Line<'_> {
    let mode = match self.editor.mode() {
      EditMode::Text => "text",
      EditMode::ToggleBlack => "blocks",
      EditMode::Clues => "clues",
    };
    let symmetry = match self.editor.symmetry() {
      SymmetryMode::None => "none",
      SymmetryMode::Rotational => "rotational",
      SymmetryMode::Mirror => "mirror",
    };
    let direction = match self.editor.direction() {
      Across => "across",
      Down => "down",
    };
    Line::from(format!(
      " mode: {}   symmetry: {}   typing: {}   (Tab mode, Ctrl-S symmetry, Esc quit)",
      mode, symmetry, direction
    ))
  }
}

impl Widget for &App {
  fn render(self, area: Rect, buf: &mut Buffer) {
    let [title_area, main_area, status_area] = vertical![==2, *=1, ==1].areas(area);

    let title = Line::from(vec![
      "Crossgrid".bold().blue(),
      ": construct a crossword".bold(),
    ])
    .centered();
    title.render(title_area, buf);

    let [grid_area, clue_area] = horizontal![*=1, ==45].areas(main_area);

    let grid = self.editor.grid();
    let grid_area = center(
      grid_area,
      Constraint::Length(
        (grid.width() * (1 + SQUARE_WIDTH as usize))
          .try_into()
          .unwrap(),
      ),
      Constraint::Length(
        (grid.height() * (1 + SQUARE_HEIGHT as usize))
          .try_into()
          .unwrap(),
      ),
    );

    let mut square_area = Rect {
      x: grid_area.x,
      y: grid_area.y,
      width: SQUARE_WIDTH,
      height: SQUARE_HEIGHT,
    };
    for row in 0..grid.height() {
      for col in 0..grid.width() {
        self.render_square(row * grid.width() + col, square_area, buf);
        square_area.x += SQUARE_WIDTH + 1;
      }
      square_area.x = grid_area.x;
      square_area.y += SQUARE_HEIGHT + 1;
    }

    self.render_side_pane(clue_area, buf);
    self.status_line().render(status_area, buf);
  }
}

/// https://ratatui.rs/recipes/layout/center-a-widget/
fn center(area: Rect, horizontal: Constraint, vertical: Constraint) -> Rect {
  let [area] = Layout::horizontal([horizontal])
    .flex(Flex::Center)
    .areas(area);
  let [area] = Layout::vertical([vertical]).flex(Flex::Center).areas(area);
  area
}
