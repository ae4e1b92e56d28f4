use padder_core::{
  chars::char_is_line_ending,
  line_ending::line_end_char_index,
};
use ropey::RopeSlice;

/// This is a single point in a text buffer.
/// 0-indexed as all things should be; `col` counts chars.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl Position {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self { row: 0, col: 0 }
  }

  /// Move `delta` columns along the same row.
  ///
  /// Returns `None` when the result would land before column 0.
  pub fn translate(self, delta: isize) -> Option<Self> {
    let col = self.col.checked_add_signed(delta)?;
    Some(Self { row: self.row, col })
  }

  /// The position reached after typing `text` at `self`.
  pub fn traverse(self, text: impl AsRef<str>) -> Self {
    let Self { mut row, mut col } = self;
    let mut chars = text.as_ref().chars().peekable();

    while let Some(ch) = chars.next() {
      if char_is_line_ending(ch) && !(ch == '\r' && chars.peek() == Some(&'\n')) {
        row += 1;
        col = 0;
      } else {
        col += 1;
      }
    }

    Self { row, col }
  }
}

impl From<(usize, usize)> for Position {
  fn from(value: (usize, usize)) -> Self {
    Position::new(value.0, value.1)
  }
}

/// Converts a character index into a `Position`.
pub fn coords_at_pos(text: RopeSlice, pos: usize) -> Position {
  let pos = pos.min(text.len_chars());
  let line = text.char_to_line(pos);
  Position::new(line, pos - text.line_to_char(line))
}

/// Convert a `(row, col)` to a character index.
///
/// Unlike a cursor clamp this is strict: a row past the last line or a column
/// past the end of its line (line ending excluded) yields `None`, so edits
/// addressed at stale positions are rejected instead of landing elsewhere.
pub fn char_idx_at_coords(text: RopeSlice, coords: Position) -> Option<usize> {
  if coords.row >= text.len_lines() {
    return None;
  }
  let line_start = text.line_to_char(coords.row);
  let line_end = line_end_char_index(&text, coords.row);
  let idx = line_start.checked_add(coords.col)?;
  (idx <= line_end).then_some(idx)
}
