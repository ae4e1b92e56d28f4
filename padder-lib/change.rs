//! Host change notifications.
//!
//! A [`ChangeEvent`] describes one edit the host has already applied: the
//! replaced range (in the coordinates before the edit), how many chars it
//! covered and the text that replaced it. The padder only ever reads it.

use padder_core::chars::single_char;

use crate::{
  Tendril,
  position::Position,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
  pub start:        Position,
  pub end:          Position,
  /// Number of chars the replaced range covered.
  pub range_length: usize,
  pub text:         Tendril,
}

/// The three event shapes the padder reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventShape {
  /// A single space inserted without replacing anything.
  Space,
  /// A single char removed and nothing inserted.
  Backspace,
  /// A single char inserted without replacing anything.
  Typed(char),
  Other,
}

impl ChangeEvent {
  /// Builds an event, deriving `range_length` from the range when it stays on
  /// one row. Multi-row ranges need the document to measure; use
  /// [`ChangeEvent::with_range_length`] for those.
  pub fn new(start: Position, end: Position, text: impl Into<Tendril>) -> Self {
    let range_length = if start.row == end.row {
      end.col.saturating_sub(start.col)
    } else {
      0
    };
    Self {
      start,
      end,
      range_length,
      text: text.into(),
    }
  }

  /// Pure insertion of `text` at `at`.
  pub fn insertion(at: Position, text: impl Into<Tendril>) -> Self {
    Self::new(at, at, text)
  }

  /// Pure deletion of `start..end`.
  ///
  /// When the range crosses a row boundary, e.g. a backspace joining two
  /// lines, `range_length` comes out as 0 and the event does not classify as
  /// a backspace. Chain [`ChangeEvent::with_range_length`] with the char count
  /// the host measured.
  pub fn deletion(start: Position, end: Position) -> Self {
    Self::new(start, end, Tendril::new())
  }

  pub fn with_range_length(mut self, range_length: usize) -> Self {
    self.range_length = range_length;
    self
  }

  pub fn shape(&self) -> EventShape {
    match (self.range_length, single_char(&self.text)) {
      (0, Some(' ')) => EventShape::Space,
      (0, Some(ch)) => EventShape::Typed(ch),
      (1, None) if self.text.is_empty() => EventShape::Backspace,
      _ => EventShape::Other,
    }
  }
}
