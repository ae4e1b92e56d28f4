//! Cursor ranges as reported by the host.
//!
//! A [`Range`] has two positions: `anchor` and `head`. The `head` is where the
//! cursor visually appears, while the `anchor` is the other end of the
//! selection. When `anchor == head`, the range is a point (no selection).
//!
//! ```text
//! anchor=(0,2), head=(0,7): "he[llo w]orld"  (forward selection)
//! anchor=(0,7), head=(0,2): "he]llo w[orld"  (backward selection)
//! anchor=(0,5), head=(0,5): "hello|world"    (point/cursor)
//! ```
//!
//! The padder never merges or iterates multiple ranges: a host reporting more
//! than one range disables every padding action for that event.

use smallvec::SmallVec;

use crate::position::Position;

/// Selections as handed over by the host, usually exactly one.
pub type Selections = SmallVec<[Range; 1]>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub anchor: Position,
  pub head:   Position,
}

impl Range {
  pub const fn new(anchor: Position, head: Position) -> Self {
    Self { anchor, head }
  }

  /// A collapsed range, i.e. a plain cursor.
  pub const fn point(pos: Position) -> Self {
    Self::new(pos, pos)
  }

  /// The active end of the range.
  #[inline]
  pub const fn cursor(&self) -> Position {
    self.head
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.anchor == self.head
  }

  #[inline]
  pub fn from(&self) -> Position {
    self.anchor.min(self.head)
  }

  #[inline]
  pub fn to(&self) -> Position {
    self.anchor.max(self.head)
  }
}
