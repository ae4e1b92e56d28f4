//! Edit requests sent back to the host.

use smallvec::SmallVec;

use crate::{
  Tendril,
  position::Position,
};

/// One primitive edit. Positions refer to the document as it is when the edit
/// batch is submitted; the host applies a batch as a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
  Insert { at: Position, text: Tendril },
  Delete { from: Position, to: Position },
}

pub type Edits = SmallVec<[Edit; 1]>;

impl Edit {
  pub fn insert(at: Position, text: impl Into<Tendril>) -> Self {
    Self::Insert {
      at,
      text: text.into(),
    }
  }

  pub fn delete(from: Position, to: Position) -> Self {
    Self::Delete { from, to }
  }
}

/// Undo grouping hints for an edit batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
  /// Open a new undo step before applying the batch.
  pub undo_stop_before: bool,
  /// Close the undo step after applying the batch.
  pub undo_stop_after:  bool,
}

impl EditOptions {
  /// Join the edit to the surrounding undo step. Padding reactions use this
  /// so that undoing the keystroke also undoes the reaction.
  pub const GROUPED: Self = Self {
    undo_stop_before: false,
    undo_stop_after:  false,
  };
}

impl Default for EditOptions {
  fn default() -> Self {
    Self {
      undo_stop_before: true,
      undo_stop_after:  true,
    }
  }
}
