//! Snapshot undo history for the reference [`Document`](crate::document::Document).
//!
//! Every undo step stores the whole [`State`] it started from. Ropes share
//! their chunks, so a snapshot costs a few pointer copies rather than a copy
//! of the text.

use ropey::Rope;

use crate::selection::Selections;

#[derive(Debug, Clone, PartialEq)]
pub struct State {
  pub text:      Rope,
  pub selection: Selections,
}

/// Linear undo/redo stacks. Committing a new step drops the redo stack.
#[derive(Debug, Clone, Default)]
pub struct History {
  undo: Vec<State>,
  redo: Vec<State>,
}

impl History {
  /// Record `original` as the state the next undo step returns to.
  pub fn commit(&mut self, original: State) {
    self.undo.push(original);
    self.redo.clear();
  }

  /// Step back from `current`, returning the state to restore.
  pub fn undo(&mut self, current: State) -> Option<State> {
    let state = self.undo.pop()?;
    self.redo.push(current);
    Some(state)
  }

  /// Step forward from `current`, returning the state to restore.
  pub fn redo(&mut self, current: State) -> Option<State> {
    let state = self.redo.pop()?;
    self.undo.push(current);
    Some(state)
  }

  /// Number of undo steps available.
  #[inline]
  pub fn len(&self) -> usize {
    self.undo.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.undo.is_empty()
  }

  #[inline]
  pub fn can_redo(&self) -> bool {
    !self.redo.is_empty()
  }
}
