//! The narrow interface the padder needs from an editor.
//!
//! A host owns the document and the cursors. The padder only reads single
//! lines and the current selections, and writes back through
//! [`Host::apply_edits`] and [`Host::set_selection`].

use std::borrow::Cow;

use padder_core::chars::{
  char_len,
  char_slice,
};
use thiserror::Error;

use crate::{
  edit::{
    Edit,
    EditOptions,
  },
  position::Position,
  selection::{
    Range,
    Selections,
  },
};

pub type Result<T> = std::result::Result<T, HostError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum HostError {
  #[error("line {line} is out of bounds for a document with {len} lines")]
  LineOutOfBounds { line: usize, len: usize },
  #[error("reading {back} chars back from {line}:{col} crosses the start of the line")]
  BeforeLineStart {
    line: usize,
    col:  usize,
    back: usize,
  },
  #[error("position {line}:{col} is out of bounds")]
  PositionOutOfBounds { line: usize, col: usize },
  #[error("edits overlap at {line}:{col}")]
  OverlappingEdits { line: usize, col: usize },
  #[error("host rejected the edit: {0}")]
  Rejected(String),
}

impl HostError {
  pub fn out_of_bounds(pos: Position) -> Self {
    Self::PositionOutOfBounds {
      line: pos.row,
      col:  pos.col,
    }
  }
}

pub trait Host {
  /// Text of line `line` without its line ending.
  fn line_text(&self, line: usize) -> Result<Cow<'_, str>>;

  /// Current selections, in host order.
  fn selections(&self) -> Selections;

  /// Apply `edits` as one transaction.
  fn apply_edits(&mut self, edits: &[Edit], options: EditOptions) -> Result<()>;

  fn set_selection(&mut self, range: Range) -> Result<()>;

  /// Up to `count` chars adjacent to `pos` on its line.
  ///
  /// A positive count reads forward from `pos`, a negative one reads the
  /// chars right before it. Reads are clipped at the end of the line, so the
  /// result can be shorter than requested, but reading back past column 0 is
  /// an error.
  fn chars_at(&self, pos: Position, count: isize) -> Result<String> {
    let line = self.line_text(pos.row)?;
    let len = char_len(&line);
    let col = pos.col.min(len);

    let back = count.unsigned_abs();
    let (from, to) = if count >= 0 {
      (col, col.saturating_add(back))
    } else {
      let from = pos
        .col
        .checked_sub(back)
        .ok_or(HostError::BeforeLineStart {
          line: pos.row,
          col: pos.col,
          back,
        })?;
      (from.min(len), col)
    };

    Ok(char_slice(&line, from, to).to_owned())
  }
}

#[cfg(test)]
mod test {
  use smallvec::smallvec;

  use super::*;

  struct Line(&'static str);

  impl Host for Line {
    fn line_text(&self, line: usize) -> Result<Cow<'_, str>> {
      if line == 0 {
        Ok(Cow::Borrowed(self.0))
      } else {
        Err(HostError::LineOutOfBounds { line, len: 1 })
      }
    }

    fn selections(&self) -> Selections {
      smallvec![Range::point(Position::zero())]
    }

    fn apply_edits(&mut self, _edits: &[Edit], _options: EditOptions) -> Result<()> {
      Err(HostError::Rejected("read only".into()))
    }

    fn set_selection(&mut self, _range: Range) -> Result<()> {
      Ok(())
    }
  }

  #[test]
  fn reads_forward_and_backward() {
    let host = Line("import { } from");
    let at = Position::new(0, 8);
    assert_eq!(host.chars_at(at, 2).unwrap(), " }");
    assert_eq!(host.chars_at(at, -1).unwrap(), "{");
    assert_eq!(host.chars_at(at, -2).unwrap(), " {");
    assert_eq!(host.chars_at(at, 0).unwrap(), "");
  }

  #[test]
  fn reads_clip_at_line_end() {
    let host = Line("{ }");
    assert_eq!(host.chars_at(Position::new(0, 2), 2).unwrap(), "}");
    assert_eq!(host.chars_at(Position::new(0, 3), 2).unwrap(), "");
    assert_eq!(host.chars_at(Position::new(0, 9), -2).unwrap(), "");
  }

  #[test]
  fn reading_before_line_start_fails() {
    let host = Line("{ }");
    assert_eq!(
      host.chars_at(Position::new(0, 0), -1),
      Err(HostError::BeforeLineStart {
        line: 0,
        col:  0,
        back: 1,
      })
    );
    assert!(host.chars_at(Position::new(0, 1), -2).is_err());
    assert!(host.chars_at(Position::new(1, 0), 1).is_err());
  }
}
