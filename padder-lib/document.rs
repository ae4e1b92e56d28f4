//! Reference host: a single in-memory buffer with cursors and undo.
//!
//! [`Document`] implements [`Host`] and doubles as a keystroke simulator:
//! [`Document::type_text`] and [`Document::backspace`] edit the buffer the way
//! an editor would and return the [`ChangeEvent`] that editor would report.
//!
//! # Example
//!
//! ```no_run
//! use padder_lib::{
//!   document::Document,
//!   padding::Padder,
//! };
//!
//! let mut doc = Document::from_marked("import {|} from 'library'").unwrap();
//! let event = doc.type_text(" ").unwrap();
//! Padder::default().on_change_event(&event, &mut doc);
//! assert_eq!(doc.marked(), "import { | } from 'library'");
//! ```
//!
//! # Undo
//!
//! Every simulated keystroke opens a new undo step. Edits submitted through
//! [`Host::apply_edits`] open one only when `undo_stop_before` is set, so a
//! grouped reaction is undone together with the keystroke that caused it.

use std::borrow::Cow;

use padder_core::{
  chars::char_len,
  line_ending::{
    line_end_char_index,
    line_without_line_ending,
  },
};
use ropey::Rope;
use smallvec::smallvec;

use crate::{
  Tendril,
  change::ChangeEvent,
  edit::{
    Edit,
    EditOptions,
  },
  history::{
    History,
    State,
  },
  host::{
    Host,
    HostError,
    Result,
  },
  position::{
    Position,
    char_idx_at_coords,
    coords_at_pos,
  },
  selection::{
    Range,
    Selections,
  },
};

/// Cursor marker understood by [`Document::from_marked`] and produced by
/// [`Document::marked`].
pub const CURSOR_MARKER: char = '|';

#[derive(Debug, Clone)]
pub struct Document {
  text:       Rope,
  selections: Selections,
  history:    History,
}

/// An edit resolved to char indices.
struct Change {
  from: usize,
  to:   usize,
  text: Tendril,
}

impl Document {
  /// A document with a single cursor at the start.
  pub fn new(text: impl AsRef<str>) -> Self {
    Self::with_cursor(text, Position::zero())
  }

  pub fn with_cursor(text: impl AsRef<str>, cursor: Position) -> Self {
    Self {
      text:       Rope::from(text.as_ref()),
      selections: smallvec![Range::point(cursor)],
      history:    History::default(),
    }
  }

  /// Parse text with one [`CURSOR_MARKER`] per cursor, e.g. `"{|}"`.
  ///
  /// Returns `None` when the text has no marker.
  pub fn from_marked(marked: &str) -> Option<Self> {
    let mut text = String::with_capacity(marked.len());
    let mut cursors = Vec::new();
    let mut idx = 0;
    for ch in marked.chars() {
      if ch == CURSOR_MARKER {
        cursors.push(idx);
      } else {
        text.push(ch);
        idx += 1;
      }
    }
    if cursors.is_empty() {
      return None;
    }

    let rope = Rope::from(text);
    let selections = cursors
      .into_iter()
      .map(|idx| Range::point(coords_at_pos(rope.slice(..), idx)))
      .collect();
    Some(Self {
      text: rope,
      selections,
      history: History::default(),
    })
  }

  /// The text with a [`CURSOR_MARKER`] at every cursor head.
  pub fn marked(&self) -> String {
    let mut heads: Vec<usize> = self
      .selections
      .iter()
      .map(|range| self.char_idx_clamped(range.head))
      .collect();
    heads.sort_unstable();
    heads.dedup();

    let mut text = self.text.clone();
    for idx in heads.into_iter().rev() {
      text.insert_char(idx, CURSOR_MARKER);
    }
    text.to_string()
  }

  pub fn text(&self) -> &Rope {
    &self.text
  }

  pub fn history(&self) -> &History {
    &self.history
  }

  /// The head of the primary selection.
  pub fn cursor(&self) -> Option<Position> {
    self.selections.first().map(Range::cursor)
  }

  pub fn set_selections(&mut self, selections: Selections) {
    self.selections = selections;
  }

  /// Text of `line` without its line ending.
  pub fn line(&self, line: usize) -> Option<String> {
    let text = self.text.slice(..);
    (line < text.len_lines()).then(|| line_without_line_ending(&text, line).to_string())
  }

  pub fn undo(&mut self) -> bool {
    let current = self.state();
    let Some(state) = self.history.undo(current) else {
      return false;
    };
    self.restore(state);
    true
  }

  pub fn redo(&mut self) -> bool {
    let current = self.state();
    let Some(state) = self.history.redo(current) else {
      return false;
    };
    self.restore(state);
    true
  }

  /// Type `text` over the primary selection, as a keystroke.
  ///
  /// Returns `None` when there is no selection to type at.
  pub fn type_text(&mut self, text: &str) -> Option<ChangeEvent> {
    let range = *self.selections.first()?;
    let from = self.char_idx_clamped(range.from());
    let to = self.char_idx_clamped(range.to());

    let event = ChangeEvent::new(
      coords_at_pos(self.text.slice(..), from),
      coords_at_pos(self.text.slice(..), to),
      text,
    )
    .with_range_length(to - from);

    self.keystroke(Change {
      from,
      to,
      text: text.into(),
    });
    self.selections[0] = Range::point(event.start.traverse(text));

    tracing::trace!(?event, "typed");
    Some(event)
  }

  /// Delete the primary selection, or the char before the cursor, as a
  /// keystroke. A CRLF line ending is removed as a whole.
  ///
  /// Returns `None` when there is nothing to delete.
  pub fn backspace(&mut self) -> Option<ChangeEvent> {
    let range = *self.selections.first()?;
    let to = self.char_idx_clamped(range.to());
    let from = if range.is_empty() {
      let prev = to.checked_sub(1)?;
      let crlf = self.text.get_char(prev) == Some('\n')
        && prev > 0
        && self.text.get_char(prev - 1) == Some('\r');
      if crlf { prev - 1 } else { prev }
    } else {
      self.char_idx_clamped(range.from())
    };

    let event = ChangeEvent::deletion(
      coords_at_pos(self.text.slice(..), from),
      coords_at_pos(self.text.slice(..), to),
    )
    .with_range_length(to - from);

    self.keystroke(Change {
      from,
      to,
      text: Tendril::new(),
    });
    self.selections[0] = Range::point(coords_at_pos(self.text.slice(..), from));

    tracing::trace!(?event, "deleted");
    Some(event)
  }

  fn keystroke(&mut self, change: Change) {
    self.history.commit(self.state());
    self.apply(vec![change]);
  }

  fn state(&self) -> State {
    State {
      text:      self.text.clone(),
      selection: self.selections.clone(),
    }
  }

  fn restore(&mut self, state: State) {
    self.text = state.text;
    self.selections = state.selection;
  }

  /// Char index of `pos`, clamped into the document.
  fn char_idx_clamped(&self, pos: Position) -> usize {
    let text = self.text.slice(..);
    let row = pos.row.min(text.len_lines() - 1);
    let line_start = text.line_to_char(row);
    let line_end = line_end_char_index(&text, row);
    (line_start + pos.col).min(line_end)
  }

  fn resolve(&self, edits: &[Edit]) -> Result<Vec<Change>> {
    let text = self.text.slice(..);
    let char_idx = |pos: Position| char_idx_at_coords(text, pos).ok_or(HostError::out_of_bounds(pos));

    let mut changes = edits
      .iter()
      .map(|edit| {
        match edit {
          Edit::Insert { at, text } => {
            let at = char_idx(*at)?;
            Ok(Change {
              from: at,
              to:   at,
              text: text.clone(),
            })
          },
          Edit::Delete { from, to } => {
            let (start, end) = (char_idx(*from)?, char_idx(*to)?);
            if start > end {
              return Err(HostError::out_of_bounds(*from));
            }
            Ok(Change {
              from: start,
              to:   end,
              text: Tendril::new(),
            })
          },
        }
      })
      .collect::<Result<Vec<_>>>()?;

    changes.sort_by_key(|change| (change.from, change.to));
    for (prev, next) in changes.iter().zip(changes.iter().skip(1)) {
      if next.from < prev.to || (next.from == prev.from && next.to == prev.to) {
        let pos = coords_at_pos(text, next.from);
        return Err(HostError::OverlappingEdits {
          line: pos.row,
          col:  pos.col,
        });
      }
    }
    Ok(changes)
  }

  /// Apply non-overlapping changes and map every selection through them.
  fn apply(&mut self, mut changes: Vec<Change>) {
    changes.sort_by_key(|change| std::cmp::Reverse((change.from, change.to)));

    let mut heads: Vec<(usize, usize)> = self
      .selections
      .iter()
      .map(|range| {
        (
          self.char_idx_clamped(range.anchor),
          self.char_idx_clamped(range.head),
        )
      })
      .collect();

    for change in &changes {
      let map = |pos: usize| {
        if pos >= change.to {
          pos - (change.to - change.from) + char_len(&change.text)
        } else if pos > change.from {
          change.from
        } else {
          pos
        }
      };
      for (anchor, head) in &mut heads {
        *anchor = map(*anchor);
        *head = map(*head);
      }

      self.text.remove(change.from..change.to);
      self.text.insert(change.from, &change.text);
    }

    let text = self.text.slice(..);
    self.selections = heads
      .into_iter()
      .map(|(anchor, head)| Range::new(coords_at_pos(text, anchor), coords_at_pos(text, head)))
      .collect();
  }
}

impl Host for Document {
  fn line_text(&self, line: usize) -> Result<Cow<'_, str>> {
    self
      .line(line)
      .map(Cow::Owned)
      .ok_or(HostError::LineOutOfBounds {
        line,
        len: self.text.len_lines(),
      })
  }

  fn selections(&self) -> Selections {
    self.selections.clone()
  }

  fn apply_edits(&mut self, edits: &[Edit], options: EditOptions) -> Result<()> {
    let changes = self.resolve(edits)?;
    if options.undo_stop_before {
      self.history.commit(self.state());
    }
    self.apply(changes);
    Ok(())
  }

  fn set_selection(&mut self, range: Range) -> Result<()> {
    let text = self.text.slice(..);
    for pos in [range.anchor, range.head] {
      char_idx_at_coords(text, pos).ok_or(HostError::out_of_bounds(pos))?;
    }
    self.selections = smallvec![range];
    Ok(())
  }
}
