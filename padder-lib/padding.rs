//! Keeping bracket and quote pairs padded while typing.
//!
//! The padder reacts to single keystrokes the host has already applied:
//!
//! ```text
//! Pad        typed ' ' in  {|}       ->  { | }
//! Unpad      backspace in  { | }     ->  {|}
//! SkipClose  typed '}' in  { foo | } ->  { foo  }|
//! ```
//!
//! Deciding and acting are separate steps. [`Padder::classify`] looks at the
//! event and the line it happened on and returns an [`Action`];
//! [`Padder::execute`] turns that action into host edits. The reaction is
//! submitted with [`EditOptions::GROUPED`] so that a single undo reverts the
//! keystroke together with the reaction.
//!
//! Every rule fails open: a host error while gathering context only means no
//! action, and [`Padder::on_change_event`] never returns an error.

use std::fmt;

use padder_core::chars::{
  char_len,
  char_slice,
  single_char,
};
use smallvec::smallvec;

use crate::{
  change::{
    ChangeEvent,
    EventShape,
  },
  config::PadderConfig,
  edit::{
    Edit,
    EditOptions,
    Edits,
  },
  host::{
    self,
    Host,
    HostError,
  },
  pairs::PairRegistry,
  position::Position,
  scanner::{
    remove_escaped_quotes,
    unclosed_pairs_unescaped,
  },
  selection::Range,
};

/// What the padder decided to do about one change event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
  /// Remove the space before the closer of a pair the user just un-padded.
  Unpad { delete: Edit },
  /// Mirror a space typed after an opener.
  Pad { insert: Edit, cursor: Position },
  /// Drop a typed closer and step over the one already there.
  SkipClose { delete: Edit, cursor: Position },
  NoAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
  Unpad,
  Pad,
  SkipClose,
  NoAction,
}

impl fmt::Display for ActionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Self::Unpad => "unpad",
      Self::Pad => "pad",
      Self::SkipClose => "skip-close",
      Self::NoAction => "no-action",
    };
    f.write_str(name)
  }
}

impl Action {
  pub fn kind(&self) -> ActionKind {
    match self {
      Self::Unpad { .. } => ActionKind::Unpad,
      Self::Pad { .. } => ActionKind::Pad,
      Self::SkipClose { .. } => ActionKind::SkipClose,
      Self::NoAction => ActionKind::NoAction,
    }
  }

  /// The edits to submit, in pre-edit coordinates.
  pub fn edits(&self) -> Edits {
    match self {
      Self::Unpad { delete } | Self::SkipClose { delete, .. } => smallvec![delete.clone()],
      Self::Pad { insert, .. } => smallvec![insert.clone()],
      Self::NoAction => Edits::new(),
    }
  }

  /// Where the cursor goes once the edits are applied, if it moves at all.
  pub fn cursor(&self) -> Option<Position> {
    match self {
      Self::Pad { cursor, .. } | Self::SkipClose { cursor, .. } => Some(*cursor),
      Self::Unpad { .. } | Self::NoAction => None,
    }
  }
}

/// How [`Padder::on_change_event`] handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// The action was applied.
  Applied(ActionKind),
  /// Nothing to do.
  Ignored,
  /// The host refused the edit or the cursor move.
  Failed(ActionKind),
}

#[derive(Debug, Clone)]
pub struct Padder {
  registry:         PairRegistry,
  max_parse_length: usize,
}

impl Default for Padder {
  fn default() -> Self {
    Self::new(&PadderConfig::default())
  }
}

impl Padder {
  pub fn new(config: &PadderConfig) -> Self {
    Self::with_registry(config.registry(), config.smart_close_max_parse_length)
  }

  pub fn with_registry(registry: PairRegistry, max_parse_length: usize) -> Self {
    Self {
      registry,
      max_parse_length,
    }
  }

  pub fn registry(&self) -> &PairRegistry {
    &self.registry
  }

  pub fn max_parse_length(&self) -> usize {
    self.max_parse_length
  }

  /// Classify `event` and apply the resulting action.
  pub fn on_change_event<H: Host + ?Sized>(&self, event: &ChangeEvent, host: &mut H) -> Outcome {
    let action = self.classify(event, host);
    let kind = action.kind();
    if kind == ActionKind::NoAction {
      return Outcome::Ignored;
    }

    match self.execute(&action, host) {
      Ok(_) => {
        tracing::debug!(%kind, "applied padding action");
        Outcome::Applied(kind)
      },
      Err(err) => {
        tracing::warn!(%kind, "failed to apply padding action: {err}");
        Outcome::Failed(kind)
      },
    }
  }

  /// Decide how to react to `event`, which the host has already applied.
  pub fn classify<H: Host + ?Sized>(&self, event: &ChangeEvent, host: &H) -> Action {
    let selections = host.selections();
    let [selection] = selections.as_slice() else {
      tracing::trace!(
        "padding needs exactly one selection, got {}",
        selections.len()
      );
      return Action::NoAction;
    };

    let shape = event.shape();
    tracing::trace!(?shape, ?event, "classifying change");

    let action = match shape {
      EventShape::Space => self.pad(event, host),
      EventShape::Backspace => self.unpad(selection.cursor(), host),
      EventShape::Typed(typed) => self.skip_close(event, typed, host),
      EventShape::Other => Ok(Action::NoAction),
    };

    action.unwrap_or_else(|err| {
      tracing::debug!("no padding action: {err}");
      Action::NoAction
    })
  }

  /// Submit `action` to the host. Returns `false` for [`Action::NoAction`].
  ///
  /// The cursor is only moved once the edits went through.
  pub fn execute<H: Host + ?Sized>(&self, action: &Action, host: &mut H) -> host::Result<bool> {
    if let Action::NoAction = action {
      return Ok(false);
    }

    host.apply_edits(&action.edits(), EditOptions::GROUPED)?;
    if let Some(cursor) = action.cursor() {
      host.set_selection(Range::point(cursor))?;
    }
    Ok(true)
  }

  /// `{|␠}` after a backspace: drop the space before the closer.
  fn unpad<H: Host + ?Sized>(&self, cursor: Position, host: &H) -> host::Result<Action> {
    let prev = host.chars_at(cursor, -1)?;
    let next = host.chars_at(cursor, 2)?;

    let Some(prev) = single_char(&prev) else {
      return Ok(Action::NoAction);
    };
    if !self.registry.is_unpad_match(prev, &next) {
      return Ok(Action::NoAction);
    }

    Ok(Action::Unpad {
      delete: Edit::delete(cursor, step(cursor, 1)?),
    })
  }

  /// `{␠|}` after typing a space: mirror it before the closer.
  fn pad<H: Host + ?Sized>(&self, event: &ChangeEvent, host: &H) -> host::Result<Action> {
    let before = event.start;
    let after = step(before, 1)?;

    let prev = host.chars_at(after, -2)?;
    let next = host.chars_at(after, 1)?;

    match self.registry.pad_for(&prev) {
      Some(close) if single_char(&next) == Some(close) => {
        Ok(Action::Pad {
          insert: Edit::insert(before, " "),
          cursor: after,
        })
      },
      _ => Ok(Action::NoAction),
    }
  }

  /// `{ foo }|␠}` after typing a closer in front of a padded closer: drop the
  /// typed one and step past the existing one, provided the opener is the
  /// innermost pair still open on the line.
  fn skip_close<H: Host + ?Sized>(
    &self,
    event: &ChangeEvent,
    typed: char,
    host: &H,
  ) -> host::Result<Action> {
    let Some(opening) = self.registry.opening_for(typed) else {
      return Ok(Action::NoAction);
    };

    let start = event.start;
    let line = host.line_text(start.row)?;
    let len = char_len(&line);
    if len > self.max_parse_length {
      tracing::trace!(
        "line {} has {len} chars, over the parse limit of {}",
        start.row,
        self.max_parse_length
      );
      return Ok(Action::NoAction);
    }

    let idx = start.col;
    let ahead = char_slice(&line, idx.saturating_add(1), idx.saturating_add(3));
    if !ahead.chars().eq([' ', typed]) {
      return Ok(Action::NoAction);
    }

    let prefix = remove_escaped_quotes(char_slice(&line, 0, idx));
    if !prefix.contains(opening) {
      return Ok(Action::NoAction);
    }
    let unclosed = unclosed_pairs_unescaped(&prefix, &self.registry);
    tracing::trace!(?unclosed, "unclosed delimiters before the cursor");
    if unclosed.last() != Some(&opening) {
      return Ok(Action::NoAction);
    }

    Ok(Action::SkipClose {
      delete: Edit::delete(start, step(start, 1)?),
      cursor: step(start, 2)?,
    })
  }
}

fn step(pos: Position, cols: isize) -> host::Result<Position> {
  pos.translate(cols).ok_or(HostError::out_of_bounds(pos))
}
