//! Lexical scan for delimiters left open on a single line.
//!
//! This is not a parser. It approximates bracket/quote matching on one line
//! by deleting closed spans until only dangling delimiters remain:
//!
//! 1. Escaped quotes (`\"`, `\'`) are removed so they never act as
//!    delimiters.
//! 2. Closed quoted spans are stripped: `'…'`, then `"…"`, then `` `…` ``.
//! 3. Closed bracket spans are stripped: `{…}`, then `[…]`, then `(…)`, each
//!    kind repeatedly until it no longer changes.
//! 4. What is left is filtered down to configured delimiters.
//!
//! ```text
//! import { foo: "b{ar", bar: (1, 2),
//!        {      "     "       (    )     step 2 removes "b{ar"
//!        {                    (    )     step 3 removes (1, 2)
//!        {                                -> ['{']
//! ```
//!
//! The last element of the result is the innermost delimiter still open at the
//! end of the scanned text. Unmatched closers survive stripping and appear in
//! the result too; callers comparing the top of the stack to an opener simply
//! see a mismatch.
//!
//! Empty spans such as `()` or `""` count as closed, and spans nested in one
//! of the same kind are removed inside out, so `{ foo() ` and `{a{b}c} {`
//! both leave a single `{`.
//!
//! Constructs spanning several lines, or strings containing unbalanced
//! brackets of their own kind, will mis-scan.

use std::borrow::Cow;

use padder_core::chars::{
  ESCAPE,
  char_is_escapable_quote,
};
use smallvec::SmallVec;

use crate::pairs::{
  Pair,
  PairRegistry,
};

/// Delimiters still open, outermost first.
pub type Unclosed = SmallVec<[char; 8]>;

/// Remove every backslash-escaped `"` or `'`, escape included.
///
/// This is a plain textual substitution applied once, left to right; it does
/// not try to tell whether the backslash is itself escaped.
pub fn remove_escaped_quotes(text: &str) -> Cow<'_, str> {
  if !text.contains(ESCAPE) {
    return Cow::Borrowed(text);
  }

  let mut out = String::with_capacity(text.len());
  let mut chars = text.chars().peekable();
  while let Some(ch) = chars.next() {
    if ch == ESCAPE && chars.peek().copied().is_some_and(char_is_escapable_quote) {
      chars.next();
      continue;
    }
    out.push(ch);
  }
  Cow::Owned(out)
}

/// Delimiters left open in `text`, innermost last.
pub fn unclosed_pairs(text: &str, pairs: &PairRegistry) -> Unclosed {
  unclosed_pairs_unescaped(&remove_escaped_quotes(text), pairs)
}

/// Like [`unclosed_pairs`] for text that already went through
/// [`remove_escaped_quotes`].
pub fn unclosed_pairs_unescaped(text: &str, pairs: &PairRegistry) -> Unclosed {
  strip_closed_pairs(text, pairs)
    .chars()
    .filter(|&ch| pairs.is_delimiter(ch))
    .collect()
}

/// `text` with every closed quote and bracket span removed.
pub fn strip_closed_pairs(text: &str, pairs: &PairRegistry) -> String {
  let mut text = text.to_owned();
  let order = pairs.strip_order();
  let split = order
    .iter()
    .position(|pair| !pair.same())
    .unwrap_or(order.len());
  let (quotes, brackets) = order.split_at(split);

  for &pair in quotes {
    strip_until_stable(&mut text, pair);
  }

  loop {
    let mut changed = false;
    for &pair in brackets {
      changed |= strip_until_stable(&mut text, pair);
    }
    if !changed {
      break;
    }
  }

  text
}

fn strip_until_stable(text: &mut String, pair: Pair) -> bool {
  let mut changed = false;
  while let Some(stripped) = strip_spans(text, pair) {
    *text = stripped;
    changed = true;
  }
  changed
}

/// One left-to-right pass removing the shortest spans `open … close` whose
/// interior holds no `open`. Returns `None` when nothing was removed.
fn strip_spans(text: &str, pair: Pair) -> Option<String> {
  if !text.contains(pair.open) {
    return None;
  }

  let mut out = String::with_capacity(text.len());
  let mut open_at = None;
  let mut stripped = false;

  for ch in text.chars() {
    if ch == pair.close
      && let Some(start) = open_at.take()
    {
      out.truncate(start);
      stripped = true;
      continue;
    }
    if ch == pair.open {
      open_at = Some(out.len());
    }
    out.push(ch);
  }

  stripped.then_some(out)
}
