//! Configured delimiter pairs and the lookup tables derived from them.
//!
//! The padder works with single-char pairs only. From the configured
//! opening → closing mapping, [`PairRegistry`] precomputes:
//!
//! - **closing → opening**, to find the pair a typed closer belongs to;
//! - the **pad table**, keyed by `<open><space>`, answering "which closer
//!   should follow the cursor for a space to be mirrored";
//! - the **unpad table**, keyed by the opener left of the cursor, answering
//!   "which two chars right of the cursor make a padded pair".
//!
//! ```ignore
//! use padder_lib::pairs::PairRegistry;
//!
//! let pairs = PairRegistry::default();
//! assert_eq!(pairs.opening_for('}'), Some('{'));
//! assert_eq!(pairs.pad_for("{ "), Some('}'));
//! assert!(pairs.is_unpad_match('{', " }"));
//! ```
//!
//! # Default Pairs
//!
//! [`DEFAULT_PAIRS`] holds `()`, `[]`, `{}` and the three quote pairs, where
//! opening and closing are the same char.

use std::collections::HashMap;

use smallvec::SmallVec;

pub const DEFAULT_PAIRS: &[(char, char)] = &[
  ('(', ')'),
  ('[', ']'),
  ('{', '}'),
  ('"', '"'),
  ('\'', '\''),
  ('`', '`'),
];

/// Pairs the line scanner strips in this order, ahead of any other configured
/// pair: quotes first so that brackets inside strings are ignored, then
/// brackets from the outermost-prone `{}` to `()`.
const CANONICAL_STRIP_ORDER: &[(char, char)] = &[
  ('\'', '\''),
  ('"', '"'),
  ('`', '`'),
  ('{', '}'),
  ('[', ']'),
  ('(', ')'),
];

/// Represents the config for a particular pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pair {
  pub open:  char,
  pub close: char,
}

impl Pair {
  pub const fn new(open: char, close: char) -> Self {
    Self { open, close }
  }

  /// true if open == close
  pub const fn same(&self) -> bool {
    self.open == self.close
  }
}

impl From<(char, char)> for Pair {
  fn from((open, close): (char, char)) -> Self {
    Self::new(open, close)
  }
}

impl From<&(char, char)> for Pair {
  fn from(&(open, close): &(char, char)) -> Self {
    Self::new(open, close)
  }
}

impl From<(&char, &char)> for Pair {
  fn from((open, close): (&char, &char)) -> Self {
    Self::new(*open, *close)
  }
}

/// Immutable lookup tables built once from the configured pairs.
#[derive(Debug, Clone)]
pub struct PairRegistry {
  pairs:              Vec<Pair>,
  closing_to_opening: HashMap<char, char>,
  pad:                HashMap<[char; 2], char>,
  unpad:              HashMap<char, [char; 2]>,
  strip_order:        SmallVec<[Pair; 8]>,
}

impl PairRegistry {
  /// Build the registry from `pairs`, in configuration order.
  ///
  /// Openings and closings are expected to be unique; configuration loading
  /// rejects anything else. Should a duplicate slip through anyway, the first
  /// pair wins and the rest are dropped with a warning.
  pub fn new<V, A>(pairs: V) -> Self
  where
    V: IntoIterator<Item = A>,
    A: Into<Pair>,
  {
    let iter = pairs.into_iter();
    let (lower, upper) = iter.size_hint();
    let capacity = upper.unwrap_or(lower);

    let mut registry = Self {
      pairs:              Vec::with_capacity(capacity),
      closing_to_opening: HashMap::with_capacity(capacity),
      pad:                HashMap::with_capacity(capacity),
      unpad:              HashMap::with_capacity(capacity),
      strip_order:        SmallVec::new(),
    };

    for pair in iter {
      let pair: Pair = pair.into();
      if registry.closing_to_opening.contains_key(&pair.close)
        || registry.unpad.contains_key(&pair.open)
      {
        tracing::warn!(
          "ignoring pair {:?}{:?}: its delimiters are already configured",
          pair.open,
          pair.close
        );
        continue;
      }

      registry.closing_to_opening.insert(pair.close, pair.open);
      registry.pad.insert([pair.open, ' '], pair.close);
      registry.unpad.insert(pair.open, [' ', pair.close]);
      registry.pairs.push(pair);
    }

    registry.strip_order = strip_order(&registry.pairs);
    registry
  }

  pub fn pairs(&self) -> &[Pair] {
    &self.pairs
  }

  /// The opening delimiter whose closing delimiter is `close`.
  pub fn opening_for(&self, close: char) -> Option<char> {
    self.closing_to_opening.get(&close).copied()
  }

  /// The closing delimiter expected after `prev`, which must be exactly an
  /// opening delimiter followed by a space.
  pub fn pad_for(&self, prev: &str) -> Option<char> {
    let mut chars = prev.chars();
    let key = match (chars.next(), chars.next(), chars.next()) {
      (Some(open), Some(space), None) => [open, space],
      _ => return None,
    };
    self.pad.get(&key).copied()
  }

  /// The two chars that must follow the cursor when `prev` sits right before
  /// it for the pair to count as padded, i.e. a space and the closer.
  pub fn unpad_for(&self, prev: char) -> Option<[char; 2]> {
    self.unpad.get(&prev).copied()
  }

  /// true if `next` reads exactly `<space><close>` for the pair opened by
  /// `prev`.
  pub fn is_unpad_match(&self, prev: char, next: &str) -> bool {
    let Some(expected) = self.unpad_for(prev) else {
      return false;
    };
    let mut chars = next.chars();
    chars.next() == Some(expected[0]) && chars.next() == Some(expected[1]) && chars.next().is_none()
  }

  /// true if `ch` opens or closes a configured pair.
  pub fn is_delimiter(&self, ch: char) -> bool {
    self.unpad.contains_key(&ch) || self.closing_to_opening.contains_key(&ch)
  }

  /// Pairs in the order the line scanner strips closed spans: the built-in
  /// quotes and brackets first, then any other configured pair, quotes ahead
  /// of brackets.
  pub fn strip_order(&self) -> &[Pair] {
    &self.strip_order
  }
}

impl Default for PairRegistry {
  fn default() -> Self {
    PairRegistry::new(DEFAULT_PAIRS.iter())
  }
}

fn strip_order(configured: &[Pair]) -> SmallVec<[Pair; 8]> {
  let mut order: SmallVec<[Pair; 8]> = CANONICAL_STRIP_ORDER.iter().map(Pair::from).collect();

  let extra = configured
    .iter()
    .copied()
    .filter(|pair| !CANONICAL_STRIP_ORDER.contains(&(pair.open, pair.close)));
  let (quotes, brackets): (SmallVec<[Pair; 4]>, SmallVec<[Pair; 4]>) =
    extra.partition(|pair| pair.same());

  let first_bracket = order.iter().position(|pair| !pair.same()).unwrap_or(order.len());
  order.insert_many(first_bracket, quotes);
  order.extend(brackets);
  order
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn default_tables() {
    let pairs = PairRegistry::default();

    for &(open, close) in DEFAULT_PAIRS {
      assert_eq!(pairs.opening_for(close), Some(open));
      assert_eq!(pairs.pad_for(&format!("{open} ")), Some(close));
      assert_eq!(pairs.unpad_for(open), Some([' ', close]));
      assert!(pairs.is_delimiter(open));
      assert!(pairs.is_delimiter(close));
    }

    assert_eq!(pairs.pairs().len(), DEFAULT_PAIRS.len());
    assert_eq!(pairs.opening_for('{'), None);
    assert!(!pairs.is_delimiter('<'));
  }

  #[test]
  fn pad_lookup_requires_exactly_open_and_space() {
    let pairs = PairRegistry::default();

    assert_eq!(pairs.pad_for("{"), None);
    assert_eq!(pairs.pad_for("{}"), None);
    assert_eq!(pairs.pad_for(" {"), None);
    assert_eq!(pairs.pad_for("{  "), None);
    assert_eq!(pairs.pad_for(""), None);
    assert_eq!(pairs.pad_for("} "), None);
  }

  #[test]
  fn unpad_match() {
    let pairs = PairRegistry::default();

    assert!(pairs.is_unpad_match('{', " }"));
    assert!(pairs.is_unpad_match('"', " \""));
    assert!(!pairs.is_unpad_match('{', " ]"));
    assert!(!pairs.is_unpad_match('{', "}"));
    assert!(!pairs.is_unpad_match('{', " } "));
    assert!(!pairs.is_unpad_match(' ', "} "));
  }

  #[test]
  fn duplicates_keep_the_first_pair() {
    let pairs = PairRegistry::new([('(', ')'), ('[', ')'), ('(', ']')]);

    assert_eq!(pairs.pairs(), &[Pair::new('(', ')')]);
    assert_eq!(pairs.opening_for(')'), Some('('));
    assert_eq!(pairs.opening_for(']'), None);
    assert_eq!(pairs.pad_for("[ "), None);
  }

  #[test]
  fn custom_pairs() {
    let pairs = PairRegistry::new([('<', '>'), ('|', '|')]);

    assert_eq!(pairs.pad_for("< "), Some('>'));
    assert!(pairs.is_unpad_match('|', " |"));
    assert_eq!(pairs.pad_for("{ "), None);
    assert!(!pairs.is_delimiter('{'));
  }

  #[test]
  fn extra_pairs_are_stripped_after_their_class() {
    let pairs = PairRegistry::new([('<', '>'), ('(', ')'), ('|', '|')]);
    let order: Vec<_> = pairs.strip_order().iter().map(|pair| pair.open).collect();

    assert_eq!(order, ['\'', '"', '`', '|', '{', '[', '(', '<']);
  }
}
