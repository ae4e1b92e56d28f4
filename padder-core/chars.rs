use crate::line_ending::LineEnding;

/// The character that escapes a following quote inside a string literal.
pub const ESCAPE: char = '\\';

#[inline]
pub fn char_is_line_ending(ch: char) -> bool {
  LineEnding::from_char(ch).is_some()
}

/// Quotes that can be escaped with a backslash. Backticks are deliberately
/// not part of this set: `` \` `` stays a delimiter.
#[inline]
pub fn char_is_escapable_quote(ch: char) -> bool {
  matches!(ch, '"' | '\'')
}

/// Number of chars in `text`. Columns are always counted in chars.
#[inline]
pub fn char_len(text: &str) -> usize {
  text.chars().count()
}

/// Byte offset of the char at index `char_idx`, clamped to the end of `text`.
pub fn char_to_byte_clamped(text: &str, char_idx: usize) -> usize {
  text
    .char_indices()
    .nth(char_idx)
    .map_or(text.len(), |(byte, _)| byte)
}

/// Returns the chars `from..to` of `text`.
///
/// Both bounds are clamped to the end of the string and an inverted range
/// yields an empty slice, the same way slicing a line past its end behaves in
/// an editor.
pub fn char_slice(text: &str, from: usize, to: usize) -> &str {
  if from >= to {
    return "";
  }
  let start = char_to_byte_clamped(text, from);
  let end = char_to_byte_clamped(text, to);
  &text[start..end]
}

/// Returns the only char of `text`, or `None` when it is empty or longer.
#[inline]
pub fn single_char(text: &str) -> Option<char> {
  let mut chars = text.chars();
  match (chars.next(), chars.next()) {
    (Some(ch), None) => Some(ch),
    _ => None,
  }
}
