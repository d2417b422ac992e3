//! Literal and character search within a rope slice.
//!
//! These are the bounded linear scans the pair matcher and the char-search
//! commands are built on: matching a literal (possibly multi-character)
//! delimiter at a position, locating its next/previous occurrence, and
//! collecting every occurrence of a single character either inside a range
//! or radiating out from the caret.
//!
//! All positions are char indices. `n` passed to nothing here; occurrences
//! are collected exhaustively because the callers fan them out into carets.

use ropey::RopeSlice;

use crate::selection::Range;

/// True if `literal` occurs at char position `pos`.
pub fn matches_at(text: RopeSlice, pos: usize, literal: &str) -> bool {
  if literal.is_empty() || pos > text.len_chars() {
    return false;
  }
  let mut chars = text.chars_at(pos);
  literal.chars().all(|expected| chars.next() == Some(expected))
}

/// First occurrence of `literal` at or after `from`.
pub fn find_next_str(text: RopeSlice, literal: &str, from: usize) -> Option<usize> {
  if literal.is_empty() {
    return None;
  }
  let first = literal.chars().next()?;
  let len = text.len_chars();
  let mut pos = from.min(len);
  let mut chars = text.chars_at(pos);
  while pos < len {
    // Cheap first-char probe before the full literal comparison.
    if chars.next() == Some(first) && matches_at(text, pos, literal) {
      return Some(pos);
    }
    pos += 1;
  }
  None
}

/// Last occurrence of `literal` starting strictly before `before`.
pub fn find_prev_str(text: RopeSlice, literal: &str, before: usize) -> Option<usize> {
  if literal.is_empty() {
    return None;
  }
  let first = literal.chars().next()?;
  let mut pos = before.min(text.len_chars());
  let mut chars = text.chars_at(pos);
  while pos > 0 {
    pos -= 1;
    if chars.prev() == Some(first) && matches_at(text, pos, literal) {
      return Some(pos);
    }
  }
  None
}

/// Every position of `ch` inside the inclusive `range`, in buffer order.
pub fn char_occurrences_within(text: RopeSlice, range: Range, ch: char) -> Vec<usize> {
  let len = text.len_chars();
  let start = range.start.min(len);
  let end = (range.end + 1).min(len);

  text
    .slice(start..end)
    .chars()
    .enumerate()
    .filter(|&(_, c)| c == ch)
    .map(|(i, _)| start + i)
    .collect()
}

/// Every position of `ch` in the buffer, ordered as the char-search command
/// wants them: positions at or after `caret` ascending, then positions
/// before `caret` descending. The first hit after the caret ends up primary.
pub fn char_occurrences_around(text: RopeSlice, caret: usize, ch: char) -> Vec<usize> {
  let len = text.len_chars();
  let caret = caret.min(len);
  let mut positions = Vec::new();

  let mut chars = text.chars_at(caret);
  let mut pos = caret;
  while let Some(c) = chars.next() {
    if c == ch {
      positions.push(pos);
    }
    pos += 1;
  }

  let mut chars = text.chars_at(caret);
  let mut pos = caret;
  while let Some(c) = chars.prev() {
    pos -= 1;
    if c == ch {
      positions.push(pos);
    }
  }

  positions
}

/// Bounds of the alphanumeric run around `offset`: `(start, end)` where
/// `start` is the run's first char and `end` is one past its last. Each
/// bound stays at `offset` when there is no run char on its side.
pub fn word_bounds(text: RopeSlice, offset: usize) -> (usize, usize) {
  let len = text.len_chars();

  let mut start = offset.min(len);
  let mut chars = text.chars_at(start);
  while let Some(c) = chars.prev() {
    if !c.is_alphanumeric() {
      break;
    }
    start -= 1;
  }

  let mut end = offset.min(len);
  let mut chars = text.chars_at(end);
  while let Some(c) = chars.next() {
    if !c.is_alphanumeric() {
      break;
    }
    end += 1;
  }

  (start, end)
}
