//! Pattern occurrence scanning over a buffer window.
//!
//! [`scan`] finds every non-overlapping match of a pattern inside a
//! half-open char-offset window and yields [`Range`]s in absolute buffer
//! offsets, lazily and in buffer order. The pattern engine's leftmost-first
//! semantics are relied upon unchanged; the scanner itself is
//! pattern-agnostic.
//!
//! Word and WORD occurrence queries are run patterns (`\w+`, `\S+`) whose
//! matches are optionally narrowed to their first or last character with
//! [`MatchPart`]; the run pattern plus projection replaces the
//! lookaround-anchored boundary patterns the engine cannot express.

use mc_stdx::rope::{
  self,
  RopeSliceExt,
};
use ropey::RopeSlice;

use crate::selection::Range;

/// Which part of each match becomes the produced range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPart {
  /// The whole match.
  Whole,
  /// A caret on the first character (word-start queries).
  First,
  /// A caret on the last character (word-end queries).
  Last,
}

impl MatchPart {
  #[must_use]
  pub fn project(self, range: Range) -> Range {
    match self {
      MatchPart::Whole => range,
      MatchPart::First => Range::point(range.start),
      MatchPart::Last => Range::point(range.end),
    }
  }
}

/// Finds all non-overlapping matches of `regex` inside the half-open char
/// window `[window_start, window_end)`.
///
/// Ranges come out in buffer order with absolute offsets. An empty match
/// yields a caret range, except when it is pinned to the window end: those
/// come from anchors like `$` matching right outside the window and are
/// dropped.
pub fn scan<'a>(
  text: RopeSlice<'a>,
  window_start: usize,
  window_end: usize,
  regex: &'a rope::Regex,
) -> impl Iterator<Item = Range> + 'a {
  let window_end = window_end.min(text.len_chars());
  let window_start = window_start.min(window_end);

  regex
    .find_iter(text.regex_input_at(window_start..window_end))
    .filter_map(move |mat| {
      let start = text.byte_to_char(mat.start());
      let end = text.byte_to_char(mat.end());
      if start == end {
        (end != window_end).then(|| Range::point(start))
      } else {
        Some(Range::new(start, end - 1))
      }
    })
}

#[cfg(test)]
mod test {
  use ropey::Rope;

  use super::*;

  fn scan_all(text: &str, pattern: &str) -> Vec<Range> {
    let rope = Rope::from(text);
    let regex = rope::Regex::new(pattern).unwrap();
    scan(rope.slice(..), 0, rope.len_chars(), &regex).collect()
  }

  #[test]
  fn whole_buffer_occurrences_in_order() {
    assert_eq!(scan_all("foo bar foo baz", "foo"), vec![
      Range::new(0, 2),
      Range::new(8, 10)
    ]);
  }

  #[test]
  fn window_remaps_to_absolute_offsets() {
    let rope = Rope::from("foo bar foo baz");
    let regex = rope::Regex::new("foo").unwrap();

    let matches: Vec<_> = scan(rope.slice(..), 4, 11, &regex).collect();
    assert_eq!(matches, vec![Range::new(8, 10)]);
  }

  #[test]
  fn window_clamps_to_buffer_length() {
    let rope = Rope::from("foo");
    let regex = rope::Regex::new("foo").unwrap();

    let matches: Vec<_> = scan(rope.slice(..), 0, 100, &regex).collect();
    assert_eq!(matches, vec![Range::new(0, 2)]);
  }

  #[test]
  fn word_runs() {
    assert_eq!(scan_all("one  two;three", r"\w+"), vec![
      Range::new(0, 2),
      Range::new(5, 7),
      Range::new(9, 13)
    ]);
  }

  #[test]
  fn big_word_runs_are_maximal() {
    assert_eq!(scan_all("a-b c;d", r"\S+"), vec![
      Range::new(0, 2),
      Range::new(4, 6)
    ]);
  }

  #[test]
  fn empty_match_becomes_caret() {
    let rope = Rope::from("ab\ncd");
    let regex = rope::RegexBuilder::new()
      .syntax(rope::Config::new().multi_line(true))
      .build("^")
      .unwrap();

    let matches: Vec<_> = scan(rope.slice(..), 0, rope.len_chars(), &regex).collect();
    assert_eq!(matches, vec![Range::point(0), Range::point(3)]);
  }

  #[test]
  fn empty_match_at_window_end_is_dropped() {
    let rope = Rope::from("ab\ncd");
    let regex = rope::RegexBuilder::new()
      .syntax(rope::Config::new().multi_line(true))
      .build("$")
      .unwrap();

    // `$` matches at 2 (before the newline) and at the very end of the
    // window; the latter sits outside every selection and is dropped.
    let matches: Vec<_> = scan(rope.slice(..), 0, rope.len_chars(), &regex).collect();
    assert_eq!(matches, vec![Range::point(2)]);
  }

  #[test]
  fn projection_narrows_to_run_boundaries() {
    let ranges = scan_all("one  two", r"\w+");

    let firsts: Vec<_> = ranges
      .iter()
      .map(|&range| MatchPart::First.project(range))
      .collect();
    assert_eq!(firsts, vec![Range::point(0), Range::point(5)]);

    let lasts: Vec<_> = ranges
      .iter()
      .map(|&range| MatchPart::Last.project(range))
      .collect();
    assert_eq!(lasts, vec![Range::point(2), Range::point(7)]);
  }
}
