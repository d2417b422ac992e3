//! Nesting-aware delimiter pair matching.
//!
//! [`find_enclosing_pair`] locates the innermost delimiter pair around an
//! offset with two bounded linear scans, not a parse: a forward scan finds
//! the nearest unmatched close at or after the offset (stepping over fully
//! nested pairs via a counter), then a mirrored backward scan from that
//! close finds its open. Either scan reaching a buffer boundary without
//! balancing means no pair, and callers get `None` — unterminated contexts
//! are a silent no-match, never an error.
//!
//! Delimiters are literal strings and may be multi-character. Same-delimiter
//! pairs (quotes) carry no nesting information, so they degenerate to plain
//! next/previous occurrence scans around the offset.
//!
//! The returned ranges cover exactly the delimiter text; "inside"/"around"
//! semantics are expressed afterwards by shifting a boundary by the
//! delimiter length ([`PairMatch::object_ranges`]).

use ropey::RopeSlice;

use crate::{
  search,
  selection::Range,
};

/// The supported pair set for the any-pair queries, in tie-break order:
/// when two pairs end up at the same distance from the offset the earlier
/// entry wins.
pub const DEFAULT_PAIRS: &[(&str, &str)] = &[
  ("(", ")"),
  ("[", "]"),
  ("{", "}"),
  ("\"", "\""),
  ("'", "'"),
  ("`", "`"),
];

/// A delimiter pair. `open == close` models quote-style delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
  pub open:  String,
  pub close: String,
}

impl Pair {
  /// true if open == close
  pub fn same(&self) -> bool {
    self.open == self.close
  }

  pub fn open_len(&self) -> usize {
    self.open.chars().count()
  }

  pub fn close_len(&self) -> usize {
    self.close.chars().count()
  }
}

impl From<(&str, &str)> for Pair {
  fn from((open, close): (&str, &str)) -> Self {
    Self {
      open:  open.to_owned(),
      close: close.to_owned(),
    }
  }
}

/// The default pair set as owned [`Pair`]s, preserving tie-break order.
pub fn default_pairs() -> Vec<Pair> {
  DEFAULT_PAIRS.iter().map(|&pair| Pair::from(pair)).collect()
}

/// The two delimiter ranges of a matched pair, each covering exactly the
/// delimiter text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairMatch {
  pub open:  Range,
  pub close: Range,
}

impl PairMatch {
  /// Distance from `offset` to the nearest of the four delimiter
  /// boundaries.
  pub fn distance_to(&self, offset: usize) -> usize {
    [self.open.start, self.open.end, self.close.start, self.close.end]
      .into_iter()
      .map(|pos| pos.abs_diff(offset))
      .fold(usize::MAX, usize::min)
  }

  /// The two caret ranges a pair text-object commits: for "inside" the open
  /// range moves past the opening delimiter, for "around" the close range
  /// moves past the closing delimiter.
  pub fn object_ranges(&self, pair: &Pair, inside: bool) -> (Range, Range) {
    if inside {
      (self.open.shifted(pair.open_len()), self.close)
    } else {
      (self.open, self.close.shifted(pair.close_len()))
    }
  }
}

/// Finds the innermost `pair` enclosing `offset`.
///
/// The returned ranges cover the delimiter text itself. `None` when the
/// scans reach a buffer boundary without balancing.
pub fn find_enclosing_pair(text: RopeSlice, offset: usize, pair: &Pair) -> Option<PairMatch> {
  if pair.open.is_empty() || pair.close.is_empty() {
    return None;
  }
  if pair.same() {
    return find_enclosing_same(text, offset, pair);
  }

  let close_pos = find_unmatched_close(text, offset, pair)?;
  let open_pos = find_unmatched_open(text, close_pos, pair)?;
  Some(PairMatch {
    open:  Range::new(open_pos, open_pos + pair.open_len() - 1),
    close: Range::new(close_pos, close_pos + pair.close_len() - 1),
  })
}

/// Evaluates [`find_enclosing_pair`] for every pair in `pairs` and keeps
/// the match whose nearest delimiter boundary is closest to `offset`. Ties
/// resolve to the earlier pair in `pairs`.
pub fn find_closest_pair<'a>(
  text: RopeSlice,
  offset: usize,
  pairs: &'a [Pair],
) -> Option<(&'a Pair, PairMatch)> {
  let mut best: Option<(&Pair, PairMatch, usize)> = None;

  for pair in pairs {
    let Some(found) = find_enclosing_pair(text, offset, pair) else {
      continue;
    };
    let distance = found.distance_to(offset);
    if best.as_ref().is_none_or(|&(_, _, best_distance)| distance < best_distance) {
      best = Some((pair, found, distance));
    }
  }

  best.map(|(pair, found, _)| (pair, found))
}

/// Nearest unmatched close at or after `from`: opens seen on the way bump a
/// nesting counter so fully nested pairs in between are stepped over.
fn find_unmatched_close(text: RopeSlice, from: usize, pair: &Pair) -> Option<usize> {
  let len = text.len_chars();
  let mut nesting = 0usize;
  let mut pos = from;

  while pos < len {
    if search::matches_at(text, pos, &pair.open) {
      nesting += 1;
      pos += pair.open_len();
    } else if search::matches_at(text, pos, &pair.close) {
      if nesting == 0 {
        return Some(pos);
      }
      nesting -= 1;
      pos += pair.close_len();
    } else {
      pos += 1;
    }
  }
  None
}

/// Mirror of [`find_unmatched_close`]: scans backward from the close at
/// `close_at`, counting closes and declaring the first unmatched open.
fn find_unmatched_open(text: RopeSlice, close_at: usize, pair: &Pair) -> Option<usize> {
  let open_len = pair.open_len();
  let close_len = pair.close_len();
  let mut nesting = 0usize;
  let mut pos = close_at;

  while pos + 1 >= open_len {
    if pos >= close_len && search::matches_at(text, pos - close_len, &pair.close) {
      nesting += 1;
      pos -= close_len;
    } else if pos >= open_len && search::matches_at(text, pos - open_len, &pair.open) {
      if nesting == 0 {
        return Some(pos - open_len);
      }
      nesting -= 1;
      pos -= open_len;
    } else {
      if pos == 0 {
        break;
      }
      pos -= 1;
    }
  }
  None
}

/// Quote-style degenerate case: the close is the next occurrence at or
/// after `offset`, the open the last occurrence strictly before it.
fn find_enclosing_same(text: RopeSlice, offset: usize, pair: &Pair) -> Option<PairMatch> {
  let close_pos = search::find_next_str(text, &pair.close, offset)?;
  let open_pos = search::find_prev_str(text, &pair.open, offset)?;
  Some(PairMatch {
    open:  Range::new(open_pos, open_pos + pair.open_len() - 1),
    close: Range::new(close_pos, close_pos + pair.close_len() - 1),
  })
}
