//! The command set and its resolver.
//!
//! Every editor-facing operation is one variant of the closed [`Command`]
//! enum, resolved by [`execute`]. A query that produces zero candidates
//! resolves to [`Outcome::NoMatch`] and leaves the editor's caret and
//! selection state exactly as it was — a failed query must never cost the
//! user their cursors.
//!
//! Word/WORD occurrence commands are occurrence queries over run patterns;
//! the start/end variants narrow each run to a single char with
//! [`MatchPart`]. Pair commands commit two carets, one per delimiter
//! boundary, adjusted for "inside" vs "around".

use mc_stdx::rope;
use ropey::RopeSlice;
use smallvec::{
  SmallVec,
  smallvec,
};
use thiserror::Error;
use tracing::debug;

use crate::{
  host::EditorHost,
  live,
  pair::{
    self,
    Pair,
  },
  scan::{
    self,
    MatchPart,
  },
  search,
  selection::{
    Range,
    SelectionSet,
    restrict,
  },
  session::Session,
  staging::StageToggle,
};

pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QueryError {
  #[error("invalid search pattern: {0}")]
  InvalidPattern(Box<dyn std::error::Error + Send + Sync>),
}

/// Word-run flavor of an occurrence query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordMotion {
  /// Runs of word characters.
  Word,
  /// Runs of non-whitespace.
  BigWord,
}

impl WordMotion {
  pub fn pattern(self) -> &'static str {
    match self {
      WordMotion::Word => r"\w+",
      WordMotion::BigWord => r"\S+",
    }
  }
}

/// The closed set of multicursor operations, mapped 1:1 onto named editor
/// commands by the embedding editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// Carets or selections on every word/WORD run, or on each run's first
  /// or last character.
  SelectOccurrences {
    motion: WordMotion,
    part:   MatchPart,
    select: bool,
  },
  /// Carets or selections on every match of a fixed pattern.
  SelectPattern { pattern: String, select: bool },
  /// The modal live-search loop; commits its candidates on confirm.
  SearchInteractive { select: bool },
  /// Carets on every occurrence of a host-read character, optionally one
  /// position before each occurrence.
  CharSearch { stop_before: bool, select: bool },
  /// Two carets on the boundaries of the delimiter pair enclosing the
  /// primary caret.
  PairObject {
    pair:   Pair,
    inside: bool,
    select: bool,
  },
  /// Like [`Command::PairObject`] over the whole supported pair set,
  /// taking the pair with the closest boundary.
  AnyPairObject { inside: bool, select: bool },
  /// Carets at both ends of the alphanumeric run under the primary caret.
  AroundWord,
  /// Toggles a staged cursor at the primary caret.
  StageToggle,
  /// Commits all staged cursors as the new caret set.
  StageApply,
  /// Discards all staged cursors.
  StageClear,
}

/// What resolving a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
  /// A new caret/selection set was handed to the host.
  Committed,
  /// A staged cursor was added or removed.
  Staged(StageToggle),
  /// The staging store was emptied.
  Cleared,
  /// Zero candidates; editor state untouched.
  NoMatch,
  /// The user backed out of a modal read; editor state untouched.
  Cancelled,
}

/// Resolves one command against the session and the host editor.
pub fn execute<H: EditorHost>(
  session: &mut Session<H::Handle>,
  host: &mut H,
  command: Command,
) -> Result<Outcome> {
  debug!(?command, "resolving multicursor command");
  match command {
    Command::SelectOccurrences {
      motion,
      part,
      select,
    } => {
      let regex = rope::Regex::new(motion.pattern())
        .map_err(|e| QueryError::InvalidPattern(Box::new(e)))?;
      Ok(select_matches(host, &regex, part, select))
    },
    Command::SelectPattern { pattern, select } => {
      let regex = rope::Regex::new(&pattern)
        .map_err(|e| QueryError::InvalidPattern(Box::new(e)))?;
      Ok(select_matches(host, &regex, MatchPart::Whole, select))
    },
    Command::SearchInteractive { select } => Ok(live::run(session, host, select)),
    Command::CharSearch {
      stop_before,
      select,
    } => Ok(char_search(host, stop_before, select)),
    Command::PairObject {
      pair,
      inside,
      select,
    } => Ok(pair_object(host, &pair, inside, select)),
    Command::AnyPairObject { inside, select } => Ok(any_pair_object(host, inside, select)),
    Command::AroundWord => Ok(around_word(host)),
    Command::StageToggle => Ok(stage_toggle(session, host)),
    Command::StageApply => Ok(stage_apply(session, host)),
    Command::StageClear => Ok(stage_clear(session, host)),
  }
}

/// The candidate set of a pattern query: one superset-window scan filtered
/// back down to the individual selections. Projection runs before the
/// filter so that single-char word-boundary candidates survive even when
/// their full run crosses a selection edge.
pub(crate) fn candidate_ranges(
  text: RopeSlice,
  selections: &SelectionSet,
  regex: &rope::Regex,
  part: MatchPart,
) -> SmallVec<[Range; 1]> {
  let (window_start, window_end) = selections.span().unwrap_or((0, text.len_chars()));
  restrict(
    scan::scan(text, window_start, window_end, regex).map(|range| part.project(range)),
    selections,
  )
  .collect()
}

fn select_matches<H: EditorHost>(
  host: &mut H,
  regex: &rope::Regex,
  part: MatchPart,
  select: bool,
) -> Outcome {
  let text = host.text();
  let selections = host.selections();
  let ranges = candidate_ranges(text.slice(..), &selections, regex, part);
  if ranges.is_empty() {
    return Outcome::NoMatch;
  }
  host.set_carets(ranges, select);
  Outcome::Committed
}

fn char_search<H: EditorHost>(host: &mut H, stop_before: bool, select: bool) -> Outcome {
  let Some(ch) = host.read_char() else {
    return Outcome::Cancelled;
  };
  let text = host.text();
  let slice = text.slice(..);
  let selections = host.selections();

  let mut ranges: SmallVec<[Range; 1]> = SmallVec::new();
  if selections.is_empty() {
    for pos in search::char_occurrences_around(slice, host.primary_caret(), ch) {
      if let Some(target) = adjust_hit(pos, stop_before) {
        ranges.push(Range::point(target));
      }
    }
  } else {
    for &selection in &selections {
      for pos in search::char_occurrences_within(slice, selection, ch) {
        // The adjusted position must still land inside the selection.
        if let Some(target) = adjust_hit(pos, stop_before) {
          if selection.contains(target) {
            ranges.push(Range::point(target));
          }
        }
      }
    }
  }

  if ranges.is_empty() {
    return Outcome::NoMatch;
  }
  host.set_carets(ranges, select);
  Outcome::Committed
}

fn adjust_hit(pos: usize, stop_before: bool) -> Option<usize> {
  if stop_before { pos.checked_sub(1) } else { Some(pos) }
}

fn pair_object<H: EditorHost>(host: &mut H, pair: &Pair, inside: bool, select: bool) -> Outcome {
  let text = host.text();
  let offset = host.primary_caret();
  match pair::find_enclosing_pair(text.slice(..), offset, pair) {
    Some(found) => {
      let (open, close) = found.object_ranges(pair, inside);
      host.set_carets(smallvec![open, close], select);
      Outcome::Committed
    },
    None => Outcome::NoMatch,
  }
}

fn any_pair_object<H: EditorHost>(host: &mut H, inside: bool, select: bool) -> Outcome {
  let text = host.text();
  let offset = host.primary_caret();
  let pairs = pair::default_pairs();
  match pair::find_closest_pair(text.slice(..), offset, &pairs) {
    Some((pair, found)) => {
      let (open, close) = found.object_ranges(pair, inside);
      host.set_carets(smallvec![open, close], select);
      Outcome::Committed
    },
    None => Outcome::NoMatch,
  }
}

fn around_word<H: EditorHost>(host: &mut H) -> Outcome {
  let text = host.text();
  let (start, end) = search::word_bounds(text.slice(..), host.primary_caret());
  host.set_carets(smallvec![Range::point(start), Range::point(end)], false);
  Outcome::Committed
}

fn stage_toggle<H: EditorHost>(session: &mut Session<H::Handle>, host: &mut H) -> Outcome {
  let range = Range::point(host.primary_caret());
  let toggle = session.staged.toggle(range);
  match toggle {
    StageToggle::Added => session.overlay.add(host, range),
    StageToggle::Removed => session.overlay.remove_one(host, range),
  }
  Outcome::Staged(toggle)
}

fn stage_apply<H: EditorHost>(session: &mut Session<H::Handle>, host: &mut H) -> Outcome {
  session.overlay.remove_all(host);
  let ranges = session.staged.apply(host.primary_caret());
  host.set_carets(ranges, false);
  Outcome::Committed
}

fn stage_clear<H: EditorHost>(session: &mut Session<H::Handle>, host: &mut H) -> Outcome {
  session.staged.clear();
  session.overlay.remove_all(host);
  Outcome::Cleared
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::host::fake::FakeHost;

  fn session() -> Session<u64> {
    Session::new()
  }

  #[test]
  fn select_word_occurrences_whole_buffer() {
    let mut host = FakeHost::new("foo bar foo baz");
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::SelectPattern {
      pattern: "foo".into(),
      select:  true,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[
      Range::new(0, 2),
      Range::new(8, 10)
    ]);
  }

  #[test]
  fn selection_restricts_occurrences() {
    // Only the match inside the selection survives.
    let mut host = FakeHost::new("foo bar foo baz");
    host.selections.push(Range::new(4, 11));
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::SelectPattern {
      pattern: "foo".into(),
      select:  true,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[Range::new(8, 10)]);
  }

  #[test]
  fn no_match_leaves_editor_untouched() {
    // Zero candidates never reach the host.
    let mut host = FakeHost::new("foo bar");
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::SelectPattern {
      pattern: "quux".into(),
      select:  true,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::NoMatch);
    assert!(host.committed.is_empty());
  }

  #[test]
  fn invalid_pattern_is_an_error() {
    let mut host = FakeHost::new("foo");
    let mut session = session();

    let result = execute(&mut session, &mut host, Command::SelectPattern {
      pattern: "(".into(),
      select:  true,
    });

    assert!(matches!(result, Err(QueryError::InvalidPattern(_))));
    assert!(host.committed.is_empty());
  }

  #[test]
  fn word_start_occurrences() {
    let mut host = FakeHost::new("one  two;three");
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::SelectOccurrences {
      motion: WordMotion::Word,
      part:   MatchPart::First,
      select: false,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[
      Range::point(0),
      Range::point(5),
      Range::point(9)
    ]);
  }

  #[test]
  fn word_start_survives_selection_edge() {
    // The run "alpha" crosses the first selection's edge: its whole range
    // would be dropped, but the projected first char is inside and
    // survives. Projection runs before the restriction for exactly this.
    let mut host = FakeHost::new("alpha beta");
    host.selections.push(Range::new(0, 2));
    host.selections.push(Range::new(7, 9));
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::SelectOccurrences {
      motion: WordMotion::Word,
      part:   MatchPart::First,
      select: false,
    })
    .unwrap();

    // "beta" is clipped to [6, 8] by the scan window; its first char sits
    // between the selections and is dropped.
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[Range::point(0)]);
  }

  #[test]
  fn char_search_radiates_from_caret() {
    let mut host = FakeHost::new("abcabcabc");
    host.caret = 4;
    host.chars.push_back('a');
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::CharSearch {
      stop_before: false,
      select:      false,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Committed);
    // Hits after the caret first (the primary), then before, descending.
    assert_eq!(host.last_committed().unwrap(), &[
      Range::point(6),
      Range::point(3),
      Range::point(0)
    ]);
  }

  #[test]
  fn char_search_within_selections_clamps_stop_before() {
    let mut host = FakeHost::new("xaxxax");
    host.selections.push(Range::new(1, 4));
    host.chars.push_back('a');
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::CharSearch {
      stop_before: true,
      select:      false,
    })
    .unwrap();

    // 'a' at 1 adjusts to 0, outside the selection, and is dropped; 'a' at
    // 4 adjusts to 3, which stays.
    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[Range::point(3)]);
  }

  #[test]
  fn char_search_cancel_is_a_noop() {
    let mut host = FakeHost::new("abc");
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::CharSearch {
      stop_before: false,
      select:      false,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(host.committed.is_empty());
  }

  #[test]
  fn pair_object_inside_commits_boundary_carets() {
    // "Inside": carets after the open and on the close.
    let mut host = FakeHost::new("(a(b)c)");
    host.caret = 3;
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::PairObject {
      pair:   Pair::from(("(", ")")),
      inside: true,
      select: false,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[
      Range::point(3),
      Range::point(4)
    ]);
  }

  #[test]
  fn pair_object_not_found_is_a_noop() {
    let mut host = FakeHost::new("no brackets");
    host.caret = 3;
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::PairObject {
      pair:   Pair::from(("(", ")")),
      inside: false,
      select: false,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::NoMatch);
    assert!(host.committed.is_empty());
  }

  #[test]
  fn any_pair_object_picks_closest() {
    let mut host = FakeHost::new("{ [a] }");
    host.caret = 3;
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::AnyPairObject {
      inside: false,
      select: false,
    })
    .unwrap();

    assert_eq!(outcome, Outcome::Committed);
    // Around: open bracket and one past the close bracket.
    assert_eq!(host.last_committed().unwrap(), &[
      Range::point(2),
      Range::point(5)
    ]);
  }

  #[test]
  fn around_word_commits_boundary_carets() {
    let mut host = FakeHost::new("one two3 four");
    host.caret = 5;
    let mut session = session();

    let outcome = execute(&mut session, &mut host, Command::AroundWord).unwrap();

    assert_eq!(outcome, Outcome::Committed);
    assert_eq!(host.last_committed().unwrap(), &[
      Range::point(4),
      Range::point(8)
    ]);
  }

  #[test]
  fn stage_toggle_apply_roundtrip() {
    let mut host = FakeHost::new("hello world");
    let mut session = session();

    host.caret = 2;
    assert_eq!(
      execute(&mut session, &mut host, Command::StageToggle).unwrap(),
      Outcome::Staged(StageToggle::Added)
    );
    host.caret = 8;
    assert_eq!(
      execute(&mut session, &mut host, Command::StageToggle).unwrap(),
      Outcome::Staged(StageToggle::Added)
    );
    assert_eq!(host.highlight_spans(), vec![(2, 3), (8, 9)]);

    host.caret = 5;
    let outcome = execute(&mut session, &mut host, Command::StageApply).unwrap();
    assert_eq!(outcome, Outcome::Committed);

    // The un-staged primary leads the committed set; highlights gone.
    assert_eq!(host.last_committed().unwrap(), &[
      Range::point(5),
      Range::point(2),
      Range::point(8)
    ]);
    assert!(host.highlight_spans().is_empty());
    assert!(session.staged.is_empty());
  }

  #[test]
  fn stage_toggle_off_removes_its_highlight() {
    let mut host = FakeHost::new("hello world");
    let mut session = session();

    host.caret = 2;
    execute(&mut session, &mut host, Command::StageToggle).unwrap();
    assert_eq!(
      execute(&mut session, &mut host, Command::StageToggle).unwrap(),
      Outcome::Staged(StageToggle::Removed)
    );

    assert!(session.staged.is_empty());
    assert!(host.highlight_spans().is_empty());
  }

  #[test]
  fn stage_clear_discards_everything() {
    let mut host = FakeHost::new("hello world");
    let mut session = session();

    host.caret = 2;
    execute(&mut session, &mut host, Command::StageToggle).unwrap();
    host.caret = 8;
    execute(&mut session, &mut host, Command::StageToggle).unwrap();

    let outcome = execute(&mut session, &mut host, Command::StageClear).unwrap();
    assert_eq!(outcome, Outcome::Cleared);
    assert!(session.staged.is_empty());
    assert!(host.highlight_spans().is_empty());
    assert!(host.committed.is_empty());
  }

  #[test]
  fn word_occurrences_as_selections() {
    let mut host = FakeHost::new("ab cd");
    let mut session = session();

    execute(&mut session, &mut host, Command::SelectOccurrences {
      motion: WordMotion::BigWord,
      part:   MatchPart::Whole,
      select: true,
    })
    .unwrap();

    let (ranges, extend) = host.committed.last().unwrap();
    assert!(*extend);
    assert_eq!(ranges.as_slice(), &[Range::new(0, 1), Range::new(3, 4)]);
  }
}
