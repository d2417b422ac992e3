//! Staged multi-cursor accumulation.
//!
//! A [`CursorStaging`] collects pending cursor ranges across repeated
//! "add" actions and flushes them in one "apply". The list is session
//! scoped, deduplicated by structural equality, and kept in insertion
//! order: the first staged range becomes the primary caret on apply. The
//! store never sorts by buffer position.
//!
//! Toggling reports which way it went so the caller can mirror the change
//! in the highlight overlay.

use smallvec::SmallVec;

use crate::selection::Range;

/// Which way a [`CursorStaging::toggle`] went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageToggle {
  /// The range was appended; the caller adds a highlight.
  Added,
  /// The range was already staged and got removed; the caller clears its
  /// highlight.
  Removed,
}

/// The session's pending cursor list.
#[derive(Debug, Default)]
pub struct CursorStaging {
  staged: Vec<Range>,
}

impl CursorStaging {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, range: &Range) -> bool {
    self.staged.contains(range)
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.staged.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.staged.is_empty()
  }

  pub fn ranges(&self) -> &[Range] {
    &self.staged
  }

  /// Adds `range` if absent, removes it if present. Two toggles on the
  /// same range cancel out exactly.
  pub fn toggle(&mut self, range: Range) -> StageToggle {
    if let Some(idx) = self.staged.iter().position(|staged| *staged == range) {
      self.staged.remove(idx);
      StageToggle::Removed
    } else {
      self.staged.push(range);
      StageToggle::Added
    }
  }

  pub fn clear(&mut self) {
    self.staged.clear();
  }

  /// Flushes the staged list in insertion order and empties the store.
  ///
  /// A caret for `primary` is prepended unless already staged, so the
  /// position the user is standing on when committing is always part of
  /// the result — and, being first, becomes the primary caret.
  pub fn apply(&mut self, primary: usize) -> SmallVec<[Range; 1]> {
    let primary = Range::point(primary);
    if !self.contains(&primary) {
      self.staged.insert(0, primary);
    }
    self.staged.drain(..).collect()
  }
}
