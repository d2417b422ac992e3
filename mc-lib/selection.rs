//! Ranges and selection sets.
//!
//! # Range Model
//!
//! A [`Range`] is an inclusive `[start, end]` pair of zero-based char
//! offsets into the buffer. `start == end` denotes a caret (single
//! position); `end` may equal the buffer length for the trailing caret
//! position.
//!
//! ```text
//! start=2, end=6: "he[llo w]orld"  (span)
//! start=5, end=5: "hello|world"    (caret)
//! ```
//!
//! # Selection Sets
//!
//! A [`SelectionSet`] is the host editor's current multi-selection: an
//! ordered list of ranges that may be empty, meaning "no selection, operate
//! on the whole buffer". Unlike the engine's own candidate output the set is
//! taken as-is from the host; it is never sorted or merged here.
//!
//! # Restriction
//!
//! [`restrict`] filters a lazily produced candidate sequence down to the
//! ranges that fall fully inside at least one selection. It never expands or
//! shifts a candidate, and with an empty selection set it is the identity.

use smallvec::SmallVec;

/// An inclusive span or single position in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
  pub start: usize,
  pub end:   usize,
}

impl Range {
  pub fn new(start: usize, end: usize) -> Self {
    debug_assert!(start <= end);
    Self { start, end }
  }

  /// A caret: a range covering a single position.
  #[inline]
  #[must_use]
  pub fn point(pos: usize) -> Self {
    Self::new(pos, pos)
  }

  #[inline]
  #[must_use]
  pub fn is_point(&self) -> bool {
    self.start == self.end
  }

  /// Number of positions covered, counting the inclusive end.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.end - self.start + 1
  }

  #[inline]
  pub fn contains(&self, pos: usize) -> bool {
    self.start <= pos && pos <= self.end
  }

  /// True if `other` lies fully inside this range.
  #[inline]
  pub fn contains_range(&self, other: &Self) -> bool {
    self.start <= other.start && other.end <= self.end
  }

  /// Both ends moved right by `by`.
  #[inline]
  #[must_use]
  pub fn shifted(self, by: usize) -> Self {
    Self::new(self.start + by, self.end + by)
  }
}

impl From<(usize, usize)> for Range {
  fn from(value: (usize, usize)) -> Self {
    Self::new(value.0, value.1)
  }
}

/// The host editor's current selections, in host order. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
  ranges: SmallVec<[Range; 1]>,
}

impl SelectionSet {
  pub fn new(ranges: SmallVec<[Range; 1]>) -> Self {
    Self { ranges }
  }

  pub fn empty() -> Self {
    Self::default()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.ranges.is_empty()
  }

  pub fn ranges(&self) -> &[Range] {
    &self.ranges
  }

  #[inline(always)]
  pub fn iter(&self) -> std::slice::Iter<'_, Range> {
    self.ranges.iter()
  }

  pub fn push(&mut self, range: Range) {
    self.ranges.push(range);
  }

  /// The single contiguous scan window covering every selection, as a
  /// half-open `[min(starts), max(ends))` pair. `None` when the set is
  /// empty (callers fall back to the whole buffer).
  ///
  /// One superset window beats one scan per selection on large buffers with
  /// many selections; [`restrict`] narrows the results back down afterwards.
  pub fn span(&self) -> Option<(usize, usize)> {
    let start = self.ranges.iter().map(|range| range.start).min()?;
    let end = self.ranges.iter().map(|range| range.end).max()?;
    Some((start, end))
  }

  /// True if `candidate` lies fully inside at least one selection.
  pub fn contains_range(&self, candidate: &Range) -> bool {
    self.ranges.iter().any(|sel| sel.contains_range(candidate))
  }
}

impl FromIterator<Range> for SelectionSet {
  fn from_iter<I: IntoIterator<Item = Range>>(iter: I) -> Self {
    Self::new(iter.into_iter().collect())
  }
}

impl<'a> IntoIterator for &'a SelectionSet {
  type Item = &'a Range;
  type IntoIter = std::slice::Iter<'a, Range>;

  fn into_iter(self) -> std::slice::Iter<'a, Range> {
    self.ranges.iter()
  }
}

/// Keeps the candidates that fall fully inside at least one selection.
///
/// Streaming-safe: the input sequence is consumed lazily, exactly once.
/// With an empty selection set this is the identity.
pub fn restrict<'a, I>(candidates: I, selections: &'a SelectionSet) -> impl Iterator<Item = Range> + 'a
where
  I: Iterator<Item = Range> + 'a,
{
  candidates.filter(move |candidate| {
    selections.is_empty() || selections.contains_range(candidate)
  })
}
