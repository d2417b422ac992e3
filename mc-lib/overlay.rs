//! Transient highlight bookkeeping.
//!
//! The overlay records which host highlight handle belongs to which range
//! so staged cursors and live-search matches can be un-highlighted later,
//! individually or in bulk. It renders through the host's primitives and
//! owns nothing but the bookkeeping; on session teardown the handles are
//! already invalid on the rendering side, so [`HighlightOverlay::invalidate`]
//! just drops the records.

use tracing::trace;

use crate::{
  host::{
    EditorHost,
    HighlightStyle,
  },
  selection::Range,
};

/// Range → handle records for the transient highlights of one session.
#[derive(Debug)]
pub struct HighlightOverlay<H> {
  entries: Vec<(Range, H)>,
}

impl<H> HighlightOverlay<H> {
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
    }
  }

  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Highlights `range` with the fixed match style and records the handle
  /// the host hands back. The rendered span is `[start, end + 1)`.
  pub fn add<E: EditorHost<Handle = H>>(&mut self, host: &mut E, range: Range) {
    let handle = host.add_highlight(range.start, range.end + 1, HighlightStyle::MATCH);
    self.entries.push((range, handle));
  }

  /// Removes every recorded highlight and empties the record.
  pub fn remove_all<E: EditorHost<Handle = H>>(&mut self, host: &mut E) {
    for (_, handle) in self.entries.drain(..) {
      host.remove_highlight(handle);
    }
  }

  /// Removes the single highlight whose range starts where `range` starts.
  ///
  /// A missing entry is a no-op rather than an error: the overlay may have
  /// been cleared externally (session teardown) between the caller's
  /// membership check and this call.
  pub fn remove_one<E: EditorHost<Handle = H>>(&mut self, host: &mut E, range: Range) {
    if let Some(idx) = self
      .entries
      .iter()
      .position(|(recorded, _)| recorded.start == range.start)
    {
      let (_, handle) = self.entries.remove(idx);
      host.remove_highlight(handle);
    }
  }

  /// Drops all bookkeeping without touching the host. The rendering side
  /// has already invalidated the handles when this is called.
  pub fn invalidate(&mut self) {
    if !self.entries.is_empty() {
      trace!(handles = self.entries.len(), "dropping highlight bookkeeping");
    }
    self.entries.clear();
  }
}

impl<H> Default for HighlightOverlay<H> {
  fn default() -> Self {
    Self::new()
  }
}
