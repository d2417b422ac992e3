//! Per-editor-session engine state.
//!
//! One [`Session`] exists per editor/session on the host side and owns the
//! two pieces of state that outlive a single query: the staged cursor list
//! and the highlight overlay. The embedding editor keeps the session for as
//! long as the editor is open and drops it on close; teardown is
//! deterministic ownership, not a disposal callback — dropping the session
//! drains both stores, so no highlight bookkeeping can outlive the
//! rendering resources it refers to.

use tracing::debug;

use crate::{
  overlay::HighlightOverlay,
  staging::CursorStaging,
};

pub struct Session<H> {
  pub staged:  CursorStaging,
  pub overlay: HighlightOverlay<H>,
}

impl<H> Session<H> {
  pub fn new() -> Self {
    Self {
      staged:  CursorStaging::new(),
      overlay: HighlightOverlay::new(),
    }
  }

  /// Explicit teardown, equivalent to dropping the session. The rendering
  /// host has already invalidated the handles by the time the session goes
  /// away, so the overlay only drops its bookkeeping.
  pub fn dispose(&mut self) {
    if !self.staged.is_empty() || !self.overlay.is_empty() {
      debug!(
        staged = self.staged.len(),
        highlights = self.overlay.len(),
        "disposing multicursor session"
      );
    }
    self.staged.clear();
    self.overlay.invalidate();
  }
}

impl<H> Default for Session<H> {
  fn default() -> Self {
    Self::new()
  }
}

impl<H> Drop for Session<H> {
  fn drop(&mut self) {
    self.dispose();
  }
}
