//! The editor boundary.
//!
//! Everything the engine needs from the embedding editor: reading the
//! buffer and selection state, writing back a caret set, the highlight
//! rendering primitives, and the two blocking input reads of the modal
//! flows. Key-sequence registration, the prompt UI and the host's own
//! caret model all live behind this trait.
//!
//! The engine never mutates the buffer; [`EditorHost::text`] returns a
//! snapshot that stays stable for the duration of one query.

use ropey::Rope;
use smallvec::SmallVec;

use crate::selection::{
  Range,
  SelectionSet,
};

/// Symbolic color roles, mapped onto the host's theme by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
  SearchMatchBackground,
  CaretColor,
}

/// Visual style of a transient highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightStyle {
  pub background: ColorRole,
  pub foreground: ColorRole,
}

impl HighlightStyle {
  /// The one style the engine renders with: search-match background with
  /// the caret color as foreground.
  pub const MATCH: Self = Self {
    background: ColorRole::SearchMatchBackground,
    foreground: ColorRole::CaretColor,
  };
}

/// One step of the modal search prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptEvent {
  /// A printable key appended to the query.
  Key(char),
  /// Delete the last query character.
  Backspace,
  /// Commit the current candidates.
  Confirm,
  /// Abandon the search, leaving editor state untouched.
  Cancel,
}

pub trait EditorHost {
  /// Opaque token for one rendered highlight.
  type Handle;

  /// Buffer snapshot, stable for the duration of one query.
  fn text(&self) -> Rope;

  /// The current selections, in host order. Empty means "no selection".
  fn selections(&self) -> SelectionSet;

  fn primary_caret(&self) -> usize;

  /// Replaces the editor's entire caret/selection set. With `extend`, each
  /// range becomes a selection anchored at its start; otherwise each
  /// collapses to a caret at its end. The first range becomes primary.
  fn set_carets(&mut self, ranges: SmallVec<[Range; 1]>, extend: bool);

  /// Renders a highlight over the half-open char span `[start, end)`.
  fn add_highlight(&mut self, start: usize, end: usize, style: HighlightStyle) -> Self::Handle;

  fn remove_highlight(&mut self, handle: Self::Handle);

  /// Blocks for the next key of the modal search prompt.
  fn next_prompt_event(&mut self) -> PromptEvent;

  /// Reads one character for a char-search query; `None` on cancel.
  fn read_char(&mut self) -> Option<char>;
}
