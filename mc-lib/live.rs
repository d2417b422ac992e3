//! The modal live-search loop.
//!
//! Interactive search reads one prompt event at a time; between events the
//! engine recomputes the candidate set for the query typed so far and
//! refreshes the highlight overlay, so the user previews the cursors they
//! are about to get. The loop is the engine's only suspend point: each
//! event is a synchronous [`SearchPrompt::step`] transition, and the host
//! blocks in `next_prompt_event` in between.
//!
//! Confirming commits the candidates as the new caret set; cancelling (and
//! confirming with zero candidates) leaves the editor's selection state
//! untouched. Both paths clear the overlay.

use mc_stdx::rope;
use ropey::RopeSlice;
use smallvec::SmallVec;
use tracing::trace;

use crate::{
  host::{
    EditorHost,
    PromptEvent,
  },
  query::{
    Outcome,
    candidate_ranges,
  },
  scan::MatchPart,
  selection::{
    Range,
    SelectionSet,
  },
  session::Session,
};

/// Prompt state after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptState {
  #[default]
  Reading,
  Confirmed,
  Cancelled,
}

/// The live-search state machine. Holds the query typed so far; every
/// [`PromptEvent`] is one synchronous transition.
#[derive(Debug, Default)]
pub struct SearchPrompt {
  query: String,
  state: PromptState,
}

impl SearchPrompt {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn query(&self) -> &str {
    &self.query
  }

  pub fn state(&self) -> PromptState {
    self.state
  }

  pub fn step(&mut self, event: PromptEvent) -> PromptState {
    match event {
      PromptEvent::Key(ch) => self.query.push(ch),
      PromptEvent::Backspace => {
        self.query.pop();
      },
      PromptEvent::Confirm => self.state = PromptState::Confirmed,
      PromptEvent::Cancel => self.state = PromptState::Cancelled,
    }
    self.state
  }

  /// Candidate set for the current query. An empty query has no
  /// candidates, and neither does a pattern that does not compile yet —
  /// mid-typing states like a lone `(` are normal, not errors.
  pub fn candidates(&self, text: RopeSlice, selections: &SelectionSet) -> SmallVec<[Range; 1]> {
    if self.query.is_empty() {
      return SmallVec::new();
    }
    let regex = rope::RegexBuilder::new()
      .syntax(rope::Config::new().multi_line(true))
      .build(&self.query);
    let Ok(regex) = regex else {
      trace!(query = %self.query, "pattern does not compile yet");
      return SmallVec::new();
    };
    candidate_ranges(text, selections, &regex, MatchPart::Whole)
  }
}

/// Drives the modal loop against the host until confirm or cancel.
pub fn run<H: EditorHost>(session: &mut Session<H::Handle>, host: &mut H, select: bool) -> Outcome {
  let text = host.text();
  let selections = host.selections();
  let mut prompt = SearchPrompt::new();

  loop {
    match prompt.step(host.next_prompt_event()) {
      PromptState::Reading => {
        session.overlay.remove_all(host);
        for range in prompt.candidates(text.slice(..), &selections) {
          session.overlay.add(host, range);
        }
      },
      PromptState::Confirmed => {
        session.overlay.remove_all(host);
        let ranges = prompt.candidates(text.slice(..), &selections);
        if ranges.is_empty() {
          return Outcome::NoMatch;
        }
        host.set_carets(ranges, select);
        return Outcome::Committed;
      },
      PromptState::Cancelled => {
        session.overlay.remove_all(host);
        return Outcome::Cancelled;
      },
    }
  }
}
