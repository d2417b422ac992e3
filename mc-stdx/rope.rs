//! Regex matching over rope slices.
//!
//! `regex-cursor` runs the `regex-automata` meta engine over non-contiguous
//! haystacks, which lets us search a [`RopeSlice`] window without copying it
//! out into a `String` first. This module re-exports the engine types under
//! one roof and provides [`RopeSliceExt`] for building inputs restricted to a
//! char-offset window.
//!
//! Match offsets produced by the engine are *byte* offsets into the slice;
//! callers convert back with `RopeSlice::byte_to_char`.

use std::ops::{
  Bound,
  RangeBounds,
};

pub use regex_automata::{
  meta::BuildError,
  util::syntax::Config,
};
pub use regex_cursor::engines::meta::{
  Builder as RegexBuilder,
  Regex,
};
use regex_cursor::{
  Input as RegexInput,
  RopeyCursor,
};
use ropey::RopeSlice;

pub trait RopeSliceExt<'a>: Sized {
  /// Regex input over the whole slice.
  fn regex_input(self) -> RegexInput<RopeyCursor<'a>>;
  /// Regex input restricted to a char-offset range of the slice.
  fn regex_input_at<R: RangeBounds<usize>>(self, char_range: R) -> RegexInput<RopeyCursor<'a>>;
  /// Regex input restricted to a byte-offset range of the slice.
  fn regex_input_at_bytes<R: RangeBounds<usize>>(
    self,
    byte_range: R,
  ) -> RegexInput<RopeyCursor<'a>>;
}

impl<'a> RopeSliceExt<'a> for RopeSlice<'a> {
  fn regex_input(self) -> RegexInput<RopeyCursor<'a>> {
    RegexInput::new(self)
  }

  fn regex_input_at<R: RangeBounds<usize>>(self, char_range: R) -> RegexInput<RopeyCursor<'a>> {
    let start_bound = match char_range.start_bound() {
      Bound::Included(&val) => Bound::Included(self.char_to_byte(val)),
      Bound::Excluded(&val) => Bound::Excluded(self.char_to_byte(val)),
      Bound::Unbounded => Bound::Unbounded,
    };
    let end_bound = match char_range.end_bound() {
      Bound::Included(&val) => Bound::Included(self.char_to_byte(val)),
      Bound::Excluded(&val) => Bound::Excluded(self.char_to_byte(val)),
      Bound::Unbounded => Bound::Unbounded,
    };
    self.regex_input_at_bytes((start_bound, end_bound))
  }

  fn regex_input_at_bytes<R: RangeBounds<usize>>(
    self,
    byte_range: R,
  ) -> RegexInput<RopeyCursor<'a>> {
    let input = match byte_range.start_bound() {
      // Starting the cursor at the hot spot avoids counting the preceding
      // chunks on every search.
      Bound::Included(&pos) | Bound::Excluded(&pos) => {
        RegexInput::new(RopeyCursor::at(self, pos))
      },
      Bound::Unbounded => RegexInput::new(self),
    };
    input.range(byte_range)
  }
}
