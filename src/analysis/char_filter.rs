//! Char filters that rewrite the raw text before tokenization.
//!
//! A char filter returns the rewritten text together with the list of
//! [`Transformation`]s it performed, so that token offsets computed on the
//! rewritten text can be mapped back to the caller's text with
//! [`correct_offset`].
//!
//! # Available Filters
//!
//! - [`cjk_padding::CjkPaddingCharFilter`] - Surrounds CJK ideographs with spaces
//!
//! # Examples
//!
//! ```
//! use wordpiece::analysis::char_filter::CharFilter;
//! use wordpiece::analysis::char_filter::cjk_padding::CjkPaddingCharFilter;
//!
//! let (padded, transformations) = CjkPaddingCharFilter::new().filter("a你b");
//! assert_eq!(padded, "a 你 b");
//! assert_eq!(transformations.len(), 2);
//! ```

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
///
/// An insertion has an empty original range; a deletion has an empty new
/// range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }

    /// An insertion of `len` bytes at `original` that landed at `new` in the
    /// rewritten text.
    pub fn insertion(original: usize, new: usize, len: usize) -> Self {
        Self::new(original, original, new, new + len)
    }
}

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    ///
    /// Returns the filtered text and the transformations, ordered by
    /// position, that turned `input` into it.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Map a byte offset in filtered text back to the text the filter received.
///
/// Offsets that fall inside a rewritten range map into the original range,
/// clamped to its end; offsets inside an insertion map to the insertion
/// point.
pub fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
    let mut shift: isize = 0;

    for t in transformations {
        if offset < t.new_start {
            break;
        }
        if offset < t.new_end {
            let inside = (offset - t.new_start).min(t.original_end - t.original_start);
            return t.original_start + inside;
        }
        shift += (t.original_end - t.original_start) as isize - (t.new_end - t.new_start) as isize;
    }

    (offset as isize + shift) as usize
}

pub mod cjk_padding;
