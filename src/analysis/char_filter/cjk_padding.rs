//! CJK padding char filter.
//!
//! Surrounds every CJK ideograph with a space on each side so that the
//! whitespace tokenizer isolates each ideograph as its own word. The extra
//! spaces this creates next to existing whitespace are collapsed by the
//! tokenizer.

use crate::analysis::char_class::is_cjk_ideograph;

use super::{CharFilter, Transformation};

/// A char filter that pads CJK ideographs with spaces.
#[derive(Clone, Debug, Default)]
pub struct CjkPaddingCharFilter;

impl CjkPaddingCharFilter {
    /// Create a new CJK padding filter.
    pub fn new() -> Self {
        CjkPaddingCharFilter
    }
}

impl CharFilter for CjkPaddingCharFilter {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut output = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        for (offset, c) in input.char_indices() {
            if is_cjk_ideograph(c) {
                transformations.push(Transformation::insertion(offset, output.len(), 1));
                output.push(' ');
                output.push(c);
                transformations.push(Transformation::insertion(
                    offset + c.len_utf8(),
                    output.len(),
                    1,
                ));
                output.push(' ');
            } else {
                output.push(c);
            }
        }

        (output, transformations)
    }

    fn name(&self) -> &'static str {
        "cjk_padding"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::correct_offset;

    #[test]
    fn test_pads_each_ideograph() {
        let (padded, _) = CjkPaddingCharFilter::new().filter("你好");
        assert_eq!(padded, " 你  好 ");
    }

    #[test]
    fn test_leaves_other_scripts_alone() {
        let input = "hello こんにちは 안녕";
        let (padded, transformations) = CjkPaddingCharFilter::new().filter(input);
        assert_eq!(padded, input);
        assert!(transformations.is_empty());
    }

    #[test]
    fn test_offsets_map_back() {
        let input = "ab你c";
        let (padded, transformations) = CjkPaddingCharFilter::new().filter(input);
        assert_eq!(padded, "ab 你 c");

        // "你" sits at 3..6 in the padded text and 2..5 in the input
        assert_eq!(&padded[3..6], "你");
        assert_eq!(correct_offset(3, &transformations), 2);
        assert_eq!(correct_offset(6, &transformations), 5);
        // "c" sits at 7..8 in the padded text and 5..6 in the input
        assert_eq!(correct_offset(7, &transformations), 5);
        assert_eq!(correct_offset(8, &transformations), 6);
    }

    #[test]
    fn test_empty_input() {
        let (padded, transformations) = CjkPaddingCharFilter::new().filter("");
        assert!(padded.is_empty());
        assert!(transformations.is_empty());
    }
}
