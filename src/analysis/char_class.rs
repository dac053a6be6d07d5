//! Codepoint classification.
//!
//! Every stage of the pipeline that needs to know what a character "is" asks
//! this module. The classification is a total function over `char`: anything
//! that is not whitespace, punctuation or a CJK ideograph is [`CharClass::Other`],
//! including U+FFFD produced when invalid input bytes are decoded.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Coarse class of a single codepoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CharClass {
    Punctuation,
    CjkIdeograph,
    Whitespace,
    Other,
}

/// Classify a codepoint.
///
/// ```
/// use wordpiece::analysis::char_class::{classify, CharClass};
///
/// assert_eq!(classify('!'), CharClass::Punctuation);
/// assert_eq!(classify('你'), CharClass::CjkIdeograph);
/// assert_eq!(classify('\t'), CharClass::Whitespace);
/// assert_eq!(classify('a'), CharClass::Other);
/// ```
pub fn classify(c: char) -> CharClass {
    if is_whitespace(c) {
        CharClass::Whitespace
    } else if is_punctuation(c) {
        CharClass::Punctuation
    } else if is_cjk_ideograph(c) {
        CharClass::CjkIdeograph
    } else {
        CharClass::Other
    }
}

/// Whitespace as defined by the Unicode `White_Space` property.
pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// ASCII punctuation ranges, or any codepoint whose general category is one
/// of the punctuation categories.
///
/// The ASCII ranges also cover `$ + < = > ^ ` | ~`, which Unicode files
/// under symbols rather than punctuation.
pub fn is_punctuation(c: char) -> bool {
    if matches!(c as u32, 0x21..=0x2F | 0x3A..=0x40 | 0x5B..=0x60 | 0x7B..=0x7E) {
        return true;
    }

    matches!(
        get_general_category(c),
        GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::ConnectorPunctuation
            | GeneralCategory::OtherPunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
    )
}

/// CJK Unified Ideographs (basic block and extensions A-E) and CJK
/// Compatibility Ideographs.
///
/// Hangul, Hiragana and Katakana are deliberately absent: those scripts are
/// written with spaces between words and are segmented like Latin text.
pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
        '\u{20000}'..='\u{2A6DF}' | // CJK Extension B
        '\u{2A700}'..='\u{2B73F}' | // CJK Extension C
        '\u{2B740}'..='\u{2B81F}' | // CJK Extension D
        '\u{2B820}'..='\u{2CEAF}' | // CJK Extension E
        '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility Ideographs
        '\u{2F800}'..='\u{2FA1F}'   // CJK Compatibility Ideographs Supplement
    )
}
