//! Character classes used when lexing XPath names.

use unicode_general_category::{GeneralCategory, get_general_category};

/// Where a character may appear inside an NCName.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    NameStart,
    NameContinuation,
    NotPartOfName,
}

/// Classifies a single character according to the XPath name rules.
///
/// Letters (upper, lower, title case, other letters and letter numbers) and `_`
/// may start a name. Marks, modifier letters, decimal digits, `.` and `-` may
/// only continue one.
pub fn classify(c: char) -> CharClass {
    if c == '_' {
        return CharClass::NameStart;
    }
    if c == '.' || c == '-' {
        return CharClass::NameContinuation;
    }

    match get_general_category(c) {
        GeneralCategory::UppercaseLetter
        | GeneralCategory::LowercaseLetter
        | GeneralCategory::TitlecaseLetter
        | GeneralCategory::OtherLetter
        | GeneralCategory::LetterNumber => CharClass::NameStart,
        GeneralCategory::NonspacingMark
        | GeneralCategory::SpacingMark
        | GeneralCategory::EnclosingMark
        | GeneralCategory::ModifierLetter
        | GeneralCategory::DecimalNumber => CharClass::NameContinuation,
        _ => CharClass::NotPartOfName,
    }
}

/// Whitespace skipped between tokens: space, tab, LF, VT, FF and CR.
pub fn is_space_or_newline(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_start_characters() {
        for c in ['a', 'Z', '_', 'é', 'Ω', 'ǅ', '中', 'Ⅳ'] {
            assert_eq!(classify(c), CharClass::NameStart, "{c:?}");
        }
    }

    #[test]
    fn test_name_continuation_characters() {
        // U+0301 combining acute, U+02B0 modifier letter small h, U+0903 devanagari visarga
        for c in ['0', '9', '.', '-', '\u{0301}', '\u{02B0}', '\u{0903}', '\u{20DD}', '٣'] {
            assert_eq!(classify(c), CharClass::NameContinuation, "{c:?}");
        }
    }

    #[test]
    fn test_not_part_of_name() {
        for c in [' ', ':', '*', '(', '/', '$', '@', '+', '½', '€', '\u{1F600}'] {
            assert_eq!(classify(c), CharClass::NotPartOfName, "{c:?}");
        }
    }

    #[test]
    fn test_whitespace() {
        assert!(is_space_or_newline(' '));
        assert!(is_space_or_newline('\u{0C}'));
        assert!(!is_space_or_newline('\u{A0}'));
        assert!(!is_space_or_newline('x'));
    }
}
