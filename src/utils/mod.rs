//! Utility functions and helpers.

pub mod date;
pub mod fanout;
pub mod http;

/// Invisible formatting characters that leak into catalog text.
pub const CHARACTERS_TO_CLEAN: [char; 4] = [
    '\u{200e}', // left-to-right mark
    '\u{200f}', // right-to-left mark
    '\u{200b}', // zero width space
    '\u{feff}', // byte order mark
];

/// Remove invisible formatting characters from a string.
pub fn clean_string(s: &str) -> String {
    s.chars()
        .filter(|c| !CHARACTERS_TO_CLEAN.contains(c))
        .collect()
}

/// Remove spaces, tabs and line breaks anywhere in the string.
pub fn strip_whitespace(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\t' | '\r'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_string() {
        assert_eq!(clean_string("\u{200e}ISBN 978\u{200e}"), "ISBN 978");
        assert_eq!(clean_string("a\u{200b}b\u{feff}c\u{200f}"), "abc");
        assert_eq!(clean_string("plain 文字"), "plain 文字");
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" 2020 -\t01-\r\n05 "), "2020-01-05");
        assert_eq!(strip_whitespace(" \n\t\r"), "");
    }
}
