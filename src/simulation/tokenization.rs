use std::sync::LazyLock;

use regex::Regex;

static MULTI_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +").expect("multi-space pattern is valid"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("non-word pattern is valid"));

const SPECIAL_ACTION_MARKER: char = '<';

/// One whitespace-delimited piece of the input sentence.
///
/// Flags are read from the raw text before punctuation is stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub raw: String,
    /// Punctuation removed, other non-word characters blanked, trailing
    /// blanks trimmed. May be empty.
    pub word: String,
    pub has_comma: bool,
    pub has_dot: bool,
    pub is_special_action: bool,
}

impl Token {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            word: clean_word(raw),
            has_comma: raw.contains(','),
            has_dot: raw.contains('.'),
            is_special_action: raw.contains(SPECIAL_ACTION_MARKER),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

/// Drops colons, collapses runs of spaces and trims leading whitespace.
pub fn normalize_sentence(sentence: &str) -> String {
    let without_colons = sentence.replace(':', "");
    MULTI_SPACE
        .replace_all(&without_colons, " ")
        .trim_start()
        .to_string()
}

/// Splits on single spaces after normalization; blank tokens are kept so
/// token positions match the normalized sentence.
pub fn tokenize_sentence(sentence: &str) -> Vec<Token> {
    normalize_sentence(sentence)
        .split(' ')
        .map(Token::parse)
        .collect()
}

pub fn clean_word(raw: &str) -> String {
    let stripped = raw.replace([',', '.'], "");
    NON_WORD.replace_all(&stripped, " ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_removes_colons_and_collapses_spaces() {
        assert_eq!(normalize_sentence("  Note:   hello  world"), "Note hello world");
        assert_eq!(normalize_sentence(""), "");
    }

    #[test]
    fn flags_are_read_before_cleaning() {
        let token = Token::parse("Hello,");
        assert_eq!(token.word, "Hello");
        assert!(token.has_comma);
        assert!(!token.has_dot);
        assert!(!token.is_special_action);

        let token = Token::parse("world.");
        assert_eq!(token.word, "world");
        assert!(token.has_dot);
    }

    #[test]
    fn special_action_marker_is_detected() {
        let token = Token::parse("<laughter>");
        assert!(token.is_special_action);
        assert_eq!(token.word, " laughter");
    }

    #[test]
    fn inner_non_word_characters_become_blanks() {
        assert_eq!(clean_word("don't"), "don t");
        assert_eq!(clean_word("tasted!?"), "tasted");
        assert_eq!(clean_word("café"), "café");
        assert_eq!(clean_word("snake_case"), "snake_case");
        assert_eq!(clean_word("..."), "");
    }

    #[test]
    fn trailing_space_yields_blank_token() {
        let tokens = tokenize_sentence("oat meal ");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].word, "oat");
        assert_eq!(tokens[1].word, "meal");
        assert!(tokens[2].is_empty());
    }

    #[test]
    fn empty_sentence_yields_single_blank_token() {
        let tokens = tokenize_sentence("");
        assert_eq!(tokens.len(), 1);
        assert!(tokens[0].is_empty());
    }
}
