//! Candidate lookup terms pulled out of a free-text player message.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Upper bound on lookups a single message can trigger.
pub const MAX_TERMS: usize = 5;

/// Words that never name a compendium entry (compared lowercase).
const STOP_WORDS: [&str; 12] = [
    "the", "and", "you", "your", "for", "with", "attack", "look", "take", "use", "go", "move",
];

static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["']([^"']+)["']"#).expect("valid regex"));
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z][A-Za-z0-9']*\b").expect("valid regex"));

/// Extract up to [`MAX_TERMS`] lookup terms from `message`, in discovery order.
///
/// Quoted substrings come first (trimmed, empty ones dropped). The rest of the
/// message, with quoted spans blanked out, is split into word runs; a word is
/// kept when it is longer than two characters and not a stop word. Duplicates
/// are dropped by exact, case-sensitive comparison.
pub fn extract_terms(message: &str) -> Vec<String> {
    let mut terms: Vec<String> = Vec::new();

    for caps in QUOTED_RE.captures_iter(message) {
        if let Some(quoted) = caps.get(1) {
            push_unique(&mut terms, quoted.as_str().trim());
        }
    }

    let remainder = QUOTED_RE.replace_all(message, " ");
    for word in WORD_RE.find_iter(&remainder) {
        let word = word.as_str();
        if word.chars().count() > 2 && !is_stop_word(word) {
            push_unique(&mut terms, word);
        }
    }

    terms.truncate(MAX_TERMS);
    terms
}

fn is_stop_word(word: &str) -> bool {
    let lowered = word.to_lowercase();
    STOP_WORDS.contains(&lowered.as_str())
}

fn push_unique(terms: &mut Vec<String>, term: &str) {
    if !term.is_empty() && !terms.iter().any(|t| t == term) {
        terms.push(term.to_string());
    }
}
