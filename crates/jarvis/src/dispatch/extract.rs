//! Parameter extraction from utterances

/// True when any phrase occurs anywhere in the utterance
pub fn contains_any(utterance: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| utterance.contains(phrase))
}

/// Text following the first occurrence of `keyword`, trimmed. Empty when
/// the keyword is absent or nothing follows it.
pub fn after_first(utterance: &str, keyword: &str) -> String {
    utterance
        .split_once(keyword)
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_default()
}

/// Remove every occurrence of each keyword, in order, then trim
pub fn strip_all(utterance: &str, keywords: &[&str]) -> String {
    keywords
        .iter()
        .fold(utterance.to_string(), |text, keyword| text.replace(keyword, ""))
        .trim()
        .to_string()
}
