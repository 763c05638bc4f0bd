//! Turning free-form model replies into keyword lists.
//!
//! Replies are expected to be a JSON array of strings. When they are not, the
//! raw text is split on [`FALLBACK_DELIMITERS`] and on whitespace. The fallback
//! keeps whatever fragments come out, punctuation included.

use serde_json::Value;

/// Separators used when the reply is not a JSON array (whitespace is always a separator too)
pub const FALLBACK_DELIMITERS: &[char] = &[',', '，', ';', '；', '\n'];

/// Parse a model reply into trimmed, non-empty keywords
pub fn parse_keyword_list(text: &str) -> Vec<String> {
    parse_json_array(text).unwrap_or_else(|| split_on_delimiters(text))
}

/// First stage: the reply as a JSON array, `None` if it is anything else
pub fn parse_json_array(text: &str) -> Option<Vec<String>> {
    let cleaned = strip_code_fence(text);
    match serde_json::from_str::<Value>(cleaned).ok()? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}

/// Second stage: best-effort split of arbitrary text
pub fn split_on_delimiters(text: &str) -> Vec<String> {
    text.split(|c: char| FALLBACK_DELIMITERS.contains(&c) || c.is_whitespace())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// Models often wrap JSON in ```json ... ``` despite being told not to
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_array() {
        let parsed = parse_keyword_list(r#"["pg电子游戏攻略", " pg电子注册指南 ", ""]"#);
        assert_eq!(parsed, vec!["pg电子游戏攻略", "pg电子注册指南"]);
    }

    #[test]
    fn test_json_array_in_code_fence() {
        let reply = "```json\n[\"a\", \"b\"]\n```";
        assert_eq!(parse_keyword_list(reply), vec!["a", "b"]);

        let bare_fence = "```\n[\"c\"]\n```";
        assert_eq!(parse_keyword_list(bare_fence), vec!["c"]);
    }

    #[test]
    fn test_non_string_elements_are_dropped() {
        assert_eq!(parse_keyword_list(r#"["a", 1, null, "b"]"#), vec!["a", "b"]);
    }

    #[test]
    fn test_fallback_on_plain_text() {
        let reply = "pg电子游戏攻略，pg电子注册指南；pg电子体验技巧\npg电子 平台";
        assert_eq!(
            parse_keyword_list(reply),
            vec![
                "pg电子游戏攻略",
                "pg电子注册指南",
                "pg电子体验技巧",
                "pg电子",
                "平台"
            ]
        );
    }

    #[test]
    fn test_fallback_on_non_array_json() {
        // A JSON string is valid JSON but not the array we asked for
        assert_eq!(parse_keyword_list(r#""one, two""#), vec!["\"one", "two\""]);
        assert!(parse_json_array(r#"{"keywords": ["a"]}"#).is_none());
    }

    #[test]
    fn test_fallback_keeps_punctuation_fragments() {
        let parsed = parse_keyword_list(r#"["a", "b""#);
        assert_eq!(parsed, vec![r#"["a""#, r#""b""#]);
    }

    #[test]
    fn test_empty_reply() {
        assert!(parse_keyword_list("").is_empty());
        assert!(parse_keyword_list(" \n ,，; ").is_empty());
        assert_eq!(parse_json_array("[]"), Some(vec![]));
    }
}
