//! Best-effort recovery of an embedded structured value from model text.
//!
//! Model output is not guaranteed to be valid JSON: replies drift between
//! strict JSON, Python-literal syntax, escaped nested quotes, and surrounding
//! prose. The chain below prefers strict decoding and only then falls back to
//! the restricted literal parser, so well-formed JSON is never reinterpreted.

mod literal;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Locate and decode a structured value (object or array) embedded in `text`.
///
/// Ordered fallback chain, first success wins:
/// 1. strip control characters,
/// 2. strict JSON decode of brace spans (one nesting level, in order of
///    appearance),
/// 3. restricted literal decode of balanced brace/bracket spans with escaped
///    quotes normalized,
/// 4. restricted literal decode of the first generic non-greedy span.
///
/// Returns `None` when nothing decodes; never fails.
pub fn extract_structured_value(text: &str) -> Option<Value> {
    static NESTED_OBJECT: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\{[^{}]*(?:\{[^{}]*\})*[^{}]*\}").expect("valid pattern"));
    static ANY_PAIR: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"(?s)[\[{].*?[\]}]").expect("valid pattern"));

    let cleaned: String = text
        .chars()
        .filter(|&ch| ch >= '\u{20}' && ch != '\u{7f}')
        .collect();

    for candidate in NESTED_OBJECT.find_iter(&cleaned) {
        if let Ok(value) = serde_json::from_str::<Value>(candidate.as_str()) {
            return Some(value);
        }
    }

    for span in balanced_spans(&cleaned) {
        if let Some(value) = literal::parse(&normalize_escaped_quotes(span)) {
            return Some(value);
        }
    }

    if let Some(candidate) = ANY_PAIR.find(&cleaned) {
        if let Some(value) = literal::parse(&normalize_escaped_quotes(candidate.as_str())) {
            return Some(value);
        }
    }

    None
}

fn normalize_escaped_quotes(candidate: &str) -> String {
    candidate.replace("\\\"", "\"")
}

/// Every span opening at a `{` or `[` and closing at its balanced partner,
/// in order of appearance. Depth is tracked over bracket characters only;
/// brackets inside string literals will miscount, which is acceptable for a
/// best-effort scan.
fn balanced_spans(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    for (start, &opener) in bytes.iter().enumerate() {
        if opener != b'{' && opener != b'[' {
            continue;
        }
        let mut stack: Vec<u8> = Vec::new();
        for (offset, &ch) in bytes[start..].iter().enumerate() {
            match ch {
                b'{' | b'[' => stack.push(ch),
                b'}' | b']' => {
                    let Some(open) = stack.pop() else { break };
                    if (open == b'{') != (ch == b'}') {
                        break;
                    }
                    if stack.is_empty() {
                        spans.push(&text[start..start + offset + 1]);
                        break;
                    }
                }
                _ => {}
            }
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::extract_structured_value;
    use serde_json::{Value, json};

    fn assert_structured(input: &str) -> Value {
        let value = extract_structured_value(input).expect("value recovered");
        assert!(value.is_object() || value.is_array());
        value
    }

    #[test]
    fn valid_json_in_prose() {
        let value = assert_structured("Some text {\"key\": \"value\"} more text");
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn unbalanced_json_yields_none() {
        assert_eq!(
            extract_structured_value("Some text {\"key\": \"value\" more text"),
            None
        );
    }

    #[test]
    fn no_json_yields_none() {
        assert_eq!(extract_structured_value("Some text without json"), None);
    }

    #[test]
    fn nested_object() {
        let value =
            assert_structured("Some text {\"key\": {\"nested_key\": \"nested_value\"}} more text");
        assert_eq!(value, json!({"key": {"nested_key": "nested_value"}}));
    }

    #[test]
    fn bare_list() {
        assert_eq!(assert_structured("Some text [1, 2, 3] more text"), json!([1, 2, 3]));
    }

    #[test]
    fn full_reply_with_final_answer_list() {
        let input = "Thought: I need to gather financial information about the company. \n\nAction: Return Final Answer Tool\nAction Input: {\"final_answer\": [\"Identify the relevant financial statements for the past year.\", \"Analyze key financial metrics such as revenue and liquidity.\", \"Summarize the overall financial health.\"]} \n \n";
        let value = assert_structured(input);
        assert!(value.get("final_answer").is_some_and(Value::is_array));
    }

    #[test]
    fn escaped_quote_list() {
        let input = "\"[\\\"Gather the financial statements for the past year\\\", \\\"Summarize the findings in a report\\\"]\"";
        let value = assert_structured(input);
        assert_eq!(value.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn python_literal_fallback() {
        let value = assert_structured("here you go: {'query': 'rust agents', 'limit': 3}");
        assert_eq!(value, json!({"query": "rust agents", "limit": 3}));
    }

    #[test]
    fn control_characters_are_stripped() {
        let value = assert_structured("{\"key\":\u{1} \"val\u{7f}ue\"}");
        assert_eq!(value, json!({"key": "value"}));
    }

    #[test]
    fn strict_json_wins_over_literal_reading() {
        // The object decodes strictly in step 2 even though a later span
        // would also satisfy the literal parser.
        let value = assert_structured("{\"a\": 1} and also ['b']");
        assert_eq!(value, json!({"a": 1}));
    }
}
