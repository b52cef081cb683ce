//! Best-effort structured-output extraction from free-form model text.
//!
//! Models asked for JSON still wrap it in prose, code fences, or trailing
//! commentary. The extractor scans for the first balanced `{...}` span
//! (string- and escape-aware) and decodes it. Pure function, no network.

use serde_json::{json, Value};

use crate::error::EngineError;
use crate::models::AnalysisKind;

/// Extract and decode the first balanced JSON object in `raw`.
pub fn extract_structured(raw: &str) -> Result<Value, EngineError> {
    let span = balanced_span(raw).ok_or_else(|| {
        EngineError::ParseFailure("no JSON object found in response".to_string())
    })?;
    serde_json::from_str(span)
        .map_err(|e| EngineError::ParseFailure(format!("invalid JSON object: {e}")))
}

/// Decode a model reply, degrading to a raw-text wrap when no structured
/// object can be recovered. Parse trouble never becomes a hard error here.
pub fn decode_reply(content: &str, kind: AnalysisKind) -> Value {
    match extract_structured(content) {
        Ok(value) => value,
        Err(_) => json!({
            "raw_response": content,
            "analysis_type": kind,
        }),
    }
}

/// First balanced `{...}` span, skipping braces inside string literals.
fn balanced_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, c) in raw[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + c.len_utf8()]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_object() {
        let value = extract_structured(r#"{"sentiment": "积极", "score": 0.9}"#).unwrap();
        assert_eq!(value["sentiment"], "积极");
        assert_eq!(value["score"], 0.9);
    }

    #[test]
    fn test_object_with_surrounding_prose() {
        let raw = "好的，分析结果如下：\n{\"sentiment\": \"中性\"}\n希望对你有帮助。";
        let value = extract_structured(raw).unwrap();
        assert_eq!(value["sentiment"], "中性");
    }

    #[test]
    fn test_nested_object() {
        let raw = r#"结果 {"outer": {"inner": 1}, "list": [1, 2]} 完"#;
        let value = extract_structured(raw).unwrap();
        assert_eq!(value["outer"]["inner"], 1);
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let raw = r#"{"note": "包含 } 和 { 的字符串", "ok": true}"#;
        let value = extract_structured(raw).unwrap();
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let raw = r#"{"note": "a \" quote }", "ok": 1}"#;
        let value = extract_structured(raw).unwrap();
        assert_eq!(value["ok"], 1);
    }

    #[test]
    fn test_no_object_is_parse_failure() {
        let err = extract_structured("纯文本回答，没有任何结构。").unwrap_err();
        assert!(matches!(err, EngineError::ParseFailure(_)));
    }

    #[test]
    fn test_unbalanced_object_is_parse_failure() {
        let err = extract_structured(r#"{"sentiment": "积极""#).unwrap_err();
        assert!(matches!(err, EngineError::ParseFailure(_)));
    }

    #[test]
    fn test_invalid_json_in_balanced_span() {
        let err = extract_structured("{not valid json}").unwrap_err();
        assert!(matches!(err, EngineError::ParseFailure(_)));
    }

    #[test]
    fn test_decode_reply_wraps_raw_text() {
        let value = decode_reply("无法解析的自由文本", AnalysisKind::Sentiment);
        assert_eq!(value["raw_response"], "无法解析的自由文本");
        assert_eq!(value["analysis_type"], "sentiment");
    }

    #[test]
    fn test_decode_reply_prefers_structured() {
        let value = decode_reply(r#"前缀 {"score": 0.5} 后缀"#, AnalysisKind::Summary);
        assert_eq!(value["score"], 0.5);
        assert!(value.get("raw_response").is_none());
    }
}
