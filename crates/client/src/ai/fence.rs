//! Markdown code-fence removal around model answers.

use serde::de::DeserializeOwned;

/// Strips one leading ```` ```json ```` or ```` ``` ```` marker and one
/// trailing ```` ``` ```` marker, trimming whitespace around both.
pub fn strip_fences(content: &str) -> &str {
    let mut text = content.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    }
    if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parses a possibly fenced answer into `T`. Typed deserialization also
/// enforces the expected schema.
pub fn parse_answer<T: DeserializeOwned>(content: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(strip_fences(content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Tip {
        tip: String,
    }

    #[test]
    fn test_plain_json_untouched() {
        assert_eq!(strip_fences("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_json_fence() {
        assert_eq!(strip_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
    }

    #[test]
    fn test_bare_fence_with_whitespace() {
        assert_eq!(strip_fences("  \n```\n{\"a\":1}\n```  \n"), "{\"a\":1}");
    }

    #[test]
    fn test_only_trailing_fence() {
        assert_eq!(strip_fences("{\"a\":1}```"), "{\"a\":1}");
    }

    #[test]
    fn test_fenced_parses_like_unfenced() {
        let fenced: Tip = parse_answer("```json\n{\"tip\": \"Drop, cover, hold\"}\n```").unwrap();
        let plain: Tip = parse_answer("{\"tip\": \"Drop, cover, hold\"}").unwrap();
        assert_eq!(fenced, plain);
    }

    #[test]
    fn test_prose_fails() {
        assert!(parse_answer::<Tip>("Here are my recommendations: stay calm.").is_err());
    }

    #[test]
    fn test_schema_mismatch_fails() {
        assert!(parse_answer::<Tip>("{\"advice\": \"x\"}").is_err());
    }
}
