//! Lenient decoding of research responses.
//!
//! `score` is the only field a response must carry. Every other field is
//! decoded on its own; a malformed field is logged and dropped so the rest
//! of the result still renders.

use crate::service::base::{ServiceError, ServiceResult};
use rk_protocol::research_models::ResearchResult;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Decode a research response body.
pub fn decode_research_result(body: &str) -> ServiceResult<ResearchResult> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ServiceError::Decode(e.to_string()))?;

    let Value::Object(mut fields) = value else {
        return Err(ServiceError::Decode("expected a JSON object".to_string()));
    };

    let score = fields
        .get("score")
        .and_then(Value::as_f64)
        .ok_or_else(|| ServiceError::Decode("missing numeric `score`".to_string()))?;

    // The research backend names this field `feedback`.
    let meta_feedback = optional_list(&mut fields, "meta_feedback")
        .or_else(|| optional_list(&mut fields, "feedback"));

    Ok(ResearchResult {
        score,
        top_paper: optional_field(&mut fields, "top_paper"),
        related: optional_field(&mut fields, "related"),
        related_papers: optional_list(&mut fields, "related_papers"),
        insights: optional_list(&mut fields, "insights"),
        meta_feedback,
    })
}

fn optional_field<T: DeserializeOwned>(fields: &mut Map<String, Value>, key: &str) -> Option<T> {
    match fields.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                tracing::warn!(field = key, error = %e, "Dropping malformed response field");
                None
            }
        },
    }
}

/// Like `optional_field` for arrays, but drops bad elements one by one.
fn optional_list<T: DeserializeOwned>(
    fields: &mut Map<String, Value>,
    key: &str,
) -> Option<Vec<T>> {
    match fields.remove(key) {
        None | Some(Value::Null) => None,
        Some(Value::Array(items)) => {
            let total = items.len();
            let decoded: Vec<T> = items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect();
            if decoded.len() != total {
                tracing::warn!(
                    field = key,
                    dropped = total - decoded.len(),
                    "Dropping malformed response entries"
                );
            }
            Some(decoded)
        }
        Some(other) => {
            tracing::warn!(
                field = key,
                kind = %value_kind(&other),
                "Expected a list, dropping field"
            );
            None
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rk_protocol::research_models::Related;
    use serde_json::json;

    #[test]
    fn test_decode_minimal_response() {
        let result = decode_research_result(r#"{"score": 8.5}"#).unwrap();
        assert_eq!(result.score, 8.5);
        assert!(result.top_paper.is_none());
        assert!(result.related.is_none());
        assert!(result.insights.is_none());
    }

    #[test]
    fn test_decode_full_backend_response() {
        let body = json!({
            "status": "success",
            "topic": "quantum computing",
            "score": 7,
            "top_paper": {
                "title": "X",
                "authors": ["A"],
                "abstract": "...",
                "link": "http://example.org/x",
                "pdf_link": "http://example.org/x.pdf",
                "published": "2024-01-01",
                "source": "arXiv"
            },
            "related_papers": [
                {"title": "Y", "score": 0.9, "source": "Semantic Scholar", "link": "http://y"},
                {"title": "Z"}
            ],
            "insights": ["first", "second"],
            "feedback": ["tighten the query"],
            "agent_status": {"generation": "done"}
        })
        .to_string();

        let result = decode_research_result(&body).unwrap();

        assert_eq!(result.score, 7.0);
        let paper = result.top_paper.unwrap();
        assert_eq!(paper.title, "X");
        assert_eq!(paper.summary.as_deref(), Some("..."));
        assert_eq!(paper.source.as_deref(), Some("arXiv"));
        assert_eq!(result.related_papers.unwrap().len(), 2);
        assert_eq!(result.insights.unwrap(), vec!["first", "second"]);
        assert_eq!(result.meta_feedback.unwrap(), vec!["tighten the query"]);
    }

    #[test]
    fn test_meta_feedback_preferred_over_feedback() {
        let body = json!({
            "score": 1,
            "meta_feedback": ["meta"],
            "feedback": ["plain"]
        })
        .to_string();

        let result = decode_research_result(&body).unwrap();
        assert_eq!(result.meta_feedback.unwrap(), vec!["meta"]);
    }

    #[test]
    fn test_related_as_text() {
        let body = json!({"score": 2, "related": "see also"}).to_string();
        let result = decode_research_result(&body).unwrap();
        assert_eq!(result.related, Some(Related::Text("see also".to_string())));
    }

    #[test]
    fn test_malformed_fields_degrade_individually() {
        let body = json!({
            "score": 6.0,
            "top_paper": "not an object",
            "insights": ["kept", 42, "also kept"],
            "meta_feedback": {"not": "a list"},
            "related_papers": [{"no_title": true}]
        })
        .to_string();

        let result = decode_research_result(&body).unwrap();

        assert_eq!(result.score, 6.0);
        assert!(result.top_paper.is_none());
        assert_eq!(result.insights.unwrap(), vec!["kept", "also kept"]);
        assert!(result.meta_feedback.is_none());
        assert_eq!(result.related_papers.unwrap().len(), 0);
    }

    #[test]
    fn test_missing_score_is_an_error() {
        let err = decode_research_result(r#"{"top_paper": {"title": "X"}}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));

        let err = decode_research_result(r#"{"score": "high"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[test]
    fn test_non_object_body_is_an_error() {
        assert!(decode_research_result("[1, 2]").is_err());
        assert!(decode_research_result("<html>").is_err());
    }
}
