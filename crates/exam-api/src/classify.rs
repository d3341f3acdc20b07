//! Pure mapping from a non-2xx response to an [`ApiError`].
//!
//! No I/O and no side effects: the session-clearing reaction to a 401 lives in
//! [`crate::policy`].

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{
    ApiError, ErrorKind, FORBIDDEN_MESSAGE, NOT_FOUND_MESSAGE, SERVER_ERROR_MESSAGE,
    UNAUTHORIZED_MESSAGE,
};

/// Classify a failed response from its status and raw body.
#[must_use]
pub fn classify(status: StatusCode, body: &[u8]) -> ApiError {
    let (json, data) = decode_body(body);

    let (kind, message) = match status {
        StatusCode::UNAUTHORIZED => (ErrorKind::Unauthorized, UNAUTHORIZED_MESSAGE.to_string()),
        StatusCode::FORBIDDEN => (ErrorKind::Forbidden, FORBIDDEN_MESSAGE.to_string()),
        StatusCode::NOT_FOUND => (ErrorKind::NotFound, NOT_FOUND_MESSAGE.to_string()),
        StatusCode::INTERNAL_SERVER_ERROR => (ErrorKind::Server, SERVER_ERROR_MESSAGE.to_string()),
        other => (
            ErrorKind::Status,
            json.as_ref()
                .and_then(backend_message)
                .unwrap_or_else(|| format!("Request failed with status code {}", other.as_u16())),
        ),
    };

    ApiError {
        kind,
        message,
        status: Some(status.as_u16()),
        data,
    }
}

/// Returns the parsed JSON (if any) and the value to expose as `data`.
fn decode_body(body: &[u8]) -> (Option<Value>, Option<Value>) {
    if body.iter().all(u8::is_ascii_whitespace) {
        return (None, None);
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => (Some(value.clone()), Some(value)),
        Err(_) => (
            None,
            Some(Value::String(String::from_utf8_lossy(body).into_owned())),
        ),
    }
}

/// Pull a human-readable message out of a backend error payload.
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}, ...]}`, `{"message": "..."}` and `{"error": "..."}`.
fn backend_message(payload: &Value) -> Option<String> {
    match payload.get("detail") {
        Some(Value::String(detail)) if !detail.trim().is_empty() => {
            return Some(detail.clone());
        }
        Some(Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.clone()),
                    other => other.get("msg").and_then(Value::as_str).map(String::from),
                })
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }

    ["message", "error"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .find(|text| !text.trim().is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(401, ErrorKind::Unauthorized, UNAUTHORIZED_MESSAGE)]
    #[case(403, ErrorKind::Forbidden, FORBIDDEN_MESSAGE)]
    #[case(404, ErrorKind::NotFound, NOT_FOUND_MESSAGE)]
    #[case(500, ErrorKind::Server, SERVER_ERROR_MESSAGE)]
    fn fixed_messages_ignore_backend_detail(
        #[case] code: u16,
        #[case] kind: ErrorKind,
        #[case] message: &str,
    ) {
        let status = StatusCode::from_u16(code).expect("status");
        let err = classify(status, br#"{"detail":"something specific"}"#);
        assert_eq!(err.kind, kind);
        assert_eq!(err.message, message);
        assert_eq!(err.status, Some(code));
        assert_eq!(err.data, Some(json!({"detail": "something specific"})));
    }

    #[rstest]
    #[case(br#"{"detail":"Exam name already exists"}"#.as_slice(), "Exam name already exists")]
    #[case(br#"{"message":"Board is locked"}"#.as_slice(), "Board is locked")]
    #[case(br#"{"error":"quota exceeded"}"#.as_slice(), "quota exceeded")]
    #[case(
        br#"{"detail":[{"loc":["body","name"],"msg":"field required"},{"msg":"too short"}]}"#.as_slice(),
        "field required; too short"
    )]
    fn other_statuses_use_backend_message(#[case] body: &[u8], #[case] expected: &str) {
        let err = classify(StatusCode::UNPROCESSABLE_ENTITY, body);
        assert_eq!(err.kind, ErrorKind::Status);
        assert_eq!(err.message, expected);
        assert_eq!(err.status, Some(422));
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"<html>Bad Gateway</html>".as_slice())]
    #[case(br#"{"detail":""}"#.as_slice())]
    #[case(br#"["not","an","object"]"#.as_slice())]
    fn other_statuses_fall_back_to_transport_message(#[case] body: &[u8]) {
        let err = classify(StatusCode::BAD_GATEWAY, body);
        assert_eq!(err.kind, ErrorKind::Status);
        assert_eq!(err.message, "Request failed with status code 502");
    }

    #[test]
    fn non_json_body_is_kept_as_text() {
        let err = classify(StatusCode::BAD_GATEWAY, b"upstream down");
        assert_eq!(err.data, Some(Value::String("upstream down".into())));
    }

    #[test]
    fn empty_body_has_no_data() {
        let err = classify(StatusCode::FORBIDDEN, b"  ");
        assert!(err.data.is_none());
    }
}
