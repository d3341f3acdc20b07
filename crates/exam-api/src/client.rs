//! The request pipeline every feature call goes through.
//!
//! [`ApiClient`] resolves paths against the configured base URL, attaches the
//! bearer token from the [`SessionStore`], sends exactly once, and turns the
//! response into either a decoded body or a classified [`ApiError`]. It never
//! mutates the session itself.

use std::sync::Arc;
use std::time::Duration;

use exam_config::ApiConfig;
use exam_session::SessionStore;
use reqwest::header::{ACCEPT, CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Method, multipart};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::classify::classify;
use crate::error::ApiError;

/// How the success body should be handed back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseType {
    #[default]
    Json,
    /// Raw bytes, for PDF/Excel/ZIP endpoints.
    Blob,
}

/// One file in a multipart upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart(Vec<FilePart>),
}

/// Per-request knobs: query params, body, and response mode.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub params: Vec<(String, String)>,
    pub body: RequestBody,
    pub response_type: ResponseType,
}

impl RequestOptions {
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    #[must_use]
    pub fn params(mut self, params: &[(String, String)]) -> Self {
        self.params.extend_from_slice(params);
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn form<K: Into<String>, V: Into<String>>(
        mut self,
        pairs: impl IntoIterator<Item = (K, V)>,
    ) -> Self {
        self.body = RequestBody::Form(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn multipart(mut self, parts: Vec<FilePart>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }

    #[must_use]
    pub const fn blob(mut self) -> Self {
        self.response_type = ResponseType::Blob;
        self
    }
}

/// Binary response payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
    /// Filename suggested by `Content-Disposition`, reduced to its final path component.
    pub file_name: Option<String>,
}

impl Blob {
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Decoded success body.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Blob(Blob),
}

impl ResponseBody {
    /// Decode a JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::Decode`] for a blob body or a schema mismatch.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::decode(None, e))
            }
            Self::Blob(_) => Err(ApiError::decode(None, "expected JSON, got a binary body")),
        }
    }

    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::Decode`] for a JSON body.
    pub fn into_blob(self) -> Result<Blob, ApiError> {
        match self {
            Self::Blob(blob) => Ok(blob),
            Self::Json(_) => Err(ApiError::decode(None, "expected a binary body, got JSON")),
        }
    }
}

/// HTTP client bound to one backend and one session store.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client for `config.base_url` (falling back to the local development URL).
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::Transport`] if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let http = builder.build().map_err(|e| ApiError::transport(&e))?;

        Ok(Self {
            http,
            base_url: config.resolved_base_url(),
            session,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Resolve a relative resource path against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::InvalidRequest`] for absolute URLs.
    pub fn url_for(&self, path: &str) -> Result<String, ApiError> {
        if path.contains("://") {
            return Err(ApiError::invalid_request(format!(
                "expected a relative resource path, got '{path}'"
            )));
        }
        let relative = path.trim_start_matches('/');
        if relative.is_empty() {
            return Ok(self.base_url.clone());
        }
        Ok(format!("{}/{relative}", self.base_url))
    }

    /// Issue one HTTP request. No retries.
    ///
    /// # Errors
    ///
    /// Returns a classified [`ApiError`] for transport failures, non-2xx
    /// statuses, and undecodable success bodies.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> Result<ResponseBody, ApiError> {
        let url = self.url_for(path)?;
        let mut builder = self.http.request(method.clone(), &url);

        if !options.params.is_empty() {
            builder = builder.query(&options.params);
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if options.response_type == ResponseType::Json {
            builder = builder.header(ACCEPT, "application/json");
        }
        builder = match options.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(pairs) => builder.form(&pairs),
            RequestBody::Multipart(parts) => builder.multipart(build_multipart(parts)?),
        };

        tracing::debug!(%method, path, "sending request");
        let response = builder.send().await.map_err(|e| {
            tracing::debug!(%method, path, error = %e, "transport failure");
            ApiError::transport(&e)
        })?;
        tracing::debug!(%method, path, status = response.status().as_u16(), "response received");

        read_response(response, options.response_type).await
    }
}

/// Turn a raw response into a decoded body or a classified error.
///
/// # Errors
///
/// Returns the classified error for non-2xx statuses, [`crate::ErrorKind::Transport`]
/// if the body cannot be read, and [`crate::ErrorKind::Decode`] for invalid JSON.
pub async fn read_response(
    response: reqwest::Response,
    response_type: ResponseType,
) -> Result<ResponseBody, ApiError> {
    let status = response.status();

    if !status.is_success() {
        let body = response.bytes().await.unwrap_or_default();
        return Err(classify(status, &body));
    }

    match response_type {
        ResponseType::Json => {
            let body = response.bytes().await.map_err(|e| ApiError::transport(&e))?;
            if body.iter().all(u8::is_ascii_whitespace) {
                return Ok(ResponseBody::Json(Value::Null));
            }
            serde_json::from_slice(&body)
                .map(ResponseBody::Json)
                .map_err(|e| ApiError::decode(Some(status.as_u16()), e))
        }
        ResponseType::Blob => {
            let headers = response.headers();
            let content_type = headers
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(String::from);
            let file_name = headers
                .get(CONTENT_DISPOSITION)
                .and_then(|v| v.to_str().ok())
                .and_then(disposition_filename);
            let bytes = response.bytes().await.map_err(|e| ApiError::transport(&e))?;
            Ok(ResponseBody::Blob(Blob {
                bytes: bytes.to_vec(),
                content_type,
                file_name,
            }))
        }
    }
}

fn build_multipart(parts: Vec<FilePart>) -> Result<multipart::Form, ApiError> {
    let mut form = multipart::Form::new();
    for part in parts {
        let FilePart {
            field,
            file_name,
            content_type,
            bytes,
        } = part;
        let body = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&content_type)
            .map_err(|e| ApiError::invalid_request(format!("bad content type '{content_type}': {e}")))?;
        form = form.part(field, body);
    }
    Ok(form)
}

/// Extract a safe filename from a `Content-Disposition` header.
///
/// Prefers RFC 5987 `filename*=UTF-8''...` over plain `filename=`. Any
/// directory components are dropped.
#[must_use]
pub fn disposition_filename(header: &str) -> Option<String> {
    let mut plain = None;
    let mut extended = None;

    for param in header.split(';').map(str::trim) {
        let Some((key, value)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = value.trim().rsplit("''").next().unwrap_or_default();
                extended = urlencoding::decode(encoded).ok().map(|s| s.into_owned());
            }
            "filename" => {
                plain = Some(value.trim().trim_matches('"').to_string());
            }
            _ => {}
        }
    }

    extended
        .or(plain)
        .and_then(|name| {
            name.rsplit(['/', '\\'])
                .next()
                .map(str::trim)
                .map(String::from)
        })
        .filter(|name| !name.is_empty() && name != "." && name != "..")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn client(base_url: &str) -> ApiClient {
        let config = ApiConfig {
            base_url: base_url.into(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, Arc::new(SessionStore::in_memory())).expect("client builds")
    }

    fn mock_response(status: u16, headers: &[(&str, &str)], body: &'static [u8]) -> reqwest::Response {
        let mut builder = ::http::Response::builder().status(status);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        reqwest::Response::from(builder.body(body).unwrap())
    }

    #[test]
    fn url_for_joins_relative_paths() {
        let client = client("http://backend:8000/api/v1/");
        assert_eq!(client.url_for("/exams").unwrap(), "http://backend:8000/api/v1/exams");
        assert_eq!(client.url_for("exams/").unwrap(), "http://backend:8000/api/v1/exams/");
        assert_eq!(client.url_for("").unwrap(), "http://backend:8000/api/v1");
    }

    #[test]
    fn url_for_rejects_absolute_urls() {
        let client = client("http://backend:8000");
        let err = client.url_for("https://evil.example/steal").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidRequest);
    }

    #[test]
    fn blank_base_url_uses_fallback() {
        let client = client("");
        assert_eq!(client.base_url(), exam_config::DEFAULT_BASE_URL);
    }

    #[tokio::test]
    async fn json_success_is_decoded() {
        let resp = mock_response(200, &[("Content-Type", "application/json")], br#"{"id":"e1"}"#);
        let body = read_response(resp, ResponseType::Json).await.expect("ok");
        assert_eq!(body, ResponseBody::Json(json!({"id": "e1"})));
    }

    #[tokio::test]
    async fn empty_success_body_is_null() {
        let resp = mock_response(204, &[], b"");
        let body = read_response(resp, ResponseType::Json).await.expect("ok");
        assert_eq!(body, ResponseBody::Json(Value::Null));
    }

    #[tokio::test]
    async fn invalid_json_success_is_decode_error() {
        let resp = mock_response(200, &[], b"<html>");
        let err = read_response(resp, ResponseType::Json).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert_eq!(err.status, Some(200));
    }

    #[tokio::test]
    async fn blob_success_keeps_bytes_and_metadata() {
        let resp = mock_response(
            200,
            &[
                ("Content-Type", "application/pdf"),
                ("Content-Disposition", "attachment; filename=\"results.pdf\""),
            ],
            b"%PDF-1.7 binary",
        );
        let blob = read_response(resp, ResponseType::Blob)
            .await
            .expect("ok")
            .into_blob()
            .expect("blob");
        assert_eq!(blob.bytes, b"%PDF-1.7 binary".to_vec());
        assert_eq!(blob.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(blob.file_name.as_deref(), Some("results.pdf"));
    }

    #[tokio::test]
    async fn error_status_is_classified() {
        let resp = mock_response(404, &[], br#"{"detail":"Exam not found"}"#);
        let err = read_response(resp, ResponseType::Blob).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.status, Some(404));
    }

    #[test]
    fn into_json_rejects_blob() {
        let body = ResponseBody::Blob(Blob {
            bytes: vec![1, 2, 3],
            content_type: None,
            file_name: None,
        });
        let err = body.into_json::<Value>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[test]
    fn disposition_prefers_extended_filename() {
        let header = "attachment; filename=\"fallback.xlsx\"; filename*=UTF-8''Form%20IV%20results.xlsx";
        assert_eq!(
            disposition_filename(header).as_deref(),
            Some("Form IV results.xlsx")
        );
    }

    #[test]
    fn disposition_strips_directories() {
        assert_eq!(
            disposition_filename("attachment; filename=\"../../etc/passwd\"").as_deref(),
            Some("passwd")
        );
        assert_eq!(disposition_filename("attachment; filename=\"..\""), None);
        assert_eq!(disposition_filename("inline"), None);
    }
}
