//! Per-exam statistics, overviews and rankings. Computed by the backend.

use reqwest::Method;
use serde_json::{Map, Value};

use crate::client::RequestOptions;
use crate::error::ApiError;
use crate::{ExamApi, segment};

impl ExamApi {
    /// `GET /exams/{id}/stats`. The body must be a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure or a non-object body.
    pub async fn exam_stats(&self, exam_id: &str) -> Result<Map<String, Value>, ApiError> {
        self.json(
            Method::GET,
            &format!("/exams/{}/stats", segment(exam_id)),
            RequestOptions::default(),
        )
        .await
    }

    /// `GET /exams/{id}/analyses/overviews`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    pub async fn exam_overviews(
        &self,
        exam_id: &str,
        params: &[(String, String)],
    ) -> Result<Value, ApiError> {
        self.json(
            Method::GET,
            &format!("/exams/{}/analyses/overviews", segment(exam_id)),
            RequestOptions::default().params(params),
        )
        .await
    }

    /// `GET /exams/{id}/analyses/rankings`, e.g. with `type=school` or `limit=10`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    pub async fn exam_rankings(
        &self,
        exam_id: &str,
        params: &[(String, String)],
    ) -> Result<Value, ApiError> {
        self.json(
            Method::GET,
            &format!("/exams/{}/analyses/rankings", segment(exam_id)),
            RequestOptions::default().params(params),
        )
        .await
    }
}
