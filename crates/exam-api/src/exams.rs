//! Exam CRUD and the selected-exam context.

use exam_session::record::string_or_number;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::RequestOptions;
use crate::error::ApiError;
use crate::{ExamApi, Listing, segment};

/// An exam record. `id` is required; everything else is passed through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exam {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The exam a user has picked; scopes every per-exam call. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedExam {
    pub exam_id: String,
    pub exam_name: Option<String>,
    pub exam_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Exam {
    /// `exam_name`, or a plain `name` field for backends that use that instead.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.exam_name
            .as_deref()
            .or_else(|| self.extra.get("name").and_then(Value::as_str))
    }
}

impl From<Exam> for SelectedExam {
    fn from(exam: Exam) -> Self {
        Self {
            exam_name: exam.name().map(String::from),
            exam_id: exam.id,
            exam_level: exam.exam_level,
            extra: exam.extra,
        }
    }
}

impl ExamApi {
    /// `GET /exams`. `params` are forwarded as the query string.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn list_exams(&self, params: &[(String, String)]) -> Result<Vec<Exam>, ApiError> {
        let listing: Listing<Exam> = self
            .json(Method::GET, "/exams", RequestOptions::default().params(params))
            .await?;
        Ok(listing.into_items())
    }

    /// `GET /exams/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn get_exam(&self, exam_id: &str) -> Result<Exam, ApiError> {
        self.json(
            Method::GET,
            &format!("/exams/{}", segment(exam_id)),
            RequestOptions::default(),
        )
        .await
    }

    /// `POST /exams/` with the payload submitted verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn create_exam(&self, payload: Map<String, Value>) -> Result<Exam, ApiError> {
        self.json(
            Method::POST,
            "/exams/",
            RequestOptions::default().json(Value::Object(payload)),
        )
        .await
    }

    /// `PUT /exams/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn update_exam(
        &self,
        exam_id: &str,
        payload: Map<String, Value>,
    ) -> Result<Exam, ApiError> {
        self.json(
            Method::PUT,
            &format!("/exams/{}", segment(exam_id)),
            RequestOptions::default().json(Value::Object(payload)),
        )
        .await
    }

    /// `DELETE /exams/{id}`. Returns the backend's acknowledgement (often `null`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    pub async fn delete_exam(&self, exam_id: &str) -> Result<Value, ApiError> {
        self.json(
            Method::DELETE,
            &format!("/exams/{}", segment(exam_id)),
            RequestOptions::default(),
        )
        .await
    }

    /// `POST /exams/{id}/reprocess`: ask the backend to recompute results.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    pub async fn reprocess_exam(&self, exam_id: &str) -> Result<Value, ApiError> {
        self.json(
            Method::POST,
            &format!("/exams/{}/reprocess", segment(exam_id)),
            RequestOptions::default(),
        )
        .await
    }

    /// Fetch an exam and turn it into the selection context.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the exam cannot be fetched.
    pub async fn select_exam(&self, exam_id: &str) -> Result<SelectedExam, ApiError> {
        let exam = self.get_exam(exam_id).await?;
        tracing::debug!(exam_id = %exam.id, "exam selected");
        Ok(exam.into())
    }
}
