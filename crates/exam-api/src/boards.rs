//! Exam boards: the bodies that own exams.

use exam_session::record::string_or_number;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::RequestOptions;
use crate::error::ApiError;
use crate::{ExamApi, Listing, segment};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamBoard {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExamApi {
    /// `GET /exam-boards/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn list_boards(&self) -> Result<Vec<ExamBoard>, ApiError> {
        let listing: Listing<ExamBoard> = self
            .json(Method::GET, "/exam-boards/", RequestOptions::default())
            .await?;
        Ok(listing.into_items())
    }

    /// `POST /exam-boards/`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn create_board(&self, payload: Map<String, Value>) -> Result<ExamBoard, ApiError> {
        self.json(
            Method::POST,
            "/exam-boards/",
            RequestOptions::default().json(Value::Object(payload)),
        )
        .await
    }

    /// `PATCH /exam-boards/{id}`: only the given fields change.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request or decode failure.
    pub async fn update_board(
        &self,
        board_id: &str,
        changes: Map<String, Value>,
    ) -> Result<ExamBoard, ApiError> {
        self.json(
            Method::PATCH,
            &format!("/exam-boards/{}", segment(board_id)),
            RequestOptions::default().json(Value::Object(changes)),
        )
        .await
    }

    /// `DELETE /exam-boards/{id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    pub async fn delete_board(&self, board_id: &str) -> Result<Value, ApiError> {
        self.json(
            Method::DELETE,
            &format!("/exam-boards/{}", segment(board_id)),
            RequestOptions::default(),
        )
        .await
    }
}
