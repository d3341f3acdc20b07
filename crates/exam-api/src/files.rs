//! Report downloads (PDF/Excel/ZIP) and result-sheet uploads.
//!
//! Each is a single request: no progress reporting, no partial-failure
//! handling. Bulk archives are generated entirely by the backend.

use std::path::{Path, PathBuf};

use reqwest::Method;
use serde_json::Value;
use tokio::io::AsyncWriteExt as _;

use crate::client::{Blob, FilePart, RequestOptions};
use crate::error::ApiError;
use crate::{ExamApi, segment};

/// Multipart field name the upload endpoint expects.
const UPLOAD_FIELD: &str = "files";

/// Binary report formats the backend can generate for an exam.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Pdf,
    Excel,
    Zip,
}

impl ReportKind {
    const fn path_suffix(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "excel",
            Self::Zip => "zip",
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
            Self::Zip => "zip",
        }
    }

    /// Filename used when the backend does not suggest one.
    #[must_use]
    pub fn default_file_name(self, exam_id: &str) -> String {
        let safe: String = exam_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        format!("exam-{safe}-results.{}", self.extension())
    }
}

impl ExamApi {
    /// Download a generated report as a blob.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on any request failure.
    pub async fn download_report(&self, exam_id: &str, kind: ReportKind) -> Result<Blob, ApiError> {
        let blob = self
            .blob(
                &format!("/exams/{}/results/{}", segment(exam_id), kind.path_suffix()),
                RequestOptions::default(),
            )
            .await?;
        tracing::debug!(exam_id, bytes = blob.len(), ?kind, "report downloaded");
        Ok(blob)
    }

    /// Upload one or more result sheets in a single multipart request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::InvalidRequest`] when `files` is empty, or
    /// [`ApiError`] on any request failure.
    pub async fn upload_results(
        &self,
        exam_id: &str,
        files: Vec<FilePart>,
    ) -> Result<Value, ApiError> {
        if files.is_empty() {
            return Err(ApiError::invalid_request("no files to upload"));
        }
        let count = files.len();
        let ack = self
            .json(
                Method::POST,
                &format!("/exams/{}/results/upload", segment(exam_id)),
                RequestOptions::default().multipart(files),
            )
            .await?;
        tracing::info!(exam_id, files = count, "results uploaded");
        Ok(ack)
    }
}

impl FilePart {
    /// Read a local file into an upload part.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::Io`] if the file cannot be read.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApiError::io(&format!("read {}", path.display()), &e))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        Ok(Self {
            field: UPLOAD_FIELD.to_string(),
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }
}

impl Blob {
    /// Write the blob into `dir`, using the server-suggested name or `fallback_name`.
    ///
    /// Existing files are never overwritten: a taken name gets a numeric
    /// suffix, `results.pdf` then `results (1).pdf` and so on. Returns the
    /// path written.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ErrorKind::Io`] if the directory or file cannot be written.
    pub async fn save_into(&self, dir: &Path, fallback_name: &str) -> Result<PathBuf, ApiError> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ApiError::io(&format!("mkdir {}", dir.display()), &e))?;
        let name = self.file_name.as_deref().unwrap_or(fallback_name);

        let mut attempt = 0;
        loop {
            let path = dir.join(numbered_name(name, attempt));
            match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(mut file) => {
                    file.write_all(&self.bytes)
                        .await
                        .map_err(|e| ApiError::io(&format!("write {}", path.display()), &e))?;
                    file.flush()
                        .await
                        .map_err(|e| ApiError::io(&format!("write {}", path.display()), &e))?;
                    return Ok(path);
                }
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists && attempt < MAX_NAME_SUFFIX => {
                    attempt += 1;
                }
                Err(e) => {
                    return Err(ApiError::io(&format!("create {}", path.display()), &e));
                }
            }
        }
    }
}

/// Give up renaming after this many taken names.
const MAX_NAME_SUFFIX: u32 = 999;

/// `name` for attempt 0, otherwise `stem (n).ext`.
fn numbered_name(name: &str, attempt: u32) -> String {
    if attempt == 0 {
        return name.to_string();
    }
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} ({attempt}).{ext}"),
        _ => format!("{name} ({attempt})"),
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("csv") => "text/csv",
        Some("pdf") => "application/pdf",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_file_names_are_filesystem_safe() {
        assert_eq!(
            ReportKind::Excel.default_file_name("F4/2026 mock"),
            "exam-F4_2026_mock-results.xlsx"
        );
        assert_eq!(ReportKind::Zip.default_file_name("e1"), "exam-e1-results.zip");
    }

    #[test]
    fn content_types_by_extension() {
        assert_eq!(
            content_type_for(Path::new("marks.XLSX")),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
        assert_eq!(content_type_for(Path::new("marks.csv")), "text/csv");
        assert_eq!(content_type_for(Path::new("marks")), "application/octet-stream");
    }

    #[tokio::test]
    async fn file_part_reads_name_and_bytes() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("form4.csv");
        std::fs::write(&path, "index,score\nS0101/0001,78\n").unwrap();

        let part = FilePart::from_path(&path).await.unwrap();
        assert_eq!(part.field, "files");
        assert_eq!(part.file_name, "form4.csv");
        assert_eq!(part.content_type, "text/csv");
        assert_eq!(part.bytes.len(), 26);
    }

    #[tokio::test]
    async fn missing_upload_file_is_io_error() {
        let err = FilePart::from_path(Path::new("/definitely/not/here.xlsx"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Io);
    }

    #[tokio::test]
    async fn blob_saved_under_suggested_or_fallback_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let suggested = Blob {
            bytes: b"PK\x03\x04".to_vec(),
            content_type: Some("application/zip".into()),
            file_name: Some("bulk.zip".into()),
        };
        let path = suggested.save_into(tmp.path(), "fallback.zip").await.unwrap();
        assert_eq!(path, tmp.path().join("bulk.zip"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04".to_vec());

        let anonymous = Blob {
            file_name: None,
            ..suggested
        };
        let path = anonymous
            .save_into(&tmp.path().join("out"), "fallback.zip")
            .await
            .unwrap();
        assert_eq!(path, tmp.path().join("out").join("fallback.zip"));
    }

    #[test]
    fn numbered_names_keep_the_extension() {
        assert_eq!(numbered_name("results.pdf", 0), "results.pdf");
        assert_eq!(numbered_name("results.pdf", 2), "results (2).pdf");
        assert_eq!(numbered_name("results", 1), "results (1)");
        assert_eq!(numbered_name(".hidden", 1), ".hidden (1)");
    }

    #[tokio::test]
    async fn second_save_with_same_name_does_not_overwrite() {
        let tmp = tempfile::TempDir::new().unwrap();
        let first = Blob {
            bytes: b"first".to_vec(),
            content_type: Some("application/pdf".into()),
            file_name: Some("results.pdf".into()),
        };
        let second = Blob {
            bytes: b"second".to_vec(),
            ..first.clone()
        };

        let first_path = first.save_into(tmp.path(), "fallback.pdf").await.unwrap();
        let second_path = second.save_into(tmp.path(), "fallback.pdf").await.unwrap();

        assert_eq!(first_path, tmp.path().join("results.pdf"));
        assert_eq!(second_path, tmp.path().join("results (1).pdf"));
        assert_eq!(std::fs::read(&first_path).unwrap(), b"first".to_vec());
        assert_eq!(std::fs::read(&second_path).unwrap(), b"second".to_vec());
    }
}
