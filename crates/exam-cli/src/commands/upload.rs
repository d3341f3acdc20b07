use exam_api::{ExamApi, FilePart};
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::output::output;

#[derive(Serialize)]
struct UploadResponse {
    exam_id: String,
    files: Vec<String>,
    response: Value,
}

/// Handle `examdesk upload FILE...`: one multipart request for all files.
pub async fn handle(args: &UploadArgs, api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exam_id = flags.require_exam()?;

    let mut parts = Vec::with_capacity(args.files.len());
    for path in &args.files {
        parts.push(FilePart::from_path(path).await?);
    }
    let files = parts.iter().map(|part| part.file_name.clone()).collect();

    let response = api.upload_results(exam_id, parts).await?;
    output(
        &UploadResponse {
            exam_id: exam_id.to_string(),
            files,
            response,
        },
        flags.format,
    )
}
