use std::path::PathBuf;

use anyhow::Context;
use exam_api::ExamApi;
use exam_api::files::ReportKind;
use exam_config::GeneralConfig;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::DownloadCommands;
use crate::cli::subcommands::download::DownloadArgs;
use crate::output::output;

#[derive(Serialize)]
struct DownloadResponse {
    exam_id: String,
    path: PathBuf,
    bytes: usize,
    content_type: Option<String>,
    opened: bool,
}

/// Handle `examdesk download <kind>`.
pub async fn handle(
    action: &DownloadCommands,
    api: &ExamApi,
    general: &GeneralConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let (kind, args) = match action {
        DownloadCommands::Pdf(args) => (ReportKind::Pdf, args),
        DownloadCommands::Excel(args) => (ReportKind::Excel, args),
        DownloadCommands::Zip(args) => (ReportKind::Zip, args),
    };
    let exam_id = flags.require_exam()?;

    let blob = api.download_report(exam_id, kind).await?;
    let dir = target_dir(args, general);
    let path = blob
        .save_into(&dir, &kind.default_file_name(exam_id))
        .await?;
    tracing::info!(path = %path.display(), bytes = blob.len(), "report saved");

    let opened = if args.open || general.open_downloads {
        open::that(&path).with_context(|| format!("failed to open {}", path.display()))?;
        true
    } else {
        false
    };

    output(
        &DownloadResponse {
            exam_id: exam_id.to_string(),
            bytes: blob.len(),
            content_type: blob.content_type,
            path,
            opened,
        },
        flags.format,
    )
}

fn target_dir(args: &DownloadArgs, general: &GeneralConfig) -> PathBuf {
    args.out
        .clone()
        .unwrap_or_else(|| general.download_dir.clone())
}
