use exam_api::ExamApi;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AnalysisCommands;
use crate::commands::shared::parse_params;
use crate::output::output;

/// Handle `examdesk stats`.
pub async fn stats(api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let exam_id = flags.require_exam()?;
    output(&api.exam_stats(exam_id).await?, flags.format)
}

/// Handle `examdesk analysis <subcommand>`.
pub async fn handle(
    action: &AnalysisCommands,
    api: &ExamApi,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let exam_id = flags.require_exam()?;
    let body = match action {
        AnalysisCommands::Overview(args) => {
            api.exam_overviews(exam_id, &parse_params(&args.param)?).await?
        }
        AnalysisCommands::Rankings(args) => {
            api.exam_rankings(exam_id, &parse_params(&args.param)?).await?
        }
    };
    output(&body, flags.format)
}
