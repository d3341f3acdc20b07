use exam_api::ExamApi;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ExamCommands;
use crate::commands::shared::{exam_id, parse_params, read_payload};
use crate::output::output;

#[derive(Serialize)]
struct Acknowledged {
    id: String,
    action: &'static str,
    response: Value,
}

/// Handle `examdesk exam <subcommand>`.
pub async fn handle(action: &ExamCommands, api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        ExamCommands::List(args) => {
            let params = parse_params(&args.params.param)?;
            output(&api.list_exams(&params).await?, flags.format)
        }
        ExamCommands::Get { id } => {
            let id = exam_id(id.as_deref(), flags)?;
            output(&api.get_exam(&id).await?, flags.format)
        }
        ExamCommands::Create(payload) => {
            let exam = api.create_exam(read_payload(payload)?).await?;
            tracing::info!(exam_id = %exam.id, "exam created");
            output(&exam, flags.format)
        }
        ExamCommands::Update(args) => {
            let id = exam_id(args.id.as_deref(), flags)?;
            output(&api.update_exam(&id, read_payload(&args.payload)?).await?, flags.format)
        }
        ExamCommands::Delete { id } => {
            let id = exam_id(id.as_deref(), flags)?;
            let response = api.delete_exam(&id).await?;
            output(
                &Acknowledged {
                    id,
                    action: "deleted",
                    response,
                },
                flags.format,
            )
        }
        ExamCommands::Reprocess { id } => {
            let id = exam_id(id.as_deref(), flags)?;
            let response = api.reprocess_exam(&id).await?;
            output(
                &Acknowledged {
                    id,
                    action: "reprocessing",
                    response,
                },
                flags.format,
            )
        }
        ExamCommands::Select { id } => {
            let selected = api.select_exam(id).await?;
            output(&selected, flags.format)
        }
    }
}
