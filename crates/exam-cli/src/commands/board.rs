use exam_api::ExamApi;
use serde::Serialize;
use serde_json::Value;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BoardCommands;
use crate::commands::shared::read_payload;
use crate::output::output;

#[derive(Serialize)]
struct BoardDeleted<'a> {
    id: &'a str,
    deleted: bool,
    response: Value,
}

/// Handle `examdesk board <subcommand>`.
pub async fn handle(action: &BoardCommands, api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        BoardCommands::List => output(&api.list_boards().await?, flags.format),
        BoardCommands::Create(payload) => {
            output(&api.create_board(read_payload(payload)?).await?, flags.format)
        }
        BoardCommands::Update(args) => {
            let changes = read_payload(&args.payload)?;
            output(&api.update_board(&args.id, changes).await?, flags.format)
        }
        BoardCommands::Delete { id } => {
            let response = api.delete_board(id).await?;
            output(
                &BoardDeleted {
                    id,
                    deleted: true,
                    response,
                },
                flags.format,
            )
        }
    }
}
