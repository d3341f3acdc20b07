mod login;
mod logout;
mod status;

use exam_api::ExamApi;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuthCommands;

/// Handle `examdesk auth <subcommand>`.
pub async fn handle(action: &AuthCommands, api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        AuthCommands::Login(args) => login::handle(args, api, flags).await,
        AuthCommands::Logout => logout::handle(api, flags).await,
        AuthCommands::Status => status::handle(api, flags),
    }
}
