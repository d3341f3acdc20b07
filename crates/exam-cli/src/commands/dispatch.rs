use exam_api::ExamApi;
use exam_config::DeskConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    api: &ExamApi,
    config: &DeskConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Auth { action } => commands::auth::handle(&action, api, flags).await,
        Commands::Exam { action } => commands::exam::handle(&action, api, flags).await,
        Commands::Board { action } => commands::board::handle(&action, api, flags).await,
        Commands::Stats => commands::analysis::stats(api, flags).await,
        Commands::Analysis { action } => commands::analysis::handle(&action, api, flags).await,
        Commands::Download { action } => {
            commands::download::handle(&action, api, &config.general, flags).await
        }
        Commands::Upload(args) => commands::upload::handle(&args, api, flags).await,
    }
}
