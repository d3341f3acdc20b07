use clap::{Args, Subcommand};

use super::shared::PayloadArgs;

/// Exam board commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BoardCommands {
    /// List exam boards.
    List,
    /// Create a board from a JSON payload.
    Create(PayloadArgs),
    /// Change some of a board's fields.
    Update(BoardUpdateArgs),
    /// Delete a board.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct BoardUpdateArgs {
    pub id: String,
    #[command(flatten)]
    pub payload: PayloadArgs,
}
