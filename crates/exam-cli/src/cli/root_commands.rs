use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    AnalysisCommands, AuthCommands, BoardCommands, DownloadCommands, ExamCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Exams.
    Exam {
        #[command(subcommand)]
        action: ExamCommands,
    },
    /// Exam boards.
    Board {
        #[command(subcommand)]
        action: BoardCommands,
    },
    /// Summary statistics for the selected exam.
    Stats,
    /// Overviews and rankings for the selected exam.
    Analysis {
        #[command(subcommand)]
        action: AnalysisCommands,
    },
    /// Download a generated report for the selected exam.
    Download {
        #[command(subcommand)]
        action: DownloadCommands,
    },
    /// Upload result sheets for the selected exam.
    Upload(UploadArgs),
}

#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    /// Result files (xlsx, xls, csv) sent in one multipart request.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}
