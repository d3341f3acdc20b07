use clap::{Args, Subcommand};

use super::shared::{ParamArgs, PayloadArgs};

/// Exam commands. Id arguments default to `--exam`.
#[derive(Clone, Debug, Subcommand)]
pub enum ExamCommands {
    /// List exams.
    List(ExamListArgs),
    /// Show one exam.
    Get { id: Option<String> },
    /// Create an exam from a JSON payload.
    Create(PayloadArgs),
    /// Replace an exam's fields from a JSON payload.
    Update(ExamUpdateArgs),
    /// Delete an exam.
    Delete { id: Option<String> },
    /// Ask the backend to recompute an exam's results.
    Reprocess { id: Option<String> },
    /// Resolve an exam and print it as the selection context.
    Select { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct ExamListArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

#[derive(Clone, Debug, Args)]
pub struct ExamUpdateArgs {
    pub id: Option<String>,
    #[command(flatten)]
    pub payload: PayloadArgs,
}
