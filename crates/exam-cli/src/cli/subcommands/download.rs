use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Report downloads.
#[derive(Clone, Debug, Subcommand)]
pub enum DownloadCommands {
    /// Results as PDF.
    Pdf(DownloadArgs),
    /// Results as an Excel workbook.
    Excel(DownloadArgs),
    /// All per-school reports as one ZIP archive.
    Zip(DownloadArgs),
}

#[derive(Clone, Debug, Args)]
pub struct DownloadArgs {
    /// Target directory (defaults to `general.download_dir`).
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Open the file with the system handler afterwards.
    #[arg(long)]
    pub open: bool,
}
