use std::path::PathBuf;

use clap::Args;

/// Query parameters forwarded to list-style endpoints.
#[derive(Clone, Debug, Default, Args)]
pub struct ParamArgs {
    /// Query parameter as KEY=VALUE (repeatable).
    #[arg(long, value_name = "KEY=VALUE")]
    pub param: Vec<String>,
}

/// JSON body for create/update commands, inline or from a file.
#[derive(Clone, Debug, Args)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Inline JSON object.
    #[arg(long)]
    pub data: Option<String>,
    /// Path to a JSON file (`-` reads stdin).
    #[arg(long)]
    pub file: Option<PathBuf>,
}
