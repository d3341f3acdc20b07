use clap::ValueEnum;

/// Shared output mode across all commands.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Raw,
}

/// Global flags available before or after subcommands.
#[derive(Clone, Debug)]
pub struct GlobalFlags {
    pub format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
    /// Selected exam for per-exam commands.
    pub exam: Option<String>,
}

impl GlobalFlags {
    /// The selected exam, or an error telling the user how to pick one.
    pub fn require_exam(&self) -> anyhow::Result<&str> {
        self.exam
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| anyhow::anyhow!("no exam selected: pass --exam <id> (see `examdesk exam list`)"))
    }
}
