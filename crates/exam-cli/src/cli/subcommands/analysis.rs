use clap::Subcommand;

use super::shared::ParamArgs;

#[derive(Clone, Debug, Subcommand)]
pub enum AnalysisCommands {
    /// Result overviews (grade distributions, division counts).
    Overview(ParamArgs),
    /// Rankings, e.g. `--param type=school --param limit=10`.
    Rankings(ParamArgs),
}
