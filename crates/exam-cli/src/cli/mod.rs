use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `examdesk` binary.
#[derive(Debug, Parser)]
#[command(
    name = "examdesk",
    version,
    about = "examdesk - admin console for the exam-results backend"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Exam id that per-exam commands operate on
    #[arg(short, long, global = true)]
    pub exam: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            exam: self.exam.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::{AuthCommands, DownloadCommands, ExamCommands};
    use super::{Cli, Commands, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "examdesk", "--format", "table", "--exam", "e1", "--verbose", "stats",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.exam.as_deref(), Some("e1"));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["examdesk", "auth", "status", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["examdesk", "--format", "xml", "stats"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn exam_list_collects_query_params() {
        let cli = Cli::try_parse_from([
            "examdesk", "exam", "list", "--param", "page=2", "--param", "level=O-LEVEL",
        ])
        .expect("cli should parse");

        let Commands::Exam {
            action: ExamCommands::List(args),
        } = cli.command
        else {
            panic!("expected exam list");
        };
        assert_eq!(args.params.param, vec!["page=2", "level=O-LEVEL"]);
    }

    #[test]
    fn exam_create_requires_a_payload_source() {
        assert!(Cli::try_parse_from(["examdesk", "exam", "create"]).is_err());
        assert!(
            Cli::try_parse_from(["examdesk", "exam", "create", "--data", "{}", "--file", "x.json"])
                .is_err()
        );
        assert!(Cli::try_parse_from(["examdesk", "exam", "create", "--data", "{}"]).is_ok());
    }

    #[test]
    fn download_accepts_output_dir_and_open() {
        let cli = Cli::try_parse_from([
            "examdesk", "--exam", "e1", "download", "zip", "--out", "/tmp/reports", "--open",
        ])
        .expect("cli should parse");

        let Commands::Download {
            action: DownloadCommands::Zip(args),
        } = cli.command
        else {
            panic!("expected download zip");
        };
        assert_eq!(args.out.as_deref(), Some(std::path::Path::new("/tmp/reports")));
        assert!(args.open);
    }

    #[test]
    fn upload_needs_at_least_one_file() {
        assert!(Cli::try_parse_from(["examdesk", "upload"]).is_err());
        let cli = Cli::try_parse_from(["examdesk", "upload", "a.xlsx", "b.xlsx"])
            .expect("cli should parse");
        let Commands::Upload(args) = cli.command else {
            panic!("expected upload");
        };
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["examdesk", "-e", "F4-2026", "stats"])
            .expect("cli should parse");
        let flags = cli.global_flags();
        assert_eq!(flags.require_exam().unwrap(), "F4-2026");
    }

    #[test]
    fn missing_exam_is_reported() {
        let cli = Cli::try_parse_from(["examdesk", "stats"]).expect("cli should parse");
        let err = cli.global_flags().require_exam().unwrap_err();
        assert!(err.to_string().contains("--exam"));
    }
}
