use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Sign in with username and password.
    Login(AuthLoginArgs),
    /// Notify the backend and clear the stored session.
    Logout,
    /// Show the stored session.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    /// Account username.
    #[arg(short, long)]
    pub username: String,
    /// Password. Read from stdin when omitted.
    #[arg(long)]
    pub password: Option<String>,
}
