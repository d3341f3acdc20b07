use std::io::{BufRead, IsTerminal, Write};

use anyhow::Context;
use exam_api::ExamApi;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    user: String,
    role: Option<String>,
    exams: Vec<AssignedExam>,
}

#[derive(Serialize)]
struct AssignedExam {
    exam_id: Option<String>,
    exam_name: Option<String>,
}

pub async fn handle(args: &AuthLoginArgs, api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => read_password()?,
    };
    if password.is_empty() {
        anyhow::bail!("auth login: password is empty");
    }

    let profile = api
        .login(args.username.trim(), &password)
        .await
        .context("auth login failed")?;

    let exams = api
        .session()
        .get()
        .map(|record| record.exams)
        .unwrap_or_default()
        .into_iter()
        .map(|assignment| AssignedExam {
            exam_id: assignment.exam_id(),
            exam_name: assignment.exam_name().map(String::from),
        })
        .collect();

    output(
        &AuthLoginResponse {
            authenticated: true,
            user: profile.display_name().to_string(),
            user_id: profile.id,
            role: profile.role,
            exams,
        },
        flags.format,
    )
}

/// One line from stdin, prompting when attached to a terminal.
fn read_password() -> anyhow::Result<String> {
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprint!("Password: ");
        std::io::stderr().flush().ok();
    }
    let mut line = String::new();
    stdin
        .lock()
        .read_line(&mut line)
        .context("failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
