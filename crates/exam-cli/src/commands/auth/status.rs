use exam_api::ExamApi;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user: Option<String>,
    user_id: Option<String>,
    role: Option<String>,
    exams: usize,
    backend: &'static str,
    base_url: String,
    signed_in_at: Option<String>,
    expires_at: Option<String>,
    note: Option<String>,
}

/// Local view only: the backend is not contacted, so an expired token still
/// reports as authenticated until the next request is rejected.
pub fn handle(api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = api.status();

    let response = AuthStatusResponse {
        authenticated: status.authenticated,
        user: status.user.as_ref().map(|user| user.display_name().to_string()),
        user_id: status.user.as_ref().map(|user| user.id.clone()),
        role: status.user.and_then(|user| user.role),
        exams: status.exam_count,
        backend: status.backend,
        base_url: api.client().base_url().to_string(),
        signed_in_at: status.signed_in_at.map(|at| at.to_rfc3339()),
        expires_at: status.expires_at.map(|at| at.to_rfc3339()),
        note: if !status.authenticated {
            Some("not signed in; run `examdesk auth login`".into())
        } else if status.expired {
            Some("token has expired; the next request will sign you out".into())
        } else {
            None
        },
    };

    output(&response, flags.format)
}
