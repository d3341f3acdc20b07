use exam_api::ExamApi;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    notified_backend: bool,
}

pub async fn handle(api: &ExamApi, flags: &GlobalFlags) -> anyhow::Result<()> {
    let outcome = api.logout().await?;
    output(
        &AuthLogoutResponse {
            cleared: true,
            notified_backend: outcome.notified_backend,
        },
        flags.format,
    )
}
