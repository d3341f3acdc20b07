use exam_api::Navigator;

use crate::ui;

/// The CLI's login entry point is a command, so "redirecting" means telling
/// the user to run it.
#[derive(Debug, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn redirect_to_login(&self, reason: &str) {
        ui::notice(&login_hint(reason));
    }
}

fn login_hint(reason: &str) -> String {
    let reason = reason.trim().trim_end_matches('.');
    format!("{reason}. Run `examdesk auth login` to sign in.")
}

#[cfg(test)]
mod tests {
    use super::login_hint;

    #[test]
    fn hint_names_the_login_command() {
        assert_eq!(
            login_hint("signed out"),
            "signed out. Run `examdesk auth login` to sign in."
        );
        assert!(login_hint("Unauthorized: please log in again.").ends_with("to sign in."));
    }
}
