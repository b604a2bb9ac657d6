use crate::core::session::Session;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `login` command: credentials were already checked by the dispatcher.
pub fn handle(session: &Session) -> AppResult<()> {
    let screen = session.screen();

    success(format!(
        "Signed in as '{}' ({})",
        session.username,
        session.role.label()
    ));
    info(format!(
        "Your screen: {} → run `fieldflow {}`",
        screen.title(),
        screen.command()
    ));

    Ok(())
}
