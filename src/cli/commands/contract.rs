use crate::cli::parser::Commands;
use crate::core::access::AccessLayer;
use crate::core::capture::read_photo;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::{Submission, UserRole};
use crate::screens::ContractorScreen;
use crate::store::RecordStore;
use crate::ui::messages::{info, screen_header, success};
use crate::utils::colors::{color_for_optional_field, color_for_status};
use crate::utils::date::display_opt;
use crate::utils::path::expand_tilde;
use crate::utils::table::{Cell, Column, Table};

/// Contractor screen: list assigned work, optionally close one request.
pub async fn handle<S: RecordStore>(
    cmd: &Commands,
    session: &Session,
    access: &AccessLayer<S>,
) -> AppResult<()> {
    let Commands::Contract { complete, photo } = cmd else {
        return Ok(());
    };

    session.require(UserRole::Contractor)?;
    screen_header(session.screen().title(), &session.username);

    let mut screen = ContractorScreen::new();
    screen.refresh(access).await;

    if let Some(id) = complete {
        if let Some(path) = photo {
            let payload = read_photo(&expand_tilde(path)).await?;
            screen.attach_photo(*id, payload);
        }

        info(format!("Completing request #{}…", id));
        screen.complete(*id, access).await?;
        success(format!("Request #{} marked as completed", id));
    }

    print_list(screen.submissions());
    Ok(())
}

fn print_list(submissions: &[Submission]) {
    if submissions.is_empty() {
        println!("No work orders assigned.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Service", 14),
        Column::new("Location", 22),
        Column::new("Assigned", 20),
        Column::new("Completed", 20),
        Column::new("Status", 18),
    ]);

    for s in submissions {
        let completed = display_opt(s.completed_at.as_ref());
        table.add_row(vec![
            s.id.to_string().into(),
            s.service.as_str().into(),
            s.location
                .map(|p| p.display())
                .unwrap_or_else(|| "--".to_string())
                .into(),
            display_opt(s.sent_to_contractor_at.as_ref()).into(),
            Cell::colored(completed.clone(), color_for_optional_field(&completed)),
            Cell::colored(s.status.as_str(), color_for_status(s.status)),
        ]);
    }

    println!("{}", table.render());
}
