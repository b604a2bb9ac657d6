use crate::cli::parser::Commands;
use crate::core::access::AccessLayer;
use crate::core::capture::describe_payload;
use crate::core::session::Session;
use crate::errors::AppResult;
use crate::models::{Submission, UserRole};
use crate::screens::InspectorScreen;
use crate::store::RecordStore;
use crate::ui::messages::{info, screen_header, success, warning};
use crate::utils::colors::color_for_status;
use crate::utils::table::{Cell, Column, Table};

/// Inspector screen: list everything, optionally forward a batch to the contractor.
pub async fn handle<S: RecordStore>(
    cmd: &Commands,
    session: &Session,
    access: &AccessLayer<S>,
) -> AppResult<()> {
    let Commands::Inspect { send, all } = cmd else {
        return Ok(());
    };

    session.require(UserRole::Inspector)?;
    screen_header(session.screen().title(), &session.username);

    let mut screen = InspectorScreen::new();
    screen.refresh(access).await;

    if *all {
        screen.select_all(true);
    } else {
        for id in send {
            if !screen.toggle(*id) {
                warning(format!("Request #{} is not waiting for the inspector, skipped", id));
            }
        }
    }

    if screen.can_send() {
        let count = screen.selected().len();
        info(format!("Sending {} request(s) to the contractor…", count));

        if let Some(report) = screen.send_selected(access).await {
            if report.is_clean() {
                success(format!("{} request(s) sent to the contractor", report.succeeded));
            } else {
                warning("Some requests could not be sent; check the list below");
            }
        }
    } else if *all {
        info("Nothing waiting for the inspector.");
    }

    print_list(screen.submissions());
    Ok(())
}

fn print_list(submissions: &[Submission]) {
    if submissions.is_empty() {
        println!("No requests yet.");
        return;
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Name", 20),
        Column::new("Service", 14),
        Column::new("Captured", 20),
        Column::new("Location", 22),
        Column::new("Photo", 24),
        Column::new("Status", 18),
    ]);

    for s in submissions {
        table.add_row(vec![
            s.id.to_string().into(),
            s.name.as_str().into(),
            s.service.as_str().into(),
            s.captured_at.as_str().into(),
            s.location
                .map(|p| p.display())
                .unwrap_or_else(|| "--".to_string())
                .into(),
            describe_payload(&s.initial_photo).into(),
            Cell::colored(s.status.as_str(), color_for_status(s.status)),
        ]);
    }

    println!("{}", table.render());

    // i link sono troppo lunghi per la tabella
    for s in submissions {
        if let Some(p) = s.location {
            println!("  #{:<4} map: {}", s.id, p.maps_url());
        }
    }
}
