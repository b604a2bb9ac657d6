use crate::core::notify::NOTIFY_OPERATION;
use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::{pad_right, truncate};
use ansi_term::Colour;

const MAX_OP_WIDTH: usize = 40;

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        NOTIFY_OPERATION => Colour::Green,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // arancione
        _ => Colour::White,
    }
}

fn op_target(entry: &LogEntry) -> String {
    if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the internal log; with `notifications_only` just the simulated e-mails.
    pub fn print_log(pool: &mut DbPool, notifications_only: bool) -> AppResult<()> {
        let filter = notifications_only.then_some(NOTIFY_OPERATION);
        let entries = load_log(&pool.conn, filter)?;

        if entries.is_empty() {
            println!("📭 Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| op_target(e).chars().count())
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);
        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(0);

        if notifications_only {
            println!("📧 Simulated e-mails:\n");
        } else {
            println!("📜 Internal log:\n");
        }

        for entry in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&entry.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| entry.date.clone());

            // padding calcolato sul testo visibile, poi si colora
            let label = pad_right(&truncate(&op_target(entry), op_w), op_w);
            let color = color_for_operation(&entry.operation);

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                entry.id,
                date,
                color.paint(label),
                entry.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
