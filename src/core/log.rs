use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::formatting::{pad_right, truncate};
use ansi_term::Colour;

const OP_WIDTH: usize = 40;

/// ANSI colour for an audit operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "save" => Colour::Green,
        "load" => Colour::Cyan,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

struct LogEntry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            let raw_date: String = row.get(1)?;
            let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or(raw_date);

            Ok(LogEntry {
                id: row.get(0)?,
                date,
                operation: row.get(2)?,
                target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in entries {
            let color = color_for_operation(&e.operation);

            // only the operation word is coloured; the target is cut first
            let op_target = if e.target.is_empty() {
                color.paint(e.operation.as_str()).to_string()
            } else {
                let room = OP_WIDTH.saturating_sub(e.operation.len() + 3);
                format!(
                    "{} ({})",
                    color.paint(e.operation.as_str()),
                    truncate(&e.target, room)
                )
            };

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                e.id,
                e.date,
                pad_right(&op_target, OP_WIDTH),
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
