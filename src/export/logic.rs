use crate::db::log::ttlog_or_warn;
use crate::db::pool::DbPool;
use crate::db::queries::load_records;
use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::RecordExport;
use crate::export::xlsx::export_xlsx;
use crate::models::roster::RosterKind;
use crate::ui::messages::warning;
use crate::utils::path::absolute_output;
use crate::utils::period::{describe_period, parse_period};

pub struct ExportLogic;

impl ExportLogic {
    /// Export saved attendance rows.
    ///
    /// - `file`: absolute output path (`~` is expanded)
    /// - `period`: `None`, `"all"`, `YYYY`, `YYYY-MM`, `YYYY-MM-DD` or `start:end`
    /// - `kind`: restrict to students or staff
    ///
    /// Returns the number of rows written (0 when nothing matched).
    pub fn export(
        pool: &DbPool,
        format: ExportFormat,
        file: &str,
        period: Option<&str>,
        kind: Option<RosterKind>,
        force: bool,
    ) -> AppResult<usize> {
        let path = absolute_output(file)?;
        let bounds = parse_period(period)?;

        let rows: Vec<RecordExport> = load_records(&pool.conn, bounds, kind)?
            .iter()
            .map(RecordExport::from)
            .collect();

        if rows.is_empty() {
            warning(format!(
                "No saved attendance found for {}.",
                describe_period(period)
            ));
            return Ok(0);
        }

        ensure_writable(&path, force)?;

        match format {
            ExportFormat::Csv => export_csv(&rows, &path)?,
            ExportFormat::Json => export_json(&rows, &path)?,
            ExportFormat::Xlsx => {
                let title = format!("Attendance for {}", describe_period(period));
                export_xlsx(&rows, &path, &title)?
            }
        }

        ttlog_or_warn(
            &pool.conn,
            "export",
            format.as_str(),
            &format!("{} rows to {}", rows.len(), path.display()),
        );

        Ok(rows.len())
    }
}
