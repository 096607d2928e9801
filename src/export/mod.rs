mod fs_utils;
mod json_csv;
mod xlsx;

use crate::core::report::ReportTable;
use crate::errors::AppResult;
use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

/// Completion message shared by all sinks.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Write a report table to `path` in the chosen format.
///
/// The table is a generic rows+columns structure: the sink never recomputes
/// report semantics, it only renders.
pub fn write_report(
    table: &ReportTable,
    format: &ExportFormat,
    path: &Path,
    force: bool,
) -> AppResult<()> {
    fs_utils::ensure_writable(path, force)?;

    match format {
        ExportFormat::Csv => json_csv::export_csv(table, path),
        ExportFormat::Json => json_csv::export_json(table, path),
        ExportFormat::Xlsx => xlsx::export_xlsx(table, path),
    }
}
