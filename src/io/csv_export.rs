use std::path::Path;

use chrono::NaiveDate;

use crate::engine::DeadlineState;
use crate::error::SnapshotError;
use crate::model::GanttLayout;

const HEADER: [&str; 9] = [
    "Key", "Title", "Status", "Start", "End", "Left %", "Width %", "Visible", "Deadline",
];

/// Export a layout to a semicolon-delimited CSV file.
///
/// Rows are ordered by task key. Returns the number of tasks written.
pub fn export_layout_csv(layout: &GanttLayout, path: &Path) -> Result<usize, SnapshotError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(path)?;
    let count = write_rows(layout, &mut wtr)?;
    wtr.flush().map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(count)
}

/// Same rows as [`export_layout_csv`], into memory.
pub fn layout_csv_string(layout: &GanttLayout) -> Result<String, SnapshotError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(Vec::new());
    write_rows(layout, &mut wtr)?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| SnapshotError::Csv(csv::Error::from(e.into_error())))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

fn write_rows<W: std::io::Write>(
    layout: &GanttLayout,
    wtr: &mut csv::Writer<W>,
) -> Result<usize, SnapshotError> {
    wtr.write_record(HEADER)?;

    let rows = layout.tasks_by_key();

    for task in &rows {
        let deadline = DeadlineState::from(*task)
            .describe(task.task.status)
            .unwrap_or_default();
        wtr.write_record([
            task.task_key.clone(),
            task.task.title.clone(),
            task.effective_status.map(|s| s.as_str()).unwrap_or("").to_string(),
            format_date(task.position.actual_start),
            format_date(task.position.actual_end),
            format!("{:.2}", task.position.left),
            format!("{:.2}", task.position.width),
            if task.position.visible { "yes" } else { "no" }.to_string(),
            deadline,
        ])?;
    }

    Ok(rows.len())
}
