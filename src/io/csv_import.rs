use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use log::warn;

use crate::error::SnapshotError;
use crate::model::{Project, Snapshot, Task, TaskStatus};

/// Result of reading a task spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvImport {
    pub snapshot: Snapshot,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Title,
    Start,
    End,
    Status,
    Created,
    Project,
}

/// Try parsing a date string with several common formats; the result is
/// always written back as `YYYY-MM-DD`.
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let head = s.split(|c: char| c == 'T' || c.is_whitespace()).next().unwrap_or(s);
    for fmt in &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(head, fmt) {
            return Some(d);
        }
    }
    None
}

fn parse_created(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

fn header_to_column(header: &str) -> Option<Column> {
    let normalized = header.trim().to_lowercase().replace([' ', '-', '_'], "");
    match normalized.as_str() {
        "title" | "name" | "task" | "taskname" | "tasklabel" | "label" | "activity" => {
            Some(Column::Title)
        }
        "start" | "startdate" | "from" | "begin" => Some(Column::Start),
        "end" | "enddate" | "to" | "finish" | "due" | "duedate" | "deadline" => Some(Column::End),
        "status" | "state" | "stage" => Some(Column::Status),
        "created" | "createdat" | "createdon" => Some(Column::Created),
        "project" | "projectname" | "site" => Some(Column::Project),
        _ => None,
    }
}

pub fn import_csv(path: &Path) -> Result<CsvImport, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    import_csv_str(&content)
}

/// Import tasks from CSV text.
///
/// Rows without a title or with an unreadable date are skipped and counted.
/// Rows without a `created` value are ordered by their position in the file.
pub fn import_csv_str(content: &str) -> Result<CsvImport, SnapshotError> {
    let first_line = content.lines().next().unwrap_or("");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(detect_delimiter(first_line))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns: Vec<Option<Column>> = headers.iter().map(header_to_column).collect();
    if !columns.contains(&Some(Column::Title)) {
        return Err(SnapshotError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let imported_at = Utc::now();
    let mut projects: Vec<Project> = Vec::new();
    let mut project_index: HashMap<String, usize> = HashMap::new();
    let mut tasks: Vec<Task> = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!("event=csv_row_skipped row={row} reason={e}");
                skipped += 1;
                continue;
            }
        };

        let field = |wanted: Column| {
            columns
                .iter()
                .position(|c| *c == Some(wanted))
                .and_then(|idx| record.get(idx))
                .filter(|v| !v.is_empty())
        };

        let Some(title) = field(Column::Title) else {
            skipped += 1;
            continue;
        };

        let mut dates = [None, None];
        let mut bad_date = false;
        for (slot, column) in dates.iter_mut().zip([Column::Start, Column::End]) {
            if let Some(raw) = field(column) {
                match parse_date(raw) {
                    Some(d) => *slot = Some(d.format("%Y-%m-%d").to_string()),
                    None => {
                        warn!("event=csv_row_skipped row={row} reason=invalid_date value={raw:?}");
                        bad_date = true;
                    }
                }
            }
        }
        if bad_date {
            skipped += 1;
            continue;
        }

        let status = field(Column::Status).and_then(|raw| {
            let parsed = TaskStatus::from_label(raw);
            if parsed.is_none() {
                warn!("event=csv_unknown_status row={row} value={raw:?}");
            }
            parsed
        });

        let created_at = field(Column::Created)
            .and_then(parse_created)
            .unwrap_or_else(|| imported_at + Duration::seconds(i as i64));

        let project_id = field(Column::Project).map(|name| {
            let idx = *project_index.entry(name.to_lowercase()).or_insert_with(|| {
                projects.push(Project::new(name));
                projects.len() - 1
            });
            projects[idx].id
        });

        let [start_date, end_date] = dates;
        let mut task = Task::new(title);
        task.start_date = start_date;
        task.end_date = end_date;
        task.status = status;
        task.created_at = created_at;
        task.project_id = project_id;
        tasks.push(task);
    }

    if tasks.is_empty() {
        return Err(SnapshotError::Empty);
    }

    Ok(CsvImport {
        snapshot: Snapshot { projects, tasks },
        skipped,
    })
}
