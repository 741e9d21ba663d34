use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use site_timeline::config::AppSettings;
use site_timeline::engine::{Clock, DeadlineState, GanttLayoutEngine, LayoutRequest, PinnedClock};
use site_timeline::io;
use site_timeline::model::{GanttLayout, Project, Snapshot};

use crate::cli::ViewArgs;

pub fn layout(settings: &AppSettings, snapshot_path: &Path, view: &ViewArgs, json: bool) -> Result<()> {
    let snapshot = load(snapshot_path)?;
    let layout = run_layout(settings, &snapshot, view)?;
    if json {
        println!("{}", io::layout_to_json(&layout)?);
    } else {
        print_layout(&layout);
    }
    Ok(())
}

pub fn export(settings: &AppSettings, snapshot_path: &Path, output: &Path, view: &ViewArgs) -> Result<()> {
    let snapshot = load(snapshot_path)?;
    let layout = run_layout(settings, &snapshot, view)?;
    let count = io::export_layout_csv(&layout, output)
        .with_context(|| format!("writing {}", output.display()))?;
    println!("Exported {} tasks to {}", count, output.display());
    Ok(())
}

pub fn import(input: &Path, output: &Path, project_name: Option<String>) -> Result<()> {
    let io::CsvImport {
        mut snapshot,
        skipped,
    } = io::import_csv(input).with_context(|| format!("importing {}", input.display()))?;

    if let Some(name) = project_name {
        let project = Project::new(name);
        for task in snapshot.tasks.iter_mut().filter(|t| t.project_id.is_none()) {
            task.project_id = Some(project.id);
        }
        snapshot.projects.push(project);
    }

    io::save_snapshot(&snapshot, output).with_context(|| format!("writing {}", output.display()))?;
    info!(
        "event=csv_import tasks={} projects={} skipped={}",
        snapshot.tasks.len(),
        snapshot.projects.len(),
        skipped
    );
    if skipped > 0 {
        println!(
            "Imported {} tasks ({} rows skipped) into {}",
            snapshot.tasks.len(),
            skipped,
            output.display()
        );
    } else {
        println!("Imported {} tasks into {}", snapshot.tasks.len(), output.display());
    }
    Ok(())
}

fn load(path: &Path) -> Result<Snapshot> {
    io::load_snapshot(path).with_context(|| format!("loading snapshot {}", path.display()))
}

fn run_layout(settings: &AppSettings, snapshot: &Snapshot, view: &ViewArgs) -> Result<GanttLayout> {
    // One clock sample for the whole pass; --today pins it.
    let today = view.today.unwrap_or_else(|| settings.clock().today());
    let view_mode = view.view.unwrap_or(settings.default_view);
    let mut request = LayoutRequest::new(snapshot, view_mode, view.reference.unwrap_or(today));

    if let Some(project_id) = view.project {
        if snapshot.project(project_id).is_none() && snapshot.tasks_for(project_id).next().is_none() {
            bail!("project {} not found in snapshot", project_id);
        }
        request = request.for_project(project_id);
    }

    GanttLayoutEngine::with_clock(PinnedClock(today))
        .layout(&request)
        .context("laying out tasks")
}

fn print_layout(layout: &GanttLayout) {
    let (Some(start), Some(end)) = (layout.timeline_start(), layout.timeline_end()) else {
        return;
    };
    println!("Timeline: {} ({} → {})", layout.view_mode, start, end);
    let labels: Vec<&str> = layout.units.iter().map(|u| u.label.as_str()).collect();
    println!("Columns:  {}", labels.join(" | "));
    if layout.today_marker.visible {
        println!("Today:    {} at {:.1}%", layout.today, layout.today_marker.position);
    } else {
        println!("Today:    {} (off chart)", layout.today);
    }
    println!();

    if layout.tasks.is_empty() {
        println!("  (no tasks)");
        return;
    }
    println!(
        "{:<4} {:<28} {:<12} {:<10} {:<10} {:>7} {:>7}  {}",
        "KEY", "TITLE", "STATUS", "START", "END", "LEFT", "WIDTH", "DEADLINE"
    );
    for task in layout.tasks_by_key() {
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string())
        };
        let (left, width) = if task.position.visible {
            (format!("{:.1}%", task.position.left), format!("{:.1}%", task.position.width))
        } else {
            ("-".to_string(), "-".to_string())
        };
        println!(
            "{:<4} {:<28} {:<12} {:<10} {:<10} {:>7} {:>7}  {}",
            task.task_key,
            truncate(&task.task.title, 28),
            task.effective_status.map(|s| s.as_str()).unwrap_or("-"),
            date(task.position.actual_start),
            date(task.position.actual_end),
            left,
            width,
            DeadlineState::from(task)
                .describe(task.task.status)
                .unwrap_or_default()
        );
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(max - 1).collect();
        out.push('…');
        out
    }
}
