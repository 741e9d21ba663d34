use chrono::NaiveDate;
use log::debug;
use uuid::Uuid;

use super::clock::{Clock, FixedOffsetClock};
use super::date_math::DateExtents;
use super::deadline::evaluate_deadline;
use super::positioner::position_task;
use super::task_key::assign_task_keys;
use super::today::today_marker;
use super::units::{generate_units, UnitRequest};
use crate::error::DateParseError;
use crate::model::{EnhancedTask, GanttLayout, Project, Snapshot, Task, ViewMode};

/// Inputs of one layout pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub tasks: &'a [Task],
    pub projects: &'a [Project],
    pub view_mode: ViewMode,
    /// Period the user navigated to.
    pub reference: NaiveDate,
    /// Narrow the chart to one project's tasks.
    pub selected_project: Option<Uuid>,
}

impl<'a> LayoutRequest<'a> {
    pub fn new(snapshot: &'a Snapshot, view_mode: ViewMode, reference: NaiveDate) -> Self {
        Self {
            tasks: &snapshot.tasks,
            projects: &snapshot.projects,
            view_mode,
            reference,
            selected_project: None,
        }
    }

    pub fn for_project(mut self, project_id: Uuid) -> Self {
        self.selected_project = Some(project_id);
        self
    }
}

/// Turns task records into a renderable Gantt layout.
#[derive(Debug, Clone, Default)]
pub struct GanttLayoutEngine<C = FixedOffsetClock> {
    clock: C,
}

impl<C: Clock> GanttLayoutEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Samples the clock once and lays out the request against that day.
    pub fn layout(&self, req: &LayoutRequest<'_>) -> Result<GanttLayout, DateParseError> {
        layout_at(req, self.clock.today())
    }
}

/// Pure layout pass for a given "today".
pub fn layout_at(req: &LayoutRequest<'_>, today: NaiveDate) -> Result<GanttLayout, DateParseError> {
    let parsed = req
        .tasks
        .iter()
        .map(|task| Ok((task, task.start()?, task.end()?)))
        .collect::<Result<Vec<_>, DateParseError>>()?;

    // Keys come from the full list so they don't shift when the chart is narrowed.
    let keys = assign_task_keys(req.tasks);

    let visible: Vec<_> = parsed
        .into_iter()
        .filter(|(task, _, _)| {
            req.selected_project
                .map_or(true, |project| task.project_id == Some(project))
        })
        .collect();

    let task_extents = DateExtents::from_dates(
        visible
            .iter()
            .flat_map(|(_, start, end)| start.iter().chain(end.iter()).copied()),
    );
    let scope = match req.selected_project {
        Some(project_id) => scope_extents(project_id, task_extents, req.projects)?,
        None => None,
    };

    let units = generate_units(&UnitRequest {
        view_mode: req.view_mode,
        reference: req.reference,
        today,
        task_extents,
        scope,
    });

    let tasks: Vec<EnhancedTask> = visible
        .into_iter()
        .map(|(task, start, end)| {
            let deadline = evaluate_deadline(end, task.status, today);
            EnhancedTask {
                task_key: keys.get(&task.id).cloned().unwrap_or_default(),
                is_overdue: deadline.is_overdue,
                days_until_deadline: deadline.days_until_deadline,
                effective_status: deadline.effective_status,
                position: position_task(start, end, &units),
                task: task.clone(),
            }
        })
        .collect();

    let today_marker = today_marker(&units, req.view_mode, today);

    debug!(
        "event=layout view={} today={} units={} tasks={} scoped={}",
        req.view_mode,
        today,
        units.len(),
        tasks.len(),
        scope.is_some()
    );

    Ok(GanttLayout {
        today,
        view_mode: req.view_mode,
        units,
        tasks,
        today_marker,
    })
}

/// Date range of the selected project: its tasks' dates, else its own.
fn scope_extents(
    project_id: Uuid,
    task_extents: Option<DateExtents>,
    projects: &[Project],
) -> Result<Option<DateExtents>, DateParseError> {
    if task_extents.is_some() {
        return Ok(task_extents);
    }
    let Some(project) = projects.iter().find(|p| p.id == project_id) else {
        return Ok(None);
    };
    Ok(DateExtents::from_dates(project.start()?.into_iter().chain(project.end()?)))
}
