use chrono::{Duration, NaiveDate, TimeZone, Utc};
use site_timeline::engine::{layout_at, GanttLayoutEngine, LayoutRequest, PinnedClock};
use site_timeline::{
    EffectiveStatus, GanttLayout, Project, Snapshot, Task, TaskStatus, TimelineUnit, ViewMode,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task(title: &str, start: NaiveDate, end: NaiveDate, created_minute: i64) -> Task {
    let mut task = Task::new(title).scheduled(start, end);
    task.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap()
        + Duration::minutes(created_minute);
    task
}

fn assert_contiguous(units: &[TimelineUnit]) {
    assert!(!units.is_empty());
    for pair in units.windows(2) {
        assert_eq!(pair[0].end + Duration::days(1), pair[1].start, "{pair:?}");
    }
}

fn assert_positions_in_bounds(layout: &GanttLayout) {
    for t in &layout.tasks {
        let p = t.position;
        assert!((0.0..=100.0).contains(&p.left), "{}: {p:?}", t.task.title);
        if p.visible {
            assert!(p.width >= 1.0, "{}: {p:?}", t.task.title);
            assert!(p.left + p.width <= 100.0 + 1e-9, "{}: {p:?}", t.task.title);
        }
    }
}

/// Tower block with two phases and an unscheduled snag list.
fn site() -> (Snapshot, Project, Project) {
    let tower = Project::new("Tower A");
    let depot = Project::new("Depot");
    let tasks = vec![
        task("Excavation", ymd(2024, 6, 3), ymd(2024, 6, 14), 0).in_project(tower.id),
        task("Depot slab", ymd(2024, 7, 1), ymd(2024, 7, 12), 1).in_project(depot.id),
        task("Frame", ymd(2024, 6, 17), ymd(2024, 8, 9), 2)
            .in_project(tower.id)
            .with_status(TaskStatus::InProgress),
        Task::new("Snag list").in_project(tower.id),
    ];
    let snapshot = Snapshot {
        projects: vec![tower.clone(), depot.clone()],
        tasks,
    };
    (snapshot, tower, depot)
}

#[test]
fn daily_view_covers_two_weeks_around_reference() {
    let snapshot = Snapshot::default();
    let reference = ymd(2024, 3, 15);
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, reference), reference)
        .unwrap();

    assert_eq!(layout.units.len(), 14);
    assert_eq!(layout.timeline_start(), Some(ymd(2024, 3, 8)));
    assert_eq!(layout.timeline_end(), Some(ymd(2024, 3, 21)));
    assert!(layout.today_marker.visible);
}

#[test]
fn full_view_places_task_by_day_ratio() {
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![task("Footings", ymd(2024, 1, 10), ymd(2024, 1, 15), 0)],
    };
    let today = ymd(2024, 1, 1);
    let layout =
        layout_at(&LayoutRequest::new(&snapshot, ViewMode::Full, today), today).unwrap();

    assert_eq!(layout.units.len(), 1);
    assert_eq!(layout.units[0].label, "Jan 2024");
    let position = layout.tasks[0].position;
    assert!(position.visible);
    assert!((position.left - 30.0).abs() < 0.01, "{position:?}");
    assert!((position.width - 16.67).abs() < 0.01, "{position:?}");
}

#[test]
fn overdue_task_is_reported_as_delayed() {
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![task("Scaffold", ymd(2024, 6, 1), ymd(2024, 6, 5), 0)
            .with_status(TaskStatus::InProgress)],
    };
    let today = ymd(2024, 6, 10);
    let layout =
        layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, today), today).unwrap();

    let t = &layout.tasks[0];
    assert!(t.is_overdue);
    assert_eq!(t.effective_status, Some(EffectiveStatus::Delayed));
    assert_eq!(t.days_until_deadline, Some(-5));
}

#[test]
fn completed_tasks_never_count_down() {
    let today = ymd(2024, 6, 10);
    for end in [ymd(2024, 5, 1), today, ymd(2024, 9, 1)] {
        let snapshot = Snapshot {
            projects: vec![],
            tasks: vec![task("Handover", ymd(2024, 4, 1), end, 0).with_status(TaskStatus::Completed)],
        };
        let layout =
            layout_at(&LayoutRequest::new(&snapshot, ViewMode::Monthly, today), today).unwrap();
        let t = &layout.tasks[0];
        assert!(!t.is_overdue, "end {end}");
        assert_eq!(t.days_until_deadline, None, "end {end}");
        assert_eq!(t.effective_status, Some(EffectiveStatus::Completed));
    }
}

#[test]
fn keys_follow_creation_order_not_input_order() {
    let day = ymd(2024, 3, 1);
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![
            task("third", day, day, 30),
            task("first", day, day, 10),
            task("second", day, day, 20),
        ],
    };
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, day), day).unwrap();

    let keys: Vec<(&str, &str)> = layout
        .tasks_by_key()
        .into_iter()
        .map(|t| (t.task_key.as_str(), t.task.title.as_str()))
        .collect();
    assert_eq!(keys, vec![("A", "first"), ("B", "second"), ("C", "third")]);
}

#[test]
fn keys_run_past_z_without_gaps() {
    let day = ymd(2024, 3, 1);
    let tasks: Vec<Task> = (0..30).map(|i| task(&format!("t{i}"), day, day, i)).collect();
    let snapshot = Snapshot {
        projects: vec![],
        tasks,
    };
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, day), day).unwrap();

    assert_eq!(layout.task_by_key("Z").unwrap().task.title, "t25");
    assert_eq!(layout.task_by_key("AA").unwrap().task.title, "t26");
    assert_eq!(layout.task_by_key("AD").unwrap().task.title, "t29");
}

#[test]
fn project_scope_keeps_global_keys() {
    let (snapshot, tower, depot) = site();
    let today = ymd(2024, 6, 1);
    let all = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Weekly, today), today).unwrap();
    let scoped = layout_at(
        &LayoutRequest::new(&snapshot, ViewMode::Weekly, today).for_project(depot.id),
        today,
    )
    .unwrap();

    assert_eq!(all.tasks.len(), 4);
    assert_eq!(scoped.tasks.len(), 1);
    assert_eq!(scoped.tasks[0].task_key, "B");
    assert_eq!(all.task_by_key("B").unwrap().task.title, "Depot slab");

    let tower_layout = layout_at(
        &LayoutRequest::new(&snapshot, ViewMode::Weekly, today).for_project(tower.id),
        today,
    )
    .unwrap();
    assert_eq!(tower_layout.tasks.len(), 3);
    assert!(tower_layout.task_by_key("B").is_none());
}

#[test]
fn unscheduled_tasks_are_hidden() {
    let (snapshot, _, _) = site();
    let today = ymd(2024, 6, 1);
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Full, today), today).unwrap();

    let snag = layout.tasks.iter().find(|t| t.task.title == "Snag list").unwrap();
    assert!(!snag.position.visible);
    assert_eq!(snag.position.left, 0.0);
    assert_eq!(snag.position.width, 0.0);
    assert_eq!(snag.days_until_deadline, None);
}

#[test]
fn malformed_dates_fail_the_pass() {
    let mut bad = Task::new("Crane hire");
    bad.start_date = Some("2024-06-01".to_string());
    bad.end_date = Some("June 5th".to_string());
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![bad],
    };
    let today = ymd(2024, 6, 1);
    let err = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, today), today).unwrap_err();

    assert_eq!(err.field, "end_date");
    assert_eq!(err.value, "June 5th");
}

#[test]
fn trailing_time_component_is_ignored() {
    let mut t = Task::new("Night pour");
    t.start_date = Some("2024-06-03T23:30:00-07:00".to_string());
    t.end_date = Some("2024-06-03 22:00:00".to_string());
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![t],
    };
    let today = ymd(2024, 6, 3);
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, today), today).unwrap();

    assert_eq!(layout.tasks[0].position.actual_start, Some(today));
    assert_eq!(layout.tasks[0].position.actual_end, Some(today));
}

#[test]
fn empty_full_view_is_one_unit_holding_today() {
    let snapshot = Snapshot::default();
    let today = ymd(2024, 2, 29);
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Full, today), today).unwrap();

    assert_eq!(layout.units.len(), 1);
    assert!(layout.units[0].contains(today));
    assert!(layout.today_marker.visible);
}

#[test]
fn full_view_coarsens_with_span() {
    let today = ymd(2024, 1, 1);
    let layout_for = |end: NaiveDate| {
        let snapshot = Snapshot {
            projects: vec![],
            tasks: vec![task("Programme", ymd(2024, 1, 5), end, 0)],
        };
        layout_at(&LayoutRequest::new(&snapshot, ViewMode::Full, today), today).unwrap()
    };

    let year = layout_for(ymd(2024, 12, 20));
    assert_eq!(year.units.len(), 12);
    assert!(year.units.iter().all(|u| !u.is_aggregate));

    let fifteen_months = layout_for(ymd(2025, 3, 10));
    assert_eq!(fifteen_months.units.len(), 8);
    assert_eq!(fifteen_months.units[0].label, "Jan-Feb");
    assert_eq!(fifteen_months.units[7].label, "Mar-Apr");

    let multi_year = layout_for(ymd(2026, 5, 1));
    assert_eq!(multi_year.units.len(), 10);
    assert!(multi_year.units.iter().all(|u| u.is_aggregate));
    assert_eq!(multi_year.units[0].label, "Q1");
    assert_eq!(multi_year.units[9].label, "Q2");

    for layout in [&year, &fifteen_months, &multi_year] {
        assert_contiguous(&layout.units);
        assert_positions_in_bounds(layout);
    }
}

#[test]
fn full_view_does_not_start_before_today() {
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![
            task("Demolition", ymd(2023, 2, 1), ymd(2023, 3, 1), 0),
            task("Fit-out", ymd(2024, 8, 1), ymd(2024, 9, 30), 1),
        ],
    };
    let today = ymd(2024, 6, 12);
    let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Full, today), today).unwrap();

    assert_eq!(layout.timeline_start(), Some(ymd(2024, 6, 1)));
    assert_eq!(layout.timeline_end(), Some(ymd(2024, 9, 30)));
    let demolition = layout.tasks.iter().find(|t| t.task.title == "Demolition").unwrap();
    assert!(!demolition.position.visible);
}

#[test]
fn weekly_marker_sits_inside_its_week() {
    let snapshot = Snapshot::default();
    let today = ymd(2024, 6, 12);
    let layout =
        layout_at(&LayoutRequest::new(&snapshot, ViewMode::Weekly, today), today).unwrap();

    // May 26 .. Jul 6, today is the Wednesday of the third week.
    assert_eq!(layout.units.len(), 6);
    let unit = 100.0 / 6.0;
    let expected = 2.0 * unit + 3.0 / 7.0 * unit;
    assert!((layout.today_marker.position - expected).abs() < 1e-9);
    assert!(layout.today_marker.visible);
}

#[test]
fn marker_is_hidden_when_navigated_away() {
    let snapshot = Snapshot::default();
    let today = ymd(2024, 6, 12);
    let layout = layout_at(
        &LayoutRequest::new(&snapshot, ViewMode::Monthly, ymd(2025, 3, 1)),
        today,
    )
    .unwrap();

    assert_eq!(layout.units.len(), 6);
    assert!(!layout.today_marker.visible);
}

#[test]
fn every_mode_produces_bounded_contiguous_units() {
    let (snapshot, tower, depot) = site();
    let todays = [ymd(2024, 1, 31), ymd(2024, 6, 12), ymd(2024, 12, 31)];
    let scopes = [None, Some(tower.id), Some(depot.id)];

    for mode in ViewMode::ALL {
        for today in todays {
            for scope in scopes {
                let mut req = LayoutRequest::new(&snapshot, mode, today);
                if let Some(project) = scope {
                    req = req.for_project(project);
                }
                let layout = layout_at(&req, today).unwrap();
                let n = layout.units.len();
                let ctx = format!("{mode} today={today} scope={scope:?} units={n}");

                assert_contiguous(&layout.units);
                assert_positions_in_bounds(&layout);
                match (mode, scope) {
                    (ViewMode::Daily, None) => assert_eq!(n, 14, "{ctx}"),
                    (ViewMode::Daily, Some(_)) => assert!((7..=60).contains(&n), "{ctx}"),
                    (ViewMode::Weekly, _) => assert!((4..=16).contains(&n), "{ctx}"),
                    (ViewMode::Monthly, None) => assert_eq!(n, 6, "{ctx}"),
                    (ViewMode::Monthly, Some(_)) => assert!((3..=24).contains(&n), "{ctx}"),
                    (ViewMode::Full, _) => assert!(n >= 1, "{ctx}"),
                }
            }
        }
    }
}

#[test]
fn same_inputs_give_identical_layouts() {
    let (snapshot, tower, _) = site();
    let today = ymd(2024, 6, 20);
    let engine = GanttLayoutEngine::with_clock(PinnedClock(today));
    let req = LayoutRequest::new(&snapshot, ViewMode::Weekly, today).for_project(tower.id);

    let first = engine.layout(&req).unwrap();
    let second = engine.layout(&req).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, layout_at(&req, today).unwrap());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn daily_layout_next_to_the_last_representable_day() {
    let snapshot = Snapshot {
        projects: vec![],
        tasks: vec![Task::new("Unscheduled")],
    };
    let edge = NaiveDate::MAX - Duration::days(1);
    let layout =
        layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, edge), edge).unwrap();

    assert_eq!(layout.units.len(), 14);
    assert_contiguous(&layout.units);
    assert!(!layout.tasks[0].position.visible);
    assert!(!layout.today_marker.visible);
}

#[test]
fn engine_types_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<GanttLayoutEngine>();
    assert_send_sync::<GanttLayoutEngine<PinnedClock>>();
    assert_send_sync::<LayoutRequest<'static>>();
    assert_send_sync::<GanttLayout>();
}
