//! Timeline layout engine for a construction-project Gantt chart.
//!
//! Hand the engine the task and project records from storage plus a view
//! mode and a reference date; it returns the timeline columns, each task's
//! bar position and deadline state, and the "today" marker.
//!
//! ```
//! use chrono::NaiveDate;
//! use site_timeline::engine::{layout_at, LayoutRequest};
//! use site_timeline::model::{Snapshot, Task, ViewMode};
//!
//! let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let snapshot = Snapshot {
//!     projects: vec![],
//!     tasks: vec![Task::new("Pour slab").scheduled(day, day)],
//! };
//! let layout = layout_at(&LayoutRequest::new(&snapshot, ViewMode::Daily, day), day).unwrap();
//! assert_eq!(layout.units.len(), 14);
//! assert_eq!(layout.tasks[0].task_key, "A");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod logging;
pub mod model;

pub use engine::{Clock, FixedOffsetClock, GanttLayoutEngine, LayoutRequest, PinnedClock};
pub use error::{DateParseError, ParseViewModeError, SnapshotError};
pub use model::{
    EffectiveStatus, EnhancedTask, GanttLayout, Project, Snapshot, Task, TaskPosition,
    TaskStatus, TimelineUnit, TodayMarker, ViewMode,
};
