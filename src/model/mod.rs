pub mod project;
pub mod task;
pub mod timeline;

pub use project::{Project, Snapshot};
pub use task::{EffectiveStatus, Task, TaskStatus};
pub use timeline::{
    EnhancedTask, GanttLayout, TaskPosition, TimelineUnit, TodayMarker, ViewMode,
};
