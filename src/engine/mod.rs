//! The timeline layout engine. Every function here is pure apart from
//! [`clock::FixedOffsetClock`], which reads the system time.

pub mod clock;
pub mod date_math;
pub mod deadline;
pub mod layout;
pub mod positioner;
pub mod task_key;
pub mod today;
pub mod units;

pub use clock::{Clock, FixedOffsetClock, PinnedClock};
pub use date_math::{parse_calendar_date, DateExtents};
pub use deadline::{evaluate_deadline, DeadlineState};
pub use layout::{layout_at, GanttLayoutEngine, LayoutRequest};
pub use positioner::position_task;
pub use task_key::{assign_task_keys, key_for_index};
pub use today::today_marker;
pub use units::{generate_units, UnitRequest};
