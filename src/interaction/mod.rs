//! Pointer-gesture state machine and selection state for the grid.
//!
//! The split mirrors the data flow: `drag` holds the transient gesture
//! state, `selection` the sticky header selections, and `controller` owns
//! both plus the task store and turns raw events into commits.

pub mod controller;
pub mod drag;
pub mod selection;

pub use controller::{ContextMenuState, GanttController, GridInteraction, DEFAULT_ROWS};
pub use drag::{
    cell_in_drag_area, task_preview, DragSelection, DragState, PreviewSpan, Region, ResizeEdge,
};
pub use selection::{ColumnSelection, MonthSelection, SelectedMonth};
