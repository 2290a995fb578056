use chrono::NaiveDate;
use egui::Pos2;
use uuid::Uuid;

use crate::grid::GridPos;
use crate::model::TaskStore;

/// A press-and-release pair faster than this is a click, not a drag.
pub const CLICK_THRESHOLD_SECS: f64 = 0.3;
/// ...and the pointer must have travelled less than this many pixels.
pub const CLICK_THRESHOLD_DISTANCE: f32 = 5.0;

/// Time and screen position of the initiating pointer press, kept to tell a
/// tap (edit intent) from a drag (move intent) on release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureStart {
    pub time_secs: f64,
    pub mouse: Pos2,
}

impl GestureStart {
    pub fn is_click(&self, now_secs: f64, mouse: Pos2) -> bool {
        now_secs - self.time_secs < CLICK_THRESHOLD_SECS
            && self.mouse.distance(mouse) < CLICK_THRESHOLD_DISTANCE
    }
}

/// Which edge of a task block a resize gesture grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// The in-flight gesture, one variant per intent.
///
/// Exists only between pointer-down and pointer-up; each variant carries
/// exactly the fields its commit step needs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Sweeping out a region on empty cells to create a task.
    New {
        start: GridPos,
        current: GridPos,
        gesture: GestureStart,
    },
    /// Dragging a task body to a new row/span.
    Move {
        task_id: Uuid,
        start: GridPos,
        current: GridPos,
        /// Columns between the grab point and the task's start column;
        /// keeps the grabbed point under the cursor while moving.
        click_offset: usize,
        gesture: GestureStart,
    },
    /// Dragging one edge of a task; the row never changes.
    Resize {
        task_id: Uuid,
        edge: ResizeEdge,
        row: usize,
        current_col: usize,
    },
}

impl DragState {
    pub fn is_active(&self) -> bool {
        !matches!(self, DragState::Idle)
    }

    /// Update the tracked pointer cell. Idempotent on an unchanged position
    /// (skips redundant state churn); resize gestures ignore the incoming
    /// row entirely.
    pub fn update_position(&mut self, row: usize, col: usize) {
        match self {
            DragState::Idle => {}
            DragState::New { current, .. } | DragState::Move { current, .. } => {
                if current.row != row || current.col != col {
                    *current = GridPos::new(row, col);
                }
            }
            DragState::Resize { current_col, .. } => {
                if *current_col != col {
                    *current_col = col;
                }
            }
        }
    }
}

/// A single-row column range swept out by a "new" drag, awaiting an explicit
/// creation decision from the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub row: usize,
    pub start_col: usize,
    pub end_col: usize,
}

/// Pending region selection. Cleared on any primary press and on successful
/// task creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DragSelection {
    region: Option<Region>,
}

impl DragSelection {
    pub fn select(&mut self, region: Region) {
        self.region = Some(region);
    }

    pub fn clear(&mut self) {
        self.region = None;
    }

    pub fn region(&self) -> Option<Region> {
        self.region
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        match self.region {
            Some(r) => row == r.row && col >= r.start_col && col <= r.end_col,
            None => false,
        }
    }
}

/// The span a dragged task would occupy if released now.
///
/// Columns are signed: a move drag can hang off the left edge of the window
/// mid-gesture (the commit would be rejected, but the ghost still renders on
/// the visible part).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewSpan {
    pub task_id: Uuid,
    pub row: usize,
    pub start_col: i64,
    pub end_col: i64,
}

/// Compute the live preview for the current drag, using the same formulas as
/// the commit step so the ghost always lands where the task would.
pub fn task_preview(
    drag: &DragState,
    store: &TaskStore,
    dates: &[NaiveDate],
) -> Option<PreviewSpan> {
    match *drag {
        DragState::Move {
            task_id,
            current,
            click_offset,
            ..
        } => {
            let (orig_start, orig_end) = store.span_cols(task_id, dates)?;
            let duration = (orig_end - orig_start) as i64;
            let start_col = current.col as i64 - click_offset as i64;
            Some(PreviewSpan {
                task_id,
                row: current.row,
                start_col,
                end_col: start_col + duration,
            })
        }
        DragState::Resize {
            task_id,
            edge,
            row,
            current_col,
        } => {
            let (orig_start, orig_end) = store.span_cols(task_id, dates)?;
            let (start_col, end_col) = match edge {
                ResizeEdge::Start => (current_col.min(orig_end), orig_end),
                ResizeEdge::End => (orig_start, current_col.max(orig_start)),
            };
            Some(PreviewSpan {
                task_id,
                row,
                start_col: start_col as i64,
                end_col: end_col as i64,
            })
        }
        DragState::Idle | DragState::New { .. } => None,
    }
}

/// Whether a cell lies inside the rectangle swept by an in-flight "new" drag.
pub fn cell_in_drag_area(row: usize, col: usize, drag: &DragState) -> bool {
    match *drag {
        DragState::New { start, current, .. } => {
            let (min_row, max_row) = (start.row.min(current.row), start.row.max(current.row));
            let (min_col, max_col) = (start.col.min(current.col), start.col.max(current.col));
            row >= min_row && row <= max_row && col >= min_col && col <= max_col
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use egui::Color32;

    fn dates30() -> Vec<NaiveDate> {
        let first = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..30).map(|i| first + Duration::days(i)).collect()
    }

    fn store_with_task(row: usize, start_col: usize, end_col: usize) -> (TaskStore, Uuid) {
        let dates = dates30();
        let mut store = TaskStore::default();
        let id = store
            .create(row, start_col, end_col, &dates, &[Color32::RED])
            .unwrap();
        (store, id)
    }

    fn gesture() -> GestureStart {
        GestureStart {
            time_secs: 0.0,
            mouse: Pos2::ZERO,
        }
    }

    #[test]
    fn click_threshold_uses_time_and_distance() {
        let g = gesture();
        assert!(g.is_click(0.299, Pos2::new(4.0, 0.0)));
        assert!(!g.is_click(0.301, Pos2::new(4.0, 0.0)));
        assert!(!g.is_click(0.299, Pos2::new(3.0, 4.1))); // distance 5.1
    }

    #[test]
    fn move_preview_applies_click_offset_and_keeps_duration() {
        let (store, id) = store_with_task(1, 5, 9);
        let drag = DragState::Move {
            task_id: id,
            start: GridPos::new(1, 7),
            current: GridPos::new(2, 10),
            click_offset: 2,
            gesture: gesture(),
        };
        let preview = task_preview(&drag, &store, &dates30()).unwrap();
        assert_eq!(preview.row, 2);
        assert_eq!(preview.start_col, 8);
        assert_eq!(preview.end_col, 12);
    }

    #[test]
    fn move_preview_may_hang_off_the_left_edge() {
        let (store, id) = store_with_task(0, 2, 4);
        let drag = DragState::Move {
            task_id: id,
            start: GridPos::new(0, 4),
            current: GridPos::new(0, 1),
            click_offset: 2,
            gesture: gesture(),
        };
        let preview = task_preview(&drag, &store, &dates30()).unwrap();
        assert_eq!(preview.start_col, -1);
        assert_eq!(preview.end_col, 1);
    }

    #[test]
    fn resize_previews_never_cross_the_pinned_edge() {
        let (store, id) = store_with_task(0, 3, 6);
        let dates = dates30();

        let start_drag = DragState::Resize {
            task_id: id,
            edge: ResizeEdge::Start,
            row: 0,
            current_col: 10,
        };
        let p = task_preview(&start_drag, &store, &dates).unwrap();
        assert_eq!((p.start_col, p.end_col), (6, 6));

        let end_drag = DragState::Resize {
            task_id: id,
            edge: ResizeEdge::End,
            row: 0,
            current_col: 1,
        };
        let p = task_preview(&end_drag, &store, &dates).unwrap();
        assert_eq!((p.start_col, p.end_col), (3, 3));
    }

    #[test]
    fn preview_is_none_for_stale_task_ids() {
        let (store, _) = store_with_task(0, 3, 6);
        let drag = DragState::Move {
            task_id: Uuid::new_v4(),
            start: GridPos::new(0, 3),
            current: GridPos::new(0, 5),
            click_offset: 0,
            gesture: gesture(),
        };
        assert!(task_preview(&drag, &store, &dates30()).is_none());
    }

    #[test]
    fn update_position_forces_row_while_resizing() {
        let mut drag = DragState::Resize {
            task_id: Uuid::new_v4(),
            edge: ResizeEdge::End,
            row: 3,
            current_col: 5,
        };
        drag.update_position(7, 9);
        match drag {
            DragState::Resize { row, current_col, .. } => {
                assert_eq!(row, 3);
                assert_eq!(current_col, 9);
            }
            _ => panic!("variant changed"),
        }
    }

    #[test]
    fn drag_area_spans_the_swept_rectangle() {
        let drag = DragState::New {
            start: GridPos::new(2, 8),
            current: GridPos::new(4, 5),
            gesture: gesture(),
        };
        assert!(cell_in_drag_area(3, 6, &drag));
        assert!(cell_in_drag_area(2, 8, &drag));
        assert!(!cell_in_drag_area(1, 6, &drag));
        assert!(!cell_in_drag_area(3, 9, &drag));
        assert!(!cell_in_drag_area(3, 6, &DragState::Idle));
    }

    #[test]
    fn drag_selection_contains_single_row_range() {
        let mut sel = DragSelection::default();
        assert!(!sel.contains(2, 6));
        sel.select(Region {
            row: 2,
            start_col: 5,
            end_col: 8,
        });
        assert!(sel.contains(2, 5));
        assert!(sel.contains(2, 8));
        assert!(!sel.contains(3, 6));
        assert!(!sel.contains(2, 9));
        sel.clear();
        assert!(sel.region().is_none());
    }
}
