use chrono::NaiveDate;
use egui::{Color32, Pos2};
use uuid::Uuid;

use crate::grid::GridPos;
use crate::model::dates::{col_of, generate_dates};
use crate::model::{TaskEdit, TaskStore};

use super::drag::{DragSelection, DragState, GestureStart, Region, ResizeEdge};
use super::selection::{ColumnSelection, MonthSelection};

/// Minimum number of row lanes the grid shows.
pub const DEFAULT_ROWS: usize = 15;
/// Column span of a task created from a bare context-menu cell.
const CONTEXT_CREATE_SPAN: usize = 3;

/// Anchor and target of an open context menu. `task_id` present means the
/// menu offers delete/duplicate; absent means create.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuState {
    pub pos: Pos2,
    pub cell: GridPos,
    pub task_id: Option<Uuid>,
}

/// What a controller operation did, reported back to the rendering layer.
///
/// Mirrors the interaction-result pattern of the chart widget: the caller
/// reacts to explicit results instead of being threaded callbacks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridInteraction {
    /// The task store was mutated; dependent views should refresh.
    pub changed: bool,
    /// A pointer gesture resolved to a tap on this task (edit intent).
    pub clicked_task: Option<Uuid>,
    /// The view should bring this cell into view.
    pub scroll_to: Option<GridPos>,
}

/// Owns the task store, the visible date window, and every piece of
/// transient interaction state; turns raw pointer events into task
/// create/move/resize/delete operations.
///
/// Single-threaded and synchronous: all transitions happen inside the host
/// UI's event loop. Pointer-up is the only transition that mutates the
/// store, so a dropped up event can never leave it half-updated.
pub struct GanttController {
    store: TaskStore,
    dates: Vec<NaiveDate>,
    today: NaiveDate,
    drag: DragState,
    pub drag_selection: DragSelection,
    pub columns: ColumnSelection,
    pub months: MonthSelection,
    context_menu: Option<ContextMenuState>,
}

impl GanttController {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_store(TaskStore::default(), today)
    }

    pub fn with_store(store: TaskStore, today: NaiveDate) -> Self {
        let dates = generate_dates(store.tasks(), today);
        Self {
            store,
            dates,
            today,
            drag: DragState::Idle,
            drag_selection: DragSelection::default(),
            columns: ColumnSelection::default(),
            months: MonthSelection::default(),
            context_menu: None,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn context_menu(&self) -> Option<&ContextMenuState> {
        self.context_menu.as_ref()
    }

    /// Row lanes to display: at least [`DEFAULT_ROWS`], with one spare lane
    /// below the lowest occupied row so "duplicate" always has a target.
    pub fn rows(&self) -> usize {
        let lowest = self.store.tasks().iter().map(|t| t.row + 2).max();
        DEFAULT_ROWS.max(lowest.unwrap_or(0))
    }

    /// Regenerate the visible date window. Suppressed mid-drag so columns
    /// never shift under the pointer.
    fn refresh_dates(&mut self) {
        if !self.drag.is_active() {
            self.dates = generate_dates(self.store.tasks(), self.today);
        }
    }

    // ── Pointer state machine ───────────────────────────────────────────

    /// Primary-button press on a cell. Returns true when the event was
    /// consumed (the caller should suppress default handling).
    pub fn pointer_down(
        &mut self,
        row: usize,
        col: usize,
        button: egui::PointerButton,
        now_secs: f64,
        mouse: Pos2,
    ) -> bool {
        if button != egui::PointerButton::Primary {
            return false;
        }
        self.drag_selection.clear();
        self.context_menu = None;

        let pos = GridPos::new(row, col);
        let gesture = GestureStart {
            time_secs: now_secs,
            mouse,
        };
        let hit = self
            .store
            .find_at_cell(row, col, &self.dates)
            .and_then(|task| Some((task.id, col_of(&self.dates, task.start)?)));

        self.drag = match hit {
            Some((task_id, start_col)) => DragState::Move {
                task_id,
                start: pos,
                current: pos,
                click_offset: col - start_col,
                gesture,
            },
            None => DragState::New {
                start: pos,
                current: pos,
                gesture,
            },
        };
        true
    }

    /// Pointer traversed into a cell. No-op unless a drag is in flight.
    pub fn pointer_enter(&mut self, row: usize, col: usize) {
        self.drag.update_position(row, col);
    }

    /// Grab of a dedicated resize-handle affordance; pre-seeds a resize drag
    /// without going through cell hit-testing.
    pub fn resize_handle_down(&mut self, row: usize, col: usize, task_id: Uuid, edge: ResizeEdge) {
        self.drag_selection.clear();
        self.context_menu = None;
        self.drag = DragState::Resize {
            task_id,
            edge,
            row,
            current_col: col,
        };
    }

    /// Primary-button release: resolve the gesture's intent and commit.
    pub fn pointer_up(&mut self, now_secs: f64, mouse: Pos2) -> GridInteraction {
        let mut out = GridInteraction::default();
        let drag = std::mem::take(&mut self.drag);

        match drag {
            DragState::Idle => {}
            DragState::New { start, current, .. } => {
                let start_col = start.col.min(current.col);
                let end_col = start.col.max(current.col);
                // A single-cell sweep is indistinguishable from a click and
                // is left to the context-menu create path.
                if start_col != end_col {
                    self.drag_selection.select(Region {
                        row: start.row,
                        start_col,
                        end_col,
                    });
                }
            }
            DragState::Move {
                task_id,
                current,
                click_offset,
                gesture,
                ..
            } => {
                if gesture.is_click(now_secs, mouse) {
                    // Tap, not drag: report edit intent, store untouched.
                    if self.store.get(task_id).is_some() {
                        out.clicked_task = Some(task_id);
                    }
                } else if let Some((orig_start, orig_end)) =
                    self.store.span_cols(task_id, &self.dates)
                {
                    let duration = (orig_end - orig_start) as i64;
                    let new_start = current.col as i64 - click_offset as i64;
                    if self.store.move_task(
                        task_id,
                        current.row,
                        new_start,
                        new_start + duration,
                        &self.dates,
                    ) {
                        out.changed = true;
                    }
                }
                if out.changed {
                    self.refresh_dates();
                    out.scroll_to = self.task_start_cell(task_id);
                }
            }
            DragState::Resize {
                task_id,
                edge,
                current_col,
                ..
            } => {
                if let Some((orig_start, orig_end)) = self.store.span_cols(task_id, &self.dates) {
                    out.changed = match edge {
                        ResizeEdge::Start => {
                            // The moving edge cannot cross the fixed one.
                            let col = current_col.min(orig_end);
                            self.store.resize_start(task_id, col as i64, &self.dates)
                        }
                        ResizeEdge::End => {
                            let col = current_col.max(orig_start);
                            self.store.resize_end(task_id, col as i64, &self.dates)
                        }
                    };
                }
                if out.changed {
                    self.refresh_dates();
                    out.scroll_to = self.task_start_cell(task_id);
                }
            }
        }
        out
    }

    /// Abort the in-flight gesture without committing anything.
    pub fn cancel_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    // ── Context menu ────────────────────────────────────────────────────

    pub fn open_context_menu(&mut self, row: usize, col: usize, pos: Pos2) {
        let task_id = self.store.find_at_cell(row, col, &self.dates).map(|t| t.id);
        self.context_menu = Some(ContextMenuState {
            pos,
            cell: GridPos::new(row, col),
            task_id,
        });
    }

    pub fn close_context_menu(&mut self) {
        self.context_menu = None;
    }

    /// Create a task from the pending drag selection, or — absent one — from
    /// the context menu's cell expanded to a small default span.
    pub fn create_from_context(&mut self, palette: &[Color32]) -> GridInteraction {
        let mut out = GridInteraction::default();
        let target = match (self.drag_selection.region(), self.context_menu) {
            (Some(region), _) => region,
            (None, Some(menu)) => {
                let last_col = self.dates.len().saturating_sub(1);
                Region {
                    row: menu.cell.row,
                    start_col: menu.cell.col,
                    end_col: (menu.cell.col + CONTEXT_CREATE_SPAN - 1).min(last_col),
                }
            }
            (None, None) => return out,
        };

        if let Some(id) = self.store.create(
            target.row,
            target.start_col,
            target.end_col,
            &self.dates,
            palette,
        ) {
            out.changed = true;
            self.drag_selection.clear();
            self.refresh_dates();
            out.scroll_to = self.task_start_cell(id);
        }
        self.context_menu = None;
        out
    }

    pub fn delete_task(&mut self, id: Uuid) -> GridInteraction {
        let mut out = GridInteraction::default();
        out.changed = self.store.remove(id);
        self.context_menu = None;
        if out.changed {
            self.refresh_dates();
        }
        out
    }

    pub fn duplicate_task(&mut self, id: Uuid) -> GridInteraction {
        let mut out = GridInteraction::default();
        let copy = self.store.duplicate(id, None);
        self.context_menu = None;
        if let Some(copy_id) = copy {
            out.changed = true;
            self.refresh_dates();
            out.scroll_to = self.task_start_cell(copy_id);
        }
        out
    }

    /// Apply an accepted edit from the task dialog.
    pub fn apply_edit(&mut self, id: Uuid, edit: TaskEdit) -> GridInteraction {
        let mut out = GridInteraction::default();
        if self.store.update(id, edit) {
            out.changed = true;
            self.refresh_dates();
            out.scroll_to = self.task_start_cell(id);
        }
        out
    }

    // ── Header selections ───────────────────────────────────────────────

    /// Toggle a day column; clears any month selection.
    pub fn column_click(&mut self, col: usize) {
        self.columns.toggle(col);
        self.months.clear();
    }

    /// Toggle a month group; clears any column selection.
    pub fn month_click(&mut self, key: &str, start_index: usize, len: usize) {
        self.months.toggle(key, start_index, len);
        self.columns.clear();
    }

    /// "Go to today": select today's column (when visible) and ask the view
    /// to scroll there.
    pub fn today_click(&mut self) -> GridInteraction {
        let mut out = GridInteraction::default();
        self.months.clear();
        if let Some(col) = col_of(&self.dates, self.today) {
            self.columns.select(col);
            out.scroll_to = Some(GridPos::new(0, col));
        }
        out
    }

    fn task_start_cell(&self, id: Uuid) -> Option<GridPos> {
        let task = self.store.get(id)?;
        let col = self.store.span_cols(id, &self.dates)?.0;
        Some(GridPos::new(task.row, col))
    }
}
