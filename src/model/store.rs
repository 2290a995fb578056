use chrono::NaiveDate;
use egui::Color32;
use uuid::Uuid;

use super::dates::col_of;
use super::task::{Task, TaskEdit};

/// Authoritative, single-owner collection of tasks.
///
/// Every mutating operation validates its inputs and silently rejects bad
/// ones, leaving the store untouched. Nothing here ever panics or returns an
/// error: the worst outcome of invalid input is a no-op. Operations keyed by
/// id are no-ops when the id is absent (a drag may outlive its task).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The task occupying cell `(row, col)`, if any.
    ///
    /// A task whose dates fall outside the displayed sequence matches no
    /// cell at all rather than being coerced to an arbitrary column.
    pub fn find_at_cell(&self, row: usize, col: usize, dates: &[NaiveDate]) -> Option<&Task> {
        self.tasks.iter().find(|task| {
            if task.row != row {
                return false;
            }
            match (col_of(dates, task.start), col_of(dates, task.end)) {
                (Some(start), Some(end)) => col >= start && col <= end,
                _ => false,
            }
        })
    }

    /// Column span of a task in the displayed sequence.
    pub fn span_cols(&self, id: Uuid, dates: &[NaiveDate]) -> Option<(usize, usize)> {
        let task = self.get(id)?;
        let start = col_of(dates, task.start)?;
        let end = col_of(dates, task.end)?;
        Some((start, end))
    }

    /// Whether any task (other than `exclude`) on `row` intersects the span.
    fn overlaps_any(
        &self,
        row: usize,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<Uuid>,
    ) -> bool {
        self.tasks.iter().any(|t| {
            t.row == row && Some(t.id) != exclude && t.start <= end && t.end >= start
        })
    }

    /// Create a task covering `[start_col, end_col]` on `row`.
    ///
    /// Picks the next palette color round-robin and a numbered default name.
    /// Rejects out-of-bounds spans and spans overlapping an existing task on
    /// the same row.
    pub fn create(
        &mut self,
        row: usize,
        start_col: usize,
        end_col: usize,
        dates: &[NaiveDate],
        palette: &[Color32],
    ) -> Option<Uuid> {
        if start_col > end_col || end_col >= dates.len() || palette.is_empty() {
            return None;
        }
        let start = dates[start_col];
        let end = dates[end_col];
        if self.overlaps_any(row, start, end, None) {
            return None;
        }

        let mut task = Task::new(format!("Task {}", self.tasks.len() + 1), start, end, row);
        task.color = palette[self.tasks.len() % palette.len()];
        let id = task.id;
        self.tasks.push(task);
        Some(id)
    }

    /// Move a task to a new row and column span. Duration is whatever the
    /// caller passes; the interaction layer preserves it.
    pub fn move_task(
        &mut self,
        id: Uuid,
        new_row: usize,
        start_col: i64,
        end_col: i64,
        dates: &[NaiveDate],
    ) -> bool {
        let Some((start, end)) = self.checked_span(start_col, end_col, dates) else {
            return false;
        };
        if self.overlaps_any(new_row, start, end, Some(id)) {
            return false;
        }
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        task.row = new_row;
        task.start = start;
        task.end = end;
        true
    }

    /// Move the start edge only; the end date stays pinned.
    pub fn resize_start(&mut self, id: Uuid, new_start_col: i64, dates: &[NaiveDate]) -> bool {
        let Some(end_col) = self.get(id).and_then(|t| col_of(dates, t.end)) else {
            return false;
        };
        let row = match self.get(id) {
            Some(t) => t.row,
            None => return false,
        };
        let Some((start, end)) = self.checked_span(new_start_col, end_col as i64, dates) else {
            return false;
        };
        if self.overlaps_any(row, start, end, Some(id)) {
            return false;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.start = start;
            return true;
        }
        false
    }

    /// Move the end edge only; the start date stays pinned.
    pub fn resize_end(&mut self, id: Uuid, new_end_col: i64, dates: &[NaiveDate]) -> bool {
        let Some(start_col) = self.get(id).and_then(|t| col_of(dates, t.start)) else {
            return false;
        };
        let row = match self.get(id) {
            Some(t) => t.row,
            None => return false,
        };
        let Some((start, end)) = self.checked_span(start_col as i64, new_end_col, dates) else {
            return false;
        };
        if self.overlaps_any(row, start, end, Some(id)) {
            return false;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.end = end;
            return true;
        }
        false
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Apply an edit from the task dialog. Rejects `start > end`.
    pub fn update(&mut self, id: Uuid, edit: TaskEdit) -> bool {
        if edit.start > edit.end {
            return false;
        }
        let row = match self.get(id) {
            Some(t) => t.row,
            None => return false,
        };
        if self.overlaps_any(row, edit.start, edit.end, Some(id)) {
            return false;
        }
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.name = edit.name;
            task.color = edit.color;
            task.start = edit.start;
            task.end = edit.end;
            return true;
        }
        false
    }

    /// Append a copy of a task with a fresh id, a "(copy)" name suffix, and
    /// by default the row below the original.
    pub fn duplicate(&mut self, id: Uuid, new_row: Option<usize>) -> Option<Uuid> {
        let original = self.get(id)?.clone();
        let row = new_row.unwrap_or(original.row + 1);
        if self.overlaps_any(row, original.start, original.end, None) {
            return None;
        }
        let copy = Task {
            id: Uuid::new_v4(),
            name: format!("{} (copy)", original.name),
            row,
            ..original
        };
        let copy_id = copy.id;
        self.tasks.push(copy);
        Some(copy_id)
    }

    /// Bounds-check a column span and turn it into dates.
    fn checked_span(
        &self,
        start_col: i64,
        end_col: i64,
        dates: &[NaiveDate],
    ) -> Option<(NaiveDate, NaiveDate)> {
        if start_col < 0 || end_col >= dates.len() as i64 || start_col > end_col {
            return None;
        }
        Some((dates[start_col as usize], dates[end_col as usize]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// A 30-day window starting 2024-01-01 (columns 0..=29).
    fn dates30() -> Vec<NaiveDate> {
        (0..30).map(|i| d("2024-01-01") + Duration::days(i)).collect()
    }

    const PALETTE: &[Color32] = &[
        Color32::from_rgb(1, 0, 0),
        Color32::from_rgb(0, 1, 0),
        Color32::from_rgb(0, 0, 1),
    ];

    fn store_with(spans: &[(usize, usize, usize)]) -> TaskStore {
        let dates = dates30();
        let mut store = TaskStore::default();
        for &(row, start, end) in spans {
            store.create(row, start, end, &dates, PALETTE).unwrap();
        }
        store
    }

    #[test]
    fn find_at_cell_matches_span_inclusively() {
        let dates = dates30();
        let store = store_with(&[(2, 5, 8)]);

        assert!(store.find_at_cell(2, 5, &dates).is_some());
        assert!(store.find_at_cell(2, 8, &dates).is_some());
        assert!(store.find_at_cell(2, 4, &dates).is_none());
        assert!(store.find_at_cell(2, 9, &dates).is_none());
        assert!(store.find_at_cell(1, 6, &dates).is_none());
    }

    #[test]
    fn find_at_cell_ignores_tasks_outside_the_window() {
        let dates = dates30();
        let task = Task::new("far", d("2025-06-01"), d("2025-06-05"), 0);
        let store = TaskStore::new(vec![task]);
        // Must not be coerced to column 0.
        assert!(store.find_at_cell(0, 0, &dates).is_none());
    }

    #[test]
    fn create_assigns_round_robin_colors_and_unique_ids() {
        let dates = dates30();
        let mut store = TaskStore::default();
        let a = store.create(0, 0, 1, &dates, PALETTE).unwrap();
        let b = store.create(1, 0, 1, &dates, PALETTE).unwrap();
        let c = store.create(2, 0, 1, &dates, PALETTE).unwrap();
        let e = store.create(3, 0, 1, &dates, PALETTE).unwrap();
        assert_ne!(a, b);

        let tasks = store.tasks();
        assert_eq!(tasks[0].color, PALETTE[0]);
        assert_eq!(tasks[1].color, PALETTE[1]);
        assert_eq!(tasks[2].color, PALETTE[2]);
        // Wraps around.
        assert_eq!(store.get(e).unwrap().color, PALETTE[0]);
        assert_eq!(tasks[0].name, "Task 1");
        assert_eq!(tasks[3].name, "Task 4");
    }

    #[test]
    fn create_rejects_bad_spans_and_overlap() {
        let dates = dates30();
        let mut store = store_with(&[(0, 5, 9)]);
        let before = store.clone();

        assert!(store.create(0, 8, 12, &dates, PALETTE).is_none()); // overlap
        assert!(store.create(0, 10, 30, &dates, PALETTE).is_none()); // past end
        assert!(store.create(0, 12, 10, &dates, PALETTE).is_none()); // inverted
        assert_eq!(store, before);

        // Same span on another row is fine.
        assert!(store.create(1, 8, 12, &dates, PALETTE).is_some());
    }

    #[test]
    fn bounds_rejection_is_total() {
        let dates = dates30();
        let mut store = store_with(&[(1, 5, 9)]);
        let id = store.tasks()[0].id;
        let before = store.clone();

        for (start, end) in [(-1, 3), (-5, -1), (0, 30), (28, 32), (7, 3)] {
            assert!(!store.move_task(id, 1, start, end, &dates));
            if start < 0 {
                assert!(!store.resize_start(id, start, &dates));
            }
            assert_eq!(store, before, "store must be untouched for ({start},{end})");
        }
        assert!(!store.resize_end(id, 30, &dates));
        assert!(!store.resize_start(id, -1, &dates));
        assert_eq!(store, before);
    }

    #[test]
    fn out_of_range_move_is_rejected() {
        // Spec scenario: 30-day grid, task at cols 27..=29, move by +3.
        let dates = dates30();
        let mut store = store_with(&[(0, 27, 29)]);
        let id = store.tasks()[0].id;
        let before = store.clone();

        assert!(!store.move_task(id, 0, 30, 32, &dates));
        assert_eq!(store, before);
    }

    #[test]
    fn move_replaces_row_and_span() {
        let dates = dates30();
        let mut store = store_with(&[(1, 5, 9)]);
        let id = store.tasks()[0].id;

        assert!(store.move_task(id, 3, 8, 12, &dates));
        let task = store.get(id).unwrap();
        assert_eq!(task.row, 3);
        assert_eq!(task.start, dates[8]);
        assert_eq!(task.end, dates[12]);
    }

    #[test]
    fn move_rejects_overlap_on_target_row() {
        let dates = dates30();
        let mut store = store_with(&[(0, 5, 9), (1, 6, 8)]);
        let id = store.tasks()[0].id;
        let before = store.clone();

        assert!(!store.move_task(id, 1, 5, 9, &dates));
        assert_eq!(store, before);
        // Moving within its own footprint is not self-overlap.
        assert!(store.move_task(id, 0, 6, 10, &dates));
    }

    #[test]
    fn resize_pins_the_opposite_edge() {
        let dates = dates30();
        let mut store = store_with(&[(0, 5, 9)]);
        let id = store.tasks()[0].id;
        let original_end = store.get(id).unwrap().end;

        assert!(store.resize_start(id, 3, &dates));
        assert_eq!(store.get(id).unwrap().start, dates[3]);
        assert_eq!(store.get(id).unwrap().end, original_end);

        let original_start = store.get(id).unwrap().start;
        assert!(store.resize_end(id, 12, &dates));
        assert_eq!(store.get(id).unwrap().end, dates[12]);
        assert_eq!(store.get(id).unwrap().start, original_start);
    }

    #[test]
    fn stale_ids_are_noops() {
        let dates = dates30();
        let mut store = store_with(&[(0, 5, 9)]);
        let before = store.clone();
        let ghost = Uuid::new_v4();

        assert!(!store.move_task(ghost, 0, 1, 2, &dates));
        assert!(!store.resize_start(ghost, 1, &dates));
        assert!(!store.resize_end(ghost, 1, &dates));
        assert!(!store.remove(ghost));
        assert!(store.duplicate(ghost, None).is_none());
        assert_eq!(store, before);
    }

    #[test]
    fn update_applies_edits_and_rejects_inverted_dates() {
        let dates = dates30();
        let mut store = store_with(&[(0, 5, 9)]);
        let id = store.tasks()[0].id;

        let good = TaskEdit {
            name: "renamed".to_string(),
            color: Color32::RED,
            start: dates[2],
            end: dates[4],
        };
        assert!(store.update(id, good));
        assert_eq!(store.get(id).unwrap().name, "renamed");

        let before = store.clone();
        let bad = TaskEdit {
            name: "nope".to_string(),
            color: Color32::RED,
            start: dates[4],
            end: dates[2],
        };
        assert!(!store.update(id, bad));
        assert_eq!(store, before);
    }

    #[test]
    fn duplicate_appends_copy_on_next_row() {
        let dates = dates30();
        let mut store = store_with(&[(0, 5, 9)]);
        let id = store.tasks()[0].id;

        let copy_id = store.duplicate(id, None).unwrap();
        let copy = store.get(copy_id).unwrap();
        assert_eq!(copy.name, "Task 1 (copy)");
        assert_eq!(copy.row, 1);
        assert_eq!(copy.start, dates[5]);
        assert_eq!(copy.end, dates[9]);

        // Row 1 is now occupied, so a second duplicate there is rejected.
        assert!(store.duplicate(id, Some(1)).is_none());
    }
}
