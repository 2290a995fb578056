//! Column and month-group selection toggles.
//!
//! The two are independent but mutually exclusive; the controller clears one
//! when the other is selected.

/// At most one highlighted day column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnSelection {
    selected: Option<usize>,
}

impl ColumnSelection {
    /// Clicking the selected column clears it; any other column replaces the
    /// selection outright.
    pub fn toggle(&mut self, col: usize) {
        self.selected = match self.selected {
            Some(current) if current == col => None,
            _ => Some(col),
        };
    }

    pub fn select(&mut self, col: usize) {
        self.selected = Some(col);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, col: usize) -> bool {
        self.selected == Some(col)
    }
}

/// A contiguous column range tied to one calendar month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedMonth {
    /// Stable month key, `YYYY-MM`.
    pub key: String,
    pub start_index: usize,
    pub end_index: usize,
}

/// At most one highlighted month group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MonthSelection {
    selected: Option<SelectedMonth>,
}

impl MonthSelection {
    /// Same toggle semantics as columns, keyed by the month label.
    pub fn toggle(&mut self, key: &str, start_index: usize, len: usize) {
        self.selected = match &self.selected {
            Some(current) if current.key == key => None,
            _ => Some(SelectedMonth {
                key: key.to_string(),
                start_index,
                end_index: start_index + len.saturating_sub(1),
            }),
        };
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&SelectedMonth> {
        self.selected.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.selected.is_some()
    }

    pub fn contains_col(&self, col: usize) -> bool {
        match &self.selected {
            Some(m) => col >= m.start_index && col <= m.end_index,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_toggle_clears_on_repeat_and_replaces_otherwise() {
        let mut sel = ColumnSelection::default();
        sel.toggle(4);
        assert!(sel.is_selected(4));
        sel.toggle(7);
        assert!(sel.is_selected(7));
        assert!(!sel.is_selected(4));
        sel.toggle(7);
        assert_eq!(sel.selected(), None);
    }

    #[test]
    fn month_toggle_keys_on_label() {
        let mut sel = MonthSelection::default();
        sel.toggle("2024-01", 0, 31);
        assert!(sel.is_active());
        assert!(sel.contains_col(0));
        assert!(sel.contains_col(30));
        assert!(!sel.contains_col(31));

        // A different month replaces the selection.
        sel.toggle("2024-02", 31, 29);
        assert!(sel.contains_col(31));
        assert!(!sel.contains_col(30));

        // Re-clicking the same month clears it.
        sel.toggle("2024-02", 31, 29);
        assert!(!sel.is_active());
    }
}
