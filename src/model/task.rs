use chrono::NaiveDate;
use egui::Color32;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A labeled, colored time-span placed in one row lane of the grid.
///
/// The span is inclusive on both ends: a task with `start == end` occupies a
/// single day column. Invariant: `start <= end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Index of the row lane the task sits in.
    pub row: usize,
    /// Display color for the task block (stored as RGBA).
    #[serde(with = "color_serde")]
    pub color: Color32,
}

impl Task {
    pub fn new(name: impl Into<String>, start: NaiveDate, end: NaiveDate, row: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            end,
            row,
            color: Color32::from_rgb(70, 130, 180), // Steel blue
        }
    }

    /// Duration in days, counting both endpoints.
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Fields the edit dialog is allowed to change.
///
/// The dialog validates `start <= end` before handing this over; the store
/// re-checks and drops invalid edits silently.
#[derive(Debug, Clone)]
pub struct TaskEdit {
    pub name: String,
    pub color: Color32,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<&Task> for TaskEdit {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            color: task.color,
            start: task.start,
            end: task.end,
        }
    }
}

/// Serde helper for `Color32`.
mod color_serde {
    use egui::Color32;
    use serde::{self, Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Color32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        rgba.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Color32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba: [u8; 4] = Deserialize::deserialize(deserializer)?;
        Ok(Color32::from_rgba_premultiplied(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ))
    }
}
