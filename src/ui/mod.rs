pub mod grid_view;
pub mod task_editor;
pub mod task_list;
pub mod theme;
pub mod toolbar;
