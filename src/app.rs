use std::collections::HashSet;

use chrono::{Duration, NaiveDate};

use crate::grid::GridPos;
use crate::holidays::{HolidayProvider, HolidayRange, KoreanHolidays};
use crate::interaction::GanttController;
use crate::model::{Task, TaskStore};
use crate::ui;
use crate::ui::task_editor::{EditorOutcome, EditorState};

/// Main application state.
pub struct GanttApp {
    controller: GanttController,
    holiday_provider: KoreanHolidays,
    holiday_dates: HashSet<NaiveDate>,
    holiday_range: Option<HolidayRange>,
    editor: Option<EditorState>,
    show_about: bool,
    status_message: String,
    /// Cell the grid should center on next frame.
    pending_scroll: Option<GridPos>,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let today = chrono::Local::now().date_naive();
        let mut app = Self {
            controller: GanttController::with_store(Self::sample_store(today), today),
            holiday_provider: KoreanHolidays,
            holiday_dates: HashSet::new(),
            holiday_range: None,
            editor: None,
            show_about: false,
            status_message: "Ready".to_string(),
            pending_scroll: None,
        };
        app.refresh_holidays();
        app
    }

    /// A few tasks around today so the grid isn't empty on first launch.
    fn sample_store(today: NaiveDate) -> TaskStore {
        let palette = ui::theme::TASK_COLORS;
        let mut tasks = vec![
            Task::new("Kickoff", today, today + Duration::days(2), 0),
            Task::new(
                "Design",
                today + Duration::days(3),
                today + Duration::days(10),
                1,
            ),
            Task::new(
                "Implementation",
                today + Duration::days(8),
                today + Duration::days(24),
                2,
            ),
            Task::new(
                "Review",
                today + Duration::days(25),
                today + Duration::days(28),
                2,
            ),
        ];
        for (i, task) in tasks.iter_mut().enumerate() {
            task.color = palette[i % palette.len()];
        }
        TaskStore::new(tasks)
    }

    /// Re-fetch holidays when the visible window crosses into new months.
    fn refresh_holidays(&mut self) {
        let range = HolidayRange::from_dates(self.controller.dates());
        if range == self.holiday_range {
            return;
        }
        self.holiday_range = range;
        self.holiday_dates = match &self.holiday_range {
            Some(range) => self
                .holiday_provider
                .fetch(range)
                .into_iter()
                .map(|h| h.date)
                .collect(),
            None => HashSet::new(),
        };
    }

    fn describe_task(&self, id: uuid::Uuid) -> String {
        match self.controller.store().get(id) {
            Some(task) => format!(
                "'{}' ({} → {})",
                task.name,
                task.start.format("%Y-%m-%d"),
                task.end.format("%Y-%m-%d")
            ),
            None => "task".to_string(),
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            match ui::toolbar::show_toolbar(self.controller.store().len(), ui) {
                ui::toolbar::ToolbarAction::NewProject => {
                    let today = self.controller.today();
                    self.controller = GanttController::new(today);
                    self.editor = None;
                    self.refresh_holidays();
                    self.status_message = "New project created".to_string();
                }
                ui::toolbar::ToolbarAction::GoToToday => {
                    let result = self.controller.today_click();
                    self.pending_scroll = result.scroll_to;
                    self.status_message = "Jumped to today".to_string();
                }
                ui::toolbar::ToolbarAction::ShowAbout => {
                    self.show_about = true;
                }
                ui::toolbar::ToolbarAction::None => {}
            }
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Window: {} days",
                                self.controller.dates().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {}",
                                self.controller.store().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Left panel: task list
        let mut list_action = ui::task_list::TaskListAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(260.0)
            .min_width(200.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                list_action = ui::task_list::show_task_list(self.controller.store().tasks(), ui);
            });

        match list_action {
            ui::task_list::TaskListAction::Edit(id) => {
                if let Some(task) = self.controller.store().get(id) {
                    self.editor = Some(EditorState {
                        task_id: id,
                        edit: task.into(),
                    });
                }
            }
            ui::task_list::TaskListAction::Duplicate(id) => {
                let result = self.controller.duplicate_task(id);
                if result.changed {
                    self.refresh_holidays();
                    self.pending_scroll = result.scroll_to;
                    self.status_message = "Task duplicated".to_string();
                } else {
                    self.status_message = "Cannot duplicate: target row is occupied".to_string();
                }
            }
            ui::task_list::TaskListAction::Delete(id) => {
                let name = self
                    .controller
                    .store()
                    .get(id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default();
                if self.controller.delete_task(id).changed {
                    self.refresh_holidays();
                    self.status_message = format!("Deleted '{}'", name);
                }
            }
            ui::task_list::TaskListAction::None => {}
        }

        // Central panel: the grid
        let grid_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(grid_frame).show(ctx, |ui| {
            let scroll = self.pending_scroll.take();
            let resp =
                ui::grid_view::show_grid(&mut self.controller, &self.holiday_dates, scroll, ui);
            if resp.changed {
                self.refresh_holidays();
                self.status_message = "Timeline updated".to_string();
            }
            if let Some(id) = resp.edit_task {
                if let Some(task) = self.controller.store().get(id) {
                    self.editor = Some(EditorState {
                        task_id: id,
                        edit: task.into(),
                    });
                }
            }
        });

        // Edit dialog
        if let Some(mut state) = self.editor.take() {
            match ui::task_editor::show_task_editor(&mut state, ctx) {
                EditorOutcome::Save => {
                    let id = state.task_id;
                    let result = self.controller.apply_edit(id, state.edit);
                    if result.changed {
                        self.refresh_holidays();
                        self.pending_scroll = result.scroll_to;
                        self.status_message = format!("Updated {}", self.describe_task(id));
                    } else {
                        self.status_message =
                            "Edit rejected: dates overlap another task".to_string();
                    }
                }
                EditorOutcome::Cancel => {}
                EditorOutcome::Open => {
                    self.editor = Some(state);
                }
            }
        }

        if self.show_about {
            self.show_about = show_about_dialog(ctx);
        }
    }
}

/// Render the "About" dialog; returns whether it should stay open.
fn show_about_dialog(ctx: &egui::Context) -> bool {
    let mut open = true;
    egui::Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(egui::RichText::new("Gantt Grid").strong());
                ui.add_space(2.0);
                ui.label(
                    egui::RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(ui::theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("A drag-driven Gantt chart editor");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui
                    .add_sized([100.0, 28.0], egui::Button::new("Close"))
                    .clicked()
                {
                    open = false;
                }
            });
        });
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        open = false;
    }
    open
}
