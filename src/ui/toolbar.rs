use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Actions requested from the toolbar.
pub enum ToolbarAction {
    None,
    NewProject,
    GoToToday,
    ShowAbout,
}

/// Render the top toolbar / menu bar.
pub fn show_toolbar(task_count: usize, ui: &mut Ui) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  New Project").clicked() {
                action = ToolbarAction::NewProject;
                ui.close_menu();
            }
        });

        let today_btn = ui.button(
            RichText::new(format!("{}  Today", egui_phosphor::regular::CALENDAR))
                .font(theme::font_menu()),
        );
        if today_btn.on_hover_text("Select today's column and scroll to it").clicked() {
            action = ToolbarAction::GoToToday;
        }

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                action = ToolbarAction::ShowAbout;
                ui.close_menu();
            }
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} tasks", task_count))
                    .size(11.0)
                    .weak(),
            );
        });
    });

    action
}
