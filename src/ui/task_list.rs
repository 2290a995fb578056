use crate::model::Task;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};
use uuid::Uuid;

/// Actions that the task list can request.
pub enum TaskListAction {
    None,
    Edit(Uuid),
    Duplicate(Uuid),
    Delete(Uuid),
}

/// Render the left-side task list panel.
pub fn show_task_list(tasks: &[Task], ui: &mut Ui) -> TaskListAction {
    let mut action = TaskListAction::None;

    // Header area
    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", tasks.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.label(
        RichText::new("Drag across empty cells, then right-click to create")
            .size(9.5)
            .color(theme::TEXT_DIM),
    );
    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    // Task rows
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().enumerate() {
                // Solid dark row colors so no light fill bleeds through
                let row_bg = if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Color dot
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 3.0, task.color);

                        ui.add(
                            egui::Label::new(
                                RichText::new(&task.name)
                                    .size(12.0)
                                    .color(theme::TEXT_PRIMARY),
                            )
                            .truncate(),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;

                            let del_btn = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::X)
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if del_btn.on_hover_text("Delete task").clicked() {
                                action = TaskListAction::Delete(task.id);
                            }

                            let dup_btn = ui.add(
                                egui::Button::new(
                                    RichText::new(egui_phosphor::regular::COPY)
                                        .size(10.0)
                                        .color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if dup_btn.on_hover_text("Duplicate task").clicked() {
                                action = TaskListAction::Duplicate(task.id);
                            }

                            // Dates (compact)
                            ui.label(
                                RichText::new(task.end.format("%m/%d").to_string())
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                            ui.label(RichText::new("→").size(9.0).color(theme::TEXT_DIM));
                            ui.label(
                                RichText::new(task.start.format("%m/%d").to_string())
                                    .size(10.0)
                                    .color(theme::TEXT_SECONDARY),
                            );
                            ui.label(
                                RichText::new(format!("{}d", task.duration_days()))
                                    .size(9.0)
                                    .color(theme::TEXT_DIM),
                            );
                        });
                    });
                });

                // Make entire row clickable
                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TaskListAction::Edit(task.id);
                }

                ui.add_space(1.0);
            }

            if tasks.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("No tasks yet")
                        .size(11.0)
                        .color(Color32::from_rgb(100, 105, 120)),
                );
            }
        });

    action
}
