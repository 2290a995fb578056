use crate::model::TaskEdit;
use crate::ui::theme;
use egui::{Color32, Context, RichText, Window};
use uuid::Uuid;

/// Dialog state while a task is being edited. The buffer is applied to the
/// store only on Save.
pub struct EditorState {
    pub task_id: Uuid,
    pub edit: TaskEdit,
}

/// What the dialog decided this frame.
pub enum EditorOutcome {
    Open,
    Save,
    Cancel,
}

/// Render the task edit dialog.
pub fn show_task_editor(state: &mut EditorState, ctx: &Context) -> EditorOutcome {
    let mut outcome = EditorOutcome::Open;

    Window::new(RichText::new("Edit Task").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = Color32::from_rgb(20, 20, 28);
            ui.add_space(4.0);

            egui::Grid::new("edit_task_grid")
                .num_columns(2)
                .striped(false)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Name").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut state.edit.name)
                            .hint_text("Task name...")
                            .text_color(theme::TEXT_PRIMARY),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    let resp = ui.add(
                        egui_extras::DatePickerButton::new(&mut state.edit.start)
                            .id_salt("dlg_dp_start"),
                    );
                    if resp.changed() && state.edit.start > state.edit.end {
                        state.edit.end = state.edit.start;
                    }
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    let resp = ui.add(
                        egui_extras::DatePickerButton::new(&mut state.edit.end)
                            .id_salt("dlg_dp_end"),
                    );
                    if resp.changed() && state.edit.end < state.edit.start {
                        state.edit.start = state.edit.end;
                    }
                    ui.end_row();

                    ui.label(RichText::new("Color").color(theme::TEXT_SECONDARY));
                    ui.horizontal_wrapped(|ui| {
                        ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
                        for color in theme::TASK_COLORS {
                            let is_current = state.edit.color == *color;
                            let size = if is_current { 20.0 } else { 16.0 };
                            let (rect, resp) = ui
                                .allocate_exact_size(egui::vec2(size, size), egui::Sense::click());
                            ui.painter()
                                .rect_filled(rect, egui::Rounding::same(3.0), *color);
                            if is_current {
                                ui.painter().rect_stroke(
                                    rect.expand(1.0),
                                    egui::Rounding::same(4.0),
                                    egui::Stroke::new(2.0, Color32::WHITE),
                                );
                            }
                            if resp.clicked() {
                                state.edit.color = *color;
                            }
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                if ui.add_sized([80.0, 28.0], save_btn).clicked() {
                    outcome = EditorOutcome::Save;
                }
                if ui
                    .add_sized([80.0, 28.0], egui::Button::new("Cancel"))
                    .clicked()
                {
                    outcome = EditorOutcome::Cancel;
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        outcome = EditorOutcome::Cancel;
    }
    outcome
}
