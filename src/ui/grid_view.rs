use std::collections::HashSet;

use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::grid::{
    self, GridPos, CELL_HEIGHT, CELL_WIDTH, DAY_HEADER_HEIGHT, HEADER_HEIGHT, MONTH_HEADER_HEIGHT,
    RESIZE_HANDLE_WIDTH,
};
use crate::interaction::{cell_in_drag_area, task_preview, DragState, GanttController, ResizeEdge};
use crate::model::dates::month_spans;
use crate::ui::theme;

/// What the grid did this frame, for the app to react to.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridViewResponse {
    pub changed: bool,
    /// A task was tapped or "Edit" was picked; open the editor for it.
    pub edit_task: Option<Uuid>,
}

/// Per-frame layout snapshot of one task bar.
struct TaskBar {
    id: Uuid,
    name: String,
    color: Color32,
    row: usize,
    start_col: usize,
    end_col: usize,
    start: NaiveDate,
    end: NaiveDate,
}

/// Render the grid (header, cells, task bars) and feed pointer events into
/// the controller. `scroll_request` carries a cell the app wants centered
/// this frame, e.g. from the today button.
pub fn show_grid(
    controller: &mut GanttController,
    holiday_dates: &HashSet<NaiveDate>,
    scroll_request: Option<GridPos>,
    ui: &mut Ui,
) -> GridViewResponse {
    let mut out = GridViewResponse::default();

    // Snapshots for drawing; controller mutations happen against these same
    // columns because the window never regenerates mid-drag.
    let dates: Vec<NaiveDate> = controller.dates().to_vec();
    let cols = dates.len();
    let rows = controller.rows();
    let spans = month_spans(&dates);
    let today = controller.today();
    let drag = *controller.drag();
    let pending_region = controller.drag_selection.region();
    let selected_col = controller.columns.selected();
    let month_range = controller
        .months
        .selected()
        .map(|m| (m.start_index, m.end_index));
    let dragged_id = match drag {
        DragState::Move { task_id, .. } | DragState::Resize { task_id, .. } => Some(task_id),
        _ => None,
    };

    let bars: Vec<TaskBar> = controller
        .store()
        .tasks()
        .iter()
        .filter_map(|t| {
            let (start_col, end_col) = controller.store().span_cols(t.id, &dates)?;
            Some(TaskBar {
                id: t.id,
                name: t.name.clone(),
                color: t.color,
                row: t.row,
                start_col,
                end_col,
                start: t.start,
                end: t.end,
            })
        })
        .collect();
    let preview = task_preview(&drag, controller.store(), &dates);

    let available = ui.available_size();
    let grid_width = (cols as f32 * CELL_WIDTH).max(available.x);
    let grid_height = (HEADER_HEIGHT + rows as f32 * CELL_HEIGHT).max(available.y);

    egui::ScrollArea::both()
        .id_salt("gantt_grid")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(grid_width, grid_height), Sense::click_and_drag());
            let origin = response.rect.min;
            let body_top = origin.y + HEADER_HEIGHT;
            let body_bottom = origin.y + HEADER_HEIGHT + rows as f32 * CELL_HEIGHT;

            scroll_to_cell(ui, origin, scroll_request);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

            let col_x = |col: usize| origin.x + col as f32 * CELL_WIDTH;
            let body_col_rect = |start_col: usize, end_col: usize| {
                Rect::from_min_max(
                    Pos2::new(col_x(start_col), body_top),
                    Pos2::new(col_x(end_col + 1), body_bottom),
                )
            };

            // Weekend and holiday shading
            for (col, date) in dates.iter().enumerate() {
                if crate::holidays::is_weekend(*date) {
                    painter.rect_filled(body_col_rect(col, col), 0.0, theme::BG_WEEKEND);
                }
                if holiday_dates.contains(date) {
                    painter.rect_filled(body_col_rect(col, col), 0.0, theme::BG_HOLIDAY);
                }
            }

            // Column / month selection highlight
            if let Some(col) = selected_col {
                painter.rect_filled(body_col_rect(col, col), 0.0, theme::BG_SELECTED);
            }
            if let Some((start, end)) = month_range {
                painter.rect_filled(body_col_rect(start, end.min(cols - 1)), 0.0, theme::BG_SELECTED);
            }

            // Grid lines
            for col in 0..=cols {
                let x = col_x(col);
                painter.line_segment(
                    [Pos2::new(x, body_top), Pos2::new(x, body_bottom)],
                    Stroke::new(0.5, theme::GRID_LINE),
                );
            }
            for row in 0..=rows {
                let y = body_top + row as f32 * CELL_HEIGHT;
                painter.line_segment(
                    [Pos2::new(origin.x, y), Pos2::new(col_x(cols), y)],
                    Stroke::new(0.5, theme::GRID_LINE),
                );
            }

            // Cells swept by an in-flight "new" drag
            if drag.is_active() {
                for row in 0..rows {
                    for col in 0..cols {
                        if cell_in_drag_area(row, col, &drag) {
                            let rect = grid::rect_of(row, col, col)
                                .translate(Vec2::new(origin.x, body_top));
                            painter.rect_filled(rect, 0.0, theme::BG_DRAG_AREA);
                        }
                    }
                }
            }

            // Pending region awaiting creation
            if let Some(region) = pending_region {
                let rect = grid::rect_of(region.row, region.start_col, region.end_col)
                    .translate(Vec2::new(origin.x, body_top));
                painter.rect_filled(rect, Rounding::same(2.0), theme::BG_PENDING);
                painter.rect_stroke(
                    rect,
                    Rounding::same(2.0),
                    Stroke::new(1.0, theme::BORDER_ACCENT),
                );
            }

            draw_header(&painter, origin, &dates, &spans, selected_col, month_range, today);

            // Today line through the body
            if let Some(today_col) = crate::model::dates::col_of(&dates, today) {
                let x = col_x(today_col) + CELL_WIDTH / 2.0;
                painter.line_segment(
                    [Pos2::new(x, body_top), Pos2::new(x, body_bottom)],
                    Stroke::new(1.5, theme::TODAY_LINE),
                );
            }

            // Task bars (the dragged one is replaced by its ghost)
            let mut resize_grab: Option<(usize, usize, Uuid, ResizeEdge)> = None;
            for bar in &bars {
                if Some(bar.id) == dragged_id {
                    continue;
                }
                let bar_rect = draw_task_bar(&painter, origin, bar);

                let hover = ui.interact(
                    bar_rect,
                    ui.make_persistent_id(("task-bar", bar.id)),
                    Sense::hover(),
                );
                if hover.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                    draw_handle_pills(&painter, bar_rect);
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("task-tip", bar.id)),
                        |ui| {
                            ui.strong(&bar.name);
                            ui.label(format!(
                                "{} → {}",
                                bar.start.format("%Y-%m-%d"),
                                bar.end.format("%Y-%m-%d"),
                            ));
                        },
                    );
                }

                // Edge handles take the press before cell hit-testing sees it.
                let left_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.left() - RESIZE_HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.left() + RESIZE_HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let right_rect = Rect::from_min_max(
                    Pos2::new(bar_rect.right() - RESIZE_HANDLE_WIDTH * 0.5, bar_rect.top()),
                    Pos2::new(bar_rect.right() + RESIZE_HANDLE_WIDTH * 0.5, bar_rect.bottom()),
                );
                let left = ui.interact(
                    left_rect.expand(2.0),
                    ui.make_persistent_id(("resize-left", bar.id)),
                    Sense::hover(),
                );
                let right = ui.interact(
                    right_rect.expand(2.0),
                    ui.make_persistent_id(("resize-right", bar.id)),
                    Sense::hover(),
                );
                if left.hovered() || right.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
                }
                let pressed_here = ui.input(|i| i.pointer.primary_pressed());
                if pressed_here && left.hovered() {
                    resize_grab = Some((bar.row, bar.start_col, bar.id, ResizeEdge::Start));
                } else if pressed_here && right.hovered() {
                    resize_grab = Some((bar.row, bar.end_col, bar.id, ResizeEdge::End));
                }
            }

            // Ghost of the dragged task at its would-be position
            if let Some(p) = &preview {
                if p.end_col >= 0 && p.start_col < cols as i64 {
                    let start = p.start_col.max(0) as usize;
                    let end = (p.end_col.min(cols as i64 - 1)) as usize;
                    let rect = grid::rect_of(p.row.min(rows - 1), start, end)
                        .translate(Vec2::new(origin.x, body_top))
                        .shrink2(Vec2::new(0.0, theme::BAR_INSET));
                    let color = bars
                        .iter()
                        .find(|b| b.id == p.task_id)
                        .map(|b| b.color)
                        .unwrap_or(theme::ACCENT);
                    painter.rect_filled(
                        rect,
                        Rounding::same(theme::BAR_ROUNDING),
                        color.gamma_multiply(0.5),
                    );
                    painter.rect_stroke(
                        rect,
                        Rounding::same(theme::BAR_ROUNDING),
                        Stroke::new(1.0, theme::BORDER_ACCENT),
                    );
                }
            }

            // The menu is drawn before pointer handling so a press on one of
            // its buttons is not mistaken for a press on the cell behind it.
            let menu_rect = show_context_menu(controller, ui, origin, &mut out);

            // ── Pointer events ──────────────────────────────────────────
            let pointer_in_grid = ui.rect_contains_pointer(response.rect);
            let (now, pressed, released, pointer_pos) = ui.input(|i| {
                (
                    i.time,
                    i.pointer.primary_pressed(),
                    i.pointer.primary_released(),
                    i.pointer.interact_pos(),
                )
            });
            let over_menu = match (menu_rect, pointer_pos) {
                (Some(rect), Some(pos)) => rect.contains(pos),
                _ => false,
            };
            let cell_under_pointer = pointer_pos.and_then(|pos| {
                grid::cell_at(pos.x - origin.x, pos.y - origin.y, Vec2::ZERO, rows, cols)
            });

            if over_menu {
                // Let the menu's widgets handle the press.
            } else if let Some((row, col, id, edge)) = resize_grab {
                controller.resize_handle_down(row, col, id, edge);
            } else if pressed && pointer_in_grid {
                if let (Some(cell), Some(pos)) = (cell_under_pointer, pointer_pos) {
                    controller.pointer_down(cell.row, cell.col, egui::PointerButton::Primary, now, pos);
                }
            }

            if controller.is_dragging() {
                if let Some(cell) = cell_under_pointer {
                    controller.pointer_enter(cell.row, cell.col);
                }
                if released {
                    let pos = pointer_pos.unwrap_or(Pos2::ZERO);
                    let result = controller.pointer_up(now, pos);
                    out.changed |= result.changed;
                    out.edit_task = out.edit_task.or(result.clicked_task);
                    scroll_to_cell(ui, origin, result.scroll_to);
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    controller.cancel_drag();
                }
            }

            if response.secondary_clicked() && !over_menu {
                if let (Some(cell), Some(pos)) = (cell_under_pointer, pointer_pos) {
                    controller.open_context_menu(cell.row, cell.col, pos);
                }
            }

            // Header clicks
            for span in &spans {
                let rect = Rect::from_min_max(
                    Pos2::new(col_x(span.start_index), origin.y),
                    Pos2::new(col_x(span.end_index() + 1), origin.y + MONTH_HEADER_HEIGHT),
                );
                let resp = ui.interact(
                    rect,
                    ui.make_persistent_id(("month-header", &span.key)),
                    Sense::click(),
                );
                if resp.clicked() {
                    controller.month_click(&span.key, span.start_index, span.len);
                }
            }
            for col in 0..cols {
                let rect = Rect::from_min_max(
                    Pos2::new(col_x(col), origin.y + MONTH_HEADER_HEIGHT),
                    Pos2::new(col_x(col + 1), origin.y + HEADER_HEIGHT),
                );
                let resp = ui.interact(
                    rect,
                    ui.make_persistent_id(("day-header", col)),
                    Sense::click(),
                );
                if resp.clicked() {
                    controller.column_click(col);
                }
            }
        });

    out
}

/// Bring a cell into view, centered.
fn scroll_to_cell(ui: &mut Ui, origin: Pos2, target: Option<GridPos>) {
    if let Some(pos) = target {
        let rect = grid::rect_of(pos.row, pos.col, pos.col)
            .translate(Vec2::new(origin.x, origin.y + HEADER_HEIGHT));
        ui.scroll_to_rect(rect, Some(egui::Align::Center));
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    dates: &[NaiveDate],
    spans: &[crate::model::dates::MonthSpan],
    selected_col: Option<usize>,
    month_range: Option<(usize, usize)>,
    today: NaiveDate,
) {
    let cols = dates.len();
    let width = cols as f32 * CELL_WIDTH;
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    // Month row
    for span in spans {
        let rect = Rect::from_min_max(
            Pos2::new(origin.x + span.start_index as f32 * CELL_WIDTH, origin.y),
            Pos2::new(
                origin.x + (span.end_index() + 1) as f32 * CELL_WIDTH,
                origin.y + MONTH_HEADER_HEIGHT,
            ),
        );
        let selected = month_range.is_some_and(|(s, _)| s == span.start_index);
        if selected {
            painter.rect_filled(rect, 0.0, theme::BG_SELECTED);
        }
        painter.line_segment(
            [rect.right_top(), rect.right_bottom()],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        let clipped = painter.with_clip_rect(rect);
        clipped.text(
            Pos2::new(rect.left() + 4.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            &span.label,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
    }

    // Day row
    let day_top = origin.y + MONTH_HEADER_HEIGHT;
    for (col, date) in dates.iter().enumerate() {
        let rect = Rect::from_min_size(
            Pos2::new(origin.x + col as f32 * CELL_WIDTH, day_top),
            Vec2::new(CELL_WIDTH, DAY_HEADER_HEIGHT),
        );
        if selected_col == Some(col) {
            painter.rect_filled(rect, 0.0, theme::BG_SELECTED);
        }
        let is_today = *date == today;
        if is_today {
            painter.rect_filled(rect, Rounding::same(2.0), theme::TODAY_LINE);
        }
        let color = if is_today {
            Color32::WHITE
        } else if crate::holidays::is_weekend(*date) {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            format!("{}", chrono::Datelike::day(date)),
            theme::font_sub(),
            color,
        );
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
}

fn draw_task_bar(painter: &egui::Painter, origin: Pos2, bar: &TaskBar) -> Rect {
    let bar_rect = grid::rect_of(bar.row, bar.start_col, bar.end_col)
        .translate(Vec2::new(origin.x, origin.y + HEADER_HEIGHT))
        .shrink2(Vec2::new(0.0, theme::BAR_INSET));
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    // Soft shadow
    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, bar.color);
    // Lighter top highlight
    painter.rect_filled(
        Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_rect.width(), (bar_rect.height() * 0.45).max(4.0)),
        ),
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if bar_rect.width() > 30.0 {
        let galley = painter.layout_no_wrap(bar.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let clipped = painter.with_clip_rect(bar_rect);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        clipped.galley(
            Pos2::new(bar_rect.left() + 5.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }

    bar_rect
}

fn draw_handle_pills(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    let lh = Rect::from_min_size(
        Pos2::new(bar_rect.left() - 1.5, handle_y),
        Vec2::new(RESIZE_HANDLE_WIDTH, handle_h),
    );
    let rh = Rect::from_min_size(
        Pos2::new(bar_rect.right() - 2.5, handle_y),
        Vec2::new(RESIZE_HANDLE_WIDTH, handle_h),
    );
    painter.rect_filled(lh, Rounding::same(2.0), theme::HANDLE_COLOR);
    painter.rect_filled(rh, Rounding::same(2.0), theme::HANDLE_COLOR);
}

/// Floating right-click menu: create on empty cells, edit/duplicate/delete on
/// a task.
fn show_context_menu(
    controller: &mut GanttController,
    ui: &mut Ui,
    origin: Pos2,
    out: &mut GridViewResponse,
) -> Option<Rect> {
    let menu = controller.context_menu().copied()?;

    // Scroll targets are applied with the grid's own ui, not the popup's.
    let mut scroll: Option<GridPos> = None;

    let area = egui::Area::new(egui::Id::new("grid-context-menu"))
        .fixed_pos(menu.pos)
        .order(egui::Order::Foreground);
    let area_resp = area.show(ui.ctx(), |ui| {
        egui::Frame::popup(ui.style()).show(ui, |ui| {
            ui.set_min_width(120.0);
            match menu.task_id {
                Some(id) => {
                    if ui.button(format!("{}  Edit", egui_phosphor::regular::PENCIL_SIMPLE)).clicked() {
                        out.edit_task = Some(id);
                        controller.close_context_menu();
                    }
                    if ui.button(format!("{}  Duplicate", egui_phosphor::regular::COPY)).clicked() {
                        let result = controller.duplicate_task(id);
                        out.changed |= result.changed;
                        scroll = result.scroll_to;
                    }
                    ui.separator();
                    if ui.button(format!("{}  Delete", egui_phosphor::regular::TRASH)).clicked() {
                        out.changed |= controller.delete_task(id).changed;
                    }
                }
                None => {
                    if ui.button(format!("{}  New task", egui_phosphor::regular::PLUS)).clicked() {
                        let result = controller.create_from_context(theme::TASK_COLORS);
                        out.changed |= result.changed;
                        scroll = result.scroll_to;
                    }
                }
            }
        });
    });

    scroll_to_cell(ui, origin, scroll);

    let dismiss = area_resp.response.clicked_elsewhere()
        || ui.input(|i| i.key_pressed(egui::Key::Escape));
    if dismiss {
        controller.close_context_menu();
    }

    Some(area_resp.response.rect)
}
