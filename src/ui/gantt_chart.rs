use chrono::Datelike;
use egui::{Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::layout::{self, layout_bars, layout_edges, COLUMN_WIDTH, ROW_HEIGHT};
use crate::model::{DateRangeWindow, Task};
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const TITLE_WIDTH: f32 = theme::TITLE_COLUMN_WIDTH;
/// Horizontal breathing room between adjacent bars.
const BAR_GAP: f32 = 4.0;

/// Result of interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartAction {
    /// Task the user clicked, either its bar or its title cell.
    pub clicked_task: Option<Uuid>,
}

/// Render window controls plus the chart canvas. All bar and arrow
/// geometry comes from the layout module; this function only paints.
pub fn show_gantt_chart(
    tasks: &[Task],
    window: &mut DateRangeWindow,
    ui: &mut Ui,
) -> ChartAction {
    let mut action = ChartAction::default();

    show_window_controls(window, ui);
    ui.add_space(4.0);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            action = show_chart_canvas(tasks, window, ui);
        });

    action
}

/// Prev/next week navigation, the visible range label, and week zoom.
fn show_window_controls(window: &mut DateRangeWindow, ui: &mut Ui) {
    ui.horizontal(|ui| {
        if ui.button("◀").on_hover_text("Back one week").clicked() {
            window.shift_weeks(-1);
        }
        if ui.button("▶").on_hover_text("Forward one week").clicked() {
            window.shift_weeks(1);
        }

        ui.label(
            egui::RichText::new(format!(
                "{} – {}",
                window.anchor.format("%b %-d, %Y"),
                window.last_day().format("%b %-d, %Y")
            ))
            .color(theme::TEXT_SECONDARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("+").on_hover_text("Show one more week").clicked() {
                window.zoom_out();
            }
            let narrower = ui.add_enabled(
                window.weeks > crate::model::window::MIN_WEEKS,
                egui::Button::new("−"),
            );
            if narrower.on_hover_text("Show one week less").clicked() {
                window.zoom_in();
            }
            ui.label(
                egui::RichText::new(format!("{} weeks", window.weeks))
                    .color(theme::TEXT_DIM)
                    .size(11.0),
            );
        });
    });
}

fn show_chart_canvas(tasks: &[Task], window: &DateRangeWindow, ui: &mut Ui) -> ChartAction {
    let mut action = ChartAction::default();

    let columns = layout::columns_for(window);
    let bars = layout_bars(tasks, window);
    let edges = layout_edges(tasks, window);

    let chart_width = TITLE_WIDTH + columns.len() as f32 * COLUMN_WIDTH;
    let chart_height = HEADER_HEIGHT + (tasks.len().max(1) as f32) * ROW_HEIGHT;

    let (response, painter) =
        ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click());
    let origin = response.rect.min;
    // Bars and arrows are positioned relative to this corner.
    let grid = Pos2::new(origin.x + TITLE_WIDTH, origin.y + HEADER_HEIGHT);

    painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

    // Day columns: weekend/today tint under everything else.
    for (i, col) in columns.iter().enumerate() {
        let x = grid.x + i as f32 * COLUMN_WIDTH;
        let column_rect = Rect::from_min_size(
            Pos2::new(x, origin.y),
            Vec2::new(COLUMN_WIDTH, chart_height),
        );
        if col.is_today {
            painter.rect_filled(column_rect, 0.0, theme::TODAY_FILL);
        } else if col.is_weekend {
            painter.rect_filled(column_rect, 0.0, theme::WEEKEND_FILL);
        }
        painter.line_segment(
            [
                Pos2::new(x, origin.y),
                Pos2::new(x, origin.y + chart_height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }

    // Header strip with weekday and day-of-month labels.
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(chart_width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.text(
        Pos2::new(origin.x + 12.0, origin.y + HEADER_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        "Task",
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );
    for (i, col) in columns.iter().enumerate() {
        let x = grid.x + i as f32 * COLUMN_WIDTH + COLUMN_WIDTH / 2.0;
        let color = if col.is_today {
            theme::ACCENT
        } else if col.is_weekend {
            theme::TEXT_DIM
        } else {
            theme::TEXT_SECONDARY
        };
        painter.text(
            Pos2::new(x, origin.y + 13.0),
            egui::Align2::CENTER_CENTER,
            col.date.format("%a").to_string(),
            theme::font_sub(),
            color,
        );
        painter.text(
            Pos2::new(x, origin.y + 28.0),
            egui::Align2::CENTER_CENTER,
            col.date.day().to_string(),
            theme::font_header(),
            color,
        );
    }
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + chart_width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Title column and row separators.
    for (row, task) in tasks.iter().enumerate() {
        let y = grid.y + row as f32 * ROW_HEIGHT;
        let title_rect = Rect::from_min_size(
            Pos2::new(origin.x, y),
            Vec2::new(TITLE_WIDTH, ROW_HEIGHT),
        );
        let title_response = ui.interact(
            title_rect,
            ui.make_persistent_id(("task-title", task.id)),
            Sense::click(),
        );
        if title_response.hovered() {
            painter.rect_filled(title_rect, 0.0, theme::WEEKEND_FILL);
        }
        if title_response.clicked() {
            action.clicked_task = Some(task.id);
        }
        painter.text(
            Pos2::new(origin.x + 12.0, y + ROW_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            &task.title,
            theme::font_bar(),
            theme::TEXT_PRIMARY,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + ROW_HEIGHT),
                Pos2::new(origin.x + chart_width, y + ROW_HEIGHT),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
    painter.line_segment(
        [
            Pos2::new(origin.x + TITLE_WIDTH, origin.y),
            Pos2::new(origin.x + TITLE_WIDTH, origin.y + chart_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Task bars.
    for bar in &bars {
        let task = &tasks[bar.row];
        let bar_rect = Rect::from_min_size(
            Pos2::new(grid.x + bar.x() + BAR_GAP / 2.0, grid.y + bar.y()),
            Vec2::new((bar.width() - BAR_GAP).max(6.0), bar.height()),
        );
        let rounding = Rounding::same(theme::BAR_ROUNDING);

        painter.rect_filled(bar_rect, rounding, task.color);

        // Progress fill (darkened overlay).
        if task.progress > 0 {
            let progress_width = bar_rect.width() * (task.progress.min(100) as f32 / 100.0);
            painter.rect_filled(
                Rect::from_min_size(
                    bar_rect.min,
                    Vec2::new(progress_width, bar_rect.height()),
                ),
                rounding,
                theme::PROGRESS_OVERLAY,
            );
        }

        // Label, clipped to the bar.
        if bar_rect.width() > 30.0 {
            let label = format!("{} – {}%", task.title, task.progress);
            let galley = painter.layout_no_wrap(label, theme::font_bar(), theme::TEXT_ON_BAR);
            let clipped = painter.with_clip_rect(bar_rect);
            clipped.galley(
                Pos2::new(
                    bar_rect.left() + 8.0,
                    bar_rect.center().y - galley.size().y / 2.0,
                ),
                galley,
                egui::Color32::TRANSPARENT,
            );
        }

        let bar_response = ui.interact(
            bar_rect,
            ui.make_persistent_id(("task-bar", task.id)),
            Sense::click(),
        );
        if bar_response.clicked() {
            action.clicked_task = Some(task.id);
        }
        if bar_response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
            egui::show_tooltip_at_pointer(
                ui.ctx(),
                ui.layer_id(),
                egui::Id::new(("task-tip", task.id)),
                |ui| {
                    ui.strong(&task.title);
                    ui.label(format!(
                        "{} → {}",
                        task.start.format("%Y-%m-%d"),
                        task.end.format("%Y-%m-%d"),
                    ));
                    ui.label(format!("Progress: {}%", task.progress));
                },
            );
        }
    }

    // Dependency arrows, on top of the bars.
    for edge in &edges {
        let (x1, y1) = edge.start();
        let (x2, y2) = edge.end();
        let from = Pos2::new(grid.x + x1, grid.y + y1);
        let to = Pos2::new(grid.x + x2, grid.y + y2);

        let stroke = Stroke::new(1.0, theme::EDGE_LINE);
        painter.extend(egui::Shape::dashed_line(&[from, to], stroke, 4.0, 4.0));
        draw_arrowhead(&painter, from, to);
    }

    action
}

/// Small triangle at `to`, oriented along the line from `from`.
fn draw_arrowhead(painter: &egui::Painter, from: Pos2, to: Pos2) {
    let dir = (to - from).normalized();
    if !dir.x.is_finite() || !dir.y.is_finite() {
        return;
    }
    let normal = Vec2::new(-dir.y, dir.x);
    let base = to - dir * 8.0;
    painter.add(egui::Shape::convex_polygon(
        vec![to, base + normal * 3.5, base - normal * 3.5],
        theme::EDGE_LINE,
        Stroke::NONE,
    ));
}
