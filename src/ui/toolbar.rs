use egui::{menu, RichText, Ui};

use crate::app::{Page, WeeklineApp};
use crate::ui::theme;

/// Render the top menu bar with the page tabs.
pub fn show_toolbar(app: &mut WeeklineApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Import Tasks CSV...").clicked() {
                app.import_csv();
                ui.close_menu();
            }
            if ui.button("  Export Tasks CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  This Week").clicked() {
                app.window = crate::model::DateRangeWindow::current_week(
                    chrono::Local::now().date_naive(),
                );
                ui.close_menu();
            }
            if ui.button("  Previous Week").clicked() {
                app.window.shift_weeks(-1);
                ui.close_menu();
            }
            if ui.button("  Next Week").clicked() {
                app.window.shift_weeks(1);
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Narrower (− 1 week)").clicked() {
                app.window.zoom_in();
                ui.close_menu();
            }
            if ui.button("  Wider (+ 1 week)").clicked() {
                app.window.zoom_out();
                ui.close_menu();
            }
        });

        ui.separator();

        for (page, icon, label) in [
            (Page::Timeline, egui_phosphor::regular::CHART_BAR, "Timeline"),
            (Page::Calendar, egui_phosphor::regular::CALENDAR, "Calendar"),
            (Page::TimeTracking, egui_phosphor::regular::TIMER, "Time"),
        ] {
            let selected = app.page == page;
            let text = RichText::new(format!("{} {}", icon, label)).font(theme::font_menu());
            if ui.selectable_label(selected, text).clicked() {
                app.page = page;
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("Tasks: {}", app.tasks.len()))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
