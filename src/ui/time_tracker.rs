use egui::{RichText, Ui};
use uuid::Uuid;

use crate::model::entry::format_hms;
use crate::model::TimeSheet;
use crate::ui::theme;

/// State of the time tracking page between frames.
#[derive(Default)]
pub struct TimeTrackerState {
    title: String,
    description: String,
    manual_hours: String,
    manual_minutes: String,
    editing: Option<Uuid>,
}

impl TimeTrackerState {
    pub fn new() -> Self {
        Self {
            manual_hours: "0".to_string(),
            manual_minutes: "0".to_string(),
            ..Default::default()
        }
    }

    fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.manual_hours = "0".to_string();
        self.manual_minutes = "0".to_string();
        self.editing = None;
    }
}

/// Render the timer controls and the entry list. Returns true when the
/// sheet changed and should be persisted.
pub fn show_time_tracker(state: &mut TimeTrackerState, sheet: &mut TimeSheet, ui: &mut Ui) -> bool {
    let mut changed = false;
    let now = chrono::Local::now();

    // Timer form.
    let heading = if state.editing.is_some() {
        "Edit Time Entry"
    } else {
        "Start New Timer"
    };
    ui.label(RichText::new(heading).strong().size(13.0));
    ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
    ui.add_sized(
        [ui.available_width(), 24.0],
        egui::TextEdit::singleline(&mut state.title).hint_text("What are you working on?"),
    );
    ui.add_sized(
        [ui.available_width(), 24.0],
        egui::TextEdit::singleline(&mut state.description).hint_text("Add description (optional)"),
    );

    ui.horizontal(|ui| {
        if let Some(id) = state.editing {
            if ui.button("Update").clicked() {
                sheet.rename(id, state.title.trim(), state.description.trim());
                state.clear();
                changed = true;
            }
            if ui.button("Cancel").clicked() {
                state.clear();
            }
        } else if let Some(running) = sheet.running_entry() {
            let running_id = running.id;
            if ui.button("⏸ Pause").clicked() {
                sheet.pause_all();
                changed = true;
            }
            if ui.button("⏹ Stop").clicked() {
                sheet.stop(running_id, now);
                changed = true;
            }
        } else {
            let can_start = !state.title.trim().is_empty();
            if ui
                .add_enabled(can_start, egui::Button::new("▶ Start Timer"))
                .clicked()
            {
                sheet.start(state.title.trim(), state.description.trim(), now);
                state.clear();
                changed = true;
            }
        }
    });

    ui.add_space(8.0);

    // Manual entry.
    ui.label(RichText::new("Add Time Manually").strong().size(13.0));
    ui.horizontal(|ui| {
        ui.add_sized([48.0, 24.0], egui::TextEdit::singleline(&mut state.manual_hours));
        ui.label("hours");
        ui.add_sized(
            [48.0, 24.0],
            egui::TextEdit::singleline(&mut state.manual_minutes),
        );
        ui.label("minutes");

        let hours = state.manual_hours.trim().parse::<i64>().unwrap_or(0);
        let minutes = state.manual_minutes.trim().parse::<i64>().unwrap_or(0);
        let can_add = !state.title.trim().is_empty() && (hours > 0 || minutes > 0);
        if ui.add_enabled(can_add, egui::Button::new("Add Entry")).clicked() {
            if sheet
                .add_manual(state.title.trim(), state.description.trim(), hours, minutes, now)
                .is_some()
            {
                state.clear();
                changed = true;
            }
        }
    });

    ui.add_space(8.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Total time tracked:").color(theme::TEXT_SECONDARY));
        ui.label(
            RichText::new(format_hms(sheet.total_ms()))
                .font(theme::font_mono())
                .strong(),
        );
    });
    ui.separator();

    // Entry list, newest last (insertion order).
    ui.label(RichText::new("Recent Time Entries").strong().size(13.0));
    if sheet.entries.is_empty() {
        ui.label(RichText::new("No time entries yet.").color(theme::TEXT_DIM));
    }

    let mut to_stop = None;
    let mut to_resume = None;
    let mut to_delete = None;
    let mut to_edit = None;

    for entry in &sheet.entries {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&entry.title).strong());
                    if entry.running {
                        ui.label(
                            RichText::new("● running")
                                .color(theme::RUNNING_ACCENT)
                                .size(10.5),
                        );
                    }
                });
                if !entry.description.is_empty() {
                    ui.label(
                        RichText::new(&entry.description)
                            .color(theme::TEXT_SECONDARY)
                            .size(11.0),
                    );
                }
                let span_end = entry
                    .stopped
                    .map(|t| t.format("%H:%M:%S").to_string())
                    .unwrap_or_else(|| "…".to_string());
                ui.label(
                    RichText::new(format!("{} – {}", entry.started.format("%H:%M:%S"), span_end))
                        .color(theme::TEXT_DIM)
                        .size(10.5),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Delete entry").clicked() {
                    to_delete = Some(entry.id);
                }
                if ui.small_button("✎").on_hover_text("Edit entry").clicked() {
                    to_edit = Some(entry.id);
                }
                if entry.running {
                    if ui.small_button("⏹").on_hover_text("Stop").clicked() {
                        to_stop = Some(entry.id);
                    }
                } else if entry.stopped.is_none()
                    && ui.small_button("▶").on_hover_text("Resume").clicked()
                {
                    to_resume = Some(entry.id);
                }
                let color = if entry.running {
                    theme::RUNNING_ACCENT
                } else {
                    theme::TEXT_PRIMARY
                };
                ui.label(
                    RichText::new(format_hms(entry.duration_ms))
                        .font(theme::font_mono())
                        .color(color),
                );
            });
        });
        ui.separator();
    }

    if let Some(id) = to_stop {
        sheet.stop(id, now);
        changed = true;
    }
    if let Some(id) = to_resume {
        sheet.resume(id);
        changed = true;
    }
    if let Some(id) = to_edit {
        if let Some(entry) = sheet.entries.iter().find(|e| e.id == id) {
            state.editing = Some(id);
            state.title = entry.title.clone();
            state.description = entry.description.clone();
        }
        // Editing pauses a running entry, mirroring the tracker's flow.
        if sheet.running_entry().map(|e| e.id) == Some(id) {
            sheet.pause_all();
            changed = true;
        }
    }
    if let Some(id) = to_delete {
        sheet.delete(id);
        changed = true;
    }

    changed
}
