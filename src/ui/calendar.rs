use chrono::NaiveDate;
use egui::{RichText, Ui};
use uuid::Uuid;

use crate::model::{CalendarNote, NoteBook};
use crate::ui::theme;

/// State of the calendar page between frames.
pub struct CalendarState {
    pub selected_date: NaiveDate,
    title: String,
    description: String,
    tag: String,
    editing: Option<Uuid>,
    tag_filter: Option<String>,
}

impl CalendarState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_date: today,
            title: String::new(),
            description: String::new(),
            tag: String::new(),
            editing: None,
            tag_filter: None,
        }
    }

    fn clear_composer(&mut self) {
        self.title.clear();
        self.description.clear();
        self.tag.clear();
        self.editing = None;
    }
}

/// Render the notes page. Returns true when the note book changed and
/// should be persisted.
pub fn show_calendar(state: &mut CalendarState, notes: &mut NoteBook, ui: &mut Ui) -> bool {
    let mut changed = false;

    ui.horizontal(|ui| {
        ui.label(RichText::new("Day").color(theme::TEXT_SECONDARY));
        ui.add(
            egui_extras::DatePickerButton::new(&mut state.selected_date).id_salt("calendar_day"),
        );
        if notes.dates_with_notes().contains(&state.selected_date) {
            ui.label(RichText::new("● has notes").color(theme::ACCENT).size(10.5));
        }

        // Tag filter, fed from the tags currently in use.
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let label = state.tag_filter.clone().unwrap_or_else(|| "All tags".to_string());
            egui::ComboBox::from_id_salt("tag_filter")
                .selected_text(label)
                .show_ui(ui, |ui| {
                    if ui
                        .selectable_label(state.tag_filter.is_none(), "All tags")
                        .clicked()
                    {
                        state.tag_filter = None;
                    }
                    for tag in notes.tags() {
                        let selected = state.tag_filter.as_deref() == Some(tag.as_str());
                        if ui.selectable_label(selected, &tag).clicked() {
                            state.tag_filter = Some(tag);
                        }
                    }
                });
        });
    });

    ui.add_space(6.0);

    // Composer for a new note or an edit in progress.
    let heading = if state.editing.is_some() {
        "Edit Note"
    } else {
        "New Note"
    };
    ui.label(RichText::new(heading).strong().size(13.0));
    ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
    ui.add_sized(
        [ui.available_width(), 24.0],
        egui::TextEdit::singleline(&mut state.title).hint_text("Title..."),
    );
    ui.add_sized(
        [ui.available_width(), 24.0],
        egui::TextEdit::singleline(&mut state.description).hint_text("Description (optional)"),
    );
    ui.horizontal(|ui| {
        ui.add_sized(
            [140.0, 24.0],
            egui::TextEdit::singleline(&mut state.tag).hint_text("Tag (optional)"),
        );
        let can_save = !state.title.trim().is_empty();
        let save_label = if state.editing.is_some() { "Update" } else { "Add Note" };
        if ui.add_enabled(can_save, egui::Button::new(save_label)).clicked() {
            let tag = {
                let trimmed = state.tag.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            };
            match state.editing {
                Some(id) => {
                    let mut note = CalendarNote::new(
                        state.selected_date,
                        state.title.trim(),
                        state.description.trim(),
                    );
                    note.id = id;
                    note.tag = tag;
                    notes.update(note);
                }
                None => {
                    let mut note = CalendarNote::new(
                        state.selected_date,
                        state.title.trim(),
                        state.description.trim(),
                    );
                    note.tag = tag;
                    notes.add(note);
                }
            }
            state.clear_composer();
            changed = true;
        }
        if state.editing.is_some() && ui.button("Cancel").clicked() {
            state.clear_composer();
        }
    });

    ui.add_space(8.0);
    ui.separator();

    // Notes for the selected day, honoring the tag filter.
    let day_notes: Vec<CalendarNote> = match &state.tag_filter {
        Some(tag) => notes
            .with_tag(tag)
            .into_iter()
            .filter(|n| n.date == state.selected_date)
            .cloned()
            .collect(),
        None => notes
            .notes_on(state.selected_date)
            .into_iter()
            .cloned()
            .collect(),
    };

    ui.label(
        RichText::new(format!(
            "Notes on {}",
            state.selected_date.format("%A, %b %-d")
        ))
        .strong()
        .size(13.0),
    );
    if day_notes.is_empty() {
        ui.label(RichText::new("No notes for this day.").color(theme::TEXT_DIM));
    }
    for note in &day_notes {
        let mut delete = false;
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&note.title).strong());
                    if let Some(tag) = &note.tag {
                        ui.label(
                            RichText::new(format!("#{}", tag))
                                .color(theme::ACCENT)
                                .size(10.5),
                        );
                    }
                });
                if !note.description.is_empty() {
                    ui.label(
                        RichText::new(&note.description)
                            .color(theme::TEXT_SECONDARY)
                            .size(11.0),
                    );
                }
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").on_hover_text("Delete note").clicked() {
                    delete = true;
                }
                if ui.small_button("✎").on_hover_text("Edit note").clicked() {
                    state.editing = Some(note.id);
                    state.title = note.title.clone();
                    state.description = note.description.clone();
                    state.tag = note.tag.clone().unwrap_or_default();
                }
            });
        });
        if delete {
            notes.delete(note.id);
            changed = true;
        }
        ui.separator();
    }

    ui.add_space(8.0);
    ui.label(RichText::new("Recent").strong().size(13.0));
    for note in notes.recent(5) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(note.date.format("%b %-d").to_string())
                    .color(theme::TEXT_DIM)
                    .size(10.5),
            );
            ui.label(RichText::new(&note.title).size(11.5));
        });
    }

    changed
}
