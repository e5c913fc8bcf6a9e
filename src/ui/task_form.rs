use chrono::NaiveDate;
use egui::{Color32, Context, RichText, Window};
use uuid::Uuid;

use crate::model::Task;
use crate::ui::theme;

/// State of the add/edit task dialog, owned by the app between frames.
pub struct TaskFormState {
    pub open: bool,
    /// Id of the task being edited, `None` when creating.
    editing: Option<Uuid>,
    title: String,
    start: NaiveDate,
    end: NaiveDate,
    progress: u8,
    color: Color32,
    dependencies: Vec<Uuid>,
}

impl TaskFormState {
    pub fn closed() -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            open: false,
            editing: None,
            title: String::new(),
            start: today,
            end: today + chrono::Duration::days(7),
            progress: 0,
            color: theme::task_color(0),
            dependencies: Vec::new(),
        }
    }

    /// Open the dialog for a new task; `task_count` picks the palette color.
    pub fn open_new(&mut self, task_count: usize) {
        *self = Self::closed();
        self.color = theme::task_color(task_count);
        self.open = true;
    }

    /// Open the dialog pre-filled from an existing task.
    pub fn open_edit(&mut self, task: &Task) {
        self.open = true;
        self.editing = Some(task.id);
        self.title = task.title.clone();
        self.start = task.start;
        self.end = task.end;
        self.progress = task.progress;
        self.color = task.color;
        self.dependencies = task.dependencies.clone();
    }
}

/// Render the dialog and apply the resulting change to `tasks`.
/// Returns a status message when something changed.
pub fn show_task_form(
    state: &mut TaskFormState,
    tasks: &mut Vec<Task>,
    ctx: &Context,
) -> Option<String> {
    if !state.open {
        return None;
    }

    let mut status = None;
    let mut should_close = false;
    let title = if state.editing.is_some() {
        "Edit Task"
    } else {
        "Add Task"
    };

    Window::new(RichText::new(title).strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 0.0])
        .show(ctx, |ui| {
            ui.visuals_mut().extreme_bg_color = theme::BG_FIELD;
            ui.add_space(4.0);

            egui::Grid::new("task_form_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Title").color(theme::TEXT_SECONDARY));
                    ui.add_sized(
                        [200.0, 24.0],
                        egui::TextEdit::singleline(&mut state.title).hint_text("Task title..."),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Start").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut state.start)
                            .id_salt("task_form_start"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("End").color(theme::TEXT_SECONDARY));
                    ui.add(
                        egui_extras::DatePickerButton::new(&mut state.end).id_salt("task_form_end"),
                    );
                    ui.end_row();

                    ui.label(RichText::new("Progress").color(theme::TEXT_SECONDARY));
                    ui.add(egui::Slider::new(&mut state.progress, 0..=100).suffix("%"));
                    ui.end_row();

                    ui.label(RichText::new("Color").color(theme::TEXT_SECONDARY));
                    ui.horizontal(|ui| {
                        for &color in theme::TASK_COLORS {
                            let selected = state.color == color;
                            let (rect, response) = ui
                                .allocate_exact_size(egui::vec2(16.0, 16.0), egui::Sense::click());
                            ui.painter()
                                .rect_filled(rect, egui::Rounding::same(3.0), color);
                            if selected {
                                ui.painter().rect_stroke(
                                    rect,
                                    egui::Rounding::same(3.0),
                                    egui::Stroke::new(2.0, Color32::WHITE),
                                );
                            }
                            if response.clicked() {
                                state.color = color;
                            }
                        }
                    });
                    ui.end_row();
                });

            // Dependencies on other tasks, only when editing (a brand-new
            // task has nothing to point at yet, matching the form flow).
            if let Some(editing_id) = state.editing {
                let others: Vec<(Uuid, String)> = tasks
                    .iter()
                    .filter(|t| t.id != editing_id)
                    .map(|t| (t.id, t.title.clone()))
                    .collect();
                if !others.is_empty() {
                    ui.add_space(6.0);
                    ui.label(
                        RichText::new("Depends on")
                            .size(10.0)
                            .color(theme::TEXT_DIM)
                            .strong(),
                    );
                    egui::ScrollArea::vertical()
                        .max_height(120.0)
                        .show(ui, |ui| {
                            for (id, title) in &others {
                                let mut checked = state.dependencies.contains(id);
                                if ui.checkbox(&mut checked, title).changed() {
                                    if checked {
                                        state.dependencies.push(*id);
                                    } else {
                                        state.dependencies.retain(|d| d != id);
                                    }
                                }
                            }
                        });
                }
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);

            ui.horizontal(|ui| {
                let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                    .fill(theme::ACCENT)
                    .rounding(egui::Rounding::same(4.0));
                let can_save = !state.title.trim().is_empty();
                if ui.add_enabled(can_save, save_btn).clicked() {
                    status = Some(apply(state, tasks));
                    should_close = true;
                }
                if ui.button("Cancel").clicked() {
                    should_close = true;
                }
                if let Some(id) = state.editing {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let delete_btn = egui::Button::new(
                            RichText::new("Delete").color(Color32::from_rgb(240, 100, 100)),
                        );
                        if ui.add(delete_btn).clicked() {
                            tasks.retain(|t| t.id != id);
                            status = Some("Task deleted".to_string());
                            should_close = true;
                        }
                    });
                }
            });
            ui.add_space(2.0);
        });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        should_close = true;
    }
    if should_close {
        state.open = false;
    }
    status
}

/// Write the form fields back into the task list. End dates before the
/// start are stored as-is; the layout clamps them to one day.
fn apply(state: &TaskFormState, tasks: &mut Vec<Task>) -> String {
    match state.editing {
        Some(id) => {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.title = state.title.trim().to_string();
                task.start = state.start;
                task.end = state.end;
                task.progress = state.progress;
                task.color = state.color;
                task.dependencies = state.dependencies.clone();
                format!("Updated '{}'", task.title)
            } else {
                "Task no longer exists".to_string()
            }
        }
        None => {
            let mut task = Task::new(state.title.trim(), state.start, state.end);
            task.progress = state.progress;
            task.color = state.color;
            let title = task.title.clone();
            tasks.push(task);
            format!("Added '{}'", title)
        }
    }
}
