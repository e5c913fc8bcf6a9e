use std::path::PathBuf;

use crate::model::{DateRangeWindow, NoteBook, Task, TimeSheet};
use crate::store::{DiskBackend, Store};
use crate::ui;
use crate::ui::calendar::CalendarState;
use crate::ui::task_form::TaskFormState;
use crate::ui::time_tracker::TimeTrackerState;

const TASKS_KEY: &str = "tasks";
const NOTES_KEY: &str = "calendar_notes";
const ENTRIES_KEY: &str = "time_entries";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Timeline,
    Calendar,
    TimeTracking,
}

/// Main application state.
pub struct WeeklineApp {
    pub tasks: Vec<Task>,
    pub notes: NoteBook,
    pub time_sheet: TimeSheet,
    pub window: DateRangeWindow,
    pub page: Page,
    pub status_message: String,

    /// `None` when no data directory is available; the app then runs
    /// purely in memory.
    store: Option<Store>,
    data_dir: Option<PathBuf>,

    task_form: TaskFormState,
    calendar: CalendarState,
    tracker: TimeTrackerState,
}

impl WeeklineApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let (store, data_dir) = match DiskBackend::open_default() {
            Ok(backend) => {
                let dir = backend.dir().clone();
                (Some(Store::new(Box::new(backend))), Some(dir))
            }
            Err(e) => {
                eprintln!("Running without persistence: {}", e);
                (None, None)
            }
        };

        let today = chrono::Local::now().date_naive();
        let tasks = store
            .as_ref()
            .and_then(|s| s.load::<Vec<Task>>(TASKS_KEY))
            .unwrap_or_else(|| Self::sample_tasks(today));
        let notes = store
            .as_ref()
            .and_then(|s| s.load::<NoteBook>(NOTES_KEY))
            .unwrap_or_default();
        let time_sheet = store
            .as_ref()
            .and_then(|s| s.load::<TimeSheet>(ENTRIES_KEY))
            .unwrap_or_default();

        Self {
            tasks,
            notes,
            time_sheet,
            window: DateRangeWindow::current_week(today),
            page: Page::Timeline,
            status_message: "Ready".to_string(),
            store,
            data_dir,
            task_form: TaskFormState::closed(),
            calendar: CalendarState::new(today),
            tracker: TimeTrackerState::new(),
        }
    }

    /// A small starter plan so a first launch is not an empty chart.
    fn sample_tasks(today: chrono::NaiveDate) -> Vec<Task> {
        let day = chrono::Duration::days;

        let mut planning = Task::new("Project Planning", today, today + day(2));
        planning.progress = 100;
        planning.color = egui::Color32::from_rgb(99, 102, 241);

        let mut design = Task::new("Design Phase", today + day(3), today + day(7));
        design.progress = 70;
        design.color = egui::Color32::from_rgb(34, 197, 94);
        design.dependencies = vec![planning.id];

        let mut development = Task::new("Development", today + day(8), today + day(15));
        development.progress = 20;
        development.color = egui::Color32::from_rgb(249, 115, 22);
        development.dependencies = vec![design.id];

        vec![planning, design, development]
    }

    // --- Persistence ---

    fn save(&mut self, key: &str, status: &str) {
        let result = match (key, self.store.as_mut()) {
            (TASKS_KEY, Some(store)) => store.save(key, &self.tasks),
            (NOTES_KEY, Some(store)) => store.save(key, &self.notes),
            (ENTRIES_KEY, Some(store)) => store.save(key, &self.time_sheet),
            (_, None) => Ok(()),
            _ => Ok(()),
        };
        match result {
            Ok(()) => self.status_message = status.to_string(),
            Err(e) => self.status_message = format!("Error saving: {}", e),
        }
    }

    // --- File operations ---

    pub fn import_csv(&mut self) {
        // Guard: replacing a non-empty task list needs confirmation.
        if !self.tasks.is_empty() {
            let confirm = rfd::MessageDialog::new()
                .set_title("Import CSV")
                .set_description("This will replace the current task list. Continue?")
                .set_buttons(rfd::MessageButtons::YesNo)
                .show();
            if confirm != rfd::MessageDialogResult::Yes {
                return;
            }
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv", "txt"])
            .pick_file()
        {
            match crate::io::csv_import::import_csv(&path) {
                Ok((tasks, skipped)) => {
                    let count = tasks.len();
                    self.tasks = tasks;
                    let status = if skipped > 0 {
                        format!("Imported {} tasks ({} rows skipped)", count, skipped)
                    } else {
                        format!("Imported {} tasks", count)
                    };
                    self.save(TASKS_KEY, &status);
                }
                Err(e) => {
                    self.status_message = format!("CSV import failed: {}", e);
                }
            }
        }
    }

    pub fn export_csv(&mut self) {
        if self.tasks.is_empty() {
            self.status_message = "Nothing to export — no tasks".to_string();
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("weekline-tasks.csv")
            .save_file()
        {
            match crate::io::csv_export::export_csv(&self.tasks, &path) {
                Ok(count) => {
                    self.status_message = format!("Exported {} tasks to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        match &self.data_dir {
            Some(dir) => {
                let _ = open::that(dir);
            }
            None => {
                self.status_message = "No data folder available".to_string();
            }
        }
    }
}

impl eframe::App for WeeklineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        // Keep the live timer fresh. One repaint per second is enough.
        if self.time_sheet.running_entry().is_some() {
            self.time_sheet.tick(chrono::Local::now());
            ctx.request_repaint_after(std::time::Duration::from_secs(1));
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                });
            });

        match self.page {
            Page::Timeline => {
                let mut clicked = None;
                let mut add_clicked = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.heading("Timeline");
                        if ui.button("＋ Add Task").clicked() {
                            add_clicked = true;
                        }
                    });
                    ui.add_space(4.0);
                    if self.tasks.is_empty() {
                        ui.label(
                            egui::RichText::new(
                                "No tasks yet. Add your first task to get started.",
                            )
                            .color(ui::theme::TEXT_DIM),
                        );
                    }
                    let action =
                        ui::gantt_chart::show_gantt_chart(&self.tasks, &mut self.window, ui);
                    clicked = action.clicked_task;
                });
                if add_clicked {
                    self.task_form.open_new(self.tasks.len());
                }
                if let Some(id) = clicked {
                    if let Some(task) = self.tasks.iter().find(|t| t.id == id) {
                        self.task_form.open_edit(task);
                    }
                }
            }
            Page::Calendar => {
                let mut changed = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Calendar");
                    ui.add_space(4.0);
                    changed = ui::calendar::show_calendar(&mut self.calendar, &mut self.notes, ui);
                });
                if changed {
                    self.save(NOTES_KEY, "Notes saved");
                }
            }
            Page::TimeTracking => {
                let mut changed = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Time Tracking");
                    ui.add_space(4.0);
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        changed = ui::time_tracker::show_time_tracker(
                            &mut self.tracker,
                            &mut self.time_sheet,
                            ui,
                        );
                    });
                });
                if changed {
                    self.save(ENTRIES_KEY, "Time entries saved");
                }
            }
        }

        // The task dialog floats above whichever page is active.
        if let Some(status) =
            ui::task_form::show_task_form(&mut self.task_form, &mut self.tasks, ctx)
        {
            self.save(TASKS_KEY, &status);
        }
    }
}
