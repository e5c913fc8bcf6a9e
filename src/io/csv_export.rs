use std::path::Path;

use crate::model::Task;

/// Render a color as `#RRGGBB` for the CSV.
fn color_to_hex(color: egui::Color32) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Serialize tasks to semicolon-delimited CSV matching the import format.
///
/// Columns: Title ; Start ; End ; Progress ; Color ; Dependencies
/// Dates are `YYYY-MM-DD`; dependencies are `|`-joined titles of other
/// tasks in the same list (dangling ids are left out).
pub fn tasks_to_csv(tasks: &[Task]) -> Result<String, String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(Vec::new());

    wtr.write_record(["Title", "Start", "End", "Progress", "Color", "Dependencies"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for task in tasks {
        let deps: Vec<&str> = task
            .dependencies
            .iter()
            .filter_map(|id| tasks.iter().find(|t| t.id == *id))
            .map(|t| t.title.as_str())
            .collect();

        wtr.write_record([
            task.title.as_str(),
            &task.start.format("%Y-%m-%d").to_string(),
            &task.end.format("%Y-%m-%d").to_string(),
            &task.progress.to_string(),
            &color_to_hex(task.color),
            &deps.join("|"),
        ])
        .map_err(|e| format!("Failed to write task '{}': {}", task.title, e))?;
    }

    let bytes = wtr
        .into_inner()
        .map_err(|e| format!("Failed to flush CSV: {}", e))?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

/// Export tasks to a CSV file. Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, String> {
    let csv = tasks_to_csv(tasks)?;
    std::fs::write(path, csv).map_err(|e| format!("Failed to write CSV file: {}", e))?;
    Ok(tasks.len())
}
