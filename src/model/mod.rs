pub mod entry;
pub mod note;
pub mod task;
pub mod window;

pub use entry::{TimeEntry, TimeSheet};
pub use note::{CalendarNote, NoteBook};
pub use task::Task;
pub use window::DateRangeWindow;
