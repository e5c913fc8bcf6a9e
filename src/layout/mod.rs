//! Pure timeline layout: window state in, geometry out.
//!
//! Everything here is a total function over plain in-memory data. The
//! painting code consumes the records produced here and never does its own
//! date arithmetic; recomputation happens in full on every change of the
//! task list or window.

pub mod bars;
pub mod edges;
pub mod grid;

pub use bars::{layout_bars, TaskBarGeometry};
pub use edges::{layout_edges, DependencyEdge};
pub use grid::{columns_for, TimelineColumn};

/// Width of one day column, in pixels.
pub const COLUMN_WIDTH: f32 = 64.0;
/// Height of one task row, in pixels.
pub const ROW_HEIGHT: f32 = 48.0;
/// Vertical inset of a bar within its row.
pub const BAR_INSET: f32 = 2.0;
