//! Date range picker engine for dashboard widgets.
//!
//! - [`calendar`]: date arithmetic and month grids
//! - [`picker`]: the two-click range selector and its pane navigation
//! - [`chart`]: column charts and the metric sources feeding them
//! - [`dashboard`]: a page wiring one picker to many charts

pub mod calendar;
pub mod chart;
pub mod dashboard;
pub mod picker;

// Re-export key types for easier usage
pub use calendar::{CalendarCell, CalendarDate, CalendarLabels, DateRange, Highlight, MonthView};
pub use chart::{ChartSpec, ColumnChart, MetricSource, SourceError, SyntheticSource, ValueFormat};
pub use dashboard::{Dashboard, DashboardError};
pub use picker::{Direction, PickerEvent, PickerInput, RangeSelector, SelectorView};
