//! Date arithmetic and month grid generation.
//!
//! Everything in here is pure: month grids are computed from a cursor month,
//! the committed [`DateRange`] and an optional in-progress anchor, and are
//! never patched in place.

pub mod date;
pub mod month;

pub use date::{
    CalendarDate, DateRange, compare, days_in_month, is_leap_year, normalize_order,
    weekday_of_first,
};
pub use month::{
    CalendarCell, CalendarLabels, Highlight, MonthView, classify, format_month, generate_month,
};
