//! The dual-month range picker: click protocol, pane navigation and the
//! [`RangeSelector`] that ties them together.

pub mod navigation;
pub mod selection;
pub mod selector;

pub use navigation::{Direction, NavigationCursor};
pub use selection::SelectionState;
pub use selector::{PickerEvent, PickerInput, RangeSelector, SelectorView};
