use crate::calendar::{CalendarDate, DateRange};

/// Progress through the two-click selection protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    /// One endpoint picked, the next click completes the range
    PendingEnd(CalendarDate),
}

impl SelectionState {
    /// The in-progress endpoint, if any
    pub fn pending_anchor(&self) -> Option<CalendarDate> {
        match self {
            SelectionState::Idle => None,
            SelectionState::PendingEnd(anchor) => Some(*anchor),
        }
    }

    /// Feed a clicked date through the protocol.
    ///
    /// Returns the finalized range on the second click. Clicking the same
    /// date twice yields a one-day range.
    pub fn on_cell_click(&mut self, clicked: CalendarDate) -> Option<DateRange> {
        match *self {
            SelectionState::Idle => {
                *self = SelectionState::PendingEnd(clicked);
                None
            }
            SelectionState::PendingEnd(anchor) => {
                *self = SelectionState::Idle;
                Some(DateRange::new(anchor, clicked))
            }
        }
    }

    /// Forget any pending anchor. Returns whether one was dropped.
    pub fn cancel(&mut self) -> bool {
        let was_pending = matches!(self, SelectionState::PendingEnd(_));
        *self = SelectionState::Idle;
        was_pending
    }
}
