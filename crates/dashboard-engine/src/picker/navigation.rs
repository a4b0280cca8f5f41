use crate::calendar::CalendarDate;

/// Which way a pane navigation arrow points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// First day of the month shown in the left pane; the right pane shows the
/// month after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationCursor {
    month: CalendarDate,
}

impl NavigationCursor {
    /// Cursor on the month containing `date`, day forced to 1
    pub fn new(date: CalendarDate) -> Self {
        Self {
            month: date.first_of_month(),
        }
    }

    pub fn left(&self) -> CalendarDate {
        self.month
    }

    pub fn right(&self) -> CalendarDate {
        self.month.add_months(1)
    }

    /// Move by whole months, carrying the year over. There is no lower or
    /// upper bound.
    pub fn shift_month(&mut self, delta: i32) {
        self.month = self.month.add_months(delta);
    }

    /// Whether `date` falls into either visible pane
    pub fn is_visible(&self, date: CalendarDate) -> bool {
        let month = date.first_of_month();
        month == self.left() || month == self.right()
    }
}
