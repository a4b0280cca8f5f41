use crate::calendar::date::{CalendarDate, DateRange, days_in_month, weekday_of_first};

/// How a day cell relates to the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highlight {
    None,
    /// First endpoint of the range, or the in-progress anchor
    Start,
    /// Last endpoint of the range
    End,
    /// Strictly inside the range
    Between,
}

/// One day of a month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: CalendarDate,
    /// Day-of-month shown on the cell
    pub label: u32,
    pub highlight: Highlight,
    /// Only the day-1 cell is set; it carries the month's weekday offset
    pub is_first_of_month: bool,
}

/// Classify a single day against the range and any in-progress anchor.
///
/// Precedence: pending anchor, range start, range end, interior, none.
pub fn classify(day: CalendarDate, range: &DateRange, pending: Option<CalendarDate>) -> Highlight {
    if pending == Some(day) || day == range.from() {
        Highlight::Start
    } else if day == range.to() {
        Highlight::End
    } else if range.from() < day && day < range.to() {
        Highlight::Between
    } else {
        Highlight::None
    }
}

/// Produce every day cell of the month containing `anchor_month`.
///
/// The day component of `anchor_month` is ignored. Output is always rebuilt
/// from scratch so no stale highlight can survive a state change.
pub fn generate_month(
    anchor_month: CalendarDate,
    range: &DateRange,
    pending: Option<CalendarDate>,
) -> Vec<CalendarCell> {
    let first = anchor_month.first_of_month();
    let (year, month) = (first.year(), first.month());

    (1..=days_in_month(year, month))
        .filter_map(|day| CalendarDate::new(year, month, day))
        .map(|date| CalendarCell {
            date,
            label: date.day(),
            highlight: classify(date, range, pending),
            is_first_of_month: date.day() == 1,
        })
        .collect()
}

/// Month names and weekday headers used when building a [`MonthView`]
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarLabels {
    /// January first
    pub months: [String; 12],
    /// Monday first
    pub weekdays: [String; 7],
}

impl Default for CalendarLabels {
    fn default() -> Self {
        let months = [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ]
        .map(String::from);
        let weekdays = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].map(String::from);
        Self { months, weekdays }
    }
}

impl CalendarLabels {
    pub fn month_name(&self, month: u32) -> &str {
        self.months
            .get(month.saturating_sub(1) as usize)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Everything a visual layer needs to draw one pane
#[derive(Debug, Clone, PartialEq)]
pub struct MonthView {
    /// First day of the month shown
    pub month: CalendarDate,
    pub month_label: String,
    pub weekday_header: [String; 7],
    /// Weekday of day 1, Monday = 1; the grid leaves `first_weekday - 1` blanks
    pub first_weekday: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthView {
    pub fn build(
        anchor_month: CalendarDate,
        range: &DateRange,
        pending: Option<CalendarDate>,
        labels: &CalendarLabels,
    ) -> Self {
        let month = anchor_month.first_of_month();
        Self {
            month,
            month_label: format!("{} {}", labels.month_name(month.month()), month.year()),
            weekday_header: labels.weekdays.clone(),
            first_weekday: weekday_of_first(month.year(), month.month()),
            cells: generate_month(month, range, pending),
        }
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        date.year() == self.month.year() && date.month() == self.month.month()
    }

    /// Cells split into Monday-first weeks, `None` for padding slots
    pub fn weeks(&self) -> Vec<[Option<&CalendarCell>; 7]> {
        let mut weeks = Vec::new();
        let mut week: [Option<&CalendarCell>; 7] = [None; 7];
        let mut slot = self.first_weekday.saturating_sub(1) as usize;

        for cell in &self.cells {
            week[slot] = Some(cell);
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }
        weeks
    }
}

/// Render a pane as plain text, one week per line.
///
/// Markers: `[d]` start, `<d>` end, `d*` for days in between.
pub fn format_month(view: &MonthView) -> String {
    use std::fmt::Write;

    let mut out = String::new();
    let _ = writeln!(out, "{}", view.month_label);
    let header: Vec<String> = view
        .weekday_header
        .iter()
        .map(|w| format!("{w:>4}"))
        .collect();
    let _ = writeln!(out, "{}", header.concat().trim_end());

    for week in view.weeks() {
        let line: String = week
            .iter()
            .map(|slot| match slot {
                None => "    ".to_string(),
                Some(cell) => match cell.highlight {
                    Highlight::Start => format!("[{:>2}]", cell.label),
                    Highlight::End => format!("<{:>2}>", cell.label),
                    Highlight::Between => format!(" {:>2}*", cell.label),
                    Highlight::None => format!(" {:>2} ", cell.label),
                },
            })
            .collect();
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}
