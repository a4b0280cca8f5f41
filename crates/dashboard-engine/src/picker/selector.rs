use crate::calendar::{CalendarDate, CalendarLabels, DateRange, MonthView};
use crate::picker::navigation::{Direction, NavigationCursor};
use crate::picker::selection::SelectionState;

/// Interaction events delivered by whatever draws the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerInput {
    CellClicked(CalendarDate),
    NavClicked(Direction),
    /// The closed input field showing the current range was clicked
    InputSurfaceClicked,
    /// Any interaction that did not target the picker's own surface
    OutsideInteraction,
}

/// Notifications produced for observers of the picker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    /// A finalized, ordered range with inclusive bounds
    RangeSelected(DateRange),
}

/// Read-only projection of the picker for the visual layer
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorView<'a> {
    pub open: bool,
    pub range: DateRange,
    pub pending: Option<CalendarDate>,
    pub from_label: String,
    pub to_label: String,
    pub panes: &'a [MonthView; 2],
}

/// Dual-month date range picker.
///
/// Owns the committed range, the click protocol state and the navigation
/// cursor. Every mutation rebuilds both panes from that state; observers pick
/// up [`PickerEvent`]s through [`RangeSelector::take_events`].
///
/// Hosts must drain [`RangeSelector::take_events`] after each input. The
/// queue is not bounded and keeps every undrained event.
#[derive(Debug, Clone)]
pub struct RangeSelector {
    range: DateRange,
    selection: SelectionState,
    cursor: NavigationCursor,
    open: bool,
    labels: CalendarLabels,
    panes: [MonthView; 2],
    events: Vec<PickerEvent>,
}

impl RangeSelector {
    /// Create a picker, defaulting to the month ending `today`.
    ///
    /// The initial range is queued as a `RangeSelected` event so consumers
    /// get a range without waiting for a click.
    pub fn new(initial: Option<DateRange>, today: CalendarDate) -> Self {
        Self::with_labels(initial, today, CalendarLabels::default())
    }

    /// Same as [`RangeSelector::new`] using the local calendar date
    pub fn starting_today(initial: Option<DateRange>) -> Self {
        Self::new(initial, CalendarDate::today())
    }

    pub fn with_labels(
        initial: Option<DateRange>,
        today: CalendarDate,
        labels: CalendarLabels,
    ) -> Self {
        let range = initial.unwrap_or_else(|| DateRange::month_ending(today));
        let cursor = NavigationCursor::new(range.from());
        let panes = build_panes(&cursor, &range, None, &labels);

        log::debug!("range picker created with {range}");

        Self {
            range,
            selection: SelectionState::Idle,
            cursor,
            open: false,
            labels,
            panes,
            events: vec![PickerEvent::RangeSelected(range)],
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn cursor(&self) -> NavigationCursor {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn panes(&self) -> &[MonthView; 2] {
        &self.panes
    }

    pub fn view(&self) -> SelectorView<'_> {
        SelectorView {
            open: self.open,
            range: self.range,
            pending: self.selection.pending_anchor(),
            from_label: self.range.from().to_string(),
            to_label: self.range.to().to_string(),
            panes: &self.panes,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the panel. Any half-finished selection is forgotten.
    pub fn close(&mut self) {
        if self.selection.cancel() {
            log::debug!("pending selection discarded on close");
            self.refresh();
        }
        self.open = false;
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close();
        } else {
            self.open();
        }
    }

    /// Called by the host for interactions it determined to be outside the
    /// picker surface
    pub fn on_outside_interaction(&mut self) {
        if self.open {
            self.close();
        }
    }

    /// Route a click on a day cell through the selection protocol.
    ///
    /// Returns the range when this click finalized one. The panel closes and a
    /// `RangeSelected` event is queued in that case.
    pub fn on_cell_click(&mut self, date: CalendarDate) -> Option<DateRange> {
        debug_assert!(
            self.cursor.is_visible(date),
            "clicked {date} which is not in a visible month"
        );

        let finalized = self.selection.on_cell_click(date);
        match finalized {
            Some(range) => {
                log::info!("range selected: {range}");
                self.range = range;
                self.refresh();
                self.open = false;
                self.events.push(PickerEvent::RangeSelected(range));
            }
            None => {
                log::debug!("selection anchored at {date}");
                self.refresh();
            }
        }
        finalized
    }

    /// Show the previous or next pair of months. The panel stays open.
    pub fn on_navigate(&mut self, direction: Direction) {
        self.cursor.shift_month(direction.delta());
        log::debug!("navigated {direction:?} to {}", self.cursor.left());
        self.refresh();
    }

    /// Apply an input event, returning a range if one was finalized
    pub fn handle(&mut self, input: PickerInput) -> Option<DateRange> {
        match input {
            PickerInput::CellClicked(date) => return self.on_cell_click(date),
            PickerInput::NavClicked(direction) => self.on_navigate(direction),
            PickerInput::InputSurfaceClicked => self.open(),
            PickerInput::OutsideInteraction => self.on_outside_interaction(),
        }
        None
    }

    /// Drain queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<PickerEvent> {
        std::mem::take(&mut self.events)
    }

    fn refresh(&mut self) {
        self.panes = build_panes(
            &self.cursor,
            &self.range,
            self.selection.pending_anchor(),
            &self.labels,
        );
    }
}

fn build_panes(
    cursor: &NavigationCursor,
    range: &DateRange,
    pending: Option<CalendarDate>,
    labels: &CalendarLabels,
) -> [MonthView; 2] {
    [
        MonthView::build(cursor.left(), range, pending, labels),
        MonthView::build(cursor.right(), range, pending, labels),
    ]
}
