use dashboard_engine::{CalendarDate, Direction, MonthView};
use ratatui::layout::{Constraint, Layout, Position, Rect};

/// Width of one day column inside a pane
pub const CELL_WIDTH: u16 = 4;
/// Seven day columns plus the pane border
pub const PANE_WIDTH: u16 = 7 * CELL_WIDTH + 2;
/// Border, month label, weekday header and up to six weeks
pub const PANE_HEIGHT: u16 = 2 + 2 + 6;
const ARROW_WIDTH: u16 = 3;

/// Screen regions of the open picker panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelLayout {
    pub area: Rect,
    pub left_arrow: Rect,
    pub right_arrow: Rect,
    pub panes: [Rect; 2],
}

/// Where everything was drawn on the last frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub input: Rect,
    pub panel: Option<PanelLayout>,
    pub charts: Vec<Rect>,
    pub help: Rect,
}

/// What a mouse click landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Input,
    Arrow(Direction),
    Cell(CalendarDate),
    /// Inside the panel but not on anything clickable
    Panel,
    Outside,
}

impl ScreenLayout {
    pub fn compute(area: Rect, open: bool, chart_count: usize) -> Self {
        let (input, panel, body, help) = if open {
            let [input, panel, body, help] = Layout::vertical([
                Constraint::Length(3),
                Constraint::Length(PANE_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);
            (input, Some(PanelLayout::compute(panel)), body, help)
        } else {
            let [input, body, help] = Layout::vertical([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .areas(area);
            (input, None, body, help)
        };

        let charts = if chart_count == 0 {
            Vec::new()
        } else {
            Layout::horizontal(vec![Constraint::Ratio(1, chart_count as u32); chart_count])
                .split(body)
                .to_vec()
        };

        Self {
            input,
            panel,
            charts,
            help,
        }
    }

    /// Resolve a click position against the layout and the panes it shows
    pub fn hit(&self, x: u16, y: u16, panes: &[MonthView; 2]) -> Hit {
        let pos = Position::new(x, y);
        if self.input.contains(pos) {
            return Hit::Input;
        }
        let Some(panel) = &self.panel else {
            return Hit::Outside;
        };
        if panel.left_arrow.contains(pos) {
            return Hit::Arrow(Direction::Left);
        }
        if panel.right_arrow.contains(pos) {
            return Hit::Arrow(Direction::Right);
        }
        for (rect, view) in panel.panes.iter().zip(panes.iter()) {
            if rect.contains(pos) {
                return cell_at(*rect, pos, view).map_or(Hit::Panel, Hit::Cell);
            }
        }
        if panel.area.contains(pos) {
            Hit::Panel
        } else {
            Hit::Outside
        }
    }
}

impl PanelLayout {
    fn compute(area: Rect) -> Self {
        let [left_arrow, left, right, right_arrow, _] = Layout::horizontal([
            Constraint::Length(ARROW_WIDTH),
            Constraint::Length(PANE_WIDTH),
            Constraint::Length(PANE_WIDTH),
            Constraint::Length(ARROW_WIDTH),
            Constraint::Min(0),
        ])
        .areas(area);

        // Clicks between the outer edges count as inside the panel
        let used = Rect {
            width: right_arrow.right().saturating_sub(area.x),
            ..area
        };

        Self {
            area: used,
            left_arrow,
            right_arrow,
            panes: [left, right],
        }
    }
}

fn cell_at(pane: Rect, pos: Position, view: &MonthView) -> Option<CalendarDate> {
    // Skip the border, month label and weekday header rows
    let grid_top = pane.y + 3;
    let grid_left = pane.x + 1;
    if pos.y < grid_top || pos.x < grid_left {
        return None;
    }
    let week = (pos.y - grid_top) as usize;
    let column = ((pos.x - grid_left) / CELL_WIDTH) as usize;
    if column >= 7 {
        return None;
    }
    view.weeks()
        .get(week)
        .and_then(|days| days[column])
        .map(|cell| cell.date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_engine::{CalendarLabels, DateRange};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn april_may() -> [MonthView; 2] {
        let range = DateRange::new(date(2020, 4, 15), date(2020, 5, 15));
        let labels = CalendarLabels::default();
        [
            MonthView::build(date(2020, 4, 1), &range, None, &labels),
            MonthView::build(date(2020, 5, 1), &range, None, &labels),
        ]
    }

    #[test]
    fn test_closed_layout_has_no_panel() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40), false, 3);
        assert_eq!(layout.input, Rect::new(0, 0, 100, 3));
        assert!(layout.panel.is_none());
        assert_eq!(layout.charts.len(), 3);
        assert_eq!(layout.help, Rect::new(0, 39, 100, 1));
    }

    #[test]
    fn test_open_layout_places_panes_side_by_side() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40), true, 2);
        let panel = layout.panel.unwrap();

        assert_eq!(panel.left_arrow, Rect::new(0, 3, 3, PANE_HEIGHT));
        assert_eq!(panel.panes[0], Rect::new(3, 3, PANE_WIDTH, PANE_HEIGHT));
        assert_eq!(panel.panes[1], Rect::new(33, 3, PANE_WIDTH, PANE_HEIGHT));
        assert_eq!(panel.right_arrow, Rect::new(63, 3, 3, PANE_HEIGHT));
        assert_eq!(panel.area.width, 66);
    }

    #[test]
    fn test_hit_regions() {
        let panes = april_may();
        let closed = ScreenLayout::compute(Rect::new(0, 0, 100, 40), false, 1);
        assert_eq!(closed.hit(5, 1, &panes), Hit::Input);
        assert_eq!(closed.hit(5, 20, &panes), Hit::Outside);

        let open = ScreenLayout::compute(Rect::new(0, 0, 100, 40), true, 1);
        assert_eq!(open.hit(1, 6, &panes), Hit::Arrow(Direction::Left));
        assert_eq!(open.hit(64, 6, &panes), Hit::Arrow(Direction::Right));
        assert_eq!(open.hit(80, 6, &panes), Hit::Outside);
        assert_eq!(open.hit(10, 30, &panes), Hit::Outside);
        // Month label row
        assert_eq!(open.hit(10, 4, &panes), Hit::Panel);
    }

    #[test]
    fn test_hit_resolves_day_cells() {
        let panes = april_may();
        let open = ScreenLayout::compute(Rect::new(0, 0, 100, 40), true, 1);

        // Left pane grid starts at x = 4, y = 6; April 1st 2020 is a Wednesday
        assert_eq!(open.hit(4 + 2 * 4, 6, &panes), Hit::Cell(date(2020, 4, 1)));
        assert_eq!(open.hit(4 + 2 * 4 + 3, 6, &panes), Hit::Cell(date(2020, 4, 1)));
        // Padding before the 1st
        assert_eq!(open.hit(4, 6, &panes), Hit::Panel);
        // Second week, Monday
        assert_eq!(open.hit(4, 7, &panes), Hit::Cell(date(2020, 4, 6)));
        // Right pane: May 1st 2020 is a Friday
        assert_eq!(open.hit(34 + 4 * 4, 6, &panes), Hit::Cell(date(2020, 5, 1)));
        // Below April's last week
        assert_eq!(open.hit(4, 11, &panes), Hit::Panel);
    }
}
