use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use dashboard_config::{ChartConfig, Config};
use dashboard_engine::{
    CalendarDate, CalendarLabels, ChartSpec, ColumnChart, Dashboard, DateRange,
    Direction, PickerInput, RangeSelector, SyntheticSource, ValueFormat,
};

use crate::layout::{Hit, ScreenLayout};

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    pub dashboard: Dashboard,
    /// Day the keyboard cursor is on while the picker is open
    pub focus: CalendarDate,
    pub chart_height: u32,
    /// Last error shown in the help line
    pub status: Option<String>,
    /// Regions from the most recent frame, used for mouse hit-testing
    pub layout: Option<ScreenLayout>,
}

impl App {
    pub fn new(config: &Config, initial: Option<DateRange>, today: CalendarDate) -> Self {
        let labels = calendar_labels(config);
        let picker = RangeSelector::with_labels(initial, today, labels);
        let focus = picker.range().from();

        let charts = config.charts.iter().map(chart_from_config).collect();
        let source = SyntheticSource::new().with_max_days(config.max_range_days);
        let dashboard = Dashboard::new(picker, charts, Box::new(source));
        let status = dashboard.initial_load_error().map(|e| {
            log::warn!("{e}");
            e.to_string()
        });

        Self {
            dashboard,
            focus,
            chart_height: config.chart_height,
            status,
            layout: None,
        }
    }

    pub fn on_key(&mut self, code: KeyCode) -> Control {
        let open = self.dashboard.picker().is_open();
        match code {
            KeyCode::Char('q') => return Control::Quit,
            KeyCode::Char('o') if !open => {
                self.dispatch(PickerInput::InputSurfaceClicked);
                self.focus_on_visible();
            }
            KeyCode::Esc => self.dispatch(PickerInput::OutsideInteraction),
            KeyCode::Char(' ') | KeyCode::Enter if open => {
                self.dispatch(PickerInput::CellClicked(self.focus));
            }
            KeyCode::Enter => {
                self.dispatch(PickerInput::InputSurfaceClicked);
                self.focus_on_visible();
            }
            KeyCode::Char('[') if open => self.navigate(Direction::Left),
            KeyCode::Char(']') if open => self.navigate(Direction::Right),
            KeyCode::Left if open => self.move_focus(-1),
            KeyCode::Right if open => self.move_focus(1),
            KeyCode::Up if open => self.move_focus(-7),
            KeyCode::Down if open => self.move_focus(7),
            _ => {}
        }
        Control::Continue
    }

    pub fn on_mouse(&mut self, event: MouseEvent) {
        if event.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(layout) = &self.layout else {
            return;
        };
        let hit = layout.hit(event.column, event.row, self.dashboard.picker().panes());
        log::debug!("click at {},{} hit {hit:?}", event.column, event.row);

        match hit {
            Hit::Input => {
                self.dispatch(PickerInput::InputSurfaceClicked);
                self.focus_on_visible();
            }
            Hit::Arrow(direction) => self.navigate(direction),
            Hit::Cell(date) => {
                self.focus = date;
                self.dispatch(PickerInput::CellClicked(date));
            }
            Hit::Panel => {}
            Hit::Outside => self.dispatch(PickerInput::OutsideInteraction),
        }
    }

    fn dispatch(&mut self, input: PickerInput) {
        match self.dashboard.dispatch(input) {
            Ok(Some(range)) => self.status = Some(format!("Selected {range}")),
            Ok(None) => {}
            Err(e) => {
                log::warn!("{e}");
                self.status = Some(e.to_string());
            }
        }
    }

    fn navigate(&mut self, direction: Direction) {
        self.dispatch(PickerInput::NavClicked(direction));
        self.focus = self.focus.add_months(direction.delta());
        self.focus_on_visible();
    }

    /// Move the keyboard cursor, paging the panes when it leaves them
    fn move_focus(&mut self, days: i64) {
        self.focus = self.focus.add_days(days);
        let direction = if days < 0 {
            Direction::Left
        } else {
            Direction::Right
        };
        // A week step can cross at most one month boundary
        for _ in 0..2 {
            if self.dashboard.picker().cursor().is_visible(self.focus) {
                break;
            }
            self.dispatch(PickerInput::NavClicked(direction));
        }
    }

    fn focus_on_visible(&mut self) {
        let cursor = self.dashboard.picker().cursor();
        if !cursor.is_visible(self.focus) {
            let range = self.dashboard.picker().range();
            self.focus = if cursor.is_visible(range.from()) {
                range.from()
            } else {
                cursor.left()
            };
        }
    }
}

fn calendar_labels(config: &Config) -> CalendarLabels {
    let mut labels = CalendarLabels::default();
    // Config::validate guarantees the counts; partial lists keep defaults
    for (slot, name) in labels.months.iter_mut().zip(&config.labels.months) {
        slot.clone_from(name);
    }
    for (slot, name) in labels.weekdays.iter_mut().zip(&config.labels.weekdays) {
        slot.clone_from(name);
    }
    labels
}

fn chart_from_config(chart: &ChartConfig) -> ColumnChart {
    let mut spec = ChartSpec::new(&chart.label);
    if let Some(link) = &chart.link {
        spec = spec.with_link(link);
    }
    if let Some(symbol) = &chart.currency {
        spec = spec.with_format(ValueFormat::Currency {
            symbol: symbol.clone(),
        });
    }
    ColumnChart::new(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use ratatui::layout::Rect;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    fn app() -> App {
        App::new(&Config::default(), None, date(2020, 5, 15))
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.layout = Some(ScreenLayout::compute(
            Rect::new(0, 0, 100, 40),
            app.dashboard.picker().is_open(),
            app.dashboard.charts().len(),
        ));
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    #[test]
    fn test_app_builds_charts_from_config() {
        let app = app();
        let labels: Vec<&str> = app.dashboard.charts().iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["orders", "sales", "customers"]);
        assert_eq!(app.dashboard.charts()[1].header().chars().next(), Some('$'));
        assert_eq!(app.focus, date(2020, 4, 15));
    }

    #[test]
    fn test_keyboard_selection() {
        let mut app = app();
        app.on_key(KeyCode::Char('o'));
        assert!(app.dashboard.picker().is_open());

        app.on_key(KeyCode::Left);
        app.on_key(KeyCode::Char(' '));
        app.on_key(KeyCode::Down);
        app.on_key(KeyCode::Enter);

        let range = app.dashboard.picker().range();
        assert_eq!(range, DateRange::new(date(2020, 4, 14), date(2020, 4, 21)));
        assert!(!app.dashboard.picker().is_open());
        assert_eq!(
            app.status.as_deref(),
            Some("Selected 2020-04-14 - 2020-04-21")
        );
    }

    #[test]
    fn test_focus_leaving_panes_navigates() {
        let mut app = app();
        app.on_key(KeyCode::Char('o'));
        for _ in 0..7 {
            app.on_key(KeyCode::Down);
        }
        // 2020-04-15 + 49 days
        assert_eq!(app.focus, date(2020, 6, 3));
        assert!(app.dashboard.picker().cursor().is_visible(app.focus));
        assert_eq!(app.dashboard.picker().cursor().left(), date(2020, 5, 1));
    }

    #[test]
    fn test_bracket_keys_page_months() {
        let mut app = app();
        app.on_key(KeyCode::Char('o'));
        app.on_key(KeyCode::Char('['));
        assert_eq!(app.dashboard.picker().cursor().left(), date(2020, 3, 1));
        assert_eq!(app.focus, date(2020, 3, 15));
        assert!(app.dashboard.picker().is_open());
    }

    #[test]
    fn test_escape_closes() {
        let mut app = app();
        app.on_key(KeyCode::Char('o'));
        app.on_key(KeyCode::Esc);
        assert!(!app.dashboard.picker().is_open());
        assert_eq!(app.on_key(KeyCode::Char('q')), Control::Quit);
    }

    #[test]
    fn test_mouse_selection_and_outside_click() {
        let mut app = app();
        click(&mut app, 5, 1);
        assert!(app.dashboard.picker().is_open());

        // April 1st and May 1st cells on the default layout
        click(&mut app, 12, 6);
        click(&mut app, 50, 6);
        assert_eq!(
            app.dashboard.picker().range(),
            DateRange::new(date(2020, 4, 1), date(2020, 5, 1))
        );
        assert!(!app.dashboard.picker().is_open());

        click(&mut app, 5, 1);
        click(&mut app, 90, 30);
        assert!(!app.dashboard.picker().is_open());
    }

    #[test]
    fn test_mouse_arrow_navigates() {
        let mut app = app();
        click(&mut app, 5, 1);
        click(&mut app, 64, 6);
        assert_eq!(app.dashboard.picker().cursor().left(), date(2020, 5, 1));
        assert!(app.dashboard.picker().is_open());
    }

    #[test]
    fn test_custom_labels_reach_the_panes() {
        let mut config = Config::default();
        config.labels.months[3] = "Avril".to_string();
        let app = App::new(&config, None, date(2020, 5, 15));
        assert_eq!(app.dashboard.picker().panes()[0].month_label, "Avril 2020");
    }

    #[test]
    fn test_over_long_initial_range_opens_with_status() {
        let initial = DateRange::new(date(2019, 1, 1), date(2020, 5, 15));
        let mut app = App::new(&Config::default(), Some(initial), date(2020, 5, 15));

        assert_eq!(app.dashboard.picker().range(), initial);
        let status = app.status.clone().unwrap_or_default();
        assert!(status.starts_with("Failed to load orders"), "{status}");

        // Picking a shorter range recovers
        app.on_key(KeyCode::Char('o'));
        app.on_key(KeyCode::Char(' '));
        app.on_key(KeyCode::Down);
        app.on_key(KeyCode::Enter);
        assert!(app.dashboard.charts().iter().all(|c| c.range().is_some()));
        assert_eq!(
            app.status.as_deref(),
            Some("Selected 2019-01-01 - 2019-01-08")
        );
    }
}
