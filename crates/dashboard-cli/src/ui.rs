use dashboard_engine::{CalendarDate, ColumnChart, Highlight, MonthView};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
};

use crate::app::App;
use crate::layout::{CELL_WIDTH, ScreenLayout};

pub fn draw(f: &mut Frame, app: &mut App) {
    let view = app.dashboard.picker_view();
    let layout = ScreenLayout::compute(f.area(), view.open, app.dashboard.charts().len());

    // Input surface
    let input = Paragraph::new(Line::from(vec![
        Span::raw(view.from_label.clone()),
        Span::raw(" - "),
        Span::raw(view.to_label.clone()),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Dashboard"));
    f.render_widget(input, layout.input);

    // Selector panel
    if let Some(panel) = &layout.panel {
        f.render_widget(Paragraph::new("\n\n\n ◀"), panel.left_arrow);
        f.render_widget(Paragraph::new("\n\n\n ▶"), panel.right_arrow);
        for (area, pane) in panel.panes.iter().zip(view.panes.iter()) {
            render_pane(f, *area, pane, app.focus);
        }
    }

    for (area, chart) in layout.charts.iter().zip(app.dashboard.charts()) {
        render_chart(f, *area, chart, app.chart_height);
    }

    let help_text = match &app.status {
        Some(status) => format!("{status} | q: Quit"),
        None if view.open => {
            "Arrows: Move | Space/Enter: Pick | [ ]: Month | Esc: Close | q: Quit".to_string()
        }
        None => "o/Enter: Pick range | q: Quit".to_string(),
    };
    f.render_widget(Paragraph::new(help_text), layout.help);

    app.layout = Some(layout);
}

fn render_pane(f: &mut Frame, area: Rect, pane: &MonthView, focus: CalendarDate) {
    let mut lines = vec![
        Line::from(Span::styled(
            pane.month_label.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(
            pane.weekday_header
                .iter()
                .map(|w| Span::raw(format!("{w:>width$}", width = CELL_WIDTH as usize - 1) + " "))
                .collect::<Vec<_>>(),
        ),
    ];

    for week in pane.weeks() {
        let spans: Vec<Span> = week
            .iter()
            .map(|slot| match slot {
                None => Span::raw(" ".repeat(CELL_WIDTH as usize)),
                Some(cell) => {
                    let mut style = match cell.highlight {
                        Highlight::Start | Highlight::End => {
                            Style::default().bg(Color::Yellow).fg(Color::Black)
                        }
                        Highlight::Between => Style::default().bg(Color::DarkGray),
                        Highlight::None => Style::default(),
                    };
                    if cell.date == focus {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!("{:>3} ", cell.label), style)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let block = Block::default().borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(f: &mut Frame, area: Rect, chart: &ColumnChart, chart_height: u32) {
    let bars: Vec<Bar> = chart
        .columns(chart_height)
        .iter()
        .map(|column| {
            Bar::default()
                .value(u64::from(column.height))
                .text_value(String::new())
        })
        .collect();

    let title = match &chart.spec().link {
        Some(link) => format!("{} ({link})", chart.title()),
        None => chart.title(),
    };

    let widget = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(chart.header()),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(0)
        .max(u64::from(chart_height));
    f.render_widget(widget, area);
}
