//! Column charts fed by a [`MetricSource`] for the currently selected range.

pub mod source;

pub use source::{DataPoint, MetricSource, SourceError, SyntheticSource};

use crate::calendar::{CalendarDate, DateRange};

/// Height in rows that bars are scaled to when no other height is given
pub const DEFAULT_CHART_HEIGHT: u32 = 50;

/// How a chart's total is written in its header
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueFormat {
    #[default]
    Plain,
    /// Prefix with a symbol and group thousands, e.g. `$12,345`
    Currency { symbol: String },
}

impl ValueFormat {
    pub fn format(&self, value: u64) -> String {
        match self {
            ValueFormat::Plain => value.to_string(),
            ValueFormat::Currency { symbol } => format!("{symbol}{}", group_thousands(value)),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Static description of a chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    /// Metric name, also used in the title
    pub label: String,
    pub link: Option<String>,
    pub format: ValueFormat,
}

impl ChartSpec {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            link: None,
            format: ValueFormat::Plain,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }
}

/// A single scaled bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Bar height in `0..=chart_height`
    pub height: u32,
    pub value: u64,
    /// Date the bar stands for
    pub tooltip: CalendarDate,
}

#[derive(Debug, Clone)]
pub struct ColumnChart {
    spec: ChartSpec,
    range: Option<DateRange>,
    data: Vec<DataPoint>,
    value: u64,
}

impl ColumnChart {
    pub fn new(spec: ChartSpec) -> Self {
        Self {
            spec,
            range: None,
            data: Vec::new(),
            value: 0,
        }
    }

    pub fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    pub fn label(&self) -> &str {
        &self.spec.label
    }

    pub fn title(&self) -> String {
        format!("Total {}", self.spec.label)
    }

    /// The range the current data was loaded for
    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    pub fn data(&self) -> &[DataPoint] {
        &self.data
    }

    /// Sum of all loaded values
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn header(&self) -> String {
        self.spec.format.format(self.value)
    }

    /// Reload data for `range`. On failure the previous data stays in place.
    pub fn update_date_range(
        &mut self,
        range: DateRange,
        source: &dyn MetricSource,
    ) -> Result<(), SourceError> {
        let data = source.load(&self.spec.label, &range)?;
        self.value = data.iter().map(|p| p.value).sum();
        self.data = data;
        self.range = Some(range);
        log::debug!(
            "chart {} loaded {} points for {range}",
            self.spec.label,
            self.data.len()
        );
        Ok(())
    }

    /// Bars scaled so the largest value reaches `chart_height`
    pub fn columns(&self, chart_height: u32) -> Vec<Column> {
        let max = self.data.iter().map(|p| p.value).max().unwrap_or(0);
        self.data
            .iter()
            .map(|point| Column {
                height: scale(point.value, max, chart_height),
                value: point.value,
                tooltip: point.date,
            })
            .collect()
    }
}

fn scale(value: u64, max: u64, chart_height: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    (u128::from(value) * u128::from(chart_height) / u128::from(max)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    struct Fixed(Vec<u64>);

    impl MetricSource for Fixed {
        fn load(&self, _metric: &str, range: &DateRange) -> Result<Vec<DataPoint>, SourceError> {
            Ok(range
                .days()
                .zip(self.0.iter())
                .map(|(date, value)| DataPoint {
                    date,
                    value: *value,
                })
                .collect())
        }
    }

    struct Failing;

    impl MetricSource for Failing {
        fn load(&self, _metric: &str, _range: &DateRange) -> Result<Vec<DataPoint>, SourceError> {
            Err(SourceError::Backend("offline".to_string()))
        }
    }

    fn april() -> DateRange {
        DateRange::new(date(2020, 4, 1), date(2020, 4, 4))
    }

    #[test]
    fn test_update_sums_values() {
        let mut chart = ColumnChart::new(ChartSpec::new("orders"));
        chart
            .update_date_range(april(), &Fixed(vec![3, 10, 0, 7]))
            .unwrap();

        assert_eq!(chart.value(), 20);
        assert_eq!(chart.header(), "20");
        assert_eq!(chart.range(), Some(april()));
        assert_eq!(chart.title(), "Total orders");
    }

    #[test]
    fn test_columns_scale_to_height() {
        let mut chart = ColumnChart::new(ChartSpec::new("orders"));
        chart
            .update_date_range(april(), &Fixed(vec![3, 10, 0, 7]))
            .unwrap();

        let heights: Vec<u32> = chart
            .columns(DEFAULT_CHART_HEIGHT)
            .iter()
            .map(|c| c.height)
            .collect();
        assert_eq!(heights, vec![15, 50, 0, 35]);
        assert_eq!(chart.columns(8)[0].height, 2);
        assert_eq!(chart.columns(8)[0].tooltip, date(2020, 4, 1));
    }

    #[test]
    fn test_all_zero_data_has_flat_columns() {
        let mut chart = ColumnChart::new(ChartSpec::new("orders"));
        chart
            .update_date_range(april(), &Fixed(vec![0, 0, 0, 0]))
            .unwrap();
        assert!(chart.columns(50).iter().all(|c| c.height == 0));
        assert!(ColumnChart::new(ChartSpec::new("x")).columns(50).is_empty());
    }

    #[test]
    fn test_failed_load_keeps_previous_data() {
        let mut chart = ColumnChart::new(ChartSpec::new("orders"));
        chart
            .update_date_range(april(), &Fixed(vec![1, 2, 3, 4]))
            .unwrap();

        let later = DateRange::single(date(2020, 5, 1));
        assert!(chart.update_date_range(later, &Failing).is_err());
        assert_eq!(chart.value(), 10);
        assert_eq!(chart.range(), Some(april()));
    }

    #[test]
    fn test_currency_format() {
        let format = ValueFormat::Currency {
            symbol: "$".to_string(),
        };
        assert_eq!(format.format(0), "$0");
        assert_eq!(format.format(999), "$999");
        assert_eq!(format.format(1000), "$1,000");
        assert_eq!(format.format(1234567), "$1,234,567");
        assert_eq!(ValueFormat::Plain.format(1234567), "1234567");
    }

    #[test]
    fn test_spec_builder() {
        let spec = ChartSpec::new("sales")
            .with_link("#sales")
            .with_format(ValueFormat::Currency {
                symbol: "$".to_string(),
            });
        assert_eq!(spec.link.as_deref(), Some("#sales"));
        assert!(matches!(spec.format, ValueFormat::Currency { .. }));
    }
}
