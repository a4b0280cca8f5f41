use chrono::Datelike;

use crate::calendar::{CalendarDate, DateRange};

/// One day's value for a metric
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataPoint {
    pub date: CalendarDate,
    pub value: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),
    #[error("Range {range} spans {days} days, limit is {limit}")]
    RangeTooLong {
        range: DateRange,
        days: u64,
        limit: u64,
    },
    #[error("Metric backend failed: {0}")]
    Backend(String),
}

/// Anything that can produce per-day metric values for an inclusive range
pub trait MetricSource {
    fn load(&self, metric: &str, range: &DateRange) -> Result<Vec<DataPoint>, SourceError>;
}

/// Deterministic stand-in for a metrics backend.
///
/// Produces one point per day with a value in `0..25` derived from the metric
/// name and date, so the same query always returns the same data.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    metrics: Option<Vec<String>>,
    max_days: u64,
}

impl Default for SyntheticSource {
    fn default() -> Self {
        Self {
            metrics: None,
            max_days: Self::DEFAULT_MAX_DAYS,
        }
    }
}

impl SyntheticSource {
    pub const DEFAULT_MAX_DAYS: u64 = 366;

    pub fn new() -> Self {
        Self::default()
    }

    /// Only answer for the given metric names
    pub fn with_metrics<I, S>(mut self, metrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metrics = Some(metrics.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_max_days(mut self, max_days: u64) -> Self {
        self.max_days = max_days;
        self
    }

    fn value_for(metric: &str, date: CalendarDate) -> u64 {
        // FNV-1a over the metric name, then mixed with the day number
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in metric.bytes() {
            hash ^= u64::from(byte);
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        let day = date.as_naive().num_days_from_ce() as u64;
        let mut x = hash ^ day.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        x ^= x >> 33;
        x = x.wrapping_mul(0xff51_afd7_ed55_8ccd);
        x ^= x >> 33;
        x % 25
    }
}

impl MetricSource for SyntheticSource {
    fn load(&self, metric: &str, range: &DateRange) -> Result<Vec<DataPoint>, SourceError> {
        if let Some(metrics) = &self.metrics
            && !metrics.iter().any(|m| m == metric)
        {
            return Err(SourceError::UnknownMetric(metric.to_string()));
        }

        let days = range.len_days();
        if days > self.max_days {
            return Err(SourceError::RangeTooLong {
                range: *range,
                days,
                limit: self.max_days,
            });
        }

        Ok(range
            .days()
            .map(|date| DataPoint {
                date,
                value: Self::value_for(metric, date),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_one_point_per_day_inclusive() {
        let source = SyntheticSource::new();
        let range = DateRange::new(date(2020, 4, 1), date(2020, 4, 9));
        let points = source.load("orders", &range).unwrap();

        assert_eq!(points.len(), 9);
        assert_eq!(points[0].date, date(2020, 4, 1));
        assert_eq!(points[8].date, date(2020, 4, 9));
        assert!(points.iter().all(|p| p.value < 25));
    }

    #[test]
    fn test_values_are_deterministic() {
        let source = SyntheticSource::new();
        let range = DateRange::new(date(2020, 4, 1), date(2020, 4, 30));
        assert_eq!(
            source.load("sales", &range).unwrap(),
            source.load("sales", &range).unwrap()
        );
    }

    #[test]
    fn test_restricted_metrics() {
        let source = SyntheticSource::new().with_metrics(["orders"]);
        let range = DateRange::single(date(2020, 4, 1));

        assert!(source.load("orders", &range).is_ok());
        assert!(matches!(
            source.load("refunds", &range),
            Err(SourceError::UnknownMetric(name)) if name == "refunds"
        ));
    }

    #[test]
    fn test_range_limit() {
        let source = SyntheticSource::new().with_max_days(7);
        let ok = DateRange::new(date(2020, 4, 1), date(2020, 4, 7));
        let too_long = DateRange::new(date(2020, 4, 1), date(2020, 4, 8));

        assert!(source.load("orders", &ok).is_ok());
        let err = source.load("orders", &too_long).unwrap_err();
        assert!(matches!(err, SourceError::RangeTooLong { days: 8, limit: 7, .. }));
        assert_eq!(
            err.to_string(),
            "Range 2020-04-01 - 2020-04-08 spans 8 days, limit is 7"
        );
    }
}
