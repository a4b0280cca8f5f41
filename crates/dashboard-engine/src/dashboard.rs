//! Page-level composition: one range picker driving a set of charts.

use crate::calendar::DateRange;
use crate::chart::{ColumnChart, MetricSource, SourceError};
use crate::picker::{PickerEvent, PickerInput, RangeSelector, SelectorView};

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Failed to load {metric} for {range}: {source}")]
    ChartLoad {
        metric: String,
        range: DateRange,
        source: SourceError,
    },
}

/// Owns the picker and charts; every finalized range is pushed to every chart.
pub struct Dashboard {
    picker: RangeSelector,
    charts: Vec<ColumnChart>,
    source: Box<dyn MetricSource>,
    initial_load_error: Option<DashboardError>,
}

impl Dashboard {
    /// Assemble the page and deliver the picker's initial range to the charts.
    ///
    /// A chart that cannot load the initial range is left empty; the page is
    /// still built and the failure is kept in [`Dashboard::initial_load_error`].
    pub fn new(
        picker: RangeSelector,
        charts: Vec<ColumnChart>,
        source: Box<dyn MetricSource>,
    ) -> Self {
        let mut dashboard = Self {
            picker,
            charts,
            source,
            initial_load_error: None,
        };
        dashboard.initial_load_error = dashboard.deliver_events().err();
        dashboard
    }

    /// First chart failure while loading the initial range, if any
    pub fn initial_load_error(&self) -> Option<&DashboardError> {
        self.initial_load_error.as_ref()
    }

    pub fn picker(&self) -> &RangeSelector {
        &self.picker
    }

    pub fn picker_view(&self) -> SelectorView<'_> {
        self.picker.view()
    }

    pub fn charts(&self) -> &[ColumnChart] {
        &self.charts
    }

    /// Forward an input to the picker and refresh charts if a range was
    /// finalized. Returns that range.
    ///
    /// Every chart is attempted even if an earlier one fails; the first
    /// failure is reported.
    pub fn dispatch(&mut self, input: PickerInput) -> Result<Option<DateRange>, DashboardError> {
        let selected = self.picker.handle(input);
        self.deliver_events()?;
        Ok(selected)
    }

    fn deliver_events(&mut self) -> Result<(), DashboardError> {
        let mut first_error = None;
        for event in self.picker.take_events() {
            let PickerEvent::RangeSelected(range) = event;
            log::info!("updating {} charts for {range}", self.charts.len());

            for chart in &mut self.charts {
                if let Err(source) = chart.update_date_range(range, self.source.as_ref()) {
                    log::warn!("chart {} failed to load: {source}", chart.label());
                    if first_error.is_none() {
                        first_error = Some(DashboardError::ChartLoad {
                            metric: chart.label().to_string(),
                            range,
                            source,
                        });
                    }
                }
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
