//! Seams to the external renderer.
//!
//! The core never touches concrete UI elements. It hands display-ready values
//! to a [`StatisticsView`] and tracks the chart instances the view creates in a
//! [`RenderContext`] owned by the caller.

use std::collections::BTreeMap;

use crate::models::entry::EventType;
use crate::models::prediction::{TimelinePrediction, TypePrediction};
use crate::models::stats::{ActivitySeries, ChartSeries, OutcomeStatistics};

/// A live chart instance owned by the external renderer.
pub trait ChartHandle {
    /// Release the chart. Called exactly once, before the handle is dropped.
    fn destroy(&mut self);
}

/// Where a chart is mounted. Each slot holds at most one chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChartSlot {
    Daily,
    Hourly,
    TypeDay(EventType),
    TimeOfDay,
    PredictedDay(EventType),
    PredictedTime(EventType),
}

/// Chart instances currently on screen, keyed by slot.
///
/// Mounting into an occupied slot destroys the previous chart first.
/// Dropping the context destroys everything still mounted.
pub struct RenderContext<H: ChartHandle> {
    charts: BTreeMap<ChartSlot, H>,
}

impl<H: ChartHandle> RenderContext<H> {
    pub fn new() -> Self {
        Self {
            charts: BTreeMap::new(),
        }
    }

    pub fn mount(&mut self, slot: ChartSlot, chart: H) {
        if let Some(mut previous) = self.charts.insert(slot, chart) {
            previous.destroy();
        }
    }

    /// Destroy the chart in `slot`, if any. Returns whether one was mounted.
    pub fn unmount(&mut self, slot: ChartSlot) -> bool {
        match self.charts.remove(&slot) {
            Some(mut chart) => {
                chart.destroy();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        for (_, mut chart) in std::mem::take(&mut self.charts) {
            chart.destroy();
        }
    }

    pub fn is_mounted(&self, slot: ChartSlot) -> bool {
        self.charts.contains_key(&slot)
    }

    pub fn get(&self, slot: ChartSlot) -> Option<&H> {
        self.charts.get(&slot)
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }
}

impl<H: ChartHandle> Default for RenderContext<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: ChartHandle> Drop for RenderContext<H> {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Render targets for computed statistics.
///
/// Only the three prediction methods are required; the rest are optional hooks.
pub trait StatisticsView {
    type Chart: ChartHandle;

    /// Probability of the next entry's type given the current state.
    /// `prediction` is `None` when the current state has no recorded transitions.
    fn render_type_prediction(&mut self, info: &str, prediction: Option<&TypePrediction>);

    /// Most likely day and time for the next entry of one type.
    /// Check [`TimelinePrediction::has_data`] before showing percentages.
    fn render_timeline_prediction(&mut self, prediction: &TimelinePrediction);

    /// Neutral state shown while there are fewer than two entries.
    fn render_insufficient_data(&mut self, message: &str);

    fn render_outcome_statistics(&mut self, _stats: &OutcomeStatistics) {}

    fn render_activity(&mut self, _activity: &ActivitySeries) {}

    /// Create a chart for `series`. Returning `None` leaves the slot empty.
    fn draw_chart(&mut self, _slot: ChartSlot, _series: &ChartSeries) -> Option<Self::Chart> {
        None
    }
}
