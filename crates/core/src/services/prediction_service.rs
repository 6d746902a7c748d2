use crate::models::entry::EventType;
use crate::models::prediction::{
    Analysis, MarkovAnalysis, ModeSelection, Prediction, PredictionReport, TimelineHistogram,
    TimelinePrediction, TransitionRow, TypePrediction,
};
use crate::models::time_range::{DAY_NAMES, TIME_RANGES};

/// Shown while the journal has fewer than two entries.
pub const INSUFFICIENT_DATA_MESSAGE: &str =
    "Add at least 2 entries to see Markov chain predictions.";

/// Turns raw transition counts into display-ready percentages and modes.
///
/// Stateless: the same analysis always yields the same prediction.
pub struct PredictionService;

impl PredictionService {
    pub fn new() -> Self {
        Self
    }

    pub fn predict(&self, analysis: &Analysis) -> Prediction {
        match analysis {
            Analysis::InsufficientData { .. } => Prediction::InsufficientData {
                message: INSUFFICIENT_DATA_MESSAGE.to_string(),
            },
            Analysis::Ready(markov) => Prediction::Ready(self.report(markov)),
        }
    }

    pub fn report(&self, analysis: &MarkovAnalysis) -> PredictionReport {
        PredictionReport {
            last_type: analysis.last_type,
            info: format!(
                "Based on the last entry (a {}), here are the predicted probabilities for the next event:",
                analysis.last_type
            ),
            next_type: self.type_prediction(&analysis.last_row()),
            timelines: EventType::ALL.map(|t| self.timeline_prediction(t, analysis.timeline(t))),
        }
    }

    /// Probability that the next entry is a win or a loss, given `row`.
    /// `None` when the row has no transitions.
    pub fn type_prediction(&self, row: &TransitionRow) -> Option<TypePrediction> {
        let win_pct = percent(row.to_win, row.total)?;
        Some(TypePrediction {
            given: row.from,
            win_pct,
            // Derived from the rounded win share so the pair always sums to 100.
            loss_pct: 100 - win_pct,
        })
    }

    pub fn timeline_prediction(
        &self,
        event_type: EventType,
        histogram: &TimelineHistogram,
    ) -> TimelinePrediction {
        TimelinePrediction {
            event_type,
            histogram: *histogram,
            most_likely_day: mode(&histogram.day, histogram.total, |i| DAY_NAMES[i]),
            most_likely_time: mode(&histogram.time, histogram.total, |i| TIME_RANGES[i].name),
        }
    }
}

impl Default for PredictionService {
    fn default() -> Self {
        Self::new()
    }
}

/// `count / total` as a whole percentage, rounded half up. `None` if `total` is 0.
pub fn percent(count: u32, total: u32) -> Option<u32> {
    if total == 0 {
        return None;
    }
    let (count, total) = (u64::from(count), u64::from(total));
    Some(((count * 200 + total) / (total * 2)) as u32)
}

/// Index of the largest value; the first one wins on ties.
pub fn argmax(values: &[u32]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

fn mode(
    values: &[u32],
    total: u32,
    label: impl Fn(usize) -> &'static str,
) -> Option<ModeSelection> {
    let index = argmax(values)?;
    let percent = percent(values[index], total)?;
    Some(ModeSelection {
        index,
        label: label(index).to_string(),
        percent,
    })
}
