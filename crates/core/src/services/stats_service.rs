use crate::datetime::WallClock;
use crate::models::entry::{Entry, EventType};
use crate::models::stats::{
    ActivityFilter, ActivitySeries, ChartSeries, OutcomeStatistics, Overview, TypeDistribution,
};
use crate::models::time_range::{classify_hour, DAY_NAMES, TIME_BUCKETS, TIME_RANGES};
use crate::services::prediction_service::argmax;

/// Single-letter weekday labels used by the compact prediction charts.
const DAY_INITIALS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Unconditional activity statistics: when entries happen, regardless of
/// what preceded them.
pub struct StatsService {
    clock: WallClock,
}

impl StatsService {
    pub fn new(clock: WallClock) -> Self {
        Self { clock }
    }

    /// Entry counts by weekday and hour for the entries matching `filter`.
    pub fn activity(&self, entries: &[Entry], filter: ActivityFilter) -> ActivitySeries {
        let mut daily = [0u32; 7];
        let mut hourly = [0u32; 24];

        for entry in entries.iter().filter(|e| filter.matches(e.event_type)) {
            daily[self.clock.weekday_index(&entry.datetime)] += 1;
            hourly[self.clock.hour(&entry.datetime) as usize] += 1;
        }

        ActivitySeries {
            filter,
            daily,
            hourly,
        }
    }

    pub fn overview(&self, entries: &[Entry]) -> Overview {
        let wins = entries
            .iter()
            .filter(|e| e.event_type == EventType::Win)
            .count();
        Overview {
            total: entries.len(),
            wins,
            losses: entries.len() - wins,
        }
    }

    /// Per-type day and time-bucket counts over each entry's own timestamp.
    pub fn outcome_statistics(&self, entries: &[Entry]) -> OutcomeStatistics {
        let mut by_type = EventType::ALL.map(|event_type| TypeDistribution {
            event_type,
            day: [0; 7],
            time: [0; TIME_BUCKETS],
            busiest_day: None,
        });
        let mut time_of_day = [0u32; TIME_BUCKETS];

        for entry in entries {
            let day = self.clock.weekday_index(&entry.datetime);
            let bucket = classify_hour(self.clock.hour(&entry.datetime)).unwrap_or(0);
            let dist = &mut by_type[entry.event_type.as_index()];
            dist.day[day] += 1;
            dist.time[bucket] += 1;
            time_of_day[bucket] += 1;
        }

        // With an empty journal there is no busiest day at all. A type with no
        // entries of its own still reports Sunday, the first of seven zeros.
        if !entries.is_empty() {
            for dist in &mut by_type {
                dist.busiest_day = argmax(&dist.day).map(|i| DAY_NAMES[i].to_string());
            }
        }

        OutcomeStatistics {
            overview: self.overview(entries),
            by_type,
            time_of_day,
        }
    }

    // ── Chart series ────────────────────────────────────────────────

    pub fn daily_series(&self, activity: &ActivitySeries) -> ChartSeries {
        ChartSeries {
            title: "Events by Day of Week".to_string(),
            labels: short_day_labels(),
            values: activity.daily.to_vec(),
        }
    }

    pub fn hourly_series(&self, activity: &ActivitySeries) -> ChartSeries {
        ChartSeries {
            title: "Events by Hour of Day".to_string(),
            labels: (0..24).map(|h| format!("{h}:00")).collect(),
            values: activity.hourly.to_vec(),
        }
    }

    pub fn type_day_series(&self, dist: &TypeDistribution) -> ChartSeries {
        let title = match dist.event_type {
            EventType::Win => "Wins by Day",
            EventType::Loss => "Losses by Day",
        };
        ChartSeries {
            title: title.to_string(),
            labels: short_day_labels(),
            values: dist.day.to_vec(),
        }
    }

    pub fn time_of_day_series(&self, stats: &OutcomeStatistics) -> ChartSeries {
        time_series("Events by Time of Day", &stats.time_of_day)
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::new(WallClock::System)
    }
}

/// Day series for a prediction card, labelled with weekday initials.
pub fn prediction_day_series(event_type: EventType, day: &[u32; 7]) -> ChartSeries {
    ChartSeries {
        title: format!("Predicted {event_type} Day"),
        labels: DAY_INITIALS.iter().map(|d| d.to_string()).collect(),
        values: day.to_vec(),
    }
}

/// Time-bucket series for a prediction card.
pub fn prediction_time_series(event_type: EventType, time: &[u32; TIME_BUCKETS]) -> ChartSeries {
    time_series(&format!("Predicted {event_type} Time"), time)
}

fn time_series(title: &str, values: &[u32; TIME_BUCKETS]) -> ChartSeries {
    ChartSeries {
        title: title.to_string(),
        labels: TIME_RANGES.iter().map(|r| r.name.to_string()).collect(),
        values: values.to_vec(),
    }
}

fn short_day_labels() -> Vec<String> {
    DAY_NAMES.iter().map(|d| d[..3].to_string()).collect()
}
