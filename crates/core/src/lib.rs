pub mod datetime;
pub mod errors;
pub mod models;
pub mod services;
pub mod storage;
pub mod view;

use chrono::Utc;
use tracing::info;

use datetime::{export_file_name, format_display, WallClock};
use errors::CoreError;
use models::{
    entry::{Entry, EntryDetails, EventType},
    prediction::{Analysis, Prediction},
    settings::Settings,
    stats::{ActivityFilter, ActivitySeries, ChartSeries, OutcomeStatistics},
};
use services::{
    csv_service::{CsvExport, CsvService, ImportReport},
    entry_service::{EntryDraft, EntryService},
    markov_service::MarkovService,
    prediction_service::PredictionService,
    stats_service::{prediction_day_series, prediction_time_series, StatsService},
};
use storage::{manager::EntryStore, traits::KeyValueStore};
use view::{ChartSlot, RenderContext, StatisticsView};

/// Main entry point for the trade journal core library.
///
/// Owns the entry list, the settings and the store. Every mutation reads the
/// stored list, applies the change to that copy, saves it, and only then
/// replaces the in-memory list: a failed save leaves the journal unchanged.
#[must_use]
pub struct TradeJournal {
    entries: Vec<Entry>,
    settings: Settings,
    clock: WallClock,
    store: EntryStore,
    entry_service: EntryService,
    markov_service: MarkovService,
    prediction_service: PredictionService,
    stats_service: StatsService,
    csv_service: CsvService,
}

impl std::fmt::Debug for TradeJournal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TradeJournal")
            .field("entries", &self.entries.len())
            .field("settings", &self.settings)
            .field("store", &self.store)
            .finish()
    }
}

impl TradeJournal {
    /// Open the journal kept in `store`, loading any saved entries.
    pub async fn open(store: Box<dyn KeyValueStore>, settings: Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let clock = settings.wall_clock()?;
        let store = EntryStore::new(store, settings.storage_key.clone());
        let entries = store.load().await?;

        Ok(Self {
            entries,
            clock,
            store,
            entry_service: EntryService::new(clock),
            markov_service: MarkovService::new(clock),
            prediction_service: PredictionService::new(),
            stats_service: StatsService::new(clock),
            csv_service: CsvService::new(clock, settings.currency_symbol.clone()),
            settings,
        })
    }

    /// Re-read the entry list from the store.
    pub async fn reload(&mut self) -> Result<(), CoreError> {
        self.entries = self.store.load().await?;
        Ok(())
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn clock(&self) -> &WallClock {
        &self.clock
    }

    // ── Entry Management ────────────────────────────────────────────

    /// Validate and add a new entry. Returns its id.
    pub async fn add_entry(&mut self, draft: &EntryDraft) -> Result<String, CoreError> {
        self.entry_service.validate(draft)?;
        self.commit(|service, entries| service.add_entry(entries, draft))
            .await
    }

    /// Replace the entry with `id` by the contents of `draft`.
    pub async fn update_entry(&mut self, id: &str, draft: &EntryDraft) -> Result<(), CoreError> {
        self.entry_service.validate(draft)?;
        self.commit(|service, entries| service.update_entry(entries, id, draft))
            .await
    }

    /// Delete the entry with `id`, returning it.
    pub async fn remove_entry(&mut self, id: &str) -> Result<Entry, CoreError> {
        self.commit(|service, entries| service.remove_entry(entries, id))
            .await
    }

    /// Delete every entry.
    pub async fn clear_entries(&mut self) -> Result<(), CoreError> {
        self.store.save(&[]).await?;
        self.entries.clear();
        info!("journal cleared");
        Ok(())
    }

    #[must_use]
    pub fn get_entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// All entries in stored order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Entries for the log list, most recently added first.
    #[must_use]
    pub fn entries_newest_first(&self) -> Vec<&Entry> {
        self.entry_service.newest_first(&self.entries)
    }

    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn entry_details(&self, id: &str) -> Option<EntryDetails> {
        self.get_entry(id).map(|e| self.entry_service.details(e))
    }

    /// Form contents for editing the entry with `id`.
    #[must_use]
    pub fn edit_draft(&self, id: &str) -> Option<EntryDraft> {
        self.get_entry(id).map(|e| self.entry_service.draft_from(e))
    }

    /// A blank win draft stamped with the current time.
    #[must_use]
    pub fn new_draft(&self) -> EntryDraft {
        EntryDraft::new(
            EventType::Win,
            String::new(),
            format_display(&Utc::now(), &self.clock),
        )
    }

    // ── Analysis ────────────────────────────────────────────────────

    #[must_use]
    pub fn analyze(&self) -> Analysis {
        self.markov_service.analyze(&self.entries)
    }

    #[must_use]
    pub fn predict(&self) -> Prediction {
        self.prediction_service.predict(&self.analyze())
    }

    #[must_use]
    pub fn outcome_statistics(&self) -> OutcomeStatistics {
        self.stats_service.outcome_statistics(&self.entries)
    }

    #[must_use]
    pub fn activity(&self, filter: ActivityFilter) -> ActivitySeries {
        self.stats_service.activity(&self.entries, filter)
    }

    /// Push every statistic to `view`, mounting the charts it draws into `ctx`.
    /// Returns the prediction that was rendered.
    pub fn render<V: StatisticsView>(
        &self,
        view: &mut V,
        ctx: &mut RenderContext<V::Chart>,
        filter: ActivityFilter,
    ) -> Prediction {
        let stats = self.outcome_statistics();
        view.render_outcome_statistics(&stats);
        for dist in &stats.by_type {
            let series = self.stats_service.type_day_series(dist);
            draw(view, ctx, ChartSlot::TypeDay(dist.event_type), &series);
        }
        let series = self.stats_service.time_of_day_series(&stats);
        draw(view, ctx, ChartSlot::TimeOfDay, &series);

        let activity = self.activity(filter);
        view.render_activity(&activity);
        draw(view, ctx, ChartSlot::Daily, &self.stats_service.daily_series(&activity));
        draw(view, ctx, ChartSlot::Hourly, &self.stats_service.hourly_series(&activity));

        let prediction = self.predict();
        match &prediction {
            Prediction::InsufficientData { message } => {
                view.render_insufficient_data(message);
                for t in EventType::ALL {
                    ctx.unmount(ChartSlot::PredictedDay(t));
                    ctx.unmount(ChartSlot::PredictedTime(t));
                }
            }
            Prediction::Ready(report) => {
                view.render_type_prediction(&report.info, report.next_type.as_ref());
                for timeline in &report.timelines {
                    let t = timeline.event_type;
                    view.render_timeline_prediction(timeline);
                    if timeline.has_data() {
                        let day = prediction_day_series(t, &timeline.histogram.day);
                        let time = prediction_time_series(t, &timeline.histogram.time);
                        draw(view, ctx, ChartSlot::PredictedDay(t), &day);
                        draw(view, ctx, ChartSlot::PredictedTime(t), &time);
                    } else {
                        ctx.unmount(ChartSlot::PredictedDay(t));
                        ctx.unmount(ChartSlot::PredictedTime(t));
                    }
                }
            }
        }
        prediction
    }

    // ── Import / Export ─────────────────────────────────────────────

    /// Parse a CSV file and append every valid row.
    ///
    /// Returns the report even when no row was usable; the caller shows
    /// [`ImportReport::summary`]. Nothing is saved if no row was usable.
    pub async fn import_csv(&mut self, csv: &str) -> Result<ImportReport, CoreError> {
        let report = self.csv_service.import(csv)?;
        if report.entries.is_empty() {
            return Ok(report);
        }

        let added = report.entries.clone();
        self.commit(move |_, entries| {
            entries.extend(added);
            Ok(())
        })
        .await?;
        info!(
            imported = report.imported(),
            skipped = report.skipped_count(),
            "CSV import committed"
        );
        Ok(report)
    }

    /// Export every entry as CSV, named after today's date.
    pub fn export_csv(&self) -> Result<CsvExport, CoreError> {
        if self.entries.is_empty() {
            return Err(CoreError::ValidationError(
                "No entries to export. Add some entries first.".into(),
            ));
        }
        let export = CsvExport {
            file_name: export_file_name(&self.settings.export_prefix, Utc::now().date_naive()),
            content: self.csv_service.export(&self.entries),
            count: self.entries.len(),
        };
        info!(count = export.count, file = %export.file_name, "CSV export built");
        Ok(export)
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn commit<T>(
        &mut self,
        apply: impl FnOnce(&EntryService, &mut Vec<Entry>) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let mut entries = self.store.load().await?;
        let result = apply(&self.entry_service, &mut entries)?;
        self.store.save(&entries).await?;
        self.entries = entries;
        Ok(result)
    }
}

fn draw<V: StatisticsView>(
    view: &mut V,
    ctx: &mut RenderContext<V::Chart>,
    slot: ChartSlot,
    series: &ChartSeries,
) {
    match view.draw_chart(slot, series) {
        Some(chart) => ctx.mount(slot, chart),
        None => {
            ctx.unmount(slot);
        }
    }
}
