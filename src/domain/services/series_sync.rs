use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::models::event::Event;
use crate::domain::models::event_series::EventSeries;
use crate::domain::ports::EventRepository;
use crate::domain::services::recurrence::{self, RecurrenceRule};
use crate::domain::services::timezone::InstantBuilder;
use crate::error::AppError;

#[derive(Debug, Default, Clone, Copy)]
pub struct SyncOutcome {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
}

/// Keeps a series' materialized events in step with its definition.
///
/// Creation expands the full [start_date, expiry] range; an update first
/// re-syncs the series-owned fields and time window onto future events and
/// then, when the expiry moved, extends generation past the last
/// materialized date. Both operations dedup against dates that already
/// have an event, so re-running after a partial failure is safe.
pub struct SeriesSynchronizer {
    events: Arc<dyn EventRepository>,
    instants: InstantBuilder,
}

impl SeriesSynchronizer {
    pub fn new(events: Arc<dyn EventRepository>, instants: InstantBuilder) -> Self {
        Self { events, instants }
    }

    pub async fn cascade_creation(
        &self,
        series: &EventSeries,
        now: DateTime<Utc>,
    ) -> Result<SyncOutcome, AppError> {
        series.validate()?;
        let rule = RecurrenceRule::parse(&series.rule)?;

        let materialized: BTreeSet<NaiveDate> =
            self.events.materialized_dates(&series.id).await?.into_iter().collect();
        let dates = recurrence::generate_dates(
            &rule,
            &series.day_array(),
            series.start_date,
            series.expiry,
            self.today(now),
            &materialized,
        );

        let outcome = self.create_batch(series, rule, dates).await?;
        info!(
            series_id = %series.id,
            created = outcome.created,
            skipped = outcome.skipped,
            "series expansion complete"
        );
        Ok(outcome)
    }

    pub async fn cascade_update(
        &self,
        series: &EventSeries,
        previous_expiry: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<SyncOutcome, AppError> {
        series.validate()?;
        let rule = RecurrenceRule::parse(&series.rule)?;
        let mut outcome = SyncOutcome::default();

        // Re-sync shared fields and the time window onto future events.
        // Each keeps its own calendar date; instants are rebuilt from it.
        let shared = series.shared_attributes();
        for mut event in self.events.future_for_series(&series.id, now).await? {
            let Some((start_utc, end_utc)) =
                self.instants.build(event.occurs_on, series.start_time, series.end_time)
            else {
                warn!(
                    series_id = %series.id,
                    date = %event.occurs_on,
                    "no timezone offset for date, leaving event untouched"
                );
                outcome.skipped += 1;
                continue;
            };
            event.apply_shared(&shared);
            event.start_time = start_utc;
            event.end_time = end_utc;
            self.events.update_series_fields(&event).await?;
            outcome.updated += 1;
        }

        // A moved expiry extends generation past the newest materialized
        // date, counting past events too so an extension can never land on
        // an already-covered date.
        if series.expiry != previous_expiry {
            let materialized: BTreeSet<NaiveDate> =
                self.events.materialized_dates(&series.id).await?.into_iter().collect();
            let from = materialized
                .iter()
                .next_back()
                .and_then(|last| last.succ_opt())
                .unwrap_or(series.start_date);

            if from <= series.expiry {
                let dates = recurrence::generate_dates(
                    &rule,
                    &series.day_array(),
                    from,
                    series.expiry,
                    self.today(now),
                    &materialized,
                );
                let extension = self.create_batch(series, rule, dates).await?;
                outcome.created += extension.created;
                outcome.skipped += extension.skipped;
            }
        }

        info!(
            series_id = %series.id,
            updated = outcome.updated,
            created = outcome.created,
            skipped = outcome.skipped,
            "series reconciliation complete"
        );
        Ok(outcome)
    }

    async fn create_batch(
        &self,
        series: &EventSeries,
        rule: RecurrenceRule,
        dates: Vec<NaiveDate>,
    ) -> Result<SyncOutcome, AppError> {
        let mut outcome = SyncOutcome::default();
        for date in dates {
            let Some((start_utc, end_utc)) =
                self.instants.build(date, series.start_time, series.end_time)
            else {
                warn!(
                    series_id = %series.id,
                    rule = rule.as_str(),
                    %date,
                    "no timezone offset for date, skipping occurrence"
                );
                outcome.skipped += 1;
                continue;
            };

            let event = Event::from_series(series, date, start_utc, end_utc);
            if let Err(e) = event.validate() {
                warn!(
                    series_id = %series.id,
                    rule = rule.as_str(),
                    %date,
                    error = %e,
                    "event could not be saved"
                );
                outcome.skipped += 1;
                continue;
            }

            match self.events.create(&event).await {
                Ok(_) => outcome.created += 1,
                // A concurrent run beat us to this date; the event exists,
                // so the batch carries on.
                Err(e) if e.is_duplicate() => {
                    warn!(series_id = %series.id, %date, "date already materialized, skipping");
                    outcome.skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(outcome)
    }

    /// Civil "today" in the configured zone for the given reference
    /// instant. Passed in explicitly so tests can pin the clock.
    fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.instants.resolver().tz()).date_naive()
    }
}
