use crate::domain::models::{event::Event, event_series::EventSeries};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

#[async_trait]
pub trait EventSeriesRepository: Send + Sync {
    async fn create(&self, series: &EventSeries) -> Result<EventSeries, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EventSeries>, AppError>;
    async fn update(&self, series: &EventSeries) -> Result<EventSeries, AppError>;
    /// Series whose expiry falls within the next week, ascending by expiry.
    async fn find_expiring(&self, now: DateTime<Utc>) -> Result<Vec<EventSeries>, AppError>;
    /// Series whose expiry has already passed, ascending by expiry.
    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<EventSeries>, AppError>;
    async fn mark_expiring_warning_sent(&self, id: &str) -> Result<(), AppError>;
    async fn mark_expired_warning_sent(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn create(&self, event: &Event) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list_for_series(&self, series_id: &str) -> Result<Vec<Event>, AppError>;
    /// Events of a series starting after `now`, ascending by start time.
    async fn future_for_series(
        &self,
        series_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Event>, AppError>;
    /// Distinct calendar dates already materialized for a series, ascending.
    async fn materialized_dates(&self, series_id: &str) -> Result<Vec<NaiveDate>, AppError>;
    /// Persist the series-owned fields plus instants of an existing event.
    /// Deliberately narrower than a full-row update: `cancelled` and
    /// `occurs_on` are never written through this path.
    async fn update_series_fields(&self, event: &Event) -> Result<Event, AppError>;
    async fn set_cancelled(&self, id: &str, cancelled: bool) -> Result<(), AppError>;
}
