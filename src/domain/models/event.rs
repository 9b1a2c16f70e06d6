use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::domain::models::event_series::{EventSeries, SharedAttributes};
use crate::error::AppError;

/// One concrete, dated occurrence. Events generated from a series carry
/// `event_series_id`; standalone events leave it empty.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub event_series_id: Option<String>,
    /// Civil calendar date of this occurrence in the configured timezone.
    /// Uniqueness key per series; never rewritten by reconciliation.
    pub occurs_on: NaiveDate,
    pub title: String,
    pub description: String,
    pub location_id: String,
    pub user_id: String,
    pub categories_json: String,
    pub published: bool,
    pub cancelled: bool,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    pub fn from_series(
        series: &EventSeries,
        occurs_on: NaiveDate,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        let shared = series.shared_attributes();
        Self {
            id: Uuid::new_v4().to_string(),
            event_series_id: Some(series.id.clone()),
            occurs_on,
            title: shared.title,
            description: shared.description,
            location_id: shared.location_id,
            user_id: shared.user_id,
            categories_json: shared.categories_json,
            published: shared.published,
            cancelled: false,
            start_time,
            end_time,
            created_at: Utc::now(),
        }
    }

    /// Merge the series-owned fields onto this event. Everything the event
    /// owns independently (cancelled, occurs_on, id) is left untouched.
    pub fn apply_shared(&mut self, shared: &SharedAttributes) {
        self.title = shared.title.clone();
        self.description = shared.description.clone();
        self.location_id = shared.location_id.clone();
        self.user_id = shared.user_id.clone();
        self.categories_json = shared.categories_json.clone();
        self.published = shared.published;
    }

    pub fn category_ids(&self) -> Vec<String> {
        serde_json::from_str(&self.categories_json).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title),
            ("description", &self.description),
            ("location_id", &self.location_id),
            ("user_id", &self.user_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{} must be present", field)));
            }
        }
        if self.end_time <= self.start_time {
            return Err(AppError::Validation("end_time must be after start_time".into()));
        }
        Ok(())
    }
}
