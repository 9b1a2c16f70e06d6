use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct EventSeries {
    pub id: String,
    pub title: String,
    pub description: String,
    pub location_id: String,
    pub user_id: String,
    pub categories_json: String,
    pub days: String,
    pub rule: String,
    pub start_date: NaiveDate,
    pub expiry: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub published: bool,
    pub expiring_warning_sent: bool,
    pub expired_warning_sent: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewSeriesParams {
    pub title: String,
    pub description: String,
    pub location_id: String,
    pub user_id: String,
    pub category_ids: Vec<String>,
    pub day_array: Vec<Weekday>,
    pub rule: String,
    pub start_date: NaiveDate,
    pub expiry: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub published: bool,
}

/// The subset of series fields that is copied onto every generated event
/// and re-synced onto future events when the series is edited. Scheduling
/// bookkeeping (rule, days, dates, times, warning flags) stays behind.
pub struct SharedAttributes {
    pub title: String,
    pub description: String,
    pub location_id: String,
    pub user_id: String,
    pub categories_json: String,
    pub published: bool,
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

impl EventSeries {
    pub fn new(params: NewSeriesParams) -> Self {
        let mut series = Self {
            id: Uuid::new_v4().to_string(),
            title: params.title,
            description: params.description,
            location_id: params.location_id,
            user_id: params.user_id,
            categories_json: String::new(),
            days: String::new(),
            rule: params.rule,
            start_date: params.start_date,
            expiry: params.expiry,
            start_time: params.start_time,
            end_time: params.end_time,
            published: params.published,
            expiring_warning_sent: false,
            expired_warning_sent: false,
            created_at: Utc::now(),
        };
        series.set_category_ids(&params.category_ids);
        series.set_day_array(&params.day_array);
        series
    }

    /// Proxies to the `days` column so weekday sets can be stored as
    /// plain comma-joined names without SQL-level array support.
    pub fn day_array(&self) -> Vec<Weekday> {
        self.days
            .split(',')
            .filter_map(|name| name.trim().parse().ok())
            .collect()
    }

    pub fn set_day_array(&mut self, days: &[Weekday]) {
        self.days = days
            .iter()
            .map(|d| weekday_name(*d))
            .collect::<Vec<_>>()
            .join(",");
    }

    pub fn category_ids(&self) -> Vec<String> {
        serde_json::from_str(&self.categories_json).unwrap_or_default()
    }

    pub fn set_category_ids(&mut self, ids: &[String]) {
        self.categories_json = serde_json::to_string(ids).unwrap_or_else(|_| "[]".to_string());
    }

    pub fn shared_attributes(&self) -> SharedAttributes {
        SharedAttributes {
            title: self.title.clone(),
            description: self.description.clone(),
            location_id: self.location_id.clone(),
            user_id: self.user_id.clone(),
            categories_json: self.categories_json.clone(),
            published: self.published,
        }
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
        if self.category_ids().is_empty() {
            return Err(AppError::Validation("categories must be present".into()));
        }
        if self.day_array().is_empty() {
            return Err(AppError::Validation("day_array must contain at least one weekday".into()));
        }
        if self.end_time <= self.start_time {
            return Err(AppError::Validation("end_time must be after start_time".into()));
        }
        if self.expiry < self.start_date {
            return Err(AppError::Validation("expiry must not be before start_date".into()));
        }
        Ok(())
    }
}
