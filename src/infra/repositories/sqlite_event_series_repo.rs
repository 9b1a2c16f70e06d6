use crate::domain::{models::event_series::EventSeries, ports::EventSeriesRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::SqlitePool;

pub struct SqliteEventSeriesRepo {
    pool: SqlitePool,
}

impl SqliteEventSeriesRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn set_flag(&self, id: &str, column: &str) -> Result<(), AppError> {
        let sql = format!("UPDATE event_series SET {} = 1 WHERE id = ?", column);
        let result = sqlx::query(&sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Series not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSeriesRepository for SqliteEventSeriesRepo {
    async fn create(&self, series: &EventSeries) -> Result<EventSeries, AppError> {
        sqlx::query_as::<_, EventSeries>(
            r#"INSERT INTO event_series (id, title, description, location_id, user_id, categories_json, days, rule, start_date, expiry, start_time, end_time, published, expiring_warning_sent, expired_warning_sent, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&series.id)
            .bind(&series.title)
            .bind(&series.description)
            .bind(&series.location_id)
            .bind(&series.user_id)
            .bind(&series.categories_json)
            .bind(&series.days)
            .bind(&series.rule)
            .bind(series.start_date)
            .bind(series.expiry)
            .bind(series.start_time)
            .bind(series.end_time)
            .bind(series.published)
            .bind(series.expiring_warning_sent)
            .bind(series.expired_warning_sent)
            .bind(series.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EventSeries>, AppError> {
        sqlx::query_as::<_, EventSeries>(
            "SELECT * FROM event_series WHERE id = ?"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, series: &EventSeries) -> Result<EventSeries, AppError> {
        sqlx::query_as::<_, EventSeries>(
            r#"UPDATE event_series
               SET title=?, description=?, location_id=?, user_id=?, categories_json=?, days=?, rule=?, start_date=?, expiry=?, start_time=?, end_time=?, published=?, expiring_warning_sent=?, expired_warning_sent=?
               WHERE id=? RETURNING *"#
        )
            .bind(&series.title)
            .bind(&series.description)
            .bind(&series.location_id)
            .bind(&series.user_id)
            .bind(&series.categories_json)
            .bind(&series.days)
            .bind(&series.rule)
            .bind(series.start_date)
            .bind(series.expiry)
            .bind(series.start_time)
            .bind(series.end_time)
            .bind(series.published)
            .bind(series.expiring_warning_sent)
            .bind(series.expired_warning_sent)
            .bind(&series.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_expiring(&self, now: DateTime<Utc>) -> Result<Vec<EventSeries>, AppError> {
        let today = now.date_naive();
        sqlx::query_as::<_, EventSeries>(
            "SELECT * FROM event_series WHERE expiry >= ? AND expiry <= ? ORDER BY expiry ASC"
        )
            .bind(today)
            .bind(today + Duration::weeks(1))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> Result<Vec<EventSeries>, AppError> {
        sqlx::query_as::<_, EventSeries>(
            "SELECT * FROM event_series WHERE expiry < ? ORDER BY expiry ASC"
        )
            .bind(now.date_naive())
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn mark_expiring_warning_sent(&self, id: &str) -> Result<(), AppError> {
        self.set_flag(id, "expiring_warning_sent").await
    }

    async fn mark_expired_warning_sent(&self, id: &str) -> Result<(), AppError> {
        self.set_flag(id, "expired_warning_sent").await
    }
}
