use crate::domain::{models::event::Event, ports::EventRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"INSERT INTO events (id, event_series_id, occurs_on, title, description, location_id, user_id, categories_json, published, cancelled, start_time, end_time, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&event.id)
            .bind(&event.event_series_id)
            .bind(event.occurs_on)
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location_id)
            .bind(&event.user_id)
            .bind(&event.categories_json)
            .bind(event.published)
            .bind(event.cancelled)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(event.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE id = ?"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_for_series(&self, series_id: &str) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE event_series_id = ? ORDER BY start_time ASC"
        )
            .bind(series_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn future_for_series(&self, series_id: &str, now: DateTime<Utc>) -> Result<Vec<Event>, AppError> {
        sqlx::query_as::<_, Event>(
            "SELECT * FROM events WHERE event_series_id = ? AND start_time > ? ORDER BY start_time ASC"
        )
            .bind(series_id)
            .bind(now)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn materialized_dates(&self, series_id: &str) -> Result<Vec<NaiveDate>, AppError> {
        sqlx::query_scalar::<_, NaiveDate>(
            "SELECT DISTINCT occurs_on FROM events WHERE event_series_id = ? ORDER BY occurs_on ASC"
        )
            .bind(series_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_series_fields(&self, event: &Event) -> Result<Event, AppError> {
        sqlx::query_as::<_, Event>(
            r#"UPDATE events
               SET title=?, description=?, location_id=?, user_id=?, categories_json=?, published=?, start_time=?, end_time=?
               WHERE id=? RETURNING *"#
        )
            .bind(&event.title)
            .bind(&event.description)
            .bind(&event.location_id)
            .bind(&event.user_id)
            .bind(&event.categories_json)
            .bind(event.published)
            .bind(event.start_time)
            .bind(event.end_time)
            .bind(&event.id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_cancelled(&self, id: &str, cancelled: bool) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE events SET cancelled = ? WHERE id = ?")
            .bind(cancelled)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Event not found".into()));
        }
        Ok(())
    }
}
