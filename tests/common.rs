use series_engine::{
    config::Config,
    domain::models::event_series::{EventSeries, NewSeriesParams},
    domain::services::series_sync::SeriesSynchronizer,
    domain::services::timezone::{InstantBuilder, TimezoneResolver},
    infra::repositories::{
        sqlite_event_repo::SqliteEventRepo, sqlite_event_series_repo::SqliteEventSeriesRepo,
    },
    state::AppState,
};

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_timezone("Europe/Copenhagen").await
    }

    pub async fn with_timezone(timezone: &str) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            // Tests drive the synchronizer directly without persisting a
            // series row first, so keep SQLite's default (off) instead of
            // sqlx's default (on) for foreign-key enforcement.
            .foreign_keys(false);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            timezone: timezone.to_string(),
        };

        let resolver = TimezoneResolver::from_name(timezone).unwrap();
        let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
        let synchronizer = Arc::new(SeriesSynchronizer::new(
            event_repo.clone(),
            InstantBuilder::new(resolver),
        ));

        let state = Arc::new(AppState {
            config,
            series_repo: Arc::new(SqliteEventSeriesRepo::new(pool.clone())),
            event_repo,
            synchronizer,
        });

        Self {
            pool,
            db_filename,
            state,
        }
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

#[allow(dead_code)]
pub fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[allow(dead_code)]
pub fn t(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

#[allow(dead_code)]
pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

#[allow(dead_code)]
pub fn sample_series(
    rule: &str,
    days: &[Weekday],
    start_date: NaiveDate,
    expiry: NaiveDate,
) -> EventSeries {
    EventSeries::new(NewSeriesParams {
        title: "Folk dancing".to_string(),
        description: "Weekly folk dancing at the community hall".to_string(),
        location_id: "loc-1".to_string(),
        user_id: "user-1".to_string(),
        category_ids: vec!["cat-dance".to_string()],
        day_array: days.to_vec(),
        rule: rule.to_string(),
        start_date,
        expiry,
        start_time: t(10, 0),
        end_time: t(12, 0),
        published: true,
    })
}
