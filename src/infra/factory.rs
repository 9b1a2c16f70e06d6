use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::series_sync::SeriesSynchronizer;
use crate::domain::services::timezone::{InstantBuilder, TimezoneResolver};
use crate::infra::repositories::{
    sqlite_event_repo::SqliteEventRepo, sqlite_event_series_repo::SqliteEventSeriesRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

    let resolver = TimezoneResolver::from_name(&config.timezone)
        .expect("TIMEZONE must be a valid IANA zone name");

    let event_repo = Arc::new(SqliteEventRepo::new(pool.clone()));
    let synchronizer = Arc::new(SeriesSynchronizer::new(
        event_repo.clone(),
        InstantBuilder::new(resolver),
    ));

    AppState {
        config: config.clone(),
        series_repo: Arc::new(SqliteEventSeriesRepo::new(pool.clone())),
        event_repo,
        synchronizer,
    }
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
