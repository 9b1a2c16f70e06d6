use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{EventRepository, EventSeriesRepository};
use crate::domain::services::series_sync::SeriesSynchronizer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub series_repo: Arc<dyn EventSeriesRepository>,
    pub event_repo: Arc<dyn EventRepository>,
    pub synchronizer: Arc<SeriesSynchronizer>,
}
