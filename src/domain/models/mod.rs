pub mod event;
pub mod event_series;
