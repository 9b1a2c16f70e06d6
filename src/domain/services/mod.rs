pub mod recurrence;
pub mod series_sync;
pub mod timezone;
