//! Data models for ridership

pub mod date_key;
pub mod record;

pub use date_key::DateKey;
pub use record::{coerce_count, Coercion, DailyRecord, Mode, RawRecord};
