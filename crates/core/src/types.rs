/// Monotonic counter identifying one start or reset trigger.
pub type GenerationId = u64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
