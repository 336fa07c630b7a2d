/// Engine-side primary keys are 64-bit integers.
pub type EngineId = i64;

/// All timestamps on the engine wire format are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
