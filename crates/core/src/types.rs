/// Survey rows are keyed by an endpoint-assigned UUID (v7, time ordered).
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
