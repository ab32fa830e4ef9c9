/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Boxed error produced by a storage or synchronization backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
