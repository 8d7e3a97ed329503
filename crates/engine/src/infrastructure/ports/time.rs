//! Wall-clock port.

use chrono::{DateTime, Utc};

/// Source of "now" for log timestamps and history rows.
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
