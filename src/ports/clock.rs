//! Clock Port - Source of the current time.
//!
//! The engine never reads the wall clock directly. Production code uses the
//! system clock; tests drive a manual one.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
