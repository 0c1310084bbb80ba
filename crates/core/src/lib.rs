//! Functional core of notifyd.
//!
//! Pure types, validation, and the traits the service is wired through. All
//! I/O lives in the `notifyd` crate.

pub mod cache;
pub mod notification;
pub mod storage;
