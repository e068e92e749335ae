//! Convene — Event Scheduling bounded context.
//!
//! Responsible for the time-slot catalog, calendar-date validation, the
//! event aggregate, and the ownership rules gating mutation.

pub mod application;
pub mod domain;
