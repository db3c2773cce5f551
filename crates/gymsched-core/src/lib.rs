//! # Gymsched Core Library
//!
//! The recurring-schedule model behind the gym back-office class and event
//! forms: rule data, validation, frequency reset, and occurrence projection.
//!
//! ## Features
//!
//! - **Declarative Rules**: hourly, daily, weekly, monthly and yearly schedules
//!   with per-weekday time windows, week-of-month and month-of-year selection
//! - **Field-Keyed Validation**: every violated field reported in one pass
//! - **Frequency Reset**: a pure reducer that drops selections a new frequency
//!   cannot use
//! - **Occurrence Projection**: RFC 5545 expansion through the `rrule` crate
//!   for calendar rendering
//!
//! ## Core Modules
//!
//! - [`models`]: Rule data structures and wire encodings
//! - [`options`]: Frequency, weekday, week and month option tables
//! - [`datetime`]: API date-string parsing and formatting
//! - [`validator`]: Rule validation and normalization
//! - [`reset`]: Frequency transition policy
//! - [`projector`]: Rule to occurrence expansion
//! - [`form`]: Form session lifecycle and request payloads
//! - [`gateway`]: Submission boundary trait
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust
//! use gymsched_core::models::{Frequency, RecurrenceRule, WeekdaySlot};
//! use gymsched_core::validator::RuleValidator;
//!
//! let mut rule = RecurrenceRule {
//!     frequency: Frequency::Monthly,
//!     start: "2024-01-01".to_string(),
//!     selected_weekdays: vec![WeekdaySlot::new("monday", "09:00", "10:00")],
//!     ..Default::default()
//! };
//!
//! let validator = RuleValidator::default();
//! assert!(validator.validate(&rule).is_err()); // no week of the month yet
//!
//! rule.set_frequency(Frequency::Weekly);
//! assert!(validator.validate(&rule).is_ok());
//! ```

pub mod datetime;
pub mod error;
pub mod form;
pub mod gateway;
pub mod models;
pub mod options;
pub mod projector;
pub mod reset;
pub mod validator;
