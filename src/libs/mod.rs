//! Core library modules for the kintai client.
//!
//! ## Features
//!
//! - **Core Infrastructure**: configuration, data storage, messaging, secrets
//! - **Attendance**: today's record, work-time arithmetic, the edit window
//! - **Screens**: state store, screen controller, banners
//! - **Planning**: schedules and request validation
//! - **User Interface**: console tables and formatting
//!
//! ## Usage
//!
//! ```rust
//! use kintai::libs::work_time::compute_duration;
//!
//! let duration = compute_duration("09:15", "18:00").unwrap();
//! assert_eq!(duration.work_label(), "7h 45m");
//! ```

pub mod attendance;
pub mod banner;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod edit_window;
pub mod formatter;
pub mod messages;
pub mod requests;
pub mod schedule;
pub mod screen;
pub mod secret;
pub mod session;
pub mod store;
pub mod view;
pub mod work_time;
