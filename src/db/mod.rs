//! Local persistence for the kintai client.
//!
//! A single SQLite file, `kintai.db`, in the platform data directory. The
//! schema is versioned by [`migrations`]; the only table the application
//! reads and writes is the key-value [`client_state`].
//!
//! ```rust,no_run
//! use kintai::db::client_state::{ClientState, StateKey};
//!
//! let state = ClientState::new()?;
//! state.set(StateKey::LastActiveScreen, "attendance")?;
//! assert_eq!(state.get(StateKey::LastActiveScreen)?.as_deref(), Some("attendance"));
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup.
pub mod db;

/// Schema migrations.
pub mod migrations;

/// Session identity and the cached attendance record.
pub mod client_state;
