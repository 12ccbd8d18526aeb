//! Clock-in correction window.
//!
//! A clock-in time may be corrected only for a limited period (30 minutes by
//! default) after the original clock-in. Only the clock-in moment is stored;
//! whether editing is allowed is always re-derived from it and the current
//! time by [`is_edit_allowed`].
//!
//! ## States
//!
//! ```text
//! NoActiveClockIn --clock-in--> WithinEditWindow --deadline--> EditWindowExpired
//!        ^                            |
//!        +------clock-out/correct-----+
//! ```
//!
//! `EditWindowExpired` and `NoActiveClockIn` look the same to the user (no
//! edit option); both need a fresh clock-in to re-enter the window. A
//! correction disarms the window; it is never re-armed from the corrected time.
//!
//! A window armed with [`EditWindow::arm_on`] is anchored to the date the
//! session started, so a shift that began before midnight closes 30 minutes
//! after its clock-in and not on the following day.
//!
//! ## Ticker
//!
//! [`EditWindowTicker`] re-evaluates the policy on a fixed interval and
//! publishes the result through a `tokio::sync::watch` channel. It stops on
//! its own once the window closes and is aborted when closed or dropped, so
//! a torn-down screen leaves no timer behind.

use crate::libs::clock::Clock;
use crate::libs::formatter::{format_clock_time, parse_clock_time};
use crate::msg_debug;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::fmt;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditWindowState {
    NoActiveClockIn,
    WithinEditWindow,
    EditWindowExpired,
}

impl fmt::Display for EditWindowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EditWindowState::NoActiveClockIn => "no active clock-in",
            EditWindowState::WithinEditWindow => "editable",
            EditWindowState::EditWindowExpired => "expired",
        };
        write!(f, "{}", label)
    }
}

/// The moment editing stops: the original clock-in anchored to the date of
/// `now`, plus `window`.
pub fn edit_deadline(original: &str, now: NaiveDateTime, window: Duration) -> Option<NaiveDateTime> {
    edit_deadline_on(now.date(), original, window)
}

/// Same as [`edit_deadline`] for a clock-in on `date`.
pub fn edit_deadline_on(date: NaiveDate, original: &str, window: Duration) -> Option<NaiveDateTime> {
    let clock_in = parse_clock_time(original)?;
    Some(date.and_time(clock_in) + window)
}

/// `true` iff an original clock-in is recorded and `now` is strictly before
/// its deadline.
pub fn is_edit_allowed(original: Option<&str>, now: NaiveDateTime, window: Duration) -> bool {
    original
        .and_then(|original| edit_deadline(original, now, window))
        .is_some_and(|deadline| now < deadline)
}

/// Holder for the persisted original clock-in and the window length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditWindow {
    original: Option<String>,
    anchor: Option<NaiveDate>,
    window: Duration,
}

impl EditWindow {
    pub fn new(window: Duration) -> Self {
        Self {
            original: None,
            anchor: None,
            window,
        }
    }

    pub fn with_original(original: Option<String>, window: Duration) -> Self {
        Self {
            original,
            anchor: None,
            window,
        }
    }

    /// Arms the window for a clock-in on whatever day it is evaluated.
    pub fn arm(&mut self, clock_in: &str) {
        self.original = Some(clock_in.to_string());
        self.anchor = None;
    }

    /// Arms the window for a clock-in on `date`.
    pub fn arm_on(&mut self, date: NaiveDate, clock_in: &str) {
        self.original = Some(clock_in.to_string());
        self.anchor = Some(date);
    }

    pub fn disarm(&mut self) {
        self.original = None;
        self.anchor = None;
    }

    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    pub fn anchor(&self) -> Option<NaiveDate> {
        self.anchor
    }

    pub fn deadline(&self, now: NaiveDateTime) -> Option<NaiveDateTime> {
        edit_deadline_on(self.anchor.unwrap_or(now.date()), self.original.as_deref()?, self.window)
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self, now: NaiveDateTime) -> EditWindowState {
        match self.original.as_deref() {
            None => EditWindowState::NoActiveClockIn,
            Some(_) if self.is_allowed(now) => EditWindowState::WithinEditWindow,
            Some(_) => EditWindowState::EditWindowExpired,
        }
    }

    pub fn is_allowed(&self, now: NaiveDateTime) -> bool {
        self.deadline(now).is_some_and(|deadline| now < deadline)
    }

    /// Time at which the edit option disappears, as `HH:MM`.
    pub fn deadline_label(&self, now: NaiveDateTime) -> Option<String> {
        let deadline = self.deadline(now)?;
        Some(format_clock_time(&deadline.time()))
    }
}

/// Background re-evaluation of an [`EditWindow`].
pub struct EditWindowTicker {
    rx: watch::Receiver<bool>,
    handle: JoinHandle<()>,
}

impl EditWindowTicker {
    /// Spawns the ticker on the current tokio runtime. The first evaluation
    /// happens immediately; the task ends as soon as editing is no longer
    /// allowed.
    pub fn start<C>(clock: C, window: &EditWindow, period: std::time::Duration) -> Self
    where
        C: Clock + 'static,
    {
        let window = window.clone();
        let (tx, rx) = watch::channel(window.is_allowed(clock.now()));

        let handle = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            msg_debug!(format!("edit window ticker started for {:?} on {:?}", window.original(), window.anchor()));

            loop {
                ticker.tick().await;
                let allowed = window.is_allowed(clock.now());
                tx.send_replace(allowed);

                if !allowed || tx.is_closed() {
                    break;
                }
            }

            msg_debug!("edit window ticker stopped");
        });

        Self { rx, handle }
    }

    /// Latest published value.
    pub fn is_allowed(&self) -> bool {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Aborts the ticker task.
    pub fn close(&self) {
        self.handle.abort();
    }
}

impl Drop for EditWindowTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, 26).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_states() {
        let mut window = EditWindow::new(Duration::minutes(30));
        assert_eq!(window.state(at(9, 0, 0)), EditWindowState::NoActiveClockIn);

        window.arm("09:00");
        assert_eq!(window.state(at(9, 10, 0)), EditWindowState::WithinEditWindow);
        assert_eq!(window.state(at(9, 30, 0)), EditWindowState::EditWindowExpired);

        window.disarm();
        assert_eq!(window.state(at(9, 10, 0)), EditWindowState::NoActiveClockIn);
    }

    #[test]
    fn test_deadline_label() {
        let window = EditWindow::with_original(Some("09:15".to_string()), Duration::minutes(30));
        assert_eq!(window.deadline_label(at(9, 20, 0)), Some("09:45".to_string()));
    }

    #[test]
    fn test_anchored_window_closes_after_midnight() {
        let mut window = EditWindow::new(Duration::minutes(30));
        window.arm_on(NaiveDate::from_ymd_opt(2025, 5, 25).unwrap(), "23:50");

        assert!(window.is_allowed(NaiveDate::from_ymd_opt(2025, 5, 26).unwrap().and_hms_opt(0, 10, 0).unwrap()));
        assert!(!window.is_allowed(at(0, 20, 0)));
        assert!(!window.is_allowed(at(8, 0, 0)));
        assert_eq!(window.state(at(8, 0, 0)), EditWindowState::EditWindowExpired);
    }

    #[test]
    fn test_unparseable_original_never_allows_edit() {
        assert!(!is_edit_allowed(Some("soon"), at(9, 0, 0), Duration::minutes(30)));
    }
}
