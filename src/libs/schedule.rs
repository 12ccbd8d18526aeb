//! Month schedule editing.
//!
//! A [`ScheduleMonth`] holds the planned kind of every day the user has set
//! in one calendar month. Days missing from the map are "unset"; a month
//! can only be submitted once no day is unset. Work and remote days carry
//! start/end times that default to the regular 09:00 - 18:00 shift.

use crate::api::{ApiError, ScheduleDay, ScheduleDraft, ScheduleKind};
use crate::libs::formatter::{format_clock_time, format_month, parse_clock_time};
use crate::libs::messages::Message;
use chrono::{Datelike, Months, NaiveDate, Weekday};
use std::collections::BTreeMap;

pub const DEFAULT_START_TIME: &str = "09:00";
pub const DEFAULT_END_TIME: &str = "18:00";

/// First day of the month after `today`, the month schedules are planned for.
pub fn default_month(today: NaiveDate) -> NaiveDate {
    let first = today.with_day(1).unwrap_or(today);
    first.checked_add_months(Months::new(1)).unwrap_or(first)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub work: usize,
    pub remote: usize,
    pub holiday: usize,
    pub unset: usize,
    pub total: usize,
}

impl ScheduleStats {
    pub fn message(&self) -> Message {
        Message::ScheduleStats {
            work: self.work,
            remote: self.remote,
            holiday: self.holiday,
            unset: self.unset,
            total: self.total,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleMonth {
    start: NaiveDate,
    days: BTreeMap<NaiveDate, ScheduleDay>,
}

impl ScheduleMonth {
    /// Empty schedule for the month containing `month`.
    pub fn new(month: NaiveDate) -> Self {
        Self {
            start: month.with_day(1).unwrap_or(month),
            days: BTreeMap::new(),
        }
    }

    /// Schedule built from server rows. Rows outside the month are ignored.
    pub fn from_days(month: NaiveDate, days: impl IntoIterator<Item = ScheduleDay>) -> Self {
        let mut schedule = Self::new(month);
        for day in days {
            if schedule.contains(day.date) {
                schedule.days.insert(day.date, day);
            }
        }
        schedule
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// `YYYY-MM` label of the month.
    pub fn month(&self) -> String {
        format_month(&self.start)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.start.year() && date.month() == self.start.month()
    }

    /// Every date of the month in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start.iter_days().take_while(|date| self.contains(*date)).collect()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ScheduleDay> {
        self.days.get(&date)
    }

    pub fn days(&self) -> impl Iterator<Item = &ScheduleDay> {
        self.days.values()
    }

    /// Sets one day. Work and remote days get the default shift when no
    /// time is given; holidays carry no times.
    pub fn set(&mut self, date: NaiveDate, kind: ScheduleKind, start: Option<&str>, end: Option<&str>) -> Result<(), ApiError> {
        let day = self.build_day(date, kind, start, end)?;
        self.days.insert(date, day);
        Ok(())
    }

    /// Sets `date` to `kind`, or clears it if it already is of that kind.
    /// Returns the resulting kind.
    pub fn toggle(&mut self, date: NaiveDate, kind: ScheduleKind) -> Result<Option<ScheduleKind>, ApiError> {
        if self.day(date).is_some_and(|day| day.kind == kind) {
            self.days.remove(&date);
            return Ok(None);
        }
        self.set(date, kind, None, None)?;
        Ok(Some(kind))
    }

    pub fn clear_day(&mut self, date: NaiveDate) -> bool {
        self.days.remove(&date).is_some()
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    /// Marks every Monday to Friday as a default work day. Weekends are left
    /// as they are. Returns the number of days set.
    pub fn set_weekdays_work(&mut self) -> usize {
        let weekdays: Vec<NaiveDate> = self
            .dates()
            .into_iter()
            .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
            .collect();

        for date in &weekdays {
            self.days.insert(*date, default_day(*date, ScheduleKind::Work));
        }
        weekdays.len()
    }

    /// Applies one kind and shift to several dates. Nothing is changed when
    /// any date or the times are invalid.
    pub fn apply_batch(&mut self, dates: &[NaiveDate], kind: ScheduleKind, start: Option<&str>, end: Option<&str>) -> Result<usize, ApiError> {
        let days = dates
            .iter()
            .map(|date| self.build_day(*date, kind, start, end))
            .collect::<Result<Vec<_>, _>>()?;

        let count = days.len();
        for day in days {
            self.days.insert(day.date, day);
        }
        Ok(count)
    }

    pub fn stats(&self) -> ScheduleStats {
        let total = self.dates().len();
        let count = |kind: ScheduleKind| self.days.values().filter(|day| day.kind == kind).count();
        let (work, remote, holiday) = (count(ScheduleKind::Work), count(ScheduleKind::Remote), count(ScheduleKind::Holiday));

        ScheduleStats {
            work,
            remote,
            holiday,
            unset: total.saturating_sub(work + remote + holiday),
            total,
        }
    }

    /// Fails while any day of the month is unset.
    pub fn ensure_complete(&self) -> Result<(), ApiError> {
        let unset = self.stats().unset;
        if unset > 0 {
            return Err(ApiError::Validation(Message::ScheduleIncomplete(unset).to_string()));
        }
        Ok(())
    }

    pub fn draft(&self, user_id: i64) -> ScheduleDraft {
        ScheduleDraft {
            user_id,
            month: self.month(),
            days: self.days.values().cloned().collect(),
        }
    }

    fn build_day(&self, date: NaiveDate, kind: ScheduleKind, start: Option<&str>, end: Option<&str>) -> Result<ScheduleDay, ApiError> {
        if !self.contains(date) {
            return Err(ApiError::Validation(Message::ScheduleDayOutsideMonth(date.to_string()).to_string()));
        }
        if kind == ScheduleKind::Holiday {
            return Ok(default_day(date, kind));
        }

        let start = parse_shift_time(start.unwrap_or(DEFAULT_START_TIME))?;
        let end = parse_shift_time(end.unwrap_or(DEFAULT_END_TIME))?;
        if start >= end {
            return Err(ApiError::Validation(Message::ScheduleTimeOrder.to_string()));
        }

        Ok(ScheduleDay {
            date,
            kind,
            start_time: Some(format_clock_time(&start)),
            end_time: Some(format_clock_time(&end)),
        })
    }
}

fn default_day(date: NaiveDate, kind: ScheduleKind) -> ScheduleDay {
    let shift = |time: &str| (kind != ScheduleKind::Holiday).then(|| time.to_string());
    ScheduleDay {
        date,
        kind,
        start_time: shift(DEFAULT_START_TIME),
        end_time: shift(DEFAULT_END_TIME),
    }
}

fn parse_shift_time(raw: &str) -> Result<chrono::NaiveTime, ApiError> {
    parse_clock_time(raw).ok_or_else(|| ApiError::Validation(Message::InvalidTime(raw.to_string()).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_default_month_rolls_over_year() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 20).unwrap();
        assert_eq!(default_month(today), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_toggle_same_kind_clears_day() {
        let mut schedule = ScheduleMonth::new(date(1));
        assert_eq!(schedule.toggle(date(3), ScheduleKind::Remote).unwrap(), Some(ScheduleKind::Remote));
        assert_eq!(schedule.day(date(3)).and_then(|d| d.start_time.as_deref()), Some("09:00"));
        assert_eq!(schedule.toggle(date(3), ScheduleKind::Remote).unwrap(), None);
        assert!(schedule.day(date(3)).is_none());
    }

    #[test]
    fn test_weekdays_leave_weekends_unset() {
        // June 2025 has 21 weekdays and 9 weekend days.
        let mut schedule = ScheduleMonth::new(date(1));
        assert_eq!(schedule.set_weekdays_work(), 21);
        let stats = schedule.stats();
        assert_eq!((stats.work, stats.unset, stats.total), (21, 9, 30));
        assert!(schedule.ensure_complete().is_err());
    }

    #[test]
    fn test_batch_rejects_inverted_shift_without_changes() {
        let mut schedule = ScheduleMonth::new(date(1));
        let result = schedule.apply_batch(&[date(2), date(3)], ScheduleKind::Work, Some("18:00"), Some("09:00"));
        assert!(result.is_err());
        assert_eq!(schedule.stats().unset, 30);
    }

    #[test]
    fn test_day_outside_month_rejected() {
        let mut schedule = ScheduleMonth::new(date(1));
        let july = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        assert!(schedule.set(july, ScheduleKind::Holiday, None, None).is_err());
    }
}
