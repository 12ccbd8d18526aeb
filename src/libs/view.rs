//! Console tables for the attendance screens.

use super::attendance::AttendanceRecord;
use super::formatter::{display_time, format_history_minutes};
use super::schedule::ScheduleMonth;
use crate::api::{HistoryRecord, Location, SubmittedSchedule};
use anyhow::Result;
use chrono::Datelike;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn today(record: &AttendanceRecord) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "STATUS", "CLOCK IN", "CLOCK OUT", "WORK", "BREAK", "OVERTIME", "SCHEDULED"]);
        table.add_row(row![
            record.date.format("%Y-%m-%d"),
            record.status.label(),
            display_time(record.clock_in.as_deref()),
            display_time(record.clock_out.as_deref()),
            record.duration.work_label(),
            record.duration.break_label(),
            record.duration.overtime_label(),
            record.scheduled_time
        ]);
        table.printstd();

        Ok(())
    }

    pub fn history(records: &[HistoryRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "CLOCK IN", "CLOCK OUT", "WORK", "BREAK", "OVERTIME"]);
        for record in records {
            table.add_row(row![
                record.date,
                display_time(record.clock_in.as_deref()),
                display_time(record.clock_out.as_deref()),
                format_history_minutes(record.total_work_minutes),
                format_history_minutes(record.total_break_minutes),
                format_history_minutes(record.overtime_minutes)
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn schedule(schedule: &ScheduleMonth) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "DAY", "TYPE", "START", "END"]);
        for date in schedule.dates() {
            let day = schedule.day(date);
            table.add_row(row![
                date.format("%Y-%m-%d"),
                date.weekday(),
                day.map(|d| d.kind.label()).unwrap_or("-"),
                display_time(day.and_then(|d| d.start_time.as_deref())),
                display_time(day.and_then(|d| d.end_time.as_deref()))
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn submitted_schedules(schedules: &[SubmittedSchedule]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "MONTH", "SUBMITTED AT", "STATUS"]);
        for schedule in schedules {
            table.add_row(row![
                schedule.id,
                schedule.month,
                schedule.submitted_at.as_deref().unwrap_or("-"),
                schedule.status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string())
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn locations(locations: &[Location]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "START", "END", "CREATED BY"]);
        for location in locations {
            table.add_row(row![
                location.id,
                location.name,
                display_time(Some(&location.start_time)),
                display_time(Some(&location.end_time)),
                location.creator.as_deref().unwrap_or("-")
            ]);
        }
        table.printstd();

        Ok(())
    }
}
