mod common;

#[cfg(test)]
mod tests {
    use crate::common::{monday, MockBackend, USER_ID};
    use chrono::NaiveDate;
    use kintai::api::{AttendanceBackend, ScheduleDay, ScheduleKind};
    use kintai::libs::clock::ManualClock;
    use kintai::libs::schedule::{default_month, ScheduleMonth, ScheduleStats};

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn backend() -> MockBackend {
        MockBackend::new(ManualClock::new(monday(9, 0, 0)))
    }

    #[test]
    fn test_default_month_is_next_month() {
        assert_eq!(default_month(NaiveDate::from_ymd_opt(2025, 5, 26).unwrap()), june(1));
        assert_eq!(default_month(NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()), NaiveDate::from_ymd_opt(2025, 2, 1).unwrap());
    }

    #[test]
    fn test_month_of_february() {
        let schedule = ScheduleMonth::new(NaiveDate::from_ymd_opt(2024, 2, 17).unwrap());
        assert_eq!(schedule.start(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(schedule.month(), "2024-02");
        assert_eq!(schedule.dates().len(), 29);
        assert_eq!(schedule.stats().unset, 29);
    }

    #[test]
    fn test_custom_shift_is_normalised() {
        let mut schedule = ScheduleMonth::new(june(1));
        schedule.set(june(2), ScheduleKind::Remote, Some("8:30"), Some("17:15:00")).unwrap();

        let day = schedule.day(june(2)).unwrap();
        assert_eq!(day.kind, ScheduleKind::Remote);
        assert_eq!(day.start_time.as_deref(), Some("08:30"));
        assert_eq!(day.end_time.as_deref(), Some("17:15"));
    }

    #[test]
    fn test_holiday_drops_times() {
        let mut schedule = ScheduleMonth::new(june(1));
        schedule.set(june(7), ScheduleKind::Holiday, Some("09:00"), Some("18:00")).unwrap();

        let day = schedule.day(june(7)).unwrap();
        assert_eq!(day.start_time, None);
        assert_eq!(day.end_time, None);
    }

    #[test]
    fn test_invalid_shift_is_rejected() {
        let mut schedule = ScheduleMonth::new(june(1));
        assert!(schedule.set(june(2), ScheduleKind::Work, Some("18:00"), Some("09:00")).is_err());
        assert!(schedule.set(june(2), ScheduleKind::Work, Some("late"), None).is_err());
        assert!(schedule.day(june(2)).is_none());
    }

    #[test]
    fn test_complete_month_stats() {
        let mut schedule = ScheduleMonth::new(june(1));
        assert!(schedule.ensure_complete().is_err());

        schedule.set_weekdays_work();
        let weekends: Vec<NaiveDate> = schedule.dates().into_iter().filter(|date| schedule.day(*date).is_none()).collect();
        schedule.apply_batch(&weekends, ScheduleKind::Holiday, None, None).unwrap();
        schedule.set(june(4), ScheduleKind::Remote, None, None).unwrap();

        assert_eq!(
            schedule.stats(),
            ScheduleStats {
                work: 20,
                remote: 1,
                holiday: 9,
                unset: 0,
                total: 30,
            }
        );
        assert!(schedule.ensure_complete().is_ok());

        schedule.clear();
        assert_eq!(schedule.stats().unset, 30);
    }

    #[test]
    fn test_draft_json_shape() {
        let mut schedule = ScheduleMonth::new(june(1));
        schedule.set(june(3), ScheduleKind::Work, None, None).unwrap();
        schedule.set(june(1), ScheduleKind::Holiday, None, None).unwrap();

        let draft = schedule.draft(USER_ID);
        assert_eq!(draft.days.first().map(|day| day.date), Some(june(1)));

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["month"], "2025-06");
        assert_eq!(json["days"][0]["type"], "HOLIDAY");
        assert!(json["days"][0].get("startTime").is_none());
        assert_eq!(json["days"][1]["type"], "WORK");
        assert_eq!(json["days"][1]["startTime"], "09:00");
        assert_eq!(json["days"][1]["endTime"], "18:00");
    }

    #[tokio::test]
    async fn test_saved_draft_reloads_from_server() {
        let backend = backend();
        backend.state.lock().schedule = vec![
            ScheduleDay {
                date: june(2),
                kind: ScheduleKind::Remote,
                start_time: Some("10:00".to_string()),
                end_time: Some("19:00".to_string()),
            },
            ScheduleDay {
                date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                kind: ScheduleKind::Work,
                start_time: None,
                end_time: None,
            },
        ];

        let days = backend.schedule(USER_ID, june(1)).await.unwrap();
        let mut schedule = ScheduleMonth::from_days(june(1), days);
        assert_eq!(schedule.days().count(), 1);
        assert_eq!(schedule.toggle(june(2), ScheduleKind::Remote).unwrap(), None);
        assert_eq!(schedule.toggle(june(3), ScheduleKind::Work).unwrap(), Some(ScheduleKind::Work));

        backend.save_schedule(&schedule.draft(USER_ID)).await.unwrap();

        let reloaded = ScheduleMonth::from_days(june(1), backend.schedule(USER_ID, june(1)).await.unwrap());
        assert!(reloaded.day(june(2)).is_none());
        assert_eq!(reloaded.day(june(3)).map(|day| day.kind), Some(ScheduleKind::Work));
        assert_eq!(backend.calls(), vec!["schedule", "save_schedule", "schedule"]);
        assert_eq!(backend.state.lock().saved_drafts[0].month, "2025-06");
    }
}
