#[cfg(test)]
mod tests {
    use kintai::api::{ApiError, HolidayKind};
    use kintai::libs::requests::{correction_request, holiday_request, location_input, overtime_request, parse_date};

    fn validation_text(error: ApiError) -> String {
        match error {
            ApiError::Validation(text) => text,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date(" 2025-05-26 ").unwrap().to_string(), "2025-05-26");
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("26/05/2025").is_err());
    }

    #[test]
    fn test_correction_with_end_only() {
        let request = correction_request(7, "2025-05-20", None, Some("19:05"), "  forgot to clock out ", Some("  ")).unwrap();
        assert_eq!(request.start_time, None);
        assert_eq!(request.end_time.as_deref(), Some("19:05"));
        assert_eq!(request.reason, "forgot to clock out");
        assert_eq!(request.comment, None);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["userId"], 7);
        assert_eq!(json["date"], "2025-05-20");
        assert!(json.get("startTime").is_none());
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_correction_rejections() {
        assert!(correction_request(7, "2025-05-20", None, None, "reason", None).is_err());
        assert!(correction_request(7, "2025-05-20", Some(""), Some(" "), "reason", None).is_err());
        assert!(correction_request(7, "2025-05-20", Some("25:00"), None, "reason", None).is_err());
        assert!(correction_request(7, "2025-05-20", Some("09:00"), None, "   ", None).is_err());
        assert!(correction_request(7, "yesterday", Some("09:00"), None, "reason", None).is_err());
    }

    #[test]
    fn test_holiday_request() {
        let request = holiday_request(7, "2025-06-13", HolidayKind::Sick, "fever").unwrap();
        assert_eq!(request.holiday_date.to_string(), "2025-06-13");
        assert_eq!(request.holiday_type, HolidayKind::Sick);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["holidayDate"], "2025-06-13");
        assert!(json.get("holidayType").is_some());

        assert!(!validation_text(holiday_request(7, "2025-06-13", HolidayKind::Paid, "").unwrap_err()).is_empty());
    }

    #[test]
    fn test_overtime_request() {
        let request = overtime_request(7, "2025-05-26", "18:00", "21:30", "release").unwrap();
        assert_eq!(request.start_time, "18:00");
        assert_eq!(request.end_time, "21:30");
        assert!(overtime_request(7, "2025-05-26", "21:30", "21:30", "release").is_err());
    }

    #[test]
    fn test_location_input() {
        let input = location_input("  Head office ", "8:45", "17:30").unwrap();
        assert_eq!(input.name, "Head office");
        assert_eq!(input.start_time, "08:45");

        assert!(location_input("", "09:00", "18:00").is_err());
        assert!(location_input("Branch", "18:00", "09:00").is_err());
    }
}
