//! Validated builders for the payloads sent by the request and location
//! screens.
//!
//! Every builder checks its input locally and returns
//! [`ApiError::Validation`] before any network call is made. Times are
//! normalised to `HH:MM` on the way through.

use crate::api::{ApiError, CorrectionRequest, HolidayKind, HolidayRequest, LocationInput, OvertimeRequest};
use crate::libs::formatter::{format_clock_time, parse_clock_time};
use crate::libs::messages::Message;
use chrono::{NaiveDate, NaiveTime};

fn invalid(message: Message) -> ApiError {
    ApiError::Validation(message.to_string())
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| invalid(Message::InvalidDate(raw.to_string())))
}

fn parse_time(raw: &str) -> Result<NaiveTime, ApiError> {
    parse_clock_time(raw).ok_or_else(|| invalid(Message::InvalidTime(raw.to_string())))
}

fn optional_time(raw: Option<&str>) -> Result<Option<String>, ApiError> {
    match raw.map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => parse_time(raw).map(|time| Some(format_clock_time(&time))),
        None => Ok(None),
    }
}

fn required_reason(reason: &str) -> Result<String, ApiError> {
    let reason = reason.trim();
    if reason.is_empty() {
        return Err(invalid(Message::ReasonRequired));
    }
    Ok(reason.to_string())
}

/// Attendance correction for a past day. At least one of the two times
/// must be given.
pub fn correction_request(
    user_id: i64,
    date: &str,
    start_time: Option<&str>,
    end_time: Option<&str>,
    reason: &str,
    comment: Option<&str>,
) -> Result<CorrectionRequest, ApiError> {
    let date = parse_date(date)?;
    let start_time = optional_time(start_time)?;
    let end_time = optional_time(end_time)?;
    if start_time.is_none() && end_time.is_none() {
        return Err(invalid(Message::CorrectionRequestNoTimes));
    }

    Ok(CorrectionRequest {
        user_id,
        date,
        start_time,
        end_time,
        reason: required_reason(reason)?,
        comment: comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string),
    })
}

pub fn holiday_request(user_id: i64, date: &str, kind: HolidayKind, reason: &str) -> Result<HolidayRequest, ApiError> {
    Ok(HolidayRequest {
        user_id,
        holiday_date: parse_date(date)?,
        holiday_type: kind,
        reason: required_reason(reason)?,
    })
}

/// Overtime for one day; the end must come after the start.
pub fn overtime_request(user_id: i64, date: &str, start_time: &str, end_time: &str, reason: &str) -> Result<OvertimeRequest, ApiError> {
    let target_date = parse_date(date)?;
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    if end <= start {
        return Err(invalid(Message::OvertimeEndBeforeStart));
    }

    Ok(OvertimeRequest {
        user_id,
        target_date,
        start_time: format_clock_time(&start),
        end_time: format_clock_time(&end),
        reason: required_reason(reason)?,
    })
}

pub fn location_input(name: &str, start_time: &str, end_time: &str) -> Result<LocationInput, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid(Message::LocationNameEmpty));
    }
    let start = parse_time(start_time)?;
    let end = parse_time(end_time)?;
    if start >= end {
        return Err(invalid(Message::LocationTimeOrder));
    }

    Ok(LocationInput {
        name: name.to_string(),
        start_time: format_clock_time(&start),
        end_time: format_clock_time(&end),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correction_needs_a_time() {
        let err = correction_request(1, "2025-06-02", None, Some(" "), "forgot", None).unwrap_err();
        assert_eq!(err, invalid(Message::CorrectionRequestNoTimes));
    }

    #[test]
    fn test_correction_normalises_times() {
        let request = correction_request(1, "2025-06-02", Some("9:5"), None, " forgot to clock in ", Some("")).unwrap();
        assert_eq!(request.start_time.as_deref(), Some("09:05"));
        assert_eq!(request.reason, "forgot to clock in");
        assert_eq!(request.comment, None);
    }

    #[test]
    fn test_overtime_end_must_follow_start() {
        assert!(overtime_request(1, "2025-06-02", "19:00", "18:00", "release").is_err());
        assert!(overtime_request(1, "2025-06-02", "18:00", "20:30", "release").is_ok());
    }

    #[test]
    fn test_location_validation() {
        assert_eq!(location_input("  ", "09:00", "18:00").unwrap_err(), invalid(Message::LocationNameEmpty));
        assert_eq!(location_input("HQ", "18:00", "09:00").unwrap_err(), invalid(Message::LocationTimeOrder));
        assert_eq!(location_input("HQ", "9:00", "18:00").unwrap().start_time, "09:00");
    }

    #[test]
    fn test_holiday_requires_reason_and_date() {
        assert!(holiday_request(1, "2025-13-01", HolidayKind::Paid, "trip").is_err());
        assert_eq!(holiday_request(1, "2025-06-02", HolidayKind::Sick, "").unwrap_err(), invalid(Message::ReasonRequired));
    }
}
