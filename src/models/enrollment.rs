use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, Numeric};
use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Active,
    Cancelled,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Active => f.write_str("active"),
            EnrollmentStatus::Cancelled => f.write_str("cancelled"),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: i64,
    pub parent_id: i64,
    pub course_id: i64,
    pub student_id: i64,
    pub status: EnrollmentStatus,
    pub enrollment_date: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub course_id: Option<Numeric>,
    pub parent_id: Option<Numeric>,
    pub student_id: Option<Numeric>,
}

/// Validated enrollment command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollCommand {
    pub course_id: i64,
    pub parent_id: i64,
    pub student_id: Option<i64>,
}

impl EnrollRequest {
    pub fn validate(self) -> Result<EnrollCommand, ValidationError> {
        let course_id = input::required_id(self.course_id.as_ref(), "courseId")?;
        let parent_id = input::required_id(self.parent_id.as_ref(), "parentId")?;
        let student_id = match &self.student_id {
            None => None,
            Some(Numeric::Text(s)) if s.trim().is_empty() => None,
            Some(id) => Some(id.to_i64("studentId")?),
        };
        Ok(EnrollCommand {
            course_id,
            parent_id,
            student_id,
        })
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrollResponse {
    pub message: String,
    pub enrollment_id: i64,
    pub student_id: i64,
    pub student_created: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEnrollmentsQuery {
    pub parent_id: Option<String>,
}

impl UserEnrollmentsQuery {
    pub fn validate(self) -> Result<i64, ValidationError> {
        let raw = input::required(self.parent_id, "parentId")?;
        Numeric::Text(raw).to_i64("parentId")
    }
}

/// Course joined with the active enrollment that placed the parent in it.
#[derive(Debug, Clone, FromRow)]
pub struct EnrolledCourse {
    pub course_id: i64,
    pub name: String,
    pub location: String,
    pub teacher: String,
    pub time: String,
    pub enrollment_date: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub extended_props: EventProps,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventProps {
    pub location: String,
    pub teacher: String,
    pub zoom_link: Option<String>,
    pub course_id: String,
}

const ONLINE_MEETING_LINK: &str = "https://zoom.us/j/123456789";

impl CalendarEvent {
    pub fn from_enrollment(course: EnrolledCourse) -> Self {
        let day = NaiveDate::parse_from_str(&course.enrollment_date, "%Y-%m-%d")
            .unwrap_or_default();
        let (start, end) = parse_time_range(&course.time);
        let fmt = |t: NaiveTime| format!("{}T{}", day.format("%Y-%m-%d"), t.format("%H:%M:%S"));
        let zoom_link = course
            .location
            .contains("Online")
            .then(|| ONLINE_MEETING_LINK.to_string());

        Self {
            id: course.course_id.to_string(),
            title: course.name,
            start: fmt(start),
            end: fmt(end),
            extended_props: EventProps {
                location: course.location,
                teacher: course.teacher,
                zoom_link,
                course_id: course.course_id.to_string(),
            },
        }
    }
}

/// Parses "10:00 AM - 11:00 AM" or "10:00-11:00". Anything else falls back
/// to a one-hour slot at midnight.
pub fn parse_time_range(range: &str) -> (NaiveTime, NaiveTime) {
    let fallback = (NaiveTime::MIN, NaiveTime::from_hms_opt(1, 0, 0).unwrap_or(NaiveTime::MIN));
    let Some((start, end)) = range.split_once('-') else {
        return fallback;
    };
    match (parse_clock(start), parse_clock(end)) {
        (Some(s), Some(e)) => (s, e),
        _ => fallback,
    }
}

fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim().to_ascii_uppercase();
    ["%I:%M %p", "%I:%M%p", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(&raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_time_range_formats() {
        assert_eq!(parse_time_range("10:00 AM - 11:00 AM"), (hm(10, 0), hm(11, 0)));
        assert_eq!(parse_time_range("11:30 am - 12:30 pm"), (hm(11, 30), hm(12, 30)));
        assert_eq!(parse_time_range("14:00-15:30"), (hm(14, 0), hm(15, 30)));
        assert_eq!(parse_time_range("after lunch"), (hm(0, 0), hm(1, 0)));
    }

    #[test]
    fn test_calendar_event_shape() {
        let event = CalendarEvent::from_enrollment(EnrolledCourse {
            course_id: 4,
            name: "Young Readers".into(),
            location: "Online".into(),
            teacher: "Grace Ho".into(),
            time: "11:30 AM - 12:30 PM".into(),
            enrollment_date: "2025-01-16".into(),
        });
        assert_eq!(event.id, "4");
        assert_eq!(event.start, "2025-01-16T11:30:00");
        assert_eq!(event.end, "2025-01-16T12:30:00");
        assert!(event.extended_props.zoom_link.is_some());
    }

    #[test]
    fn test_enroll_request_validation() {
        let req: EnrollRequest =
            serde_json::from_str(r#"{"courseId":"3","parentId":7,"studentId":""}"#).unwrap();
        assert_eq!(
            req.validate().unwrap(),
            EnrollCommand { course_id: 3, parent_id: 7, student_id: None }
        );

        let req: EnrollRequest = serde_json::from_str(r#"{"parentId":7}"#).unwrap();
        assert_eq!(req.validate().unwrap_err(), ValidationError::Missing { field: "courseId" });

        let req: EnrollRequest =
            serde_json::from_str(r#"{"courseId":1,"parentId":7,"studentId":"x1"}"#).unwrap();
        assert!(matches!(
            req.validate(),
            Err(ValidationError::InvalidFormat { field: "studentId", .. })
        ));
    }
}
