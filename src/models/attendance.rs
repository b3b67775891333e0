use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, Numeric};
use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
            AttendanceStatus::Late => "late",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "present" => Ok(AttendanceStatus::Present),
            "absent" => Ok(AttendanceStatus::Absent),
            "late" => Ok(AttendanceStatus::Late),
            _ => Err(ValidationError::InvalidVariant {
                field: "status",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: i64,
    pub date: String,
    pub course_id: i64,
    #[serde(rename = "course")]
    pub course_name: String,
    pub student_id: i64,
    #[serde(rename = "student")]
    pub student_name: String,
    pub status: AttendanceStatus,
    pub arrival_time: Option<String>,
    pub leaving_time: Option<String>,
    pub notes: Option<String>,
}

/// Raw `GET /attendance` query string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    pub course_id: Option<String>,
    pub student_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    pub course_id: Option<i64>,
    pub student_id: Option<i64>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
}

impl AttendanceQuery {
    pub fn validate(self) -> Result<AttendanceFilter, ValidationError> {
        let id = |value: Option<String>, field: &'static str| -> Result<Option<i64>, ValidationError> {
            input::optional(value)
                .map(|v| Numeric::Text(v).to_i64(field))
                .transpose()
        };
        let date = |value: Option<String>, field: &'static str| -> Result<Option<NaiveDate>, ValidationError> {
            input::optional(value)
                .map(|v| input::parse_date(&v, field))
                .transpose()
        };

        Ok(AttendanceFilter {
            course_id: id(self.course_id, "courseId")?,
            student_id: id(self.student_id, "studentId")?,
            date_from: date(self.date_from, "dateFrom")?,
            date_to: date(self.date_to, "dateTo")?,
            status: input::optional(self.status)
                .map(|s| s.parse())
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendanceRequest {
    pub date: Option<String>,
    pub course_id: Option<Numeric>,
    pub course_name: Option<String>,
    pub student_id: Option<Numeric>,
    pub student_name: Option<String>,
    pub status: Option<String>,
    pub arrival_time: Option<String>,
    pub leaving_time: Option<String>,
    pub notes: Option<String>,
}

/// `POST /attendance` accepts a single record or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AttendancePayload {
    Many(Vec<NewAttendanceRequest>),
    One(NewAttendanceRequest),
}

impl AttendancePayload {
    pub fn into_vec(self) -> Vec<NewAttendanceRequest> {
        match self {
            AttendancePayload::Many(records) => records,
            AttendancePayload::One(record) => vec![record],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAttendance {
    pub date: String,
    pub course_id: i64,
    pub course_name: String,
    pub student_id: i64,
    pub student_name: String,
    pub status: AttendanceStatus,
    pub arrival_time: Option<String>,
    pub leaving_time: Option<String>,
    pub notes: Option<String>,
}

impl NewAttendanceRequest {
    pub fn validate(self) -> Result<NewAttendance, ValidationError> {
        let date = input::required_date(self.date, "date")?;
        Ok(NewAttendance {
            date: date.format("%Y-%m-%d").to_string(),
            course_id: input::required_id(self.course_id.as_ref(), "courseId")?,
            course_name: input::required(self.course_name, "courseName")?,
            student_id: input::required_id(self.student_id.as_ref(), "studentId")?,
            student_name: input::required(self.student_name, "studentName")?,
            status: input::required(self.status, "status")?.parse()?,
            arrival_time: input::optional(self.arrival_time),
            leaving_time: input::optional(self.leaving_time),
            notes: input::optional(self.notes),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSubmitted {
    pub message: String,
    pub records: Vec<AttendanceRecord>,
}
