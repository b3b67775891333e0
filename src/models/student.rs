use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, ListInput};
use super::ValidationError;

#[derive(Debug, Clone, FromRow)]
pub struct Student {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<String>,
    pub age: Option<i64>,
    pub grade: Option<String>,
    pub location: Option<String>,
    pub courses: String,
    pub parent_id: Option<i64>,
    pub parent_name: String,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub created_at: String,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Age derived from the date of birth, falling back to the age recorded
    /// for students created without one.
    pub fn age_on(&self, today: NaiveDate) -> Option<i64> {
        self.date_of_birth
            .as_deref()
            .and_then(|dob| NaiveDate::parse_from_str(dob, "%Y-%m-%d").ok())
            .map(|dob| years_between(dob, today))
            .or(self.age)
    }

    pub fn contact(&self) -> String {
        self.parent_phone
            .clone()
            .or_else(|| self.parent_email.clone())
            .unwrap_or_default()
    }
}

pub fn years_between(born: NaiveDate, today: NaiveDate) -> i64 {
    let mut years = i64::from(today.year() - born.year());
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    years
}

/// Date portion of a `YYYY-MM-DD HH:MM:SS` timestamp.
pub fn date_part(timestamp: &str) -> String {
    timestamp.split([' ', 'T']).next().unwrap_or_default().to_string()
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub grade: Option<String>,
    pub location: Option<String>,
    pub courses: Vec<String>,
    pub parent: String,
    pub contact: String,
    pub join_date: String,
    pub status: String,
}

impl StudentSummary {
    pub fn from_student(student: Student, today: NaiveDate) -> Self {
        Self {
            id: student.id,
            name: student.full_name(),
            age: student.age_on(today),
            contact: student.contact(),
            courses: input::split_list(&student.courses),
            join_date: date_part(&student.created_at),
            grade: student.grade,
            location: student.location,
            parent: student.parent_name,
            status: "active".to_string(),
        }
    }
}

/// Entry of a course roster.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub age: Option<i64>,
    pub parent: String,
    pub contact: String,
}

impl RosterEntry {
    pub fn from_student(student: &Student, today: NaiveDate) -> Self {
        Self {
            id: student.id,
            name: student.full_name(),
            age: student.age_on(today),
            parent: student.parent_name.clone(),
            contact: student.contact(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub grade: Option<String>,
    pub location: Option<String>,
    pub courses: Option<ListInput>,
    pub parent_name: Option<String>,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_id_number: Option<String>,
    pub parent_id_type: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_info: Option<String>,
    pub notes: Option<String>,
}

/// A student ready to be inserted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub age: Option<i64>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub grade: Option<String>,
    pub location: Option<String>,
    pub courses: Vec<String>,
    pub parent_id: Option<i64>,
    pub parent_name: String,
    pub parent_email: Option<String>,
    pub parent_phone: Option<String>,
    pub parent_id_number: Option<String>,
    pub parent_id_type: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_info: Option<String>,
    pub notes: Option<String>,
}

impl NewStudentRequest {
    pub fn validate(self, today: NaiveDate) -> Result<NewStudent, ValidationError> {
        let date_of_birth = input::required_date(self.date_of_birth, "dateOfBirth")?;
        if date_of_birth > today {
            return Err(ValidationError::InvalidFormat {
                field: "dateOfBirth",
                reason: "cannot be in the future",
            });
        }

        Ok(NewStudent {
            first_name: input::required(self.first_name, "firstName")?,
            last_name: input::required(self.last_name, "lastName")?,
            date_of_birth: Some(date_of_birth),
            age: None,
            id_number: input::optional(self.id_number),
            id_type: input::optional(self.id_type),
            grade: Some(input::required(self.grade, "grade")?),
            location: Some(input::required(self.location, "location")?),
            courses: self.courses.map(ListInput::into_items).unwrap_or_default(),
            parent_id: None,
            parent_name: input::required(self.parent_name, "parentName")?,
            parent_email: input::optional(self.parent_email),
            parent_phone: Some(input::required(self.parent_phone, "parentPhone")?),
            parent_id_number: input::optional(self.parent_id_number),
            parent_id_type: input::optional(self.parent_id_type),
            address: input::optional(self.address),
            emergency_contact: input::optional(self.emergency_contact),
            medical_info: input::optional(self.medical_info),
            notes: input::optional(self.notes),
        })
    }
}
