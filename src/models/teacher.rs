use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, ListInput, Numeric};
use super::student::date_part;
use super::ValidationError;

#[derive(Debug, Clone, FromRow)]
pub struct Teacher {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub courses: String,
    pub qualifications: String,
    pub experience: String,
    pub join_date: String,
    pub languages: String,
    pub bio: Option<String>,
    pub created_at: String,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    pub id: i64,
    pub name: String,
    pub location: String,
    pub courses: Vec<String>,
    pub experience: String,
    pub qualifications: Vec<String>,
    pub contact: String,
    pub join_date: String,
    pub status: String,
}

impl From<Teacher> for TeacherSummary {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            name: t.full_name(),
            courses: input::split_list(&t.courses),
            qualifications: input::split_list(&t.qualifications),
            join_date: date_part(&t.join_date),
            location: t.location,
            experience: t.experience,
            contact: t.phone,
            status: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTeacherRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub id_number: Option<String>,
    pub id_type: Option<String>,
    pub location: Option<String>,
    pub courses: Option<ListInput>,
    pub qualifications: Option<ListInput>,
    pub experience: Option<Numeric>,
    pub join_date: Option<String>,
    pub languages: Option<ListInput>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub id_number: String,
    pub id_type: String,
    pub location: String,
    pub courses: Vec<String>,
    pub qualifications: Vec<String>,
    pub experience: String,
    pub join_date: NaiveDate,
    pub languages: Vec<String>,
    pub bio: Option<String>,
}

impl NewTeacherRequest {
    pub fn validate(self) -> Result<NewTeacher, ValidationError> {
        let experience = self
            .experience
            .map(|e| e.to_text())
            .filter(|e| !e.is_empty())
            .ok_or(ValidationError::Missing { field: "experience" })?;
        let languages = self.languages.map(ListInput::into_items).unwrap_or_default();
        if languages.is_empty() {
            return Err(ValidationError::Missing { field: "languages" });
        }
        let email = input::required(self.email, "email")?;
        if !email.contains('@') {
            return Err(ValidationError::InvalidFormat {
                field: "email",
                reason: "expected an email address",
            });
        }

        Ok(NewTeacher {
            first_name: input::required(self.first_name, "firstName")?,
            last_name: input::required(self.last_name, "lastName")?,
            email,
            phone: input::required(self.phone, "phone")?,
            id_number: input::required(self.id_number, "idNumber")?,
            id_type: input::required(self.id_type, "idType")?,
            location: input::required(self.location, "location")?,
            courses: self.courses.map(ListInput::into_items).unwrap_or_default(),
            qualifications: self.qualifications.map(ListInput::into_items).unwrap_or_default(),
            experience,
            join_date: input::required_date(self.join_date, "joinDate")?,
            languages,
            bio: input::optional(self.bio),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_splits_lists() {
        let teacher = Teacher {
            id: 3,
            first_name: "Grace".into(),
            last_name: "Ho".into(),
            email: "grace@example.com".into(),
            phone: "+852 5555 0000".into(),
            location: "Central".into(),
            courses: "1,2".into(),
            qualifications: "B.Ed,TEFL".into(),
            experience: "5 years".into(),
            join_date: "2023-09-01".into(),
            languages: "English,Cantonese".into(),
            bio: None,
            created_at: "2023-09-01 00:00:00".into(),
        };
        let summary = TeacherSummary::from(teacher);
        assert_eq!(summary.name, "Grace Ho");
        assert_eq!(summary.qualifications, vec!["B.Ed", "TEFL"]);
        assert_eq!(summary.contact, "+852 5555 0000");
        assert_eq!(summary.join_date, "2023-09-01");
    }

    #[test]
    fn test_validate_requires_languages() {
        let req = NewTeacherRequest {
            first_name: Some("Grace".into()),
            last_name: Some("Ho".into()),
            email: Some("grace@example.com".into()),
            phone: Some("123".into()),
            id_number: Some("A123".into()),
            id_type: Some("hkid".into()),
            location: Some("Central".into()),
            experience: Some(Numeric::Int(5)),
            join_date: Some("2023-09-01".into()),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap_err(), ValidationError::Missing { field: "languages" });
    }
}
