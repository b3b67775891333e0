use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, Numeric};
use super::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum GradeType {
    Quiz,
    Exam,
    Assignment,
    Homework,
}

impl GradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeType::Quiz => "quiz",
            GradeType::Exam => "exam",
            GradeType::Assignment => "assignment",
            GradeType::Homework => "homework",
        }
    }
}

impl fmt::Display for GradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GradeType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiz" => Ok(GradeType::Quiz),
            "exam" => Ok(GradeType::Exam),
            "assignment" => Ok(GradeType::Assignment),
            "homework" => Ok(GradeType::Homework),
            _ => Err(ValidationError::InvalidVariant {
                field: "type",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    pub id: i64,
    pub date: String,
    pub course: String,
    pub course_id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub grade_type: GradeType,
    pub title: String,
    pub student: String,
    pub student_id: i64,
    pub score: i64,
    pub max_score: i64,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGradeRequest {
    pub date: Option<String>,
    pub course: Option<String>,
    pub course_id: Option<Numeric>,
    #[serde(rename = "type")]
    pub grade_type: Option<String>,
    pub title: Option<String>,
    pub student: Option<String>,
    pub student_id: Option<Numeric>,
    pub score: Option<Numeric>,
    pub max_score: Option<Numeric>,
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGrade {
    pub date: String,
    pub course: String,
    pub course_id: i64,
    pub grade_type: GradeType,
    pub title: String,
    pub student: String,
    pub student_id: i64,
    pub score: i64,
    pub max_score: i64,
    pub feedback: Option<String>,
}

impl NewGradeRequest {
    /// A score of zero is a valid grade; only an absent score is rejected.
    pub fn validate(self) -> Result<NewGrade, ValidationError> {
        let date = input::required_date(self.date, "date")?;
        let grade_type: GradeType = input::required(self.grade_type, "type")?.parse()?;
        let score = input::required_id(self.score.as_ref(), "score")?;
        if score < 0 {
            return Err(ValidationError::OutOfRange { field: "score", min: 0 });
        }
        let max_score = input::required_id(self.max_score.as_ref(), "maxScore")?;
        if max_score < 1 {
            return Err(ValidationError::OutOfRange { field: "maxScore", min: 1 });
        }

        Ok(NewGrade {
            date: date.format("%Y-%m-%d").to_string(),
            course: input::required(self.course, "course")?,
            course_id: input::required_id(self.course_id.as_ref(), "courseId")?,
            grade_type,
            title: input::required(self.title, "title")?,
            student: input::required(self.student, "student")?,
            student_id: input::required_id(self.student_id.as_ref(), "studentId")?,
            score,
            max_score,
            feedback: input::optional(self.feedback),
        })
    }
}

impl NewGrade {
    pub fn into_grade(self, id: i64) -> Grade {
        Grade {
            id,
            date: self.date,
            course: self.course,
            course_id: self.course_id,
            grade_type: self.grade_type,
            title: self.title,
            student: self.student,
            student_id: self.student_id,
            score: self.score,
            max_score: self.max_score,
            feedback: self.feedback,
        }
    }
}
