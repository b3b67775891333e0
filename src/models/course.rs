use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::input::{self, Numeric};
use super::ValidationError;

#[derive(Debug, Clone, FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub age_range: String,
    pub location: String,
    pub schedule: String,
    pub time: String,
    pub teacher: String,
    pub max_students: i64,
    pub fee: String,
    pub description: String,
    pub created_at: String,
}

/// Course row joined with its legacy enrolled-student count.
#[derive(Debug, Clone, FromRow)]
pub struct CourseWithCount {
    #[sqlx(flatten)]
    pub course: Course,
    pub enrolled_students: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummary {
    pub id: i64,
    pub name: String,
    pub level: String,
    pub age_range: String,
    pub location: String,
    pub schedule: String,
    pub time: String,
    pub teacher: String,
    pub enrolled_students: i64,
    pub max_students: i64,
    pub fee: String,
    pub status: String,
}

impl CourseSummary {
    pub fn new(course: Course, enrolled_students: i64) -> Self {
        Self {
            id: course.id,
            name: course.name,
            level: course.level,
            age_range: course.age_range,
            location: course.location,
            schedule: course.schedule,
            time: course.time,
            teacher: course.teacher,
            enrolled_students,
            max_students: course.max_students,
            fee: course.fee,
            status: "active".to_string(),
        }
    }
}

impl From<CourseWithCount> for CourseSummary {
    fn from(row: CourseWithCount) -> Self {
        CourseSummary::new(row.course, row.enrolled_students)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CourseName {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourseRequest {
    pub name: Option<String>,
    pub level: Option<String>,
    pub age_range: Option<String>,
    pub location: Option<String>,
    pub schedule: Option<String>,
    pub time: Option<String>,
    /// Id of the teaching teacher; stored as the teacher's display name.
    pub teacher: Option<Numeric>,
    pub max_students: Option<Numeric>,
    pub fee: Option<Numeric>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub name: String,
    pub level: String,
    pub age_range: String,
    pub location: String,
    pub schedule: String,
    pub time: String,
    pub teacher_id: Option<i64>,
    pub max_students: i64,
    pub fee: String,
    pub description: String,
}

impl NewCourseRequest {
    pub fn validate(self) -> Result<NewCourse, ValidationError> {
        let max_students = input::required_id(self.max_students.as_ref(), "maxStudents")?;
        if max_students < 1 {
            return Err(ValidationError::OutOfRange { field: "maxStudents", min: 1 });
        }
        let teacher_id = match &self.teacher {
            Some(Numeric::Text(s)) if s.trim().is_empty() => None,
            Some(t) => Some(t.to_i64("teacher")?),
            None => None,
        };
        let fee = self
            .fee
            .map(|f| f.to_text())
            .filter(|f| !f.is_empty())
            .ok_or(ValidationError::Missing { field: "fee" })?;

        Ok(NewCourse {
            name: input::required(self.name, "name")?,
            level: input::required(self.level, "level")?,
            age_range: input::required(self.age_range, "ageRange")?,
            location: input::required(self.location, "location")?,
            schedule: input::required(self.schedule, "schedule")?,
            time: input::required(self.time, "time")?,
            teacher_id,
            max_students,
            fee,
            description: input::required(self.description, "description")?,
        })
    }
}
