use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::{accounts, courses, enrollments, students};
use crate::error::AppError;
use crate::models::{Account, EnrollCommand, EnrollResponse, Enrollment, NewStudent};

const UNKNOWN_CHILD: &str = "Unknown Child";

pub struct EnrollmentService {
    db: SqlitePool,
}

impl EnrollmentService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Enrolls the parent's child in a course.
    ///
    /// Capacity and duplicate checks run inside the same transaction as the
    /// writes and are asserted again by the guarded insert. When no student
    /// id is given a student is created from the parent's child profile.
    pub async fn enroll(&self, cmd: EnrollCommand, today: NaiveDate) -> Result<EnrollResponse, AppError> {
        info!(
            "Enrolling parent {} in course {} (student {:?})",
            cmd.parent_id, cmd.course_id, cmd.student_id
        );
        let mut tx = self.db.begin().await?;

        let course = courses::find_course_by_id(&mut *tx, cmd.course_id)
            .await?
            .ok_or(AppError::NotFound("course"))?;

        let taken = courses::count_active_seats(&mut *tx, course.id).await?;
        if taken >= course.max_students {
            warn!("Course {} is full ({}/{})", course.id, taken, course.max_students);
            return Err(AppError::conflict("course is full"));
        }

        if enrollments::has_active_enrollment(&mut *tx, course.id, cmd.parent_id).await? {
            return Err(AppError::conflict("already enrolled"));
        }

        let (student_id, student_created) = match cmd.student_id {
            Some(id) => (id, false),
            None => {
                let parent = accounts::find_parent(&mut *tx, cmd.parent_id)
                    .await?
                    .ok_or(AppError::NotFound("parent"))?;
                let student = students::insert_student(&mut *tx, &child_of(&parent, course.id)).await?;
                info!("Created student {} for parent {}", student.id, parent.id);
                (student.id, true)
            }
        };

        let enrollment_date = today.format("%Y-%m-%d").to_string();
        let enrollment_id = enrollments::insert_enrollment(
            &mut *tx,
            cmd.parent_id,
            course.id,
            student_id,
            &enrollment_date,
        )
        .await
        .map_err(|e| AppError::from_unique_violation(e, "already enrolled"))?
        .ok_or_else(|| AppError::conflict("course is full or already enrolled"))?;

        enrollments::upsert_student_course(&mut *tx, student_id, course.id).await?;

        tx.commit().await?;
        info!("Enrollment {} created for student {}", enrollment_id, student_id);

        Ok(EnrollResponse {
            message: "Enrollment successful".to_string(),
            enrollment_id,
            student_id,
            student_created,
        })
    }

    /// Cancels an active enrollment and frees its seat.
    pub async fn cancel(&self, enrollment_id: i64) -> Result<Enrollment, AppError> {
        let mut tx = self.db.begin().await?;

        let enrollment = enrollments::mark_enrollment_cancelled(&mut *tx, enrollment_id)
            .await?
            .ok_or(AppError::NotFound("enrollment"))?;
        enrollments::release_student_course(&mut *tx, enrollment.student_id, enrollment.course_id).await?;

        tx.commit().await?;
        info!("Enrollment {} cancelled", enrollment_id);

        Ok(enrollment)
    }
}

fn child_of(parent: &Account, course_id: i64) -> NewStudent {
    let first_name = parent
        .child_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_CHILD)
        .to_string();

    NewStudent {
        first_name,
        last_name: parent.last_name.clone(),
        age: parent.child_age,
        courses: vec![course_id.to_string()],
        parent_id: Some(parent.id),
        parent_name: parent.full_name(),
        parent_email: Some(parent.email.clone()),
        ..Default::default()
    }
}
