use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{EnrolledCourse, Enrollment};

pub async fn has_active_enrollment<'e, E>(db: E, course_id: i64, parent_id: i64) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, bool>(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM enrollments
            WHERE course_id = ? AND parent_id = ? AND status = 'active'
        )
        "#,
    )
    .bind(course_id)
    .bind(parent_id)
    .fetch_one(db)
    .await
}

/// Inserts an active enrollment only while the course still has a free seat
/// and the parent holds no active enrollment for it. Returns `None` when
/// either condition stopped the insert.
pub async fn insert_enrollment<'e, E>(
    db: E,
    parent_id: i64,
    course_id: i64,
    student_id: i64,
    enrollment_date: &str,
) -> Result<Option<i64>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO enrollments (parent_id, course_id, student_id, status, enrollment_date)
        SELECT ?1, ?2, ?3, 'active', ?4
        WHERE (
            SELECT COUNT(*) FROM student_course
            WHERE course_id = ?2 AND status = 'active'
        ) < (SELECT max_students FROM courses WHERE id = ?2)
        AND NOT EXISTS (
            SELECT 1 FROM enrollments
            WHERE parent_id = ?1 AND course_id = ?2 AND status = 'active'
        )
        RETURNING id
        "#,
    )
    .bind(parent_id)
    .bind(course_id)
    .bind(student_id)
    .bind(enrollment_date)
    .fetch_optional(db)
    .await
}

/// Takes a seat for the student, reactivating a previously cancelled one.
pub async fn upsert_student_course<'e, E>(db: E, student_id: i64, course_id: i64) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO student_course (student_id, course_id, status)
        VALUES (?, ?, 'active')
        ON CONFLICT (student_id, course_id) DO UPDATE SET status = 'active'
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .execute(db)
    .await?;

    Ok(())
}

/// Flags an active enrollment as cancelled and returns it, or `None` if
/// no active enrollment has this id.
pub async fn mark_enrollment_cancelled<'e, E>(db: E, id: i64) -> Result<Option<Enrollment>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Enrollment>(
        r#"
        UPDATE enrollments SET status = 'cancelled'
        WHERE id = ? AND status = 'active'
        RETURNING id, parent_id, course_id, student_id, status, enrollment_date
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await
}

/// Frees the student's seat unless another active enrollment still holds it.
pub async fn release_student_course<'e, E>(db: E, student_id: i64, course_id: i64) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        UPDATE student_course SET status = 'cancelled'
        WHERE student_id = ?1 AND course_id = ?2
        AND NOT EXISTS (
            SELECT 1 FROM enrollments
            WHERE student_id = ?1 AND course_id = ?2 AND status = 'active'
        )
        "#,
    )
    .bind(student_id)
    .bind(course_id)
    .execute(db)
    .await?;

    Ok(())
}

pub async fn fetch_active_enrollments_for_parent(
    db: &SqlitePool,
    parent_id: i64,
) -> Result<Vec<EnrolledCourse>, sqlx::Error> {
    sqlx::query_as::<_, EnrolledCourse>(
        r#"
        SELECT c.id AS course_id, c.name, c.location, c.teacher, c.time, e.enrollment_date
        FROM enrollments e
        JOIN courses c ON c.id = e.course_id
        WHERE e.parent_id = ? AND e.status = 'active'
        ORDER BY e.enrollment_date, c.id
        "#,
    )
    .bind(parent_id)
    .fetch_all(db)
    .await
}
