use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{Grade, NewGrade};

const GRADE_COLUMNS: &str =
    "id, date, course, course_id, type, title, student, student_id, score, max_score, feedback";

pub async fn fetch_grades(db: &SqlitePool) -> Result<Vec<Grade>, sqlx::Error> {
    sqlx::query_as::<_, Grade>(&format!(
        "SELECT {GRADE_COLUMNS} FROM grades ORDER BY date DESC, id DESC"
    ))
    .fetch_all(db)
    .await
}

pub async fn insert_grade<'e, E>(db: E, grade: &NewGrade) -> Result<Grade, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO grades
            (date, course, course_id, type, title, student, student_id,
            score, max_score, feedback)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING id
        "#,
    )
    .bind(&grade.date)
    .bind(&grade.course)
    .bind(grade.course_id)
    .bind(grade.grade_type)
    .bind(&grade.title)
    .bind(&grade.student)
    .bind(grade.student_id)
    .bind(grade.score)
    .bind(grade.max_score)
    .bind(&grade.feedback)
    .fetch_one(db)
    .await?;

    Ok(grade.clone().into_grade(id))
}
