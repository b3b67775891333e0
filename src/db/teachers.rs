use sqlx::SqlitePool;

use crate::models::input::join_list;
use crate::models::{NewTeacher, Teacher};

const TEACHER_COLUMNS: &str = "id, first_name, last_name, email, phone, location, courses, \
     qualifications, experience, join_date, languages, bio, created_at";

pub async fn fetch_teachers(db: &SqlitePool) -> Result<Vec<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id"))
        .fetch_all(db)
        .await
}

pub async fn find_teacher_by_id(db: &SqlitePool, id: i64) -> Result<Option<Teacher>, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!("SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_teacher(db: &SqlitePool, teacher: &NewTeacher) -> Result<Teacher, sqlx::Error> {
    sqlx::query_as::<_, Teacher>(&format!(
        r#"
        INSERT INTO teachers
            (first_name, last_name, email, phone, id_number, id_type, location,
            courses, qualifications, experience, join_date, languages, bio)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
        RETURNING {TEACHER_COLUMNS}
        "#
    ))
    .bind(&teacher.first_name)
    .bind(&teacher.last_name)
    .bind(&teacher.email)
    .bind(&teacher.phone)
    .bind(&teacher.id_number)
    .bind(&teacher.id_type)
    .bind(&teacher.location)
    .bind(join_list(&teacher.courses))
    .bind(join_list(&teacher.qualifications))
    .bind(&teacher.experience)
    .bind(teacher.join_date.format("%Y-%m-%d").to_string())
    .bind(join_list(&teacher.languages))
    .bind(&teacher.bio)
    .fetch_one(db)
    .await
}

pub async fn delete_teacher(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM teachers WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}
