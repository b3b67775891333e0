use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::input::join_list;
use crate::models::{NewStudent, Student};

const STUDENT_COLUMNS: &str = "id, first_name, last_name, date_of_birth, age, grade, location, \
     courses, parent_id, parent_name, parent_email, parent_phone, created_at";

pub async fn fetch_students(db: &SqlitePool) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students ORDER BY id"))
        .fetch_all(db)
        .await
}

pub async fn find_student_by_id(db: &SqlitePool, id: i64) -> Result<Option<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(&format!("SELECT {STUDENT_COLUMNS} FROM students WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_student<'e, E>(db: E, student: &NewStudent) -> Result<Student, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Student>(&format!(
        r#"
        INSERT INTO students
            (first_name, last_name, date_of_birth, age, id_number, id_type,
            grade, location, courses, parent_id, parent_name, parent_email,
            parent_phone, parent_id_number, parent_id_type, address,
            emergency_contact, medical_info, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)
        RETURNING {STUDENT_COLUMNS}
        "#
    ))
    .bind(&student.first_name)
    .bind(&student.last_name)
    .bind(student.date_of_birth.map(|d| d.format("%Y-%m-%d").to_string()))
    .bind(student.age)
    .bind(&student.id_number)
    .bind(&student.id_type)
    .bind(&student.grade)
    .bind(&student.location)
    .bind(join_list(&student.courses))
    .bind(student.parent_id)
    .bind(&student.parent_name)
    .bind(&student.parent_email)
    .bind(&student.parent_phone)
    .bind(&student.parent_id_number)
    .bind(&student.parent_id_type)
    .bind(&student.address)
    .bind(&student.emergency_contact)
    .bind(&student.medical_info)
    .bind(&student.notes)
    .fetch_one(db)
    .await
}

pub async fn delete_student(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

/// Students holding an active seat in the course.
pub async fn fetch_course_roster(db: &SqlitePool, course_id: i64) -> Result<Vec<Student>, sqlx::Error> {
    sqlx::query_as::<_, Student>(
        r#"
        SELECT s.id, s.first_name, s.last_name, s.date_of_birth, s.age, s.grade,
               s.location, s.courses, s.parent_id, s.parent_name, s.parent_email,
               s.parent_phone, s.created_at
        FROM students s
        JOIN student_course sc ON s.id = sc.student_id
        WHERE sc.course_id = ?1 AND sc.status = 'active'
        ORDER BY s.id
        "#,
    )
    .bind(course_id)
    .fetch_all(db)
    .await
}

pub async fn fetch_distinct_locations(db: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT location FROM students WHERE location IS NOT NULL AND location != '' ORDER BY location",
    )
    .fetch_all(db)
    .await
}

pub async fn fetch_distinct_grade_levels(db: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT DISTINCT grade FROM students WHERE grade IS NOT NULL AND grade != '' ORDER BY grade",
    )
    .fetch_all(db)
    .await
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::setup_test_db;

    pub(crate) fn new_student(first: &str, courses: &[&str]) -> NewStudent {
        NewStudent {
            first_name: first.to_string(),
            last_name: "Wong".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2017, 6, 15),
            grade: Some("Grade 2".to_string()),
            location: Some("Central".to_string()),
            courses: courses.iter().map(|c| c.to_string()).collect(),
            parent_name: "Sarah Wong".to_string(),
            parent_phone: Some("+852 9876 5432".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_and_fetch_student() {
        let pool = setup_test_db().await;

        let student = insert_student(&pool, &new_student("Emily", &["1", "2"]))
            .await
            .expect("Failed to insert student");
        assert_eq!(student.courses, "1,2");
        assert_eq!(student.date_of_birth.as_deref(), Some("2017-06-15"));

        let students = fetch_students(&pool).await.expect("Failed to fetch students");
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].id, student.id);
    }

    #[tokio::test]
    async fn test_delete_missing_student() {
        let pool = setup_test_db().await;
        insert_student(&pool, &new_student("Emily", &[]))
            .await
            .expect("Failed to insert student");

        let deleted = delete_student(&pool, 999).await.expect("Failed to delete");
        assert!(!deleted);
        assert_eq!(fetch_students(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_distinct_locations_and_grades() {
        let pool = setup_test_db().await;
        insert_student(&pool, &new_student("A", &[])).await.unwrap();
        insert_student(&pool, &new_student("B", &[])).await.unwrap();

        assert_eq!(fetch_distinct_locations(&pool).await.unwrap(), vec!["Central"]);
        assert_eq!(fetch_distinct_grade_levels(&pool).await.unwrap(), vec!["Grade 2"]);
    }
}
