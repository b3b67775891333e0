use sqlx::{Executor, Sqlite, SqlitePool};

use crate::models::{Course, CourseName, CourseWithCount, NewCourse};

const COURSE_COLUMNS: &str = "id, name, level, age_range, location, schedule, time, teacher, \
     max_students, fee, description, created_at";

/// Courses with the number of students whose comma-joined `courses` field
/// lists the course id as a whole element.
pub async fn fetch_courses_with_counts(db: &SqlitePool) -> Result<Vec<CourseWithCount>, sqlx::Error> {
    sqlx::query_as::<_, CourseWithCount>(
        r#"
        SELECT
            c.id, c.name, c.level, c.age_range, c.location, c.schedule, c.time,
            c.teacher, c.max_students, c.fee, c.description, c.created_at,
            (
                SELECT COUNT(*)
                FROM students s
                WHERE (',' || REPLACE(s.courses, ' ', '') || ',') LIKE ('%,' || c.id || ',%')
            ) AS enrolled_students
        FROM courses c
        ORDER BY c.id
        "#,
    )
    .fetch_all(db)
    .await
}

pub async fn find_course_by_id<'e, E>(db: E, id: i64) -> Result<Option<Course>, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, Course>(&format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = ?"))
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn insert_course(
    db: &SqlitePool,
    course: &NewCourse,
    teacher_name: &str,
) -> Result<Course, sqlx::Error> {
    sqlx::query_as::<_, Course>(&format!(
        r#"
        INSERT INTO courses
            (name, level, age_range, location, schedule, time, teacher,
            max_students, fee, description)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING {COURSE_COLUMNS}
        "#
    ))
    .bind(&course.name)
    .bind(&course.level)
    .bind(&course.age_range)
    .bind(&course.location)
    .bind(&course.schedule)
    .bind(&course.time)
    .bind(teacher_name)
    .bind(course.max_students)
    .bind(&course.fee)
    .bind(&course.description)
    .fetch_one(db)
    .await
}

pub async fn delete_course(db: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM courses WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?
        .rows_affected();

    Ok(result > 0)
}

pub async fn fetch_course_names(db: &SqlitePool) -> Result<Vec<CourseName>, sqlx::Error> {
    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM courses ORDER BY id")
        .fetch_all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| CourseName {
            id: id.to_string(),
            name,
        })
        .collect())
}

/// Number of active seats taken in the course.
pub async fn count_active_seats<'e, E>(db: E, course_id: i64) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM student_course WHERE course_id = ? AND status = 'active'",
    )
    .bind(course_id)
    .fetch_one(db)
    .await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::setup_test_db;
    use crate::db::students::insert_student;
    use crate::models::NewStudent;

    pub(crate) fn new_course(name: &str, max_students: i64) -> NewCourse {
        NewCourse {
            name: name.to_string(),
            level: "Beginner".to_string(),
            age_range: "5-7".to_string(),
            location: "Room 101".to_string(),
            schedule: "Mon, Wed, Fri".to_string(),
            time: "10:00 AM - 11:00 AM".to_string(),
            teacher_id: None,
            max_students,
            fee: "1200".to_string(),
            description: "Letters and sounds".to_string(),
        }
    }

    fn student_in(courses: &[i64]) -> NewStudent {
        NewStudent {
            first_name: "Kid".to_string(),
            last_name: "Lee".to_string(),
            parent_name: "Parent Lee".to_string(),
            courses: courses.iter().map(|c| c.to_string()).collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_legacy_enrolled_counts_with_overlap() {
        let pool = setup_test_db().await;

        let mut ids = Vec::new();
        for i in 0..11 {
            let course = insert_course(&pool, &new_course(&format!("Course {}", i), 10), "")
                .await
                .expect("Failed to insert course");
            ids.push(course.id);
        }
        let (first, second, eleventh) = (ids[0], ids[1], ids[10]);
        assert_eq!(eleventh, 11);

        insert_student(&pool, &student_in(&[first, second])).await.unwrap();
        insert_student(&pool, &student_in(&[second])).await.unwrap();
        insert_student(&pool, &student_in(&[eleventh])).await.unwrap();
        insert_student(&pool, &student_in(&[])).await.unwrap();

        let counts: std::collections::HashMap<i64, i64> = fetch_courses_with_counts(&pool)
            .await
            .expect("Failed to fetch courses")
            .into_iter()
            .map(|c| (c.course.id, c.enrolled_students))
            .collect();

        assert_eq!(counts[&first], 1);
        assert_eq!(counts[&second], 2);
        assert_eq!(counts[&eleventh], 1);
        assert_eq!(counts[&ids[2]], 0);
    }

    #[tokio::test]
    async fn test_course_names_use_string_ids() {
        let pool = setup_test_db().await;
        insert_course(&pool, &new_course("Young Readers", 5), "Grace Ho")
            .await
            .unwrap();

        let names = fetch_course_names(&pool).await.unwrap();
        assert_eq!(names, vec![CourseName { id: "1".into(), name: "Young Readers".into() }]);
    }

    #[tokio::test]
    async fn test_zero_capacity_rejected_by_schema() {
        let pool = setup_test_db().await;
        let result = insert_course(&pool, &new_course("Broken", 0), "").await;
        assert!(result.is_err());
    }
}
