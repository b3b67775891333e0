use sqlx::SqlitePool;

/// Tables tracked on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tally {
    Students,
    Courses,
    Teachers,
}

impl Tally {
    fn table(self) -> &'static str {
        match self {
            Tally::Students => "students",
            Tally::Courses => "courses",
            Tally::Teachers => "teachers",
        }
    }
}

pub async fn count_rows(db: &SqlitePool, tally: Tally) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", tally.table()))
        .fetch_one(db)
        .await
}

/// Rows created strictly before `cutoff` (`YYYY-MM-DD HH:MM:SS`, UTC).
pub async fn count_rows_created_before(
    db: &SqlitePool,
    tally: Tally,
    cutoff: &str,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(&format!(
        "SELECT COUNT(*) FROM {} WHERE created_at < ?",
        tally.table()
    ))
    .bind(cutoff)
    .fetch_one(db)
    .await
}

pub async fn fetch_course_schedules(db: &SqlitePool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT schedule FROM courses")
        .fetch_all(db)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::courses::{insert_course, tests::new_course};
    use crate::db::setup_test_db;

    #[tokio::test]
    async fn test_counts_respect_cutoff() {
        let pool = setup_test_db().await;
        insert_course(&pool, &new_course("A", 5), "T").await.unwrap();
        insert_course(&pool, &new_course("B", 5), "T").await.unwrap();

        assert_eq!(count_rows(&pool, Tally::Courses).await.unwrap(), 2);
        assert_eq!(count_rows(&pool, Tally::Students).await.unwrap(), 0);

        let past = count_rows_created_before(&pool, Tally::Courses, "2000-01-01 00:00:00")
            .await
            .expect("Failed to count");
        assert_eq!(past, 0);
        let future = count_rows_created_before(&pool, Tally::Courses, "9999-01-01 00:00:00")
            .await
            .unwrap();
        assert_eq!(future, 2);

        let schedules = fetch_course_schedules(&pool).await.unwrap();
        assert_eq!(schedules, vec!["Mon, Wed, Fri".to_string(); 2]);
    }
}
