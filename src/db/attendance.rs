use sqlx::{Executor, QueryBuilder, Sqlite, SqlitePool};

use crate::models::{AttendanceFilter, AttendanceRecord, NewAttendance};

const ATTENDANCE_COLUMNS: &str = "id, date, course_id, course_name, student_id, student_name, \
     status, arrival_time, leaving_time, notes";

pub async fn fetch_attendance(
    db: &SqlitePool,
    filter: &AttendanceFilter,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {ATTENDANCE_COLUMNS} FROM attendance WHERE 1=1"
    ));
    if let Some(course_id) = filter.course_id {
        builder.push(" AND course_id = ");
        builder.push_bind(course_id);
    }
    if let Some(student_id) = filter.student_id {
        builder.push(" AND student_id = ");
        builder.push_bind(student_id);
    }
    if let Some(from) = filter.date_from {
        builder.push(" AND date >= ");
        builder.push_bind(from.format("%Y-%m-%d").to_string());
    }
    if let Some(to) = filter.date_to {
        builder.push(" AND date <= ");
        builder.push_bind(to.format("%Y-%m-%d").to_string());
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ");
        builder.push_bind(status.as_str());
    }
    builder.push(" ORDER BY date DESC, id DESC");

    let rows = builder
        .build_query_as::<AttendanceRecord>()
        .fetch_all(db)
        .await?;

    Ok(rows)
}

/// Inserts the record, or updates status, times and notes of the record
/// already stored for the same date, course and student.
pub async fn upsert_attendance<'e, E>(db: E, record: &NewAttendance) -> Result<AttendanceRecord, sqlx::Error>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, AttendanceRecord>(&format!(
        r#"
        INSERT INTO attendance
            (date, course_id, course_name, student_id, student_name,
            status, arrival_time, leaving_time, notes)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        ON CONFLICT (date, course_id, student_id) DO UPDATE SET
            status = excluded.status,
            arrival_time = excluded.arrival_time,
            leaving_time = excluded.leaving_time,
            notes = excluded.notes
        RETURNING {ATTENDANCE_COLUMNS}
        "#
    ))
    .bind(&record.date)
    .bind(record.course_id)
    .bind(&record.course_name)
    .bind(record.student_id)
    .bind(&record.student_name)
    .bind(record.status)
    .bind(&record.arrival_time)
    .bind(&record.leaving_time)
    .bind(&record.notes)
    .fetch_one(db)
    .await
}
