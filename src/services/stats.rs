use chrono::{Datelike, Duration, NaiveDateTime, Weekday};
use sqlx::SqlitePool;

use crate::db::stats::{self, Tally};
use crate::error::AppError;
use crate::models::{ChangeType, DashboardStats, StatCard};

const LOOKBACK_DAYS: i64 = 30;

/// Computes the admin dashboard cards relative to `now` (UTC, matching
/// the `created_at` timestamps).
pub async fn dashboard_stats(db: &SqlitePool, now: NaiveDateTime) -> Result<DashboardStats, AppError> {
    let cutoff = (now - Duration::days(LOOKBACK_DAYS))
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let (students, students_before) = tally(db, Tally::Students, &cutoff).await?;
    let (courses, courses_before) = tally(db, Tally::Courses, &cutoff).await?;
    let (teachers, teachers_before) = tally(db, Tally::Teachers, &cutoff).await?;

    let schedules = stats::fetch_course_schedules(db).await?;
    let today = now.date().weekday();

    Ok(DashboardStats {
        total_students: percent_card(students, students_before),
        active_courses: absolute_card(courses, courses_before),
        teachers: absolute_card(teachers, teachers_before),
        classes_today: absolute_card(classes_on(&schedules, today), classes_on(&schedules, today.pred())),
    })
}

async fn tally(db: &SqlitePool, tally: Tally, cutoff: &str) -> Result<(i64, i64), AppError> {
    let current = stats::count_rows(db, tally).await?;
    let previous = stats::count_rows_created_before(db, tally, cutoff).await?;
    Ok((current, previous))
}

/// Percent growth over `previous`, treating an empty baseline as one.
pub fn percent_card(current: i64, previous: i64) -> StatCard {
    let baseline = previous.max(1);
    let percent = ((current - previous) as f64 / baseline as f64 * 100.0).round() as i64;
    StatCard {
        value: current.to_string(),
        change: signed(percent, "%"),
        change_type: ChangeType::between(current, previous),
    }
}

pub fn absolute_card(current: i64, previous: i64) -> StatCard {
    StatCard {
        value: current.to_string(),
        change: signed(current - previous, ""),
        change_type: ChangeType::between(current, previous),
    }
}

fn signed(delta: i64, suffix: &str) -> String {
    if delta > 0 {
        format!("+{}{}", delta, suffix)
    } else {
        format!("{}{}", delta, suffix)
    }
}

/// Number of schedules naming the weekday, either abbreviated ("Mon") or
/// in full ("Monday"), case-insensitively.
pub fn classes_on(schedules: &[String], day: Weekday) -> i64 {
    let short = day.to_string().to_ascii_lowercase();
    let full = full_day_name(day);
    schedules
        .iter()
        .filter(|schedule| {
            schedule
                .split(|c: char| !c.is_alphabetic())
                .map(str::to_ascii_lowercase)
                .any(|token| token == short || token == full)
        })
        .count() as i64
}

fn full_day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}
