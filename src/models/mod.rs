pub mod account;
pub mod attendance;
pub mod course;
pub mod enrollment;
pub mod grade;
pub mod input;
pub mod stats;
pub mod student;
pub mod teacher;
pub mod validation;

pub use account::{Account, AuthResponse, Credentials, LoginRequest, NewAccount, SignupRequest, UserProfile, UserType};
pub use attendance::{
    AttendanceFilter, AttendancePayload, AttendanceQuery, AttendanceRecord, AttendanceStatus,
    AttendanceSubmitted, NewAttendance,
};
pub use course::{Course, CourseName, CourseSummary, CourseWithCount, NewCourse, NewCourseRequest};
pub use enrollment::{
    CalendarEvent, EnrollCommand, EnrollRequest, EnrollResponse, EnrolledCourse, Enrollment,
    EnrollmentStatus, UserEnrollmentsQuery,
};
pub use grade::{Grade, GradeType, NewGrade, NewGradeRequest};
pub use stats::{ChangeType, DashboardStats, Location, StatCard};
pub use student::{NewStudent, NewStudentRequest, RosterEntry, Student, StudentSummary};
pub use teacher::{NewTeacher, NewTeacherRequest, Teacher, TeacherSummary};
pub use validation::ValidationError;
