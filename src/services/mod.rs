pub mod auth;
pub mod enrollment;
pub mod password;
pub mod stats;

pub use enrollment::EnrollmentService;
