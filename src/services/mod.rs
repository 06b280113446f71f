pub mod admin_service;
pub mod enroll_service;
pub mod stats_service;

pub use admin_service::AdminService;
pub use enroll_service::{EnrollmentRequest, submit_enrollment};
pub use stats_service::{DEFAULT_RECENT_LIMIT, StatKind, StatsReport, StatsService};
