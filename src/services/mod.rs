pub mod attempt_service;
pub mod dashboard_service;
pub mod quiz_service;
pub mod user_service;

pub use attempt_service::AttemptService;
pub use dashboard_service::DashboardService;
pub use quiz_service::QuizService;
pub use user_service::UserService;
