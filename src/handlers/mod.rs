pub mod attempt_handler;
pub mod auth_handler;
pub mod dashboard_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use attempt_handler::{get_results, submit_attempt};
pub use auth_handler::{login, logout, refresh_token, register};
pub use dashboard_handler::dashboard_overview;
pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{browse_quizzes, create_quiz, get_quiz};
