pub mod answer;
pub mod attempt;
pub mod question;
pub mod quiz;
pub mod refresh_token;
pub mod user;

pub use answer::Answer;
pub use attempt::Attempt;
pub use question::{Question, QuestionKind};
pub use quiz::Quiz;
pub use refresh_token::RefreshToken;
pub use user::User;
