use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        AnswerRepository, AttemptRepository, MongoAnswerRepository, MongoAttemptRepository,
        MongoQuestionRepository, MongoQuizRepository, MongoRefreshTokenRepository,
        MongoUserRepository, QuestionRepository, QuizRepository, RefreshTokenRepository,
        UserRepository,
    },
    services::{AttemptService, DashboardService, QuizService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub user_service: Arc<UserService>,
    pub quiz_service: Arc<QuizService>,
    pub attempt_service: Arc<AttemptService>,
    pub dashboard_service: Arc<DashboardService>,
    pub refresh_tokens: Arc<dyn RefreshTokenRepository>,
    pub jwt_service: JwtService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let users = Arc::new(MongoUserRepository::new(&db));
        users.ensure_indexes().await?;

        let quizzes = Arc::new(MongoQuizRepository::new(&db));
        quizzes.ensure_indexes().await?;

        let questions = Arc::new(MongoQuestionRepository::new(&db));
        questions.ensure_indexes().await?;

        let attempts = Arc::new(MongoAttemptRepository::new(&db));
        attempts.ensure_indexes().await?;

        let answers = Arc::new(MongoAnswerRepository::new(&db));
        answers.ensure_indexes().await?;

        let refresh_tokens = Arc::new(MongoRefreshTokenRepository::new(&db));
        refresh_tokens.ensure_indexes().await?;
        let removed = refresh_tokens.delete_expired().await?;
        if removed > 0 {
            log::info!("Removed {} expired refresh tokens", removed);
        }

        let jwt_service = JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        );

        Ok(Self {
            user_service: Arc::new(UserService::new(users.clone())),
            quiz_service: Arc::new(QuizService::new(
                quizzes.clone(),
                questions.clone(),
                users,
            )),
            attempt_service: Arc::new(AttemptService::new(
                quizzes.clone(),
                questions,
                attempts.clone(),
                answers,
            )),
            dashboard_service: Arc::new(DashboardService::new(quizzes, attempts)),
            refresh_tokens,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}
