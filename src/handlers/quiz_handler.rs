use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::{CatalogQuery, CreateQuizRequest},
    models::dto::response::{QuizCreatedResponse, QuizDetailResponse},
};

#[post("/api/quizzes")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, questions) = state
        .quiz_service
        .create_quiz(request.into_inner(), &auth.0.sub)
        .await?;

    Ok(HttpResponse::Created().json(QuizCreatedResponse {
        id: quiz.id,
        title: quiz.title,
        question_count: questions.len(),
    }))
}

#[get("/api/quizzes")]
pub async fn browse_quizzes(
    state: web::Data<AppState>,
    query: web::Query<CatalogQuery>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.browse(query.search.as_deref()).await?;
    Ok(HttpResponse::Ok().json(quizzes))
}

#[get("/api/quizzes/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let (quiz, questions) = state.quiz_service.get_quiz_with_questions(&id).await?;
    Ok(HttpResponse::Ok().json(QuizDetailResponse::from_parts(quiz, questions)))
}
