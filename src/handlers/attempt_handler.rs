use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::SubmitAttemptRequest,
    models::dto::response::SubmitAttemptResponse,
};

#[post("/api/quizzes/{id}/attempts")]
pub async fn submit_attempt(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<SubmitAttemptRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let attempt = state
        .attempt_service
        .submit(&id, &auth.0.sub, request.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(SubmitAttemptResponse::from(&attempt)))
}

#[get("/api/attempts/{id}")]
pub async fn get_results(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let results = state.attempt_service.results(&id, &auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(results))
}
