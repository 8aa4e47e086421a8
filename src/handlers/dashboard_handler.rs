use actix_web::{get, web, HttpResponse};

use crate::{app_state::AppState, auth::AuthenticatedUser, errors::AppError};

#[get("/api/dashboard")]
pub async fn dashboard_overview(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let overview = state.dashboard_service.overview(&auth.0.sub).await?;
    Ok(HttpResponse::Ok().json(overview))
}
