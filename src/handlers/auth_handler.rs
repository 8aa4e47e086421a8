use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::{AppError, AppResult},
    models::domain::{refresh_token::hash_token, RefreshToken, User},
    models::dto::request::{LoginRequest, RefreshTokenRequest, RegisterRequest},
    models::dto::response::{AuthResponse, RefreshTokenResponse},
};

/// Registration signs the caller in: the response carries a token pair.
#[post("/api/auth/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state.user_service.register(request.into_inner()).await?;
    let response = issue_token_pair(&state, &user).await?;

    log::info!("Registered new user {}", response.username);
    Ok(HttpResponse::Created().json(response))
}

#[post("/api/auth/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = state
        .user_service
        .authenticate(request.into_inner())
        .await?;
    let response = issue_token_pair(&state, &user).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Exchange a refresh token for a fresh pair. The presented token is
/// revoked on success, so each refresh token works exactly once.
#[post("/api/auth/refresh")]
pub async fn refresh_token(
    state: web::Data<AppState>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    let claims = state
        .jwt_service
        .validate_refresh_token(&request.refresh_token)?;

    let hash = hash_token(&request.refresh_token);
    let stored = state
        .refresh_tokens
        .find_by_token_hash(&hash)
        .await?
        .filter(RefreshToken::is_valid)
        .ok_or_else(|| AppError::Unauthorized("Refresh token is revoked or unknown".to_string()))?;

    state
        .refresh_tokens
        .revoke_by_token_hash(&stored.token_hash)
        .await?;

    let user = state.user_service.get_user(&claims.sub).await.map_err(|_| {
        AppError::Unauthorized("User associated with refresh token not found".to_string())
    })?;

    let pair = issue_token_pair(&state, &user).await?;
    Ok(HttpResponse::Ok().json(RefreshTokenResponse {
        token: pair.token,
        refresh_token: pair.refresh_token,
    }))
}

/// Sign-out invalidates the session server-side by revoking every refresh
/// token the user holds.
#[post("/api/auth/logout")]
pub async fn logout(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let revoked = state.refresh_tokens.revoke_all_for_user(&auth.0.sub).await?;

    log::info!(
        "User {} signed out, revoked {} refresh tokens",
        auth.0.username,
        revoked
    );
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Signed out" })))
}

async fn issue_token_pair(state: &AppState, user: &User) -> AppResult<AuthResponse> {
    let token = state.jwt_service.create_token(user)?;
    let refresh = state.jwt_service.create_refresh_token(&user.id)?;

    state
        .refresh_tokens
        .create(RefreshToken::issue(
            &user.id,
            &refresh,
            state.jwt_service.refresh_expiration_hours(),
        ))
        .await?;

    Ok(AuthResponse {
        token,
        refresh_token: refresh,
        username: user.username.clone(),
        email: user.email.clone(),
    })
}
