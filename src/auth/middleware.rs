use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::LocalBoxFuture;

use crate::{auth::Claims, errors::AppError};

/// Rejects requests without a valid Bearer access token and stashes the
/// decoded claims in the request extensions for `AuthenticatedUser`.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let jwt_service = req
                .app_data::<actix_web::web::Data<crate::auth::JwtService>>()
                .ok_or_else(|| ErrorUnauthorized("JWT service not configured"))?;

            let auth_header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| ErrorUnauthorized("Missing authorization header"))?;

            let token = auth_header
                .strip_prefix("Bearer ")
                .ok_or_else(|| ErrorUnauthorized("Invalid authorization header format"))?;

            let claims = jwt_service
                .validate_token(token)
                .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

            req.extensions_mut().insert(claims);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor handing handlers the authenticated principal explicitly.
pub struct AuthenticatedUser(pub Claims);

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Not authenticated".to_string()));

        ready(claims.map(AuthenticatedUser))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{auth::JwtService, config::Config, models::domain::User};
    use actix_web::{test, web, App, HttpResponse};

    async fn whoami(auth: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(auth.0.username)
    }

    fn protected_app_jwt() -> JwtService {
        let config = Config::test_config();
        JwtService::new(&config.jwt_secret, 1, 168)
    }

    #[actix_web::test]
    async fn test_request_without_token_is_rejected() {
        let jwt = protected_app_jwt();
        let app = test::init_service(
            App::new().app_data(web::Data::new(jwt)).service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get().uri("/whoami").to_request();
        match test::try_call_service(&app, req).await {
            Err(err) => assert_eq!(
                err.as_response_error().status_code(),
                actix_web::http::StatusCode::UNAUTHORIZED
            ),
            Ok(resp) => panic!("expected rejection, got {}", resp.status()),
        }
    }

    #[actix_web::test]
    async fn test_request_with_valid_token_passes() {
        let jwt = protected_app_jwt();
        let token = jwt.create_token(&User::test_user("johndoe")).unwrap();

        let app = test::init_service(
            App::new().app_data(web::Data::new(jwt)).service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .route("/whoami", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/whoami")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
    }
}
