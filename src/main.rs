use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quizmaster_server::{app_state::AppState, auth::AuthMiddleware, config::Config, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    let state = AppState::new(config)
        .await
        .expect("failed to initialize application state");

    let host = state.config.web_server_host.clone();
    let port = state.config.web_server_port;
    log::info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(state.jwt_service.clone()))
            .wrap(Logger::default())
            .wrap(cors)
            .service(handlers::health_check)
            .service(handlers::health_check_ready)
            .service(handlers::register)
            .service(handlers::login)
            .service(handlers::refresh_token)
            .service(
                web::scope("")
                    .wrap(AuthMiddleware)
                    .service(handlers::logout)
                    .service(handlers::create_quiz)
                    .service(handlers::browse_quizzes)
                    .service(handlers::get_quiz)
                    .service(handlers::submit_attempt)
                    .service(handlers::get_results)
                    .service(handlers::dashboard_overview),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
