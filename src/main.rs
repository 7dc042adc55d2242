use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use cognito_gateway::auth::handlers::{
    index, login, me, protected, refresh, register, resend_code, verify,
};
use cognito_gateway::{health_check, AppError, AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[actix_web::main]
async fn main() -> cognito_gateway::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Load configuration
    let config = Settings::new()?;
    info!("Configuration loaded successfully");

    info!(
        "Starting server at {}:{}",
        config.server.host, config.server.port
    );

    let state = web::Data::new(AppState::new(config.clone()));

    let listener = TcpListener::bind(format!("{}:{}", config.server.host, config.server.port))?;
    let workers = config.server.workers as usize;
    let allowed_origin = config.cors.allowed_origin;

    HttpServer::new(move || {
        // Single fixed origin, every method and header, credentials allowed.
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials();

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .route("/", web::get().to(index))
            .route("/health", web::get().to(health_check))
            .route("/protected", web::get().to(protected))
            .route("/auth/login", web::post().to(login))
            .route("/auth/register", web::post().to(register))
            .route("/auth/verify", web::post().to(verify))
            .route("/auth/refresh", web::post().to(refresh))
            .route("/auth/resend-code", web::post().to(resend_code))
            .route("/auth/me", web::get().to(me))
    })
    .listen(listener)?
    .workers(workers)
    .run()
    .await
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(())
}
