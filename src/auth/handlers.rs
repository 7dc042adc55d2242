use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::auth::Decision;
use crate::cognito::ProviderError;
use crate::error::{AppError, AuthError};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub id_token: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResendCodeRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub email: String,
    pub roles: Vec<String>,
}

fn message(text: &str) -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: text.to_string(),
    })
}

/// Authorization header -> bearer token, or 401.
fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::Auth(AuthError::MissingToken))
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);

    match state
        .cognito
        .initiate_auth_password(&req.email, &req.password)
        .await
    {
        Ok(tokens) => {
            info!("Login successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(LoginResponse {
                id_token: tokens.id_token,
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token.unwrap_or_default(),
            }))
        }
        Err(ProviderError::NotAuthorized(_)) => {
            error!("Login failed for {}: invalid credentials", req.email);
            Err(AppError::Unauthorized("Invalid credentials".into()))
        }
        Err(ProviderError::UserNotFound(_)) => {
            error!("Login failed for {}: user does not exist", req.email);
            Err(AppError::NotFound("User not found".into()))
        }
        Err(ProviderError::UserNotConfirmed(_)) => {
            error!("Login failed for {}: user is not verified", req.email);
            Err(AppError::Forbidden("User not verified".into()))
        }
        Err(e) => {
            error!("Login failed for {}: {}", req.email, e);
            Err(AppError::Internal("Internal server error".into()))
        }
    }
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);

    match state
        .cognito
        .sign_up(&req.email, &req.password, &req.name)
        .await
    {
        Ok(()) => {
            info!("Registration successful for email: {}", req.email);
            Ok(message(
                "User registered successfully. Please check your email for the verification code.",
            ))
        }
        Err(ProviderError::UsernameExists(_)) => {
            Err(AppError::BadRequest("User already exists".into()))
        }
        Err(ProviderError::InvalidPassword(_)) => Err(AppError::BadRequest(
            "Password does not meet complexity requirements".into(),
        )),
        Err(e) => {
            error!("Registration failed for {}: {}", req.email, e);
            Err(AppError::Internal("Internal server error".into()))
        }
    }
}

pub async fn verify(
    req: web::Json<VerifyRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received verification request for email: {}", req.email);

    match state.cognito.confirm_sign_up(&req.email, &req.code).await {
        Ok(()) => {
            info!("Verification successful for email: {}", req.email);
            Ok(message("User verified successfully. You can now log in."))
        }
        Err(ProviderError::CodeMismatch(_)) => {
            Err(AppError::BadRequest("Invalid verification code".into()))
        }
        Err(ProviderError::ExpiredCode(_)) => {
            Err(AppError::BadRequest("Verification code expired".into()))
        }
        Err(ProviderError::UserNotFound(_)) => Err(AppError::NotFound("User not found".into())),
        Err(ProviderError::NotAuthorized(_)) => Err(AppError::Forbidden(
            "Verification failed. Please contact support.".into(),
        )),
        Err(e) => {
            error!("Verification failed for {}: {}", req.email, e);
            Err(AppError::Internal("Internal server error".into()))
        }
    }
}

pub async fn refresh(
    req: web::Json<RefreshRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    match state.cognito.initiate_auth_refresh(&req.refresh_token).await {
        Ok(tokens) => Ok(HttpResponse::Ok().json(RefreshResponse {
            id_token: tokens.id_token,
            access_token: tokens.access_token,
        })),
        Err(e) => {
            error!("Token refresh failed: {}", e);
            Err(AppError::Unauthorized("Token refresh failed".into()))
        }
    }
}

pub async fn resend_code(
    req: web::Json<ResendCodeRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received resend-code request for email: {}", req.email);

    if let Decision::Denied { retry_after_secs } = state.resend_gate.check(&req.email).await {
        return Err(AppError::RateLimited(format!(
            "Please wait {}s before resending the code.",
            retry_after_secs
        )));
    }

    match state.cognito.resend_confirmation_code(&req.email).await {
        Ok(()) => {
            state.resend_gate.record(&req.email).await;
            Ok(message(
                "Verification code resent successfully. Check your email.",
            ))
        }
        Err(ProviderError::UserNotFound(_)) => Err(AppError::NotFound("User not found.".into())),
        // Treated as a successful resend; no cooldown timestamp is recorded.
        Err(ProviderError::UserNotConfirmed(_)) => Ok(message(
            "A new verification code has been sent to your email.",
        )),
        Err(ProviderError::LimitExceeded(_)) => Err(AppError::RateLimited(
            "Too many attempts. Please try again later.".into(),
        )),
        Err(e) => {
            error!("Failed to resend verification code for {}: {}", req.email, e);
            Err(AppError::Internal(
                "An error occurred while resending the verification code.".into(),
            ))
        }
    }
}

pub async fn me(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;
    let claims = state.verifier.verify(token).await?;

    Ok(HttpResponse::Ok().json(MeResponse {
        email: claims.email,
        roles: claims.groups,
    }))
}

pub async fn protected(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;
    let claims = state.verifier.verify(token).await?;

    Ok(message(&format!(
        "Hello {}, you are authenticated!",
        claims.email
    )))
}

pub async fn index() -> HttpResponse {
    message("Welcome to the auth gateway")
}
