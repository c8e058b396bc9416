use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::auth::RefreshTokenResponse;
use crate::models::profiles::responses::ProfileResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

fn session_expired() -> HttpResponse {
    HttpResponse::Unauthorized()
        .cookie(JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Login expired or invalid, please login again",
        ))
}

pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(super::super::unauthorized());
    };

    let claims = match JwtUtils::verify_refresh_token(&refresh_token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            return Ok(session_expired());
        }
    };

    let Some(user_id) = claims.user_id() else {
        return Ok(session_expired());
    };

    // 账号被删除或停用后不再续签
    let storage = service.get_storage(request)?;
    match storage.get_user_by_id(user_id).await {
        Ok(Some(user)) if user.is_active() => {}
        Ok(_) => return Ok(session_expired()),
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::InternalServerError,
                format!("Token refresh failed: {e}"),
            ));
        }
    }

    match JwtUtils::generate_access_token(user_id) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: JwtUtils::access_token_ttl_secs(),
            },
            "Token refreshed successfully",
        ))),
        Err(e) => Ok(super::super::internal_error(
            ErrorCode::InternalServerError,
            format!("Unable to generate token: {e}"),
        )),
    }
}

pub async fn handle_me(service: &AuthService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(super::super::unauthorized());
    };

    let storage = service.get_storage(request)?;
    match storage.ensure_profile(user.id, &user.email, "").await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProfileResponse { profile },
            "User information retrieved successfully",
        ))),
        Err(e) => Ok(super::super::internal_error(
            ErrorCode::ProfileNotFound,
            format!("Failed to load profile: {e}"),
        )),
    }
}
