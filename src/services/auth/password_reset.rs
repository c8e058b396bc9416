//! 密码重置
//!
//! 申请时生成一次性令牌存入对象缓存（`password_reset:{token}` -> 账号 ID），
//! 确认时原子地取走令牌，然后写入新密码。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{AuthFailure, PasswordResetConfirmRequest, PasswordResetRequest, PasswordResetResponse},
    users::requests::UpdateUserRequest,
};
use crate::utils::generate_token;
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_password};

use super::{AuthService, failure_response};

const RESET_TOKEN_LENGTH: usize = 48;

pub fn reset_cache_key(token: &str) -> String {
    format!("password_reset:{token}")
}

pub async fn handle_request_reset(
    service: &AuthService,
    reset_request: PasswordResetRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let email = normalize_email(&reset_request.email);
    if email.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Please enter your email address.",
        )));
    }
    if validate_email(&email).is_err() {
        return Ok(failure_response(AuthFailure::InvalidEmail));
    }

    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;
    let config = service.get_config();

    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(failure_response(AuthFailure::ResetUserNotFound)),
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::PasswordResetFailed,
                format!("Password reset failed: {e}"),
            ));
        }
    };

    if !user.is_active() {
        return Ok(failure_response(AuthFailure::UserDisabled));
    }

    let token = generate_token(RESET_TOKEN_LENGTH);
    let ttl = config.auth.password_reset_ttl;
    cache
        .insert_raw(reset_cache_key(&token), user.id.to_string(), ttl)
        .await;

    tracing::info!("Password reset requested for account {}", user.id);

    let response = PasswordResetResponse {
        reset_token: config.expose_reset_token().then_some(token),
        expires_in: ttl,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        response,
        "Password reset email sent. Please check your inbox.",
    )))
}

pub async fn handle_confirm_reset(
    service: &AuthService,
    confirm_request: PasswordResetConfirmRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let cache = service.get_cache(request)?;

    let password_check = validate_password(&confirm_request.new_password);
    if !password_check.is_valid {
        tracing::debug!("Rejected weak password: {}", password_check.error_message());
        return Ok(failure_response(AuthFailure::WeakPassword));
    }

    // 先取走令牌再改密码，并发确认时只有一个请求能成功
    let key = reset_cache_key(confirm_request.token.trim());
    let Some(value) = cache.take_raw(&key).await.found() else {
        return Ok(failure_response(AuthFailure::InvalidResetToken));
    };
    let Ok(user_id) = value.parse::<i64>() else {
        return Ok(failure_response(AuthFailure::InvalidResetToken));
    };

    let password_hash = match hash_password(&confirm_request.new_password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::PasswordResetFailed,
                format!("Password hashing failed: {e}"),
            ));
        }
    };

    let update = UpdateUserRequest {
        password: Some(password_hash),
        ..Default::default()
    };
    match storage.update_user(user_id, update).await {
        Ok(Some(_)) => {
            tracing::info!("Password reset completed for account {}", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Password updated successfully. Please log in with your new password.",
            )))
        }
        Ok(None) => Ok(failure_response(AuthFailure::InvalidResetToken)),
        Err(e) => Ok(super::super::internal_error(
            ErrorCode::PasswordResetFailed,
            format!("Password reset failed: {e}"),
        )),
    }
}
