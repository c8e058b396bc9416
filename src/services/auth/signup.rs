use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{AuthFailure, SignupRequest},
    users::requests::CreateUserRequest,
};
use crate::utils::password::hash_password;
use crate::utils::validate::{normalize_email, validate_email, validate_password};

use super::{AuthService, failure_response, login::issue_session};

pub async fn handle_signup(
    service: &AuthService,
    signup_request: SignupRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if !service.get_config().auth.allow_signup {
        return Ok(failure_response(AuthFailure::OperationNotAllowed));
    }

    let storage = service.get_storage(request)?;

    let name = signup_request.name.trim().to_string();
    let email = normalize_email(&signup_request.email);
    if name.is_empty() || email.is_empty() || signup_request.password.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Please fill in all fields.",
        )));
    }

    if validate_email(&email).is_err() {
        return Ok(failure_response(AuthFailure::InvalidEmail));
    }

    let password_check = validate_password(&signup_request.password);
    if !password_check.is_valid {
        tracing::debug!("Rejected weak password: {}", password_check.error_message());
        return Ok(failure_response(AuthFailure::WeakPassword));
    }

    // 1. 检查邮箱是否已注册
    match storage.get_user_by_email(&email).await {
        Ok(Some(_)) => return Ok(failure_response(AuthFailure::EmailAlreadyInUse)),
        Ok(None) => {}
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            ));
        }
    }

    // 2. 哈希密码
    let password_hash = match hash_password(&signup_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::RegisterFailed,
                format!("Password hashing failed: {e}"),
            ));
        }
    };

    // 3. 创建账号和个人资料
    let user = match storage
        .create_user(CreateUserRequest {
            email: email.clone(),
            password: password_hash,
            name: name.clone(),
        })
        .await
    {
        Ok(user) => user,
        Err(e) => {
            // 并发注册时唯一约束兜底
            if let Ok(Some(_)) = storage.get_user_by_email(&email).await {
                return Ok(failure_response(AuthFailure::EmailAlreadyInUse));
            }
            return Ok(super::super::internal_error(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            ));
        }
    };

    let profile = match storage.ensure_profile(user.id, &email, &name).await {
        Ok(profile) => profile,
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::RegisterFailed,
                format!("Register failed: {e}"),
            ));
        }
    };

    tracing::info!("New account registered: {}", user.id);
    Ok(issue_session(
        service,
        &user,
        profile,
        false,
        StatusCode::CREATED,
        "Account created successfully",
    ))
}
