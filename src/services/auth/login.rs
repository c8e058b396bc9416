use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use crate::models::profiles::entities::Profile;
use crate::models::users::entities::User;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{AuthFailure, LoginRequest, LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;
use crate::utils::validate::{normalize_email, validate_email};

use super::{AuthService, failure_response};

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let email = normalize_email(&login_request.email);
    if validate_email(&email).is_err() {
        return Ok(failure_response(AuthFailure::InvalidEmail));
    }

    // 1. 根据邮箱获取账号
    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(failure_response(AuthFailure::UserNotFound)),
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::AuthFailed,
                format!("Login failed: {e}"),
            ));
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(failure_response(AuthFailure::WrongPassword));
    }

    if !user.is_active() {
        return Ok(failure_response(AuthFailure::UserDisabled));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.id, e);
    }

    // 4. 确保个人资料存在（旧账号可能缺失）
    let profile = match storage.ensure_profile(user.id, &user.email, "").await {
        Ok(profile) => profile,
        Err(e) => {
            return Ok(super::super::internal_error(
                ErrorCode::AuthFailed,
                format!("Login failed: {e}"),
            ));
        }
    };

    tracing::info!("User {} logged in successfully", user.id);
    Ok(issue_session(
        service,
        &user,
        profile,
        login_request.remember_me,
        StatusCode::OK,
        "Login successful",
    ))
}

/// 签发 access token 与 refresh cookie
pub(crate) fn issue_session(
    service: &AuthService,
    user: &User,
    profile: Profile,
    remember_me: bool,
    status: StatusCode,
    message: &str,
) -> HttpResponse {
    let config = service.get_config();
    let refresh_days = if remember_me {
        config.jwt.refresh_token_remember_me_expiry
    } else {
        config.jwt.refresh_token_expiry
    };

    match user.generate_token_pair(Some(chrono::Duration::days(refresh_days))) {
        Ok(token_pair) => {
            let response = LoginResponse {
                access_token: token_pair.access_token,
                expires_in: JwtUtils::access_token_ttl_secs(),
                profile,
                created_at: chrono::Utc::now(),
            };
            let refresh_cookie =
                JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token, refresh_days);

            HttpResponse::build(status)
                .cookie(refresh_cookie)
                .json(ApiResponse::success(response, message))
        }
        Err(e) => super::super::internal_error(
            ErrorCode::InternalServerError,
            format!("Unable to generate token: {e}"),
        ),
    }
}
