//! 认证失败类型
//!
//! 每种失败对应一个稳定的错误代码（沿用常见身份服务的 `auth/*` 命名）和一条面向用户的提示。

use actix_web::http::StatusCode;

use crate::models::ErrorCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    UserNotFound,
    WrongPassword,
    InvalidEmail,
    UserDisabled,
    TooManyRequests,
    EmailAlreadyInUse,
    OperationNotAllowed,
    WeakPassword,
    /// 重置密码时邮箱不存在，提示语与登录不同
    ResetUserNotFound,
    InvalidResetToken,
}

impl AuthFailure {
    /// 错误代码
    pub fn code(&self) -> &'static str {
        match self {
            AuthFailure::UserNotFound | AuthFailure::ResetUserNotFound => "auth/user-not-found",
            AuthFailure::WrongPassword => "auth/wrong-password",
            AuthFailure::InvalidEmail => "auth/invalid-email",
            AuthFailure::UserDisabled => "auth/user-disabled",
            AuthFailure::TooManyRequests => "auth/too-many-requests",
            AuthFailure::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthFailure::OperationNotAllowed => "auth/operation-not-allowed",
            AuthFailure::WeakPassword => "auth/weak-password",
            AuthFailure::InvalidResetToken => "auth/invalid-action-code",
        }
    }

    /// 面向用户的提示
    pub fn message(&self) -> &'static str {
        match self {
            AuthFailure::UserNotFound => "No account found with this email.",
            AuthFailure::ResetUserNotFound => "No account found with this email address.",
            AuthFailure::WrongPassword => "Incorrect password.",
            AuthFailure::InvalidEmail => "Invalid email address.",
            AuthFailure::UserDisabled => "This account has been disabled.",
            AuthFailure::TooManyRequests => "Too many failed attempts. Please try again later.",
            AuthFailure::EmailAlreadyInUse => "An account with this email already exists.",
            AuthFailure::OperationNotAllowed => "Email/password accounts are not enabled.",
            AuthFailure::WeakPassword => {
                "Password is too weak. Please choose a stronger password."
            }
            AuthFailure::InvalidResetToken => "The password reset link is invalid or has expired.",
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AuthFailure::UserNotFound | AuthFailure::ResetUserNotFound => ErrorCode::UserNotFound,
            AuthFailure::WrongPassword => ErrorCode::WrongPassword,
            AuthFailure::InvalidEmail => ErrorCode::InvalidEmail,
            AuthFailure::UserDisabled => ErrorCode::UserDisabled,
            AuthFailure::TooManyRequests => ErrorCode::TooManyRequests,
            AuthFailure::EmailAlreadyInUse => ErrorCode::EmailAlreadyInUse,
            AuthFailure::OperationNotAllowed => ErrorCode::SignupNotAllowed,
            AuthFailure::WeakPassword => ErrorCode::WeakPassword,
            AuthFailure::InvalidResetToken => ErrorCode::PasswordResetTokenInvalid,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthFailure::UserNotFound | AuthFailure::WrongPassword => StatusCode::UNAUTHORIZED,
            AuthFailure::ResetUserNotFound => StatusCode::NOT_FOUND,
            AuthFailure::InvalidEmail
            | AuthFailure::WeakPassword
            | AuthFailure::InvalidResetToken => StatusCode::BAD_REQUEST,
            AuthFailure::UserDisabled | AuthFailure::OperationNotAllowed => StatusCode::FORBIDDEN,
            AuthFailure::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AuthFailure::EmailAlreadyInUse => StatusCode::CONFLICT,
        }
    }
}

impl std::fmt::Display for AuthFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}
