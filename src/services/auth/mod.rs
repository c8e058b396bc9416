pub mod login;
pub mod logout;
pub mod password_reset;
pub mod signup;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::ApiResponse;
use crate::models::auth::{
    AuthFailure, LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, SignupRequest,
};
use crate::storage::Storage;

/// 账号认证服务：注册、登录、登出、令牌刷新、密码重置
pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl AuthService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_component::<dyn Storage>(request, "Storage"),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        match &self.cache {
            Some(cache) => Ok(cache.clone()),
            None => super::app_component::<dyn ObjectCache>(request, "Cache"),
        }
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn signup(
        &self,
        signup_request: SignupRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        signup::handle_signup(self, signup_request, request).await
    }

    pub async fn login(
        &self,
        login_request: LoginRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        login::handle_login(self, login_request, request).await
    }

    pub async fn logout(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        logout::handle_logout(self, request).await
    }

    pub async fn refresh_token(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, request).await
    }

    // 当前登录账号的个人资料
    pub async fn me(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        token::handle_me(self, request).await
    }

    pub async fn request_password_reset(
        &self,
        reset_request: PasswordResetRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password_reset::handle_request_reset(self, reset_request, request).await
    }

    pub async fn confirm_password_reset(
        &self,
        confirm_request: PasswordResetConfirmRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        password_reset::handle_confirm_reset(self, confirm_request, request).await
    }
}

/// 认证失败响应，HTTP 状态与业务码由失败类型决定
pub(crate) fn failure_response(failure: AuthFailure) -> HttpResponse {
    tracing::info!("Authentication failure: {}", failure);
    HttpResponse::build(failure.status())
        .json(ApiResponse::error_empty(failure.error_code(), failure.message()))
}
