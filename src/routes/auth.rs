use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::auth::requests::{
    LoginRequest, PasswordResetConfirmRequest, PasswordResetRequest, SignupRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn signup(
    req: HttpRequest,
    signup_data: web::Json<SignupRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.signup(signup_data.into_inner(), &req).await
}

pub async fn login(
    req: HttpRequest,
    user_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(user_data.into_inner(), &req).await
}

pub async fn logout(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&request).await
}

pub async fn refresh_token(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&request).await
}

pub async fn request_password_reset(
    req: HttpRequest,
    reset_data: web::Json<PasswordResetRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .request_password_reset(reset_data.into_inner(), &req)
        .await
}

pub async fn confirm_password_reset(
    req: HttpRequest,
    confirm_data: web::Json<PasswordResetConfirmRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .confirm_password_reset(confirm_data.into_inner(), &req)
        .await
}

pub async fn get_me(request: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.me(&request).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            .service(
                web::resource("/signup")
                    .wrap(RateLimit::signup())
                    .route(web::post().to(signup)),
            )
            .service(
                web::resource("/login")
                    .wrap(RateLimit::login())
                    .route(web::post().to(login)),
            )
            .service(
                web::resource("/password-reset")
                    .wrap(RateLimit::password_reset())
                    .route(web::post().to(request_password_reset)),
            )
            .service(
                web::resource("/password-reset/confirm")
                    .wrap(RateLimit::password_reset().with_prefix("password_reset_confirm"))
                    .route(web::post().to(confirm_password_reset)),
            )
            .route("/refresh", web::post().to(refresh_token))
            .route("/logout", web::post().to(logout))
            .service(
                web::scope("")
                    .wrap(middlewares::RequireJWT)
                    .route("/me", web::get().to(get_me)),
            ),
    );
}
