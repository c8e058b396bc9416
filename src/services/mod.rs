pub mod academic;
pub mod auth;
pub mod documents;
pub mod profiles;
pub mod storage;
mod upload;

pub use academic::AcademicService;
pub use auth::AuthService;
pub use documents::DocumentService;
pub use profiles::ProfileService;
pub use storage::PublicStorageService;

use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;

use crate::models::{ApiResponse, ErrorCode};

/// 从 app_data 中取出共享组件（Storage、ObjectStore、ObjectCache）
pub(crate) fn app_component<T: ?Sized + 'static>(
    request: &HttpRequest,
    name: &str,
) -> actix_web::Result<Arc<T>> {
    request
        .app_data::<web::Data<Arc<T>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            tracing::error!("{} not found in app data", name);
            actix_web::error::ErrorInternalServerError(format!("{name} not configured"))
        })
}

pub(crate) fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::Unauthorized,
        "Unauthorized access, please login",
    ))
}

pub(crate) fn internal_error(code: ErrorCode, message: impl std::fmt::Display) -> HttpResponse {
    tracing::error!("{}", message);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(code, message.to_string()))
}
