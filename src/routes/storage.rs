use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::PublicStorageService;

// 懒加载的全局 PublicStorageService 实例
static STORAGE_SERVICE: Lazy<PublicStorageService> = Lazy::new(PublicStorageService::new_lazy);

pub async fn get_avatar(
    request: HttpRequest,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    STORAGE_SERVICE.get_avatar(&request, &path).await
}

// 公开 bucket，无需登录
pub fn configure_storage_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/storage").route("/avatars/{path:.*}", web::get().to(get_avatar)),
    );
}
