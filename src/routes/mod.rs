pub mod academic;

pub mod auth;

pub mod documents;

pub mod profiles;

pub mod storage;

pub use academic::configure_academic_routes;
pub use auth::configure_auth_routes;
pub use documents::configure_document_routes;
pub use profiles::configure_profile_routes;
pub use storage::configure_storage_routes;

use actix_web::web;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_profile_routes)
        .configure(configure_document_routes)
        .configure(configure_academic_routes)
        .configure(configure_storage_routes);
}
