use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, middleware, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RateLimit};
use crate::models::documents::requests::RenameDocumentRequest;
use crate::services::DocumentService;
use crate::utils::SafeDocumentIdI64;

// 懒加载的全局 DocumentService 实例
static DOCUMENT_SERVICE: Lazy<DocumentService> = Lazy::new(DocumentService::new_lazy);

pub async fn list_documents(request: HttpRequest) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.list_documents(&request).await
}

pub async fn upload_document(
    request: HttpRequest,
    payload: actix_multipart::Multipart,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE.upload_document(&request, payload).await
}

pub async fn download_document(
    request: HttpRequest,
    document_id: SafeDocumentIdI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .download_document(&request, document_id.0)
        .await
}

pub async fn rename_document(
    request: HttpRequest,
    document_id: SafeDocumentIdI64,
    rename_data: web::Json<RenameDocumentRequest>,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .rename_document(&request, document_id.0, rename_data.into_inner())
        .await
}

pub async fn delete_document(
    request: HttpRequest,
    document_id: SafeDocumentIdI64,
) -> ActixResult<HttpResponse> {
    DOCUMENT_SERVICE
        .delete_document(&request, document_id.0)
        .await
}

// 配置路由
pub fn configure_document_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/documents")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .guard(guard::Post())
                    .wrap(RateLimit::file_upload())
                    .route(web::post().to(upload_document)),
            )
            .route("", web::get().to(list_documents))
            .service(
                web::resource("/{document_id}/download")
                    .wrap(middleware::Compress::default())
                    .route(web::get().to(download_document)),
            )
            .route("/{document_id}", web::put().to(rename_document))
            .route("/{document_id}", web::delete().to(delete_document)),
    );
}
