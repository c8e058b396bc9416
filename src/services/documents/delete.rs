use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DocumentService, document_not_found};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::DOCUMENTS_BUCKET;

/// 先删除存储对象，成功后再删除记录；对象删除失败时保留记录
pub async fn handle_delete(
    service: &DocumentService,
    request: &HttpRequest,
    document_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let storage = service.get_storage(request)?;
    let document = match storage.get_document(user_id, document_id).await {
        Ok(Some(document)) => document,
        Ok(None) => return Ok(document_not_found()),
        Err(e) => {
            return Ok(crate::services::internal_error(
                ErrorCode::DocumentDeleteFailed,
                format!("Document query failed: {e}"),
            ));
        }
    };

    let object_store = service.get_object_store(request)?;
    if let Err(e) = object_store
        .remove(DOCUMENTS_BUCKET, &[document.storage_path.clone()])
        .await
    {
        return Ok(crate::services::internal_error(
            ErrorCode::StorageDeletionFailed,
            format!("Failed to delete document file: {e}"),
        ));
    }

    match storage.delete_document(user_id, document_id).await {
        Ok(true) => {
            tracing::info!("Document {} deleted by account {}", document_id, user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Document deleted successfully!",
            )))
        }
        Ok(false) => Ok(document_not_found()),
        Err(e) => Ok(crate::services::internal_error(
            ErrorCode::DocumentDeleteFailed,
            format!("Failed to delete document: {e}"),
        )),
    }
}
