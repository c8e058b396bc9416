use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DocumentService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::documents::{entities::NewDocument, responses::DocumentResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::DOCUMENTS_BUCKET;
use crate::services::upload::{object_path, read_single_file};
use crate::utils::{mime_from_extension, validate_magic_bytes};

// 可选的显示名称字段
const NAME_FIELD: &str = "name";

/// 客户端未声明或声明为通用二进制时，按扩展名推断
pub(crate) fn resolve_content_type(declared: Option<&str>, extension: &str) -> String {
    match declared {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct.to_string(),
        _ => mime_from_extension(extension).to_string(),
    }
}

pub async fn handle_upload(
    service: &DocumentService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let config = AppConfig::get();
    let upload = match read_single_file(payload, config.upload.max_size).await {
        Ok(upload) => upload,
        Err(response) => return Ok(response),
    };

    let extension = upload.extension();
    if !config
        .upload
        .allowed_types
        .iter()
        .any(|t| t.to_lowercase() == extension)
    {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "File type not allowed",
        )));
    }

    if !validate_magic_bytes(&upload.bytes, &extension) {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileTypeNotAllowed,
            "File content does not match its extension",
        )));
    }

    let display_name = upload
        .text_fields
        .get(NAME_FIELD)
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(&upload.file_name)
        .to_string();

    let storage = service.get_storage(request)?;
    let object_store = service.get_object_store(request)?;

    let path = object_path(user_id, &upload.file_name);
    if let Err(e) = object_store
        .upload(DOCUMENTS_BUCKET, &path, &upload.bytes, false)
        .await
    {
        return Ok(crate::services::internal_error(
            ErrorCode::FileUploadFailed,
            format!("Failed to store document: {e}"),
        ));
    }

    let new_document = NewDocument {
        user_id,
        file_name: display_name,
        file_type: resolve_content_type(upload.content_type.as_deref(), &extension),
        file_size: upload.bytes.len() as i64,
        storage_path: path.clone(),
    };

    match storage.create_document(new_document).await {
        Ok(document) => {
            tracing::info!("Document {} uploaded by account {}", document.id, user_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                DocumentResponse::from(document),
                "Document uploaded successfully!",
            )))
        }
        Err(e) => {
            // 元数据写入失败时删除已存储的对象
            if let Err(remove_err) = object_store.remove(DOCUMENTS_BUCKET, &[path]).await {
                tracing::warn!("Failed to clean up orphaned object: {}", remove_err);
            }
            Ok(crate::services::internal_error(
                ErrorCode::FileUploadFailed,
                format!("Failed to save document: {e}"),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_content_type() {
        assert_eq!(
            resolve_content_type(Some("application/pdf"), ".pdf"),
            "application/pdf"
        );
        assert_eq!(resolve_content_type(None, ".pdf"), "application/pdf");
        assert_eq!(
            resolve_content_type(Some("application/octet-stream"), ".png"),
            "image/png"
        );
    }
}
