use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::{DocumentService, document_not_found};
use crate::errors::MyGpaError;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::DOCUMENTS_BUCKET;

/// attachment 头中的文件名，去掉引号和控制字符
pub(crate) fn attachment_disposition(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .filter(|c| !c.is_control() && *c != '"' && *c != '\\')
        .collect();
    format!("attachment; filename=\"{safe}\"")
}

pub async fn handle_download(
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
                ErrorCode::InternalServerError,
                format!("Document query failed: {e}"),
            ));
        }
    };

    let object_store = service.get_object_store(request)?;
    let bytes = match object_store
        .download(DOCUMENTS_BUCKET, &document.storage_path)
        .await
    {
        Ok(bytes) => bytes,
        Err(MyGpaError::NotFound(msg)) => {
            tracing::warn!("{}", msg);
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::FileNotFound,
                "File not found in storage",
            )));
        }
        Err(e) => {
            return Ok(crate::services::internal_error(
                ErrorCode::InternalServerError,
                format!("File read failed: {e}"),
            ));
        }
    };

    Ok(HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, document.file_type.as_str()))
        .insert_header((
            header::CONTENT_DISPOSITION,
            attachment_disposition(&document.file_name),
        ))
        .body(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attachment_disposition_strips_quotes() {
        assert_eq!(
            attachment_disposition("Transcript.pdf"),
            "attachment; filename=\"Transcript.pdf\""
        );
        assert_eq!(
            attachment_disposition("my \"cv\".pdf"),
            "attachment; filename=\"my cv.pdf\""
        );
    }
}
