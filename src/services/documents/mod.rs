pub mod delete;
pub mod download;
pub mod upload;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::documents::{
    requests::RenameDocumentRequest,
    responses::{DocumentListResponse, DocumentResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::ObjectStore;
use crate::storage::Storage;

pub struct DocumentService {
    storage: Option<Arc<dyn Storage>>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

pub(crate) fn document_not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(
        ErrorCode::DocumentNotFound,
        "Document not found",
    ))
}

impl DocumentService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            object_store: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_component::<dyn Storage>(request, "Storage"),
        }
    }

    pub(crate) fn get_object_store(
        &self,
        request: &HttpRequest,
    ) -> ActixResult<Arc<dyn ObjectStore>> {
        match &self.object_store {
            Some(store) => Ok(store.clone()),
            None => super::app_component::<dyn ObjectStore>(request, "ObjectStore"),
        }
    }

    pub async fn list_documents(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(super::unauthorized());
        };

        let storage = self.get_storage(request)?;
        match storage.list_documents(user_id).await {
            Ok(documents) => {
                let items = documents.into_iter().map(DocumentResponse::from).collect();
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    DocumentListResponse { items },
                    "Documents retrieved successfully",
                )))
            }
            Err(e) => Ok(super::internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to list documents: {e}"),
            )),
        }
    }

    pub async fn upload_document(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        upload::handle_upload(self, request, payload).await
    }

    pub async fn download_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        download::handle_download(self, request, document_id).await
    }

    pub async fn rename_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
        rename: RenameDocumentRequest,
    ) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(super::unauthorized());
        };

        let file_name = rename.file_name.trim();
        if file_name.is_empty() {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::NameRequired,
                "Document name cannot be empty",
            )));
        }

        let storage = self.get_storage(request)?;
        match storage
            .rename_document(user_id, document_id, file_name)
            .await
        {
            Ok(Some(document)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                DocumentResponse::from(document),
                "Document renamed successfully",
            ))),
            Ok(None) => Ok(document_not_found()),
            Err(e) => Ok(super::internal_error(
                ErrorCode::DocumentUpdateFailed,
                format!("Failed to rename document: {e}"),
            )),
        }
    }

    pub async fn delete_document(
        &self,
        request: &HttpRequest,
        document_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::handle_delete(self, request, document_id).await
    }
}
