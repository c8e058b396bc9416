//! 公开对象访问
//!
//! 头像 bucket 对外公开，无需登录即可通过 `public_url` 生成的地址读取。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::sync::Arc;

use crate::errors::MyGpaError;
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::{AVATARS_BUCKET, ObjectStore};
use crate::utils::{detect_image_mime, mime_from_extension};

use super::upload::file_extension;

pub struct PublicStorageService {
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl PublicStorageService {
    pub fn new_lazy() -> Self {
        Self { object_store: None }
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

    pub async fn get_avatar(&self, request: &HttpRequest, path: &str) -> ActixResult<HttpResponse> {
        let object_store = self.get_object_store(request)?;

        match object_store.download(AVATARS_BUCKET, path).await {
            Ok(bytes) => {
                let content_type = detect_image_mime(&bytes)
                    .unwrap_or_else(|| mime_from_extension(&file_extension(path)));
                Ok(HttpResponse::Ok()
                    .insert_header((header::CONTENT_TYPE, content_type))
                    .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
                    .body(bytes))
            }
            // 非法路径也按不存在处理
            Err(MyGpaError::NotFound(_)) | Err(MyGpaError::ObjectStorage(_)) => Ok(
                HttpResponse::NotFound()
                    .json(ApiResponse::error_empty(ErrorCode::FileNotFound, "Object not found")),
            ),
            Err(e) => Ok(super::internal_error(
                ErrorCode::InternalServerError,
                format!("Failed to read object: {e}"),
            )),
        }
    }
}
