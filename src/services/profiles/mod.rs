pub mod avatar;
pub mod update;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::middlewares::RequireJWT;
use crate::models::profiles::{requests::UpdateProfileRequest, responses::ProfileResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::ObjectStore;
use crate::storage::Storage;

pub struct ProfileService {
    storage: Option<Arc<dyn Storage>>,
    object_store: Option<Arc<dyn ObjectStore>>,
}

impl ProfileService {
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

    pub async fn get_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user) = RequireJWT::extract_user(request) else {
            return Ok(super::unauthorized());
        };

        let storage = self.get_storage(request)?;
        match storage.ensure_profile(user.id, &user.email, "").await {
            Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                ProfileResponse { profile },
                "Profile retrieved successfully",
            ))),
            Err(e) => Ok(super::internal_error(
                ErrorCode::ProfileNotFound,
                format!("Failed to load profile: {e}"),
            )),
        }
    }

    pub async fn update_profile(
        &self,
        request: &HttpRequest,
        update: UpdateProfileRequest,
    ) -> ActixResult<HttpResponse> {
        update::handle_update_profile(self, request, update).await
    }

    pub async fn upload_avatar(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        avatar::handle_upload_avatar(self, request, payload).await
    }
}
