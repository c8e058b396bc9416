//! 头像上传
//!
//! 图片写入 `avatars` bucket（覆盖写），个人资料的 avatar_url 指向公开地址。
//! 上一张头像如果是当前账号自己目录下的对象，更新成功后删除。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::profiles::{requests::UpdateProfileRequest, responses::AvatarUploadResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::object_store::AVATARS_BUCKET;
use crate::services::upload::{object_path, read_single_file};
use crate::utils::detect_image_mime;

/// URL 指向头像 bucket 中 `{user_id}/` 目录下的对象时返回对象路径。
/// avatar_url 可由用户任意填写，别人的对象一律不认
pub(crate) fn owned_avatar_path<'a>(
    avatar_url: &'a str,
    bucket_url: &str,
    user_id: i64,
) -> Option<&'a str> {
    let path = avatar_url
        .strip_prefix(bucket_url)
        .and_then(|rest| rest.strip_prefix('/'))?;
    let file = path.strip_prefix(&format!("{user_id}/"))?;
    (!file.is_empty()).then_some(path)
}

pub async fn handle_upload_avatar(
    service: &ProfileService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(crate::services::unauthorized());
    };

    let config = AppConfig::get();
    let upload = match read_single_file(payload, config.upload.avatar_max_size).await {
        Ok(upload) => upload,
        Err(response) => return Ok(response),
    };

    // 只接受图片，按内容识别而不是客户端声明的类型
    let Some(mime) = detect_image_mime(&upload.bytes) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AvatarInvalid,
            "Please select an image file",
        )));
    };

    let storage = service.get_storage(request)?;
    let object_store = service.get_object_store(request)?;

    let previous = match storage.ensure_profile(user.id, &user.email, "").await {
        Ok(profile) => profile.avatar_url,
        Err(e) => {
            return Ok(crate::services::internal_error(
                ErrorCode::AvatarUploadFailed,
                format!("Failed to load profile: {e}"),
            ));
        }
    };

    let path = object_path(user.id, &upload.file_name);
    if let Err(e) = object_store
        .upload(AVATARS_BUCKET, &path, &upload.bytes, true)
        .await
    {
        return Ok(crate::services::internal_error(
            ErrorCode::AvatarUploadFailed,
            format!("Failed to store avatar: {e}"),
        ));
    }

    let avatar_url = object_store.public_url(AVATARS_BUCKET, &path);
    let update = UpdateProfileRequest {
        avatar_url: Some(avatar_url.clone()),
        ..Default::default()
    };

    let profile = match storage.update_profile(user.id, update).await {
        Ok(Some(profile)) => profile,
        Ok(None) | Err(_) => {
            if let Err(e) = object_store.remove(AVATARS_BUCKET, &[path]).await {
                tracing::warn!("Failed to clean up avatar object: {}", e);
            }
            return Ok(crate::services::internal_error(
                ErrorCode::AvatarUploadFailed,
                "Failed to update profile avatar",
            ));
        }
    };

    let bucket_url = object_store.public_url(AVATARS_BUCKET, "");
    let bucket_url = bucket_url.trim_end_matches('/');
    if let Some(old_path) = owned_avatar_path(&previous, bucket_url, user.id)
        && old_path != path
        && let Err(e) = object_store
            .remove(AVATARS_BUCKET, &[old_path.to_string()])
            .await
    {
        tracing::warn!("Failed to remove previous avatar {}: {}", old_path, e);
    }

    tracing::info!("Avatar updated for account {} ({})", user.id, mime);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        AvatarUploadResponse {
            avatar_url,
            profile,
        },
        "Avatar uploaded successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_avatar_path() {
        let bucket = "/api/v1/storage/avatars";
        assert_eq!(
            owned_avatar_path("/api/v1/storage/avatars/7/1_me.png", bucket, 7),
            Some("7/1_me.png")
        );
        assert_eq!(owned_avatar_path("https://cdn.example.com/me.png", bucket, 7), None);
        assert_eq!(owned_avatar_path("/api/v1/storage/avatars/", bucket, 7), None);
        assert_eq!(owned_avatar_path("/api/v1/storage/avatars/7/", bucket, 7), None);
        assert_eq!(owned_avatar_path("", bucket, 7), None);
    }

    #[test]
    fn test_owned_avatar_path_rejects_other_accounts() {
        let bucket = "/api/v1/storage/avatars";
        assert_eq!(
            owned_avatar_path("/api/v1/storage/avatars/8/1_me.png", bucket, 7),
            None
        );
        assert_eq!(
            owned_avatar_path("/api/v1/storage/avatars/77/1_me.png", bucket, 7),
            None
        );
    }
}
