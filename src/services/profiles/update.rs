use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::middlewares::RequireJWT;
use crate::models::profiles::{requests::UpdateProfileRequest, responses::ProfileResponse};
use crate::models::{ApiResponse, ErrorCode};

// 个人资料文本字段最大长度
const MAX_FIELD_LENGTH: usize = 255;

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// 去除首尾空白，姓名不能清空
pub(crate) fn normalize_update(
    update: UpdateProfileRequest,
) -> Result<UpdateProfileRequest, &'static str> {
    let update = UpdateProfileRequest {
        name: trimmed(update.name),
        university_name: trimmed(update.university_name),
        degree_program: trimmed(update.degree_program),
        student_id_number: trimmed(update.student_id_number),
        linkedin_url: trimmed(update.linkedin_url),
        portfolio_url: trimmed(update.portfolio_url),
        avatar_url: trimmed(update.avatar_url),
    };

    if update.name.as_deref().is_some_and(str::is_empty) {
        return Err("Name cannot be empty");
    }

    let too_long = [
        &update.name,
        &update.university_name,
        &update.degree_program,
        &update.student_id_number,
        &update.linkedin_url,
        &update.portfolio_url,
    ]
    .iter()
    .any(|field| field.as_deref().is_some_and(|v| v.chars().count() > MAX_FIELD_LENGTH));
    if too_long {
        return Err("Profile field is too long");
    }

    Ok(update)
}

pub async fn handle_update_profile(
    service: &ProfileService,
    request: &HttpRequest,
    update: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let Some(user) = RequireJWT::extract_user(request) else {
        return Ok(crate::services::unauthorized());
    };

    if update.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "No profile fields to update",
        )));
    }

    let update = match normalize_update(update) {
        Ok(update) => update,
        Err(message) => {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::BadRequest, message)));
        }
    };

    let storage = service.get_storage(request)?;

    // 旧账号可能没有个人资料
    if let Err(e) = storage.ensure_profile(user.id, &user.email, "").await {
        return Ok(crate::services::internal_error(
            ErrorCode::ProfileUpdateFailed,
            format!("Failed to update profile: {e}"),
        ));
    }

    match storage.update_profile(user.id, update).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ProfileResponse { profile },
            "Profile updated successfully!",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::ProfileNotFound,
            "Profile not found",
        ))),
        Err(e) => Ok(crate::services::internal_error(
            ErrorCode::ProfileUpdateFailed,
            format!("Failed to update profile: {e}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_update_trims_fields() {
        let update = UpdateProfileRequest {
            name: Some("  Ada Lovelace ".to_string()),
            degree_program: Some(" BSc Mathematics".to_string()),
            ..Default::default()
        };
        let normalized = normalize_update(update).unwrap();
        assert_eq!(normalized.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(normalized.degree_program.as_deref(), Some("BSc Mathematics"));
        assert!(normalized.university_name.is_none());
    }

    #[test]
    fn test_normalize_update_rejects_blank_name() {
        let update = UpdateProfileRequest {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(normalize_update(update).is_err());
    }

    #[test]
    fn test_normalize_update_allows_clearing_optional_fields() {
        let update = UpdateProfileRequest {
            linkedin_url: Some(String::new()),
            ..Default::default()
        };
        let normalized = normalize_update(update).unwrap();
        assert_eq!(normalized.linkedin_url.as_deref(), Some(""));
    }

    #[test]
    fn test_normalize_update_rejects_long_field() {
        let update = UpdateProfileRequest {
            university_name: Some("x".repeat(MAX_FIELD_LENGTH + 1)),
            ..Default::default()
        };
        assert!(normalize_update(update).is_err());
    }
}
