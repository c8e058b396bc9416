use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicService, bad_request, normalize_name, not_found, operation_failed};
use crate::middlewares::RequireJWT;
use crate::models::academic::requests::YearRequest;
use crate::models::{ApiResponse, ErrorCode};

const YEAR_NOT_FOUND: &str = "Academic year not found";

pub async fn create_year(
    service: &AcademicService,
    request: &HttpRequest,
    body: YearRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };
    let Some(year_name) = normalize_name(&body.year_name) else {
        return Ok(bad_request(ErrorCode::NameRequired, "Year name is required"));
    };

    let storage = service.get_storage(request)?;
    match storage.create_year(user_id, &year_name).await {
        Ok(year) => Ok(HttpResponse::Created().json(ApiResponse::success(
            year,
            "Academic year added successfully",
        ))),
        Err(e) => Ok(operation_failed("add academic year", e)),
    }
}

pub async fn update_year(
    service: &AcademicService,
    request: &HttpRequest,
    year_id: i64,
    body: YearRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };
    let Some(year_name) = normalize_name(&body.year_name) else {
        return Ok(bad_request(ErrorCode::NameRequired, "Year name is required"));
    };

    let storage = service.get_storage(request)?;
    match storage.update_year(user_id, year_id, &year_name).await {
        Ok(Some(year)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            year,
            "Academic year updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::YearNotFound, YEAR_NOT_FOUND)),
        Err(e) => Ok(operation_failed("update academic year", e)),
    }
}

/// 删除学年及其下所有学期和课程模块
pub async fn delete_year(
    service: &AcademicService,
    request: &HttpRequest,
    year_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let storage = service.get_storage(request)?;
    match storage.delete_year(user_id, year_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Academic year deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::YearNotFound, YEAR_NOT_FOUND)),
        Err(e) => Ok(operation_failed("delete academic year", e)),
    }
}
