use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicService, bad_request, normalize_name, not_found, operation_failed};
use crate::middlewares::RequireJWT;
use crate::models::academic::requests::{CreateSemesterRequest, UpdateSemesterRequest};
use crate::models::{ApiResponse, ErrorCode};

const YEAR_NOT_FOUND: &str = "Academic year not found";
const SEMESTER_NOT_FOUND: &str = "Semester not found";

pub async fn create_semester(
    service: &AcademicService,
    request: &HttpRequest,
    year_id: i64,
    body: CreateSemesterRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };
    let Some(semester_name) = normalize_name(&body.semester_name) else {
        return Ok(bad_request(
            ErrorCode::NameRequired,
            "Semester name is required",
        ));
    };

    let storage = service.get_storage(request)?;
    match storage.get_year(user_id, year_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::YearNotFound, YEAR_NOT_FOUND)),
        Err(e) => return Ok(operation_failed("add semester", e)),
    }

    match storage
        .create_semester(user_id, year_id, &semester_name)
        .await
    {
        Ok(semester) => Ok(HttpResponse::Created().json(ApiResponse::success(
            semester,
            "Semester added successfully",
        ))),
        Err(e) => Ok(operation_failed("add semester", e)),
    }
}

/// 修改学期名称，可选地移动到当前账号的另一个学年
pub async fn update_semester(
    service: &AcademicService,
    request: &HttpRequest,
    semester_id: i64,
    body: UpdateSemesterRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };
    let Some(semester_name) = normalize_name(&body.semester_name) else {
        return Ok(bad_request(
            ErrorCode::NameRequired,
            "Semester name is required",
        ));
    };

    let storage = service.get_storage(request)?;
    let semester = match storage.get_semester(user_id, semester_id).await {
        Ok(Some(semester)) => semester,
        Ok(None) => return Ok(not_found(ErrorCode::SemesterNotFound, SEMESTER_NOT_FOUND)),
        Err(e) => return Ok(operation_failed("update semester", e)),
    };

    let target_year = body.academic_year_id.unwrap_or(semester.academic_year_id);
    if target_year != semester.academic_year_id {
        match storage.get_year(user_id, target_year).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::YearNotFound, YEAR_NOT_FOUND)),
            Err(e) => return Ok(operation_failed("update semester", e)),
        }
    }

    match storage
        .update_semester(user_id, semester_id, &semester_name, target_year)
        .await
    {
        Ok(Some(semester)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            semester,
            "Semester updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::SemesterNotFound, SEMESTER_NOT_FOUND)),
        Err(e) => Ok(operation_failed("update semester", e)),
    }
}

/// 删除学期及其下所有课程模块
pub async fn delete_semester(
    service: &AcademicService,
    request: &HttpRequest,
    semester_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let storage = service.get_storage(request)?;
    match storage.delete_semester(user_id, semester_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Semester deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::SemesterNotFound, SEMESTER_NOT_FOUND)),
        Err(e) => Ok(operation_failed("delete semester", e)),
    }
}
