use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AcademicService, bad_request, normalize_name, not_found, operation_failed};
use crate::gpa::normalize_grade;
use crate::middlewares::RequireJWT;
use crate::models::academic::requests::{ModuleInput, ModuleRequest};
use crate::models::{ApiResponse, ErrorCode};

const SEMESTER_NOT_FOUND: &str = "Semester not found";
const MODULE_NOT_FOUND: &str = "Module not found";

/// 校验请求体并换算绩点，失败时返回 400 响应
pub(crate) fn build_module_input(
    semester_id: i64,
    body: &ModuleRequest,
) -> Result<ModuleInput, HttpResponse> {
    let Some(module_code) = normalize_name(&body.module_code) else {
        return Err(bad_request(
            ErrorCode::NameRequired,
            "Module code is required",
        ));
    };
    let Some(module_name) = normalize_name(&body.module_name) else {
        return Err(bad_request(
            ErrorCode::NameRequired,
            "Module name is required",
        ));
    };

    if !body.credits.is_finite() || body.credits < 0.0 {
        return Err(bad_request(
            ErrorCode::InvalidCredits,
            "Credits must be a non-negative number",
        ));
    }

    let graded = normalize_grade(body.grade.as_deref())
        .map_err(|e| bad_request(ErrorCode::InvalidGrade, e.message()))?;
    let (grade, grade_points) = match graded {
        Some((grade, points)) => (Some(grade), Some(points)),
        None => (None, None),
    };

    Ok(ModuleInput {
        semester_id,
        module_code,
        module_name,
        credits: body.credits,
        grade,
        grade_points,
    })
}

pub async fn create_module(
    service: &AcademicService,
    request: &HttpRequest,
    semester_id: i64,
    body: ModuleRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let input = match build_module_input(semester_id, &body) {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request)?;
    match storage.get_semester(user_id, semester_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(not_found(ErrorCode::SemesterNotFound, SEMESTER_NOT_FOUND)),
        Err(e) => return Ok(operation_failed("add module", e)),
    }

    match storage.create_module(user_id, input).await {
        Ok(module) => Ok(HttpResponse::Created().json(ApiResponse::success(
            module,
            "Module added successfully",
        ))),
        Err(e) => Ok(operation_failed("add module", e)),
    }
}

/// 修改课程模块，`semester_id` 存在时移动到当前账号的另一个学期
pub async fn update_module(
    service: &AcademicService,
    request: &HttpRequest,
    module_id: i64,
    body: ModuleRequest,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let storage = service.get_storage(request)?;
    let existing = match storage.get_module(user_id, module_id).await {
        Ok(Some(module)) => module,
        Ok(None) => return Ok(not_found(ErrorCode::ModuleNotFound, MODULE_NOT_FOUND)),
        Err(e) => return Ok(operation_failed("update module", e)),
    };

    let semester_id = body.semester_id.unwrap_or(existing.semester_id);
    let input = match build_module_input(semester_id, &body) {
        Ok(input) => input,
        Err(response) => return Ok(response),
    };

    if semester_id != existing.semester_id {
        match storage.get_semester(user_id, semester_id).await {
            Ok(Some(_)) => {}
            Ok(None) => return Ok(not_found(ErrorCode::SemesterNotFound, SEMESTER_NOT_FOUND)),
            Err(e) => return Ok(operation_failed("update module", e)),
        }
    }

    match storage.update_module(user_id, module_id, input).await {
        Ok(Some(module)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            module,
            "Module updated successfully",
        ))),
        Ok(None) => Ok(not_found(ErrorCode::ModuleNotFound, MODULE_NOT_FOUND)),
        Err(e) => Ok(operation_failed("update module", e)),
    }
}

pub async fn delete_module(
    service: &AcademicService,
    request: &HttpRequest,
    module_id: i64,
) -> ActixResult<HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Ok(crate::services::unauthorized());
    };

    let storage = service.get_storage(request)?;
    match storage.delete_module(user_id, module_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Module deleted successfully",
        ))),
        Ok(false) => Ok(not_found(ErrorCode::ModuleNotFound, MODULE_NOT_FOUND)),
        Err(e) => Ok(operation_failed("delete module", e)),
    }
}
