//! 学业记录服务
//!
//! 学年 -> 学期 -> 课程模块三级结构的增删改查以及 GPA 汇总。
//! 所有操作都限定在当前账号内，访问其他账号的记录按不存在处理（404）。

pub mod modules;
pub mod semesters;
pub mod years;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::gpa::{grade_scale, summarize};
use crate::middlewares::RequireJWT;
use crate::models::academic::{
    requests::{CreateSemesterRequest, ModuleRequest, UpdateSemesterRequest, YearRequest},
    responses::{AcademicRecordResponse, GradeScaleResponse},
};
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AcademicService {
    storage: Option<Arc<dyn Storage>>,
}

/// 名称去除首尾空白后不能为空
pub(crate) fn normalize_name(name: &str) -> Option<String> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn operation_failed(action: &str, e: impl std::fmt::Display) -> HttpResponse {
    super::internal_error(
        ErrorCode::AcademicOperationFailed,
        format!("Failed to {action}: {e}"),
    )
}

impl AcademicService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::app_component::<dyn Storage>(request, "Storage"),
        }
    }

    pub async fn get_academic_record(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(super::unauthorized());
        };

        let storage = self.get_storage(request)?;
        match storage.list_academic_tree(user_id).await {
            Ok(years) => {
                let summary = summarize(&years);
                Ok(HttpResponse::Ok().json(ApiResponse::success(
                    AcademicRecordResponse { years, summary },
                    "Academic record retrieved successfully",
                )))
            }
            Err(e) => Ok(operation_failed("load academic record", e)),
        }
    }

    pub async fn get_summary(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let Some(user_id) = RequireJWT::extract_user_id(request) else {
            return Ok(super::unauthorized());
        };

        let storage = self.get_storage(request)?;
        match storage.list_academic_tree(user_id).await {
            Ok(years) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                summarize(&years),
                "GPA summary calculated successfully",
            ))),
            Err(e) => Ok(operation_failed("calculate GPA summary", e)),
        }
    }

    pub async fn get_grade_scale(&self) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeScaleResponse {
                grades: grade_scale(),
            },
            "Grade scale retrieved successfully",
        )))
    }

    pub async fn create_year(
        &self,
        request: &HttpRequest,
        body: YearRequest,
    ) -> ActixResult<HttpResponse> {
        years::create_year(self, request, body).await
    }

    pub async fn update_year(
        &self,
        request: &HttpRequest,
        year_id: i64,
        body: YearRequest,
    ) -> ActixResult<HttpResponse> {
        years::update_year(self, request, year_id, body).await
    }

    pub async fn delete_year(
        &self,
        request: &HttpRequest,
        year_id: i64,
    ) -> ActixResult<HttpResponse> {
        years::delete_year(self, request, year_id).await
    }

    pub async fn create_semester(
        &self,
        request: &HttpRequest,
        year_id: i64,
        body: CreateSemesterRequest,
    ) -> ActixResult<HttpResponse> {
        semesters::create_semester(self, request, year_id, body).await
    }

    pub async fn update_semester(
        &self,
        request: &HttpRequest,
        semester_id: i64,
        body: UpdateSemesterRequest,
    ) -> ActixResult<HttpResponse> {
        semesters::update_semester(self, request, semester_id, body).await
    }

    pub async fn delete_semester(
        &self,
        request: &HttpRequest,
        semester_id: i64,
    ) -> ActixResult<HttpResponse> {
        semesters::delete_semester(self, request, semester_id).await
    }

    pub async fn create_module(
        &self,
        request: &HttpRequest,
        semester_id: i64,
        body: ModuleRequest,
    ) -> ActixResult<HttpResponse> {
        modules::create_module(self, request, semester_id, body).await
    }

    pub async fn update_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
        body: ModuleRequest,
    ) -> ActixResult<HttpResponse> {
        modules::update_module(self, request, module_id, body).await
    }

    pub async fn delete_module(
        &self,
        request: &HttpRequest,
        module_id: i64,
    ) -> ActixResult<HttpResponse> {
        modules::delete_module(self, request, module_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Year 1 ").as_deref(), Some("Year 1"));
        assert_eq!(normalize_name("   "), None);
        assert_eq!(normalize_name(""), None);
    }
}
