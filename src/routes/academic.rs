use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::academic::requests::{
    CreateSemesterRequest, ModuleRequest, UpdateSemesterRequest, YearRequest,
};
use crate::services::AcademicService;
use crate::utils::{SafeModuleIdI64, SafeSemesterIdI64, SafeYearIdI64};

// 懒加载的全局 AcademicService 实例
static ACADEMIC_SERVICE: Lazy<AcademicService> = Lazy::new(AcademicService::new_lazy);

pub async fn get_academic_record(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_academic_record(&request).await
}

pub async fn get_summary(request: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_summary(&request).await
}

pub async fn get_grade_scale() -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.get_grade_scale().await
}

pub async fn create_year(
    request: HttpRequest,
    year_data: web::Json<YearRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .create_year(&request, year_data.into_inner())
        .await
}

pub async fn update_year(
    request: HttpRequest,
    year_id: SafeYearIdI64,
    year_data: web::Json<YearRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_year(&request, year_id.0, year_data.into_inner())
        .await
}

pub async fn delete_year(
    request: HttpRequest,
    year_id: SafeYearIdI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_year(&request, year_id.0).await
}

pub async fn create_semester(
    request: HttpRequest,
    year_id: SafeYearIdI64,
    semester_data: web::Json<CreateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .create_semester(&request, year_id.0, semester_data.into_inner())
        .await
}

pub async fn update_semester(
    request: HttpRequest,
    semester_id: SafeSemesterIdI64,
    semester_data: web::Json<UpdateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_semester(&request, semester_id.0, semester_data.into_inner())
        .await
}

pub async fn delete_semester(
    request: HttpRequest,
    semester_id: SafeSemesterIdI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .delete_semester(&request, semester_id.0)
        .await
}

pub async fn create_module(
    request: HttpRequest,
    semester_id: SafeSemesterIdI64,
    module_data: web::Json<ModuleRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .create_module(&request, semester_id.0, module_data.into_inner())
        .await
}

pub async fn update_module(
    request: HttpRequest,
    module_id: SafeModuleIdI64,
    module_data: web::Json<ModuleRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .update_module(&request, module_id.0, module_data.into_inner())
        .await
}

pub async fn delete_module(
    request: HttpRequest,
    module_id: SafeModuleIdI64,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.delete_module(&request, module_id.0).await
}

// 配置路由
pub fn configure_academic_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/academic")
            .wrap(middlewares::RequireJWT)
            .route("", web::get().to(get_academic_record))
            .route("/summary", web::get().to(get_summary))
            .route("/grade-scale", web::get().to(get_grade_scale))
            .route("/years", web::post().to(create_year))
            .route("/years/{year_id}", web::put().to(update_year))
            .route("/years/{year_id}", web::delete().to(delete_year))
            .route(
                "/years/{year_id}/semesters",
                web::post().to(create_semester),
            )
            .route("/semesters/{semester_id}", web::put().to(update_semester))
            .route(
                "/semesters/{semester_id}",
                web::delete().to(delete_semester),
            )
            .route(
                "/semesters/{semester_id}/modules",
                web::post().to(create_module),
            )
            .route("/modules/{module_id}", web::put().to(update_module))
            .route("/modules/{module_id}", web::delete().to(delete_module)),
    );
}
