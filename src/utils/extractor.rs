//! 路径参数安全提取器
//!
//! 从路由路径中提取正整数 ID，非法值直接返回 400 与统一的 JSON 错误体，
//! 避免每个处理程序重复解析。

use actix_web::{HttpResponse, ResponseError, http::StatusCode};

use crate::models::{ApiResponse, ErrorCode};

/// 路径参数解析错误
#[derive(Debug)]
pub struct PathParamError {
    pub param: &'static str,
    pub raw: String,
}

impl std::fmt::Display for PathParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid path parameter '{}': {}", self.param, self.raw)
    }
}

impl ResponseError for PathParamError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::BadRequest().json(ApiResponse::<()>::error_empty(
            ErrorCode::BadRequest,
            self.to_string(),
        ))
    }
}

/// 解析正整数 ID
pub fn parse_positive_i64(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok().filter(|id| *id > 0)
}

/// 定义一个从路径参数 `$param` 中提取正整数的提取器
#[macro_export]
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name(pub i64);

        impl actix_web::FromRequest for $name {
            type Error = $crate::utils::extractor::PathParamError;
            type Future = std::future::Ready<Result<Self, Self::Error>>;

            fn from_request(
                req: &actix_web::HttpRequest,
                _payload: &mut actix_web::dev::Payload,
            ) -> Self::Future {
                let raw = req.match_info().get($param).unwrap_or_default();
                std::future::ready(
                    $crate::utils::extractor::parse_positive_i64(raw)
                        .map($name)
                        .ok_or_else(|| $crate::utils::extractor::PathParamError {
                            param: $param,
                            raw: raw.to_string(),
                        }),
                )
            }
        }
    };
}

define_safe_i64_extractor!(SafeYearIdI64, "year_id");
define_safe_i64_extractor!(SafeSemesterIdI64, "semester_id");
define_safe_i64_extractor!(SafeModuleIdI64, "module_id");
define_safe_i64_extractor!(SafeDocumentIdI64, "document_id");
