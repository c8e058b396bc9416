//! 数据模型定义
//!
//! 按业务划分子模块，每个子模块包含 entities（业务实体）、requests（请求体）与 responses（响应体）。

pub mod academic;
pub mod auth;
pub mod common;
pub mod documents;
pub mod profiles;
pub mod users;

pub use common::response::ApiResponse;

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1xxx
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    InternalServerError = 1004,
    RateLimitExceeded = 1005,

    // 认证错误 2xxx
    AuthFailed = 2000,
    UserNotFound = 2001,
    WrongPassword = 2002,
    InvalidEmail = 2003,
    UserDisabled = 2004,
    TooManyRequests = 2005,
    EmailAlreadyInUse = 2006,
    SignupNotAllowed = 2007,
    WeakPassword = 2008,
    RegisterFailed = 2009,
    PasswordResetFailed = 2010,
    PasswordResetTokenInvalid = 2011,

    // 个人资料错误 3xxx
    ProfileNotFound = 3000,
    ProfileUpdateFailed = 3001,
    AvatarInvalid = 3002,
    AvatarUploadFailed = 3003,

    // 文档错误 4xxx
    DocumentNotFound = 4000,
    FileUploadFailed = 4001,
    FileTypeNotAllowed = 4002,
    FileSizeExceeded = 4003,
    MultifileUploadNotAllowed = 4004,
    FileNotFound = 4005,
    DocumentUpdateFailed = 4006,
    DocumentDeleteFailed = 4007,
    StorageDeletionFailed = 4008,

    // 学业记录错误 5xxx
    YearNotFound = 5000,
    SemesterNotFound = 5001,
    ModuleNotFound = 5002,
    InvalidGrade = 5003,
    InvalidCredits = 5004,
    NameRequired = 5005,
    AcademicOperationFailed = 5006,
}
