use serde::Deserialize;
use ts_rs::TS;

// 邮箱密码登录请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 注册请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

// 申请重置密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct PasswordResetRequest {
    pub email: String,
}

// 使用重置令牌设置新密码
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct PasswordResetConfirmRequest {
    pub token: String,
    pub new_password: String,
}
