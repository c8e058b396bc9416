use serde::Deserialize;
use ts_rs::TS;

// 个人资料部分更新，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub university_name: Option<String>,
    pub degree_program: Option<String>,
    pub student_id_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub avatar_url: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.university_name.is_none()
            && self.degree_program.is_none()
            && self.student_id_number.is_none()
            && self.linkedin_url.is_none()
            && self.portfolio_url.is_none()
            && self.avatar_url.is_none()
    }
}
