use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生个人资料，id 与账号 ID 相同
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/profile.ts")]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub university_name: String,
    pub degree_program: String,
    pub student_id_number: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
