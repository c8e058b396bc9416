use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct Document {
    pub id: i64,
    pub user_id: i64,
    // 显示名称，可重命名
    pub file_name: String,
    // MIME 类型
    pub file_type: String,
    // 文件大小（以字节为单位）
    pub file_size: i64,
    // 在 user-documents bucket 中的路径
    pub storage_path: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 存储层新增文档记录
#[derive(Debug, Clone)]
pub struct NewDocument {
    pub user_id: i64,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub storage_path: String,
}
