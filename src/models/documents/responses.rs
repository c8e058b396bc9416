use super::entities::Document;
use crate::utils::format_file_size;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct DocumentResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub document: Document,
    /// 可读的文件大小，如 "1.5 KB"
    pub size_label: String,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        let size_label = format_file_size(document.file_size.max(0) as u64);
        Self {
            document,
            size_label,
        }
    }
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/document.ts")]
pub struct DocumentListResponse {
    pub items: Vec<DocumentResponse>,
}
