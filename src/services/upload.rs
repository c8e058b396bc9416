//! multipart 上传解析
//!
//! 文档和头像上传共用：只接受一个 `file` 字段，可附带文本字段（如 `name`），
//! 边读边校验大小，超出限制立即停止读取。

use std::collections::HashMap;
use std::path::Path;

use actix_multipart::Multipart;
use actix_web::HttpResponse;
use futures_util::{StreamExt, TryStreamExt};

use crate::models::{ApiResponse, ErrorCode};

pub(crate) const FILE_FIELD: &str = "file";
// 文本字段最大长度
const MAX_TEXT_FIELD: usize = 1024;

pub(crate) struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
    pub text_fields: HashMap<String, String>,
}

impl UploadedFile {
    /// 小写扩展名，带点号，如 ".pdf"
    pub fn extension(&self) -> String {
        file_extension(&self.file_name)
    }
}

pub(crate) fn file_extension(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 读取单文件上传，失败时返回可直接响应的 HttpResponse
pub(crate) async fn read_single_file(
    mut payload: Multipart,
    max_size: usize,
) -> Result<UploadedFile, HttpResponse> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut text_fields = HashMap::new();

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                tracing::debug!("Malformed multipart payload: {}", e);
                return Err(bad_request(
                    ErrorCode::FileUploadFailed,
                    "Malformed multipart payload",
                ));
            }
        };

        let content_disposition = field.content_disposition().cloned();
        let name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == FILE_FIELD {
            if file.is_some() {
                return Err(bad_request(
                    ErrorCode::MultifileUploadNotAllowed,
                    "Only one file can be uploaded at a time",
                ));
            }

            let file_name = content_disposition
                .as_ref()
                .and_then(|cd| cd.get_filename())
                .map(|s| s.to_string())
                .unwrap_or_default();
            let content_type = field.content_type().map(|ct| ct.to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| {
                    tracing::debug!("Failed to read upload chunk: {}", e);
                    bad_request(ErrorCode::FileUploadFailed, "Failed to read uploaded file")
                })?;
                if bytes.len() + data.len() > max_size {
                    return Err(HttpResponse::PayloadTooLarge().json(ApiResponse::error_empty(
                        ErrorCode::FileSizeExceeded,
                        "File size exceeds the limit",
                    )));
                }
                bytes.extend_from_slice(&data);
            }

            file = Some((file_name, content_type, bytes));
        } else {
            let mut value = Vec::new();
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|_| {
                    bad_request(ErrorCode::BadRequest, "Failed to read form field")
                })?;
                if value.len() + data.len() > MAX_TEXT_FIELD {
                    return Err(bad_request(ErrorCode::BadRequest, "Form field is too long"));
                }
                value.extend_from_slice(&data);
            }
            text_fields.insert(name, String::from_utf8_lossy(&value).into_owned());
        }
    }

    match file {
        Some((file_name, content_type, bytes)) => {
            if bytes.is_empty() {
                return Err(bad_request(ErrorCode::FileUploadFailed, "Uploaded file is empty"));
            }
            Ok(UploadedFile {
                file_name,
                content_type,
                bytes,
                text_fields,
            })
        }
        None => Err(bad_request(
            ErrorCode::FileNotFound,
            "No file found in upload payload",
        )),
    }
}

/// 对象存储路径 `{user_id}/{millis}_{file_name}`
pub(crate) fn object_path(user_id: i64, file_name: &str) -> String {
    format!(
        "{}/{}_{}",
        user_id,
        chrono::Utc::now().timestamp_millis(),
        crate::object_store::sanitize_file_name(file_name)
    )
}
