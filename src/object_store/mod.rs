//! 对象存储
//!
//! 按 bucket 组织的文件存储：`user-documents` 存放学生文档，`avatars` 存放头像。
//! 路径由服务层生成，形如 `{user_id}/{millis}_{file_name}`。

mod local;

pub use local::LocalObjectStore;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::errors::{MyGpaError, Result};

pub const DOCUMENTS_BUCKET: &str = "user-documents";
pub const AVATARS_BUCKET: &str = "avatars";

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// 写入对象，`upsert` 为 false 时目标已存在则报错
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8], upsert: bool) -> Result<()>;
    /// 读取对象，不存在时返回 NotFound
    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>>;
    /// 批量删除，不存在的对象会被忽略
    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()>;
    /// 对象的公开访问 URL
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// 校验对象路径，只允许相对的、不含 `..` 的正斜杠路径
pub fn validate_object_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(MyGpaError::object_storage("Object path is empty"));
    }
    if path.starts_with('/') || path.contains('\\') || path.contains('\0') || path.contains(':') {
        return Err(MyGpaError::object_storage(format!(
            "Invalid object path: {path}"
        )));
    }
    if path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(MyGpaError::object_storage(format!(
            "Invalid object path: {path}"
        )));
    }
    Ok(())
}

/// bucket 名称只允许小写字母、数字和连字符
pub fn validate_bucket(bucket: &str) -> Result<()> {
    let valid = !bucket.is_empty()
        && bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(MyGpaError::object_storage(format!(
            "Invalid bucket name: {bucket}"
        )))
    }
}

/// 将用户提供的文件名转为可用作路径片段的名称
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

pub fn create_object_store() -> Result<Arc<dyn ObjectStore>> {
    let config = AppConfig::get();
    let store = LocalObjectStore::new(&config.upload.dir, &config.upload.public_base_url)?;
    Ok(Arc::new(store))
}
