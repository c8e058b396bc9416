use std::path::{Path, PathBuf};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use super::{ObjectStore, validate_bucket, validate_object_path};
use crate::errors::{MyGpaError, Result};

/// 本地文件系统对象存储，对象位于 `{root}/{bucket}/{path}`
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl AsRef<Path>, public_base_url: &str) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| {
            MyGpaError::object_storage(format!(
                "Failed to create storage root {}: {e}",
                root.display()
            ))
        })?;
        Ok(Self {
            root,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn object_path(&self, bucket: &str, path: &str) -> Result<PathBuf> {
        validate_bucket(bucket)?;
        validate_object_path(path)?;
        Ok(self.root.join(bucket).join(path))
    }
}

/// 写入对象内容，失败时删除写了一半的文件
async fn write_or_discard<W>(mut writer: W, target: &Path, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match writer.write_all(bytes).await {
        Ok(()) => writer.flush().await,
        Err(e) => Err(e),
    };
    if written.is_err() {
        drop(writer);
        if let Err(e) = tokio::fs::remove_file(target).await {
            warn!("Failed to remove partial object {}: {}", target.display(), e);
        }
    }
    written
}

#[async_trait::async_trait]
impl ObjectStore for LocalObjectStore {
    async fn upload(&self, bucket: &str, path: &str, bytes: &[u8], upsert: bool) -> Result<()> {
        let target = self.object_path(bucket, path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut options = tokio::fs::OpenOptions::new();
        options.write(true);
        if upsert {
            options.create(true).truncate(true);
        } else {
            options.create_new(true);
        }

        let file = options.open(&target).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::AlreadyExists {
                MyGpaError::object_storage(format!("Object already exists: {bucket}/{path}"))
            } else {
                MyGpaError::object_storage(format!("Failed to open {bucket}/{path}: {e}"))
            }
        })?;
        write_or_discard(file, &target, bytes).await.map_err(|e| {
            MyGpaError::object_storage(format!("Failed to write {bucket}/{path}: {e}"))
        })?;

        debug!("Stored object {}/{} ({} bytes)", bucket, path, bytes.len());
        Ok(())
    }

    async fn download(&self, bucket: &str, path: &str) -> Result<Vec<u8>> {
        let target = self.object_path(bucket, path)?;
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(MyGpaError::not_found(
                format!("Object not found: {bucket}/{path}"),
            )),
            Err(e) => Err(MyGpaError::object_storage(format!(
                "Failed to read {bucket}/{path}: {e}"
            ))),
        }
    }

    async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
        for path in paths {
            let target = self.object_path(bucket, path)?;
            match tokio::fs::remove_file(&target).await {
                Ok(()) => debug!("Removed object {}/{}", bucket, path),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    warn!("Object {}/{} already missing", bucket, path);
                }
                Err(e) => {
                    return Err(MyGpaError::object_storage(format!(
                        "Failed to remove {bucket}/{path}: {e}"
                    )));
                }
            }
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (LocalObjectStore, PathBuf) {
        let root = std::env::temp_dir().join(format!("mygpa-store-{}", uuid::Uuid::new_v4()));
        let store = LocalObjectStore::new(&root, "/api/v1/storage/").unwrap();
        (store, root)
    }

    #[tokio::test]
    async fn test_upload_download_remove() {
        let (store, root) = temp_store();

        store
            .upload("user-documents", "7/1_notes.txt", b"hello", false)
            .await
            .unwrap();
        assert_eq!(
            store.download("user-documents", "7/1_notes.txt").await.unwrap(),
            b"hello"
        );

        store
            .remove("user-documents", &["7/1_notes.txt".to_string()])
            .await
            .unwrap();
        let err = store
            .download("user-documents", "7/1_notes.txt")
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E008");

        // 删除不存在的对象不报错
        store
            .remove("user-documents", &["7/1_notes.txt".to_string()])
            .await
            .unwrap();

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_upsert_semantics() {
        let (store, root) = temp_store();

        store.upload("avatars", "7/me.png", b"v1", false).await.unwrap();
        assert!(store.upload("avatars", "7/me.png", b"v2", false).await.is_err());

        store.upload("avatars", "7/me.png", b"v3", true).await.unwrap();
        assert_eq!(store.download("avatars", "7/me.png").await.unwrap(), b"v3");

        let _ = std::fs::remove_dir_all(root);
    }

    struct FailingWriter;

    impl AsyncWrite for FailingWriter {
        fn poll_write(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
            _buf: &[u8],
        ) -> std::task::Poll<std::io::Result<usize>> {
            std::task::Poll::Ready(Err(std::io::Error::other("disk full")))
        }

        fn poll_flush(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }

        fn poll_shutdown(
            self: std::pin::Pin<&mut Self>,
            _cx: &mut std::task::Context<'_>,
        ) -> std::task::Poll<std::io::Result<()>> {
            std::task::Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_partial_object() {
        let (store, root) = temp_store();
        let target = store.object_path("user-documents", "7/1_report.pdf").unwrap();
        std::fs::create_dir_all(target.parent().unwrap()).unwrap();
        std::fs::write(&target, b"%PD").unwrap();

        let err = write_or_discard(FailingWriter, &target, b"%PDF-1.7")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "disk full");
        assert!(!target.exists());

        // 同一路径可以重新上传
        store
            .upload("user-documents", "7/1_report.pdf", b"%PDF-1.7", false)
            .await
            .unwrap();
        assert_eq!(
            store.download("user-documents", "7/1_report.pdf").await.unwrap(),
            b"%PDF-1.7"
        );

        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_rejects_traversal() {
        let (store, root) = temp_store();
        assert!(
            store
                .upload("avatars", "../escape.txt", b"x", true)
                .await
                .is_err()
        );
        assert!(store.download("avatars", "/etc/passwd").await.is_err());
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn test_public_url() {
        let (store, root) = temp_store();
        assert_eq!(
            store.public_url("avatars", "7/1_me.png"),
            "/api/v1/storage/avatars/7/1_me.png"
        );
        let _ = std::fs::remove_dir_all(root);
    }
}
