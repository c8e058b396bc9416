//! 文档元数据存储操作

use super::SeaOrmStorage;
use crate::entity::documents::{ActiveModel, Column, Entity as Documents};
use crate::errors::{MyGpaError, Result};
use crate::models::documents::entities::{Document, NewDocument};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 列出用户文档，最新的在前
    pub async fn list_documents_impl(&self, user_id: i64) -> Result<Vec<Document>> {
        let result = Documents::find()
            .filter(Column::UserId.eq(user_id))
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询文档列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_document()).collect())
    }

    /// 新增文档记录
    pub async fn create_document_impl(&self, doc: NewDocument) -> Result<Document> {
        let model = ActiveModel {
            user_id: Set(doc.user_id),
            file_name: Set(doc.file_name),
            file_type: Set(doc.file_type),
            file_size: Set(doc.file_size),
            storage_path: Set(doc.storage_path),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建文档记录失败: {e}")))?;

        Ok(result.into_document())
    }

    pub async fn get_document_impl(
        &self,
        user_id: i64,
        document_id: i64,
    ) -> Result<Option<Document>> {
        let result = Documents::find_by_id(document_id)
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询文档失败: {e}")))?;

        Ok(result.map(|m| m.into_document()))
    }

    /// 重命名文档（仅修改显示名称，存储路径不变）
    pub async fn rename_document_impl(
        &self,
        user_id: i64,
        document_id: i64,
        file_name: &str,
    ) -> Result<Option<Document>> {
        if self.get_document_impl(user_id, document_id).await?.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(document_id),
            file_name: Set(file_name.to_string()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("重命名文档失败: {e}")))?;

        Ok(Some(result.into_document()))
    }

    pub async fn delete_document_impl(&self, user_id: i64, document_id: i64) -> Result<bool> {
        let result = Documents::delete_many()
            .filter(Column::Id.eq(document_id))
            .filter(Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("删除文档失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
