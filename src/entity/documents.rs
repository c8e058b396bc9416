//! 文档实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "documents")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    #[sea_orm(unique)]
    pub storage_path: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_document(self) -> crate::models::documents::entities::Document {
        crate::models::documents::entities::Document {
            id: self.id,
            user_id: self.user_id,
            file_name: self.file_name,
            file_type: self.file_type,
            file_size: self.file_size,
            storage_path: self.storage_path,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
