//! 个人资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub university_name: String,
    pub degree_program: String,
    pub student_id_number: String,
    pub linkedin_url: String,
    pub portfolio_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Id",
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

impl Model {
    pub fn into_profile(self) -> crate::models::profiles::entities::Profile {
        use super::timestamp_to_datetime;
        use crate::models::profiles::entities::Profile;

        Profile {
            id: self.id,
            name: self.name,
            email: self.email,
            avatar_url: self.avatar_url,
            university_name: self.university_name,
            degree_program: self.degree_program,
            student_id_number: self.student_id_number,
            linkedin_url: self.linkedin_url,
            portfolio_url: self.portfolio_url,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
