//! 课程模块实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "modules")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub semester_id: i64,
    pub module_code: String,
    pub module_name: String,
    pub credits: f64,
    pub grade: Option<String>,
    pub grade_points: Option<f64>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id"
    )]
    Semester,
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_module(self) -> crate::models::academic::entities::Module {
        crate::models::academic::entities::Module {
            id: self.id,
            user_id: self.user_id,
            semester_id: self.semester_id,
            module_code: self.module_code,
            module_name: self.module_name,
            credits: self.credits,
            grade: self.grade,
            grade_points: self.grade_points,
            created_at: super::timestamp_to_datetime(self.created_at),
        }
    }
}
