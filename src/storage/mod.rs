use std::sync::Arc;

use crate::models::{
    academic::{
        entities::{AcademicYear, AcademicYearWithSemesters, Module, Semester},
        requests::ModuleInput,
    },
    documents::entities::{Document, NewDocument},
    profiles::{entities::Profile, requests::UpdateProfileRequest},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 关系型存储接口
///
/// 所有学业与文档方法都以 `user_id` 限定范围，其他用户的记录一律视为不存在。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 账号管理方法
    // 创建账号，同时创建对应的个人资料
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取账号信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取账号信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新账号信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 个人资料方法
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;
    // 个人资料不存在时按账号信息创建
    async fn ensure_profile(&self, user_id: i64, email: &str, name: &str) -> Result<Profile>;
    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>>;

    /// 学业记录方法
    // 学年 -> 学期 -> 课程模块的完整树
    async fn list_academic_tree(&self, user_id: i64) -> Result<Vec<AcademicYearWithSemesters>>;

    async fn create_year(&self, user_id: i64, year_name: &str) -> Result<AcademicYear>;
    async fn get_year(&self, user_id: i64, year_id: i64) -> Result<Option<AcademicYear>>;
    async fn update_year(
        &self,
        user_id: i64,
        year_id: i64,
        year_name: &str,
    ) -> Result<Option<AcademicYear>>;
    // 级联删除学期与课程模块
    async fn delete_year(&self, user_id: i64, year_id: i64) -> Result<bool>;

    async fn create_semester(
        &self,
        user_id: i64,
        year_id: i64,
        semester_name: &str,
    ) -> Result<Semester>;
    async fn get_semester(&self, user_id: i64, semester_id: i64) -> Result<Option<Semester>>;
    async fn update_semester(
        &self,
        user_id: i64,
        semester_id: i64,
        semester_name: &str,
        academic_year_id: i64,
    ) -> Result<Option<Semester>>;
    // 级联删除课程模块
    async fn delete_semester(&self, user_id: i64, semester_id: i64) -> Result<bool>;

    async fn create_module(&self, user_id: i64, module: ModuleInput) -> Result<Module>;
    async fn get_module(&self, user_id: i64, module_id: i64) -> Result<Option<Module>>;
    async fn update_module(
        &self,
        user_id: i64,
        module_id: i64,
        module: ModuleInput,
    ) -> Result<Option<Module>>;
    async fn delete_module(&self, user_id: i64, module_id: i64) -> Result<bool>;

    /// 文档方法
    // 按创建时间倒序
    async fn list_documents(&self, user_id: i64) -> Result<Vec<Document>>;
    async fn create_document(&self, document: NewDocument) -> Result<Document>;
    async fn get_document(&self, user_id: i64, document_id: i64) -> Result<Option<Document>>;
    async fn rename_document(
        &self,
        user_id: i64,
        document_id: i64,
        file_name: &str,
    ) -> Result<Option<Document>>;
    async fn delete_document(&self, user_id: i64, document_id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
