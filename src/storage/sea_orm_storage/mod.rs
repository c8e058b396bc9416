//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academic;
mod documents;
mod profiles;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{MyGpaError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(&config.database).await
    }

    /// 按给定数据库配置连接并运行迁移
    pub async fn connect(database: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, database).await?
        } else {
            Self::connect_generic(&db_url, database).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| MyGpaError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(database.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| MyGpaError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, database: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(database.pool_size)
            .min_connections(database.pool_size.min(5))
            .connect_timeout(Duration::from_secs(database.timeout))
            .acquire_timeout(Duration::from_secs(database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| MyGpaError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") || url.starts_with("sqlite::memory:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(MyGpaError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 账号模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 个人资料模块
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        self.get_profile_impl(user_id).await
    }

    async fn ensure_profile(&self, user_id: i64, email: &str, name: &str) -> Result<Profile> {
        self.ensure_profile_impl(user_id, email, name).await
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        self.update_profile_impl(user_id, update).await
    }

    // 学业记录模块
    async fn list_academic_tree(&self, user_id: i64) -> Result<Vec<AcademicYearWithSemesters>> {
        self.list_academic_tree_impl(user_id).await
    }

    async fn create_year(&self, user_id: i64, year_name: &str) -> Result<AcademicYear> {
        self.create_year_impl(user_id, year_name).await
    }

    async fn get_year(&self, user_id: i64, year_id: i64) -> Result<Option<AcademicYear>> {
        self.get_year_impl(user_id, year_id).await
    }

    async fn update_year(
        &self,
        user_id: i64,
        year_id: i64,
        year_name: &str,
    ) -> Result<Option<AcademicYear>> {
        self.update_year_impl(user_id, year_id, year_name).await
    }

    async fn delete_year(&self, user_id: i64, year_id: i64) -> Result<bool> {
        self.delete_year_impl(user_id, year_id).await
    }

    async fn create_semester(
        &self,
        user_id: i64,
        year_id: i64,
        semester_name: &str,
    ) -> Result<Semester> {
        self.create_semester_impl(user_id, year_id, semester_name)
            .await
    }

    async fn get_semester(&self, user_id: i64, semester_id: i64) -> Result<Option<Semester>> {
        self.get_semester_impl(user_id, semester_id).await
    }

    async fn update_semester(
        &self,
        user_id: i64,
        semester_id: i64,
        semester_name: &str,
        academic_year_id: i64,
    ) -> Result<Option<Semester>> {
        self.update_semester_impl(user_id, semester_id, semester_name, academic_year_id)
            .await
    }

    async fn delete_semester(&self, user_id: i64, semester_id: i64) -> Result<bool> {
        self.delete_semester_impl(user_id, semester_id).await
    }

    async fn create_module(&self, user_id: i64, module: ModuleInput) -> Result<Module> {
        self.create_module_impl(user_id, module).await
    }

    async fn get_module(&self, user_id: i64, module_id: i64) -> Result<Option<Module>> {
        self.get_module_impl(user_id, module_id).await
    }

    async fn update_module(
        &self,
        user_id: i64,
        module_id: i64,
        module: ModuleInput,
    ) -> Result<Option<Module>> {
        self.update_module_impl(user_id, module_id, module).await
    }

    async fn delete_module(&self, user_id: i64, module_id: i64) -> Result<bool> {
        self.delete_module_impl(user_id, module_id).await
    }

    // 文档模块
    async fn list_documents(&self, user_id: i64) -> Result<Vec<Document>> {
        self.list_documents_impl(user_id).await
    }

    async fn create_document(&self, document: NewDocument) -> Result<Document> {
        self.create_document_impl(document).await
    }

    async fn get_document(&self, user_id: i64, document_id: i64) -> Result<Option<Document>> {
        self.get_document_impl(user_id, document_id).await
    }

    async fn rename_document(
        &self,
        user_id: i64,
        document_id: i64,
        file_name: &str,
    ) -> Result<Option<Document>> {
        self.rename_document_impl(user_id, document_id, file_name)
            .await
    }

    async fn delete_document(&self, user_id: i64, document_id: i64) -> Result<bool> {
        self.delete_document_impl(user_id, document_id).await
    }
}
