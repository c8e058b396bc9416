use super::SeaOrmStorage;
use crate::entity::profiles::ActiveModel as ProfileActiveModel;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{MyGpaError, Result};
use crate::models::users::{
    entities::{User, UserStatus},
    requests::{CreateUserRequest, UpdateUserRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建账号及其个人资料
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MyGpaError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            email: Set(req.email.clone()),
            password_hash: Set(req.password),
            status: Set(UserStatus::Active.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let user = model
            .insert(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建账号失败: {e}")))?;

        let profile = ProfileActiveModel {
            id: Set(user.id),
            name: Set(req.name),
            email: Set(req.email),
            avatar_url: Set(String::new()),
            university_name: Set(String::new()),
            degree_program: Set(String::new()),
            student_id_number: Set(String::new()),
            linkedin_url: Set(String::new()),
            portfolio_url: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        profile
            .insert(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建个人资料失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MyGpaError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user())
    }

    /// 通过 ID 获取账号
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过邮箱获取账号
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询账号失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("更新最后登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 更新账号信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查账号是否存在
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("更新账号失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }
}
