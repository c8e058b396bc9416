//! 个人资料存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Entity as Profiles};
use crate::errors::{MyGpaError, Result};
use crate::models::profiles::{entities::Profile, requests::UpdateProfileRequest};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

impl SeaOrmStorage {
    /// 获取个人资料
    pub async fn get_profile_impl(&self, user_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询个人资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 获取个人资料，不存在时创建
    pub async fn ensure_profile_impl(
        &self,
        user_id: i64,
        email: &str,
        name: &str,
    ) -> Result<Profile> {
        if let Some(profile) = self.get_profile_impl(user_id).await? {
            return Ok(profile);
        }

        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            id: Set(user_id),
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            avatar_url: Set(String::new()),
            university_name: Set(String::new()),
            degree_program: Set(String::new()),
            student_id_number: Set(String::new()),
            linkedin_url: Set(String::new()),
            portfolio_url: Set(String::new()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建个人资料失败: {e}")))?;

        tracing::info!("已为账号 {} 补建个人资料", user_id);

        Ok(result.into_profile())
    }

    /// 部分更新个人资料
    pub async fn update_profile_impl(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        if self.get_profile_impl(user_id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(user_id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(university_name) = update.university_name {
            model.university_name = Set(university_name);
        }
        if let Some(degree_program) = update.degree_program {
            model.degree_program = Set(degree_program);
        }
        if let Some(student_id_number) = update.student_id_number {
            model.student_id_number = Set(student_id_number);
        }
        if let Some(linkedin_url) = update.linkedin_url {
            model.linkedin_url = Set(linkedin_url);
        }
        if let Some(portfolio_url) = update.portfolio_url {
            model.portfolio_url = Set(portfolio_url);
        }
        if let Some(avatar_url) = update.avatar_url {
            model.avatar_url = Set(avatar_url);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("更新个人资料失败: {e}")))?;

        self.get_profile_impl(user_id).await
    }
}
