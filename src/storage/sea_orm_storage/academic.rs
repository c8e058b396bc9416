//! 学业记录存储操作（学年 -> 学期 -> 课程模块）

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::academic_years::{
    ActiveModel as YearActiveModel, Column as YearColumn, Entity as AcademicYears,
};
use crate::entity::modules::{
    ActiveModel as ModuleActiveModel, Column as ModuleColumn, Entity as Modules,
};
use crate::entity::semesters::{
    ActiveModel as SemesterActiveModel, Column as SemesterColumn, Entity as Semesters,
};
use crate::errors::{MyGpaError, Result};
use crate::models::academic::{
    entities::{AcademicYear, AcademicYearWithSemesters, Module, Semester, SemesterWithModules},
    requests::ModuleInput,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 获取用户完整的学业记录树
    pub async fn list_academic_tree_impl(
        &self,
        user_id: i64,
    ) -> Result<Vec<AcademicYearWithSemesters>> {
        let years = AcademicYears::find()
            .filter(YearColumn::UserId.eq(user_id))
            .order_by_asc(YearColumn::CreatedAt)
            .order_by_asc(YearColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学年失败: {e}")))?;

        let semesters = Semesters::find()
            .filter(SemesterColumn::UserId.eq(user_id))
            .order_by_asc(SemesterColumn::CreatedAt)
            .order_by_asc(SemesterColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学期失败: {e}")))?;

        let modules = Modules::find()
            .filter(ModuleColumn::UserId.eq(user_id))
            .order_by_asc(ModuleColumn::CreatedAt)
            .order_by_asc(ModuleColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询课程模块失败: {e}")))?;

        // 按学期分组课程模块
        let mut modules_by_semester: HashMap<i64, Vec<Module>> = HashMap::new();
        for module in modules {
            modules_by_semester
                .entry(module.semester_id)
                .or_default()
                .push(module.into_module());
        }

        // 按学年分组学期
        let mut semesters_by_year: HashMap<i64, Vec<SemesterWithModules>> = HashMap::new();
        for semester in semesters {
            let modules = modules_by_semester.remove(&semester.id).unwrap_or_default();
            semesters_by_year
                .entry(semester.academic_year_id)
                .or_default()
                .push(SemesterWithModules {
                    semester: semester.into_semester(),
                    modules,
                });
        }

        Ok(years
            .into_iter()
            .map(|year| {
                let semesters = semesters_by_year.remove(&year.id).unwrap_or_default();
                AcademicYearWithSemesters {
                    year: year.into_academic_year(),
                    semesters,
                }
            })
            .collect())
    }

    // ============================================
    // 学年
    // ============================================

    pub async fn create_year_impl(&self, user_id: i64, year_name: &str) -> Result<AcademicYear> {
        let model = YearActiveModel {
            user_id: Set(user_id),
            year_name: Set(year_name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建学年失败: {e}")))?;

        Ok(result.into_academic_year())
    }

    pub async fn get_year_impl(&self, user_id: i64, year_id: i64) -> Result<Option<AcademicYear>> {
        let result = AcademicYears::find_by_id(year_id)
            .filter(YearColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_academic_year()))
    }

    pub async fn update_year_impl(
        &self,
        user_id: i64,
        year_id: i64,
        year_name: &str,
    ) -> Result<Option<AcademicYear>> {
        if self.get_year_impl(user_id, year_id).await?.is_none() {
            return Ok(None);
        }

        let model = YearActiveModel {
            id: Set(year_id),
            year_name: Set(year_name.to_string()),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("更新学年失败: {e}")))?;

        Ok(Some(result.into_academic_year()))
    }

    /// 删除学年及其下所有学期和课程模块
    pub async fn delete_year_impl(&self, user_id: i64, year_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MyGpaError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = AcademicYears::find_by_id(year_id)
            .filter(YearColumn::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学年失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        let semester_ids: Vec<i64> = Semesters::find()
            .select_only()
            .column(SemesterColumn::Id)
            .filter(SemesterColumn::AcademicYearId.eq(year_id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学期失败: {e}")))?;

        if !semester_ids.is_empty() {
            Modules::delete_many()
                .filter(ModuleColumn::SemesterId.is_in(semester_ids.clone()))
                .exec(&txn)
                .await
                .map_err(|e| MyGpaError::database_operation(format!("删除课程模块失败: {e}")))?;

            Semesters::delete_many()
                .filter(SemesterColumn::Id.is_in(semester_ids))
                .exec(&txn)
                .await
                .map_err(|e| MyGpaError::database_operation(format!("删除学期失败: {e}")))?;
        }

        let result = AcademicYears::delete_by_id(year_id)
            .exec(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("删除学年失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MyGpaError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // ============================================
    // 学期
    // ============================================

    pub async fn create_semester_impl(
        &self,
        user_id: i64,
        year_id: i64,
        semester_name: &str,
    ) -> Result<Semester> {
        let model = SemesterActiveModel {
            user_id: Set(user_id),
            academic_year_id: Set(year_id),
            semester_name: Set(semester_name.to_string()),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建学期失败: {e}")))?;

        Ok(result.into_semester())
    }

    pub async fn get_semester_impl(
        &self,
        user_id: i64,
        semester_id: i64,
    ) -> Result<Option<Semester>> {
        let result = Semesters::find_by_id(semester_id)
            .filter(SemesterColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn update_semester_impl(
        &self,
        user_id: i64,
        semester_id: i64,
        semester_name: &str,
        academic_year_id: i64,
    ) -> Result<Option<Semester>> {
        if self.get_semester_impl(user_id, semester_id).await?.is_none() {
            return Ok(None);
        }

        let model = SemesterActiveModel {
            id: Set(semester_id),
            semester_name: Set(semester_name.to_string()),
            academic_year_id: Set(academic_year_id),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("更新学期失败: {e}")))?;

        Ok(Some(result.into_semester()))
    }

    /// 删除学期及其下所有课程模块
    pub async fn delete_semester_impl(&self, user_id: i64, semester_id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| MyGpaError::database_operation(format!("开启事务失败: {e}")))?;

        let exists = Semesters::find_by_id(semester_id)
            .filter(SemesterColumn::UserId.eq(user_id))
            .one(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询学期失败: {e}")))?
            .is_some();
        if !exists {
            return Ok(false);
        }

        Modules::delete_many()
            .filter(ModuleColumn::SemesterId.eq(semester_id))
            .exec(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("删除课程模块失败: {e}")))?;

        let result = Semesters::delete_by_id(semester_id)
            .exec(&txn)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("删除学期失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| MyGpaError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    // ============================================
    // 课程模块
    // ============================================

    pub async fn create_module_impl(&self, user_id: i64, input: ModuleInput) -> Result<Module> {
        let model = ModuleActiveModel {
            user_id: Set(user_id),
            semester_id: Set(input.semester_id),
            module_code: Set(input.module_code),
            module_name: Set(input.module_name),
            credits: Set(input.credits),
            grade: Set(input.grade),
            grade_points: Set(input.grade_points),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("创建课程模块失败: {e}")))?;

        Ok(result.into_module())
    }

    pub async fn get_module_impl(&self, user_id: i64, module_id: i64) -> Result<Option<Module>> {
        let result = Modules::find_by_id(module_id)
            .filter(ModuleColumn::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("查询课程模块失败: {e}")))?;

        Ok(result.map(|m| m.into_module()))
    }

    pub async fn update_module_impl(
        &self,
        user_id: i64,
        module_id: i64,
        input: ModuleInput,
    ) -> Result<Option<Module>> {
        if self.get_module_impl(user_id, module_id).await?.is_none() {
            return Ok(None);
        }

        let model = ModuleActiveModel {
            id: Set(module_id),
            semester_id: Set(input.semester_id),
            module_code: Set(input.module_code),
            module_name: Set(input.module_name),
            credits: Set(input.credits),
            grade: Set(input.grade),
            grade_points: Set(input.grade_points),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("更新课程模块失败: {e}")))?;

        Ok(Some(result.into_module()))
    }

    pub async fn delete_module_impl(&self, user_id: i64, module_id: i64) -> Result<bool> {
        let result = Modules::delete_many()
            .filter(ModuleColumn::Id.eq(module_id))
            .filter(ModuleColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| MyGpaError::database_operation(format!("删除课程模块失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
