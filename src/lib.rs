//! MyGPA - 学生学业管理后端服务
//!
//! 基于 Actix Web 构建：账号认证、个人资料、文档管理以及 GPA 计算。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `gpa`: GPA 计算（纯函数）
//! - `middlewares`: 认证与限流中间件
//! - `models`: 数据模型定义
//! - `object_store`: 按 bucket 组织的文件存储
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod gpa;
pub mod middlewares;
pub mod models;
pub mod object_store;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
