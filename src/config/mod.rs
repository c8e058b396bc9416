//! 配置管理
//!
//! 静态配置从配置文件与环境变量加载，启动时初始化一次，之后通过 `AppConfig::get()` 全局访问。

mod r#impl;
mod structs;

pub use structs::*;
