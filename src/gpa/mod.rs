//! GPA 计算
//!
//! 纯函数实现，不访问数据库：
//! - `scale`: 成绩等级与绩点对照表
//! - `calculator`: 按学分加权计算 GPA
//! - `classification`: 按 GPA 划分学位等级
//! - `summary`: 学期 / 学年 / 总体三级汇总

pub mod calculator;
pub mod classification;
pub mod scale;
pub mod summary;

pub use calculator::{GpaInput, GpaResult, calculate_gpa};
pub use classification::{GpaClass, gpa_class};
pub use scale::{GradeScaleEntry, grade_points, grade_scale, normalize_grade};
pub use summary::{AcademicSummary, SemesterGpa, YearGpa, summarize};
