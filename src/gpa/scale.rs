use serde::Serialize;
use ts_rs::TS;

use crate::errors::{MyGpaError, Result};

/// 成绩等级对照表（按从高到低排列）
const GRADE_SCALE: &[(&str, f64)] = &[
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("E", 0.0),
];

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct GradeScaleEntry {
    pub grade: String,
    pub points: f64,
}

/// 返回完整的等级对照表
pub fn grade_scale() -> Vec<GradeScaleEntry> {
    GRADE_SCALE
        .iter()
        .map(|(grade, points)| GradeScaleEntry {
            grade: (*grade).to_string(),
            points: *points,
        })
        .collect()
}

/// 查询等级对应的绩点，未知或空等级返回 `None`
pub fn grade_points(grade: &str) -> Option<f64> {
    let grade = grade.trim();
    GRADE_SCALE
        .iter()
        .find(|(g, _)| *g == grade)
        .map(|(_, points)| *points)
}

/// 规范化用户提交的等级
///
/// - `None` 或空白字符串表示未出成绩，返回 `Ok(None)`
/// - 等级不区分大小写（`a-` 视为 `A-`）
/// - 不在对照表中的等级返回校验错误
pub fn normalize_grade(grade: Option<&str>) -> Result<Option<(String, f64)>> {
    let Some(raw) = grade.map(str::trim).filter(|g| !g.is_empty()) else {
        return Ok(None);
    };

    let upper = raw.to_ascii_uppercase();
    grade_points(&upper)
        .map(|points| Some((upper.clone(), points)))
        .ok_or_else(|| MyGpaError::grade_scale(format!("Unknown grade: {raw}")))
}
