use super::entities::AcademicYearWithSemesters;
use crate::gpa::{AcademicSummary, GradeScaleEntry};
use serde::Serialize;
use ts_rs::TS;

// 完整学业记录（学年 -> 学期 -> 课程模块）及 GPA 汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct AcademicRecordResponse {
    pub years: Vec<AcademicYearWithSemesters>,
    pub summary: AcademicSummary,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct GradeScaleResponse {
    pub grades: Vec<GradeScaleEntry>,
}
