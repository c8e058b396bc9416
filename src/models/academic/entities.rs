use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学年
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct AcademicYear {
    pub id: i64,
    pub user_id: i64,
    pub year_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 学期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct Semester {
    pub id: i64,
    pub user_id: i64,
    pub academic_year_id: i64,
    pub semester_name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 课程模块，grade_points 由成绩等级换算而来
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct Module {
    pub id: i64,
    pub user_id: i64,
    pub semester_id: i64,
    pub module_code: String,
    pub module_name: String,
    pub credits: f64,
    pub grade: Option<String>,
    pub grade_points: Option<f64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// 带课程模块的学期
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct SemesterWithModules {
    #[serde(flatten)]
    #[ts(flatten)]
    pub semester: Semester,
    pub modules: Vec<Module>,
}

// 带学期的学年
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct AcademicYearWithSemesters {
    #[serde(flatten)]
    #[ts(flatten)]
    pub year: AcademicYear,
    pub semesters: Vec<SemesterWithModules>,
}

impl AcademicYearWithSemesters {
    /// 该学年所有学期的课程模块
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.semesters.iter().flat_map(|s| s.modules.iter())
    }
}
