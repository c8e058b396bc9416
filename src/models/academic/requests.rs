use serde::Deserialize;
use ts_rs::TS;

// 新增/修改学年
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct YearRequest {
    pub year_name: String,
}

// 新增学期
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct CreateSemesterRequest {
    pub semester_name: String,
}

// 修改学期，可选地移动到同一用户的另一个学年
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct UpdateSemesterRequest {
    pub semester_name: String,
    #[serde(default)]
    pub academic_year_id: Option<i64>,
}

// 新增/修改课程模块，grade 为空表示尚未出成绩
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct ModuleRequest {
    pub module_code: String,
    pub module_name: String,
    pub credits: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub semester_id: Option<i64>,
}

// 存储层写入课程模块时使用，字段均已校验
#[derive(Debug, Clone)]
pub struct ModuleInput {
    pub semester_id: i64,
    pub module_code: String,
    pub module_name: String,
    pub credits: f64,
    pub grade: Option<String>,
    pub grade_points: Option<f64>,
}
