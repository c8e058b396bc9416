use serde::Serialize;
use ts_rs::TS;

use super::calculator::{GpaResult, calculate_gpa};
use super::classification::{GpaClass, gpa_class};
use crate::models::academic::entities::AcademicYearWithSemesters;

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct SemesterGpa {
    pub semester_id: i64,
    pub semester_name: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: GpaResult,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct YearGpa {
    pub year_id: i64,
    pub year_name: String,
    #[serde(flatten)]
    #[ts(flatten)]
    pub result: GpaResult,
    pub semesters: Vec<SemesterGpa>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct AcademicSummary {
    pub overall: GpaResult,
    pub classification: GpaClass,
    pub years: Vec<YearGpa>,
}

/// 逐级汇总：学期 GPA、学年 GPA（该学年全部学期的课程）与总体 GPA
pub fn summarize(years: &[AcademicYearWithSemesters]) -> AcademicSummary {
    let year_gpas = years
        .iter()
        .map(|year| YearGpa {
            year_id: year.year.id,
            year_name: year.year.year_name.clone(),
            result: calculate_gpa(year.modules()),
            semesters: year
                .semesters
                .iter()
                .map(|semester| SemesterGpa {
                    semester_id: semester.semester.id,
                    semester_name: semester.semester.semester_name.clone(),
                    result: calculate_gpa(&semester.modules),
                })
                .collect(),
        })
        .collect();

    let overall = calculate_gpa(years.iter().flat_map(|y| y.modules()));

    AcademicSummary {
        overall,
        classification: gpa_class(overall.gpa),
        years: year_gpas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::academic::entities::{AcademicYear, Module, Semester, SemesterWithModules};

    fn module(id: i64, semester_id: i64, credits: f64, grade: Option<&str>) -> Module {
        Module {
            id,
            user_id: 1,
            semester_id,
            module_code: format!("CS{id:03}"),
            module_name: format!("Module {id}"),
            credits,
            grade: grade.map(str::to_string),
            grade_points: grade.and_then(crate::gpa::grade_points),
            created_at: chrono::Utc::now(),
        }
    }

    fn semester(id: i64, year_id: i64, modules: Vec<Module>) -> SemesterWithModules {
        SemesterWithModules {
            semester: Semester {
                id,
                user_id: 1,
                academic_year_id: year_id,
                semester_name: format!("Semester {id}"),
                created_at: chrono::Utc::now(),
            },
            modules,
        }
    }

    fn year(id: i64, semesters: Vec<SemesterWithModules>) -> AcademicYearWithSemesters {
        AcademicYearWithSemesters {
            year: AcademicYear {
                id,
                user_id: 1,
                year_name: format!("Year {id}"),
                created_at: chrono::Utc::now(),
            },
            semesters,
        }
    }

    #[test]
    fn test_roll_up_per_level() {
        let years = vec![
            year(
                1,
                vec![
                    semester(10, 1, vec![module(1, 10, 3.0, Some("A")), module(2, 10, 4.0, Some("B"))]),
                    semester(11, 1, vec![module(3, 11, 2.0, Some("C")), module(4, 11, 3.0, None)]),
                ],
            ),
            year(2, vec![semester(20, 2, vec![module(5, 20, 3.0, Some("A+"))])]),
        ];

        let summary = summarize(&years);

        let sem10 = &summary.years[0].semesters[0];
        assert!((sem10.result.gpa.unwrap() - 24.0 / 7.0).abs() < 1e-9);

        let sem11 = &summary.years[0].semesters[1];
        assert!((sem11.result.gpa.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(sem11.result.total_credits, 2.0);

        let year1 = &summary.years[0];
        assert!((year1.result.gpa.unwrap() - 28.0 / 9.0).abs() < 1e-9);
        assert_eq!(year1.result.total_credits, 9.0);

        assert!((summary.overall.gpa.unwrap() - 40.0 / 12.0).abs() < 1e-9);
        assert_eq!(summary.overall.graded_modules, 4);
        assert_eq!(summary.classification, GpaClass::SecondUpper);
    }

    #[test]
    fn test_empty_record() {
        let summary = summarize(&[]);
        assert_eq!(summary.overall.gpa, None);
        assert_eq!(summary.classification, GpaClass::NotAvailable);
        assert!(summary.years.is_empty());
    }

    #[test]
    fn test_year_without_grades() {
        let years = vec![year(1, vec![semester(10, 1, vec![module(1, 10, 3.0, None)])])];
        let summary = summarize(&years);
        assert_eq!(summary.years[0].result.gpa, None);
        assert_eq!(summary.years[0].semesters[0].result.graded_modules, 0);
    }
}
