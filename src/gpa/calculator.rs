use serde::Serialize;
use ts_rs::TS;

use super::scale::grade_points;
use crate::models::academic::entities::Module;

/// 参与 GPA 计算的条目
pub trait GpaInput {
    fn credits(&self) -> f64;
    fn grade(&self) -> Option<&str>;
    fn grade_points(&self) -> Option<f64>;
}

impl GpaInput for Module {
    fn credits(&self) -> f64 {
        self.credits
    }

    fn grade(&self) -> Option<&str> {
        self.grade.as_deref()
    }

    fn grade_points(&self) -> Option<f64> {
        self.grade_points
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub struct GpaResult {
    /// 没有已评分学分时为 `None`
    pub gpa: Option<f64>,
    /// 已评分课程的学分总和
    pub total_credits: f64,
    pub graded_modules: u32,
}

/// 学分加权平均绩点
///
/// `sum(grade_points × credits) / sum(credits)`，只统计等级非空且能换算绩点的条目。
/// 已存储的 grade_points 优先，缺失时按对照表换算。
pub fn calculate_gpa<'a, T, I>(items: I) -> GpaResult
where
    T: GpaInput + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut weighted_points = 0.0;
    let mut total_credits = 0.0;
    let mut graded_modules = 0;

    for item in items {
        let Some(grade) = item.grade().map(str::trim).filter(|g| !g.is_empty()) else {
            continue;
        };
        let Some(points) = item.grade_points().or_else(|| grade_points(grade)) else {
            continue;
        };

        weighted_points += points * item.credits();
        total_credits += item.credits();
        graded_modules += 1;
    }

    let gpa = (total_credits > 0.0).then(|| weighted_points / total_credits);

    GpaResult {
        gpa,
        total_credits,
        graded_modules,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        credits: f64,
        grade: Option<&'static str>,
        points: Option<f64>,
    }

    impl GpaInput for Item {
        fn credits(&self) -> f64 {
            self.credits
        }
        fn grade(&self) -> Option<&str> {
            self.grade
        }
        fn grade_points(&self) -> Option<f64> {
            self.points
        }
    }

    fn graded(credits: f64, grade: &'static str, points: f64) -> Item {
        Item {
            credits,
            grade: Some(grade),
            points: Some(points),
        }
    }

    #[test]
    fn test_weighted_average() {
        let items = [graded(3.0, "A", 4.0), graded(4.0, "B", 3.0)];
        let result = calculate_gpa(&items);
        let expected = (3.0 * 4.0 + 4.0 * 3.0) / 7.0;
        assert!((result.gpa.unwrap() - expected).abs() < 1e-9);
        assert_eq!(result.total_credits, 7.0);
        assert_eq!(result.graded_modules, 2);
    }

    #[test]
    fn test_ungraded_modules_are_ignored() {
        let items = [
            graded(3.0, "A-", 3.7),
            Item {
                credits: 4.0,
                grade: None,
                points: None,
            },
            Item {
                credits: 2.0,
                grade: Some(""),
                points: None,
            },
        ];
        let result = calculate_gpa(&items);
        assert!((result.gpa.unwrap() - 3.7).abs() < 1e-9);
        assert_eq!(result.total_credits, 3.0);
        assert_eq!(result.graded_modules, 1);
    }

    #[test]
    fn test_missing_points_fall_back_to_scale() {
        let items = [Item {
            credits: 2.0,
            grade: Some("B+"),
            points: None,
        }];
        let result = calculate_gpa(&items);
        assert!((result.gpa.unwrap() - 3.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_and_zero_credit_inputs() {
        let empty: [Item; 0] = [];
        let result = calculate_gpa(&empty);
        assert_eq!(result.gpa, None);
        assert_eq!(result.total_credits, 0.0);

        let zero = [graded(0.0, "A", 4.0)];
        let result = calculate_gpa(&zero);
        assert_eq!(result.gpa, None);
        assert_eq!(result.graded_modules, 1);
    }

    #[test]
    fn test_failing_grade_counts_towards_credits() {
        let items = [graded(3.0, "A", 4.0), graded(3.0, "E", 0.0)];
        let result = calculate_gpa(&items);
        assert!((result.gpa.unwrap() - 2.0).abs() < 1e-9);
        assert_eq!(result.total_credits, 6.0);
    }
}
