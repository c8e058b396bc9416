use serde::Serialize;
use ts_rs::TS;

/// 学位等级
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academic.ts")]
pub enum GpaClass {
    #[serde(rename = "First Class")]
    FirstClass,
    #[serde(rename = "Second Class (Upper Division)")]
    SecondUpper,
    #[serde(rename = "Second Class (Lower Division)")]
    SecondLower,
    #[serde(rename = "Pass")]
    Pass,
    #[serde(rename = "Fail")]
    Fail,
    #[serde(rename = "Not Available")]
    NotAvailable,
}

impl GpaClass {
    pub fn label(&self) -> &'static str {
        match self {
            GpaClass::FirstClass => "First Class",
            GpaClass::SecondUpper => "Second Class (Upper Division)",
            GpaClass::SecondLower => "Second Class (Lower Division)",
            GpaClass::Pass => "Pass",
            GpaClass::Fail => "Fail",
            GpaClass::NotAvailable => "Not Available",
        }
    }
}

impl std::fmt::Display for GpaClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 阈值（含下界）：3.70 / 3.30 / 3.00 / 2.00
pub fn gpa_class(gpa: Option<f64>) -> GpaClass {
    match gpa {
        None => GpaClass::NotAvailable,
        Some(g) if g.is_nan() => GpaClass::NotAvailable,
        Some(g) if g >= 3.7 => GpaClass::FirstClass,
        Some(g) if g >= 3.3 => GpaClass::SecondUpper,
        Some(g) if g >= 3.0 => GpaClass::SecondLower,
        Some(g) if g >= 2.0 => GpaClass::Pass,
        Some(_) => GpaClass::Fail,
    }
}
