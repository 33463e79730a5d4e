//! Chart-ready series returned by `reflections/dashboard_stats/`.
//!
//! The backend shapes the series per question type: range and number
//! questions get a value line with summary statistics, choice questions get
//! one dataset per option. Rendering is left to the caller.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionType;

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardStats {
    pub overview: DashboardOverview,
    #[serde(default)]
    pub questions: Vec<QuestionDashboard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardOverview {
    pub total_reflections: u32,
    pub days_analyzed: u32,
    pub current_streak: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct QuestionDashboard {
    pub question_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub color_mapping: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub line_chart: Option<LineChart>,
    #[serde(default)]
    pub heatmap: Option<Vec<HeatmapCell>>,
    /// Answer value → share of responses.
    #[serde(default)]
    pub distribution: Option<BTreeMap<String, DistributionBucket>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(untagged)]
pub enum LineChart {
    Series(SeriesChart),
    Choices(ChoiceChart),
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SeriesChart {
    pub data: Vec<SeriesPoint>,
    pub statistics: SeriesStatistics,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct SeriesStatistics {
    #[serde(default)]
    pub average: Option<f64>,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ChoiceChart {
    pub datasets: Vec<ChoiceDataset>,
    pub total_responses: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ChoiceDataset {
    pub label: String,
    #[serde(default)]
    pub color: Option<String>,
    pub data: Vec<ChoicePoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChoicePoint {
    pub date: NaiveDate,
    pub selected: bool,
    pub value: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub value: f64,
    #[serde(default)]
    pub color: Option<String>,
    pub intensity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DistributionBucket {
    pub count: u32,
    pub percentage: f64,
    #[serde(default)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn line_chart_variant_follows_payload_shape() {
        let series: LineChart = serde_json::from_value(json!({
            "data": [{"date": "2024-01-05", "value": 7.0, "color": "#22c55e"}],
            "statistics": {"average": 7.0, "min": 7.0, "max": 7.0, "count": 1}
        }))
        .expect("series");
        assert!(matches!(series, LineChart::Series(_)));

        let choices: LineChart = serde_json::from_value(json!({
            "datasets": [{
                "label": "Good",
                "color": "#22c55e",
                "data": [{"date": "2024-01-05", "selected": true, "value": 1}]
            }],
            "total_responses": 1
        }))
        .expect("choices");
        assert!(matches!(choices, LineChart::Choices(_)));
    }
}
