use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /predict`.
///
/// Numeric fields are `None` only when a coercion failure was forwarded
/// instead of rejected; `None` goes over the wire as JSON `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Total_Experience")]
    pub total_experience: Option<f64>,
    #[serde(rename = "Total_Experience_in_field_applied")]
    pub total_experience_in_field_applied: Option<f64>,
    #[serde(rename = "Current_CTC")]
    pub current_ctc: Option<f64>,
    #[serde(rename = "No_Of_Companies_worked")]
    pub no_of_companies_worked: Option<i64>,
    #[serde(rename = "Passing_Year_Of_Graduation")]
    pub passing_year_of_graduation: Option<i64>,
    #[serde(rename = "Number_of_Publications")]
    pub number_of_publications: Option<i64>,
    #[serde(rename = "Certifications")]
    pub certifications: Option<i64>,
    #[serde(rename = "International_degree_any")]
    pub international_degree_any: Option<i64>,
    #[serde(rename = "Passing_Year_Of_PG", default)]
    pub passing_year_of_pg: String,
    #[serde(rename = "Passing_Year_Of_PHD", default)]
    pub passing_year_of_phd: String,
    #[serde(rename = "Education", default, skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    /// Remaining form entries, sent unmodified.
    #[serde(flatten)]
    pub passthrough: BTreeMap<String, String>,
}

impl PredictionRequest {
    /// True when every numeric field carries a value.
    pub fn is_fully_numeric(&self) -> bool {
        [
            self.total_experience,
            self.total_experience_in_field_applied,
            self.current_ctc,
        ]
        .iter()
        .all(|value| value.is_some_and(f64::is_finite))
            && [
                self.no_of_companies_worked,
                self.passing_year_of_graduation,
                self.number_of_publications,
                self.certifications,
                self.international_degree_any,
            ]
            .iter()
            .all(Option::is_some)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
