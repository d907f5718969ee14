//! Report data returned by the AI collaborator, and its fail-closed parser.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// The structured career report. Every field is required; a payload missing
/// any of them is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportData {
    pub persona: String,
    pub keyword: String,
    /// Free text; `**` pairs mark bold spans.
    pub summary: String,
    pub chart_data: Vec<ChartPoint>,
    pub career_factor_interpretation: String,
    pub energy_balance: EnergyBalance,
    pub swot: Swot,
    pub action_plan: ActionPlan,
}

/// One axis of the radar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub subject: String,
    pub value: f64,
    pub full_mark: f64,
}

impl ChartPoint {
    /// `value / full_mark`, clamped to 0..=1.
    pub fn ratio(&self) -> f64 {
        if self.full_mark <= 0.0 {
            return 0.0;
        }
        (self.value / self.full_mark).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyBalance {
    /// Competence fit, 0-100.
    pub theory_score: f64,
    /// Psychological energy, 0-100.
    pub psych_energy: f64,
    pub status: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swot {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub title: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlan {
    pub careers: Vec<CareerRecommendation>,
    pub color_therapy: String,
    pub color_therapy_reason: String,
    pub scent_therapy: String,
    pub immediate_action: String,
}

impl ReportData {
    /// Shape checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), ReportError> {
        let invalid = |reason: &str| Err(ReportError::InvalidShape(reason.to_string()));

        if self.persona.trim().is_empty() {
            return invalid("persona is blank");
        }
        if self.summary.trim().is_empty() {
            return invalid("summary is blank");
        }
        if self.chart_data.is_empty() {
            return invalid("chartData is empty");
        }
        if self.action_plan.careers.is_empty() {
            return invalid("actionPlan.careers is empty");
        }
        for (name, score) in [
            ("energyBalance.theoryScore", self.energy_balance.theory_score),
            ("energyBalance.psychEnergy", self.energy_balance.psych_energy),
        ] {
            if !(0.0..=100.0).contains(&score) {
                return Err(ReportError::InvalidShape(format!(
                    "{name} out of range: {score}"
                )));
            }
        }
        Ok(())
    }
}

/// Parse a raw collaborator payload into a validated report.
///
/// Empty content is `EmptyResponse`; anything that does not deserialize into
/// the full shape, or fails [`ReportData::validate`], is `InvalidShape`.
pub fn parse_report(raw: &str) -> Result<ReportData, ReportError> {
    let json = extract_json_object(raw);
    if json.is_empty() {
        return Err(ReportError::EmptyResponse);
    }
    let report: ReportData =
        serde_json::from_str(json).map_err(|e| ReportError::InvalidShape(e.to_string()))?;
    report.validate()?;
    Ok(report)
}

/// Extract a JSON object from output that might be wrapped in a markdown
/// code fence.
fn extract_json_object(text: &str) -> &str {
    let trimmed = text.trim();

    if trimmed.starts_with('{') {
        return trimmed;
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            return after[..end].trim();
        }
    }

    trimmed
}
