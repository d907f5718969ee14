//! Career report model, request prompt and request lifecycle.
//!
//! All domain interpretation is produced by the AI collaborator. This module
//! formats the request and bounds the wait. Any payload that does not match
//! the full report shape is refused.

pub mod lifecycle;
pub mod model;
pub mod prompts;

pub use lifecycle::{DEFAULT_TIMEOUT, ReportFailure, ReportRequest, ReportService, ReportState};
pub use model::{
    ActionPlan, CareerRecommendation, ChartPoint, EnergyBalance, ReportData, Swot, parse_report,
};
pub use prompts::{SYSTEM_INSTRUCTION, report_prompt, report_schema};
