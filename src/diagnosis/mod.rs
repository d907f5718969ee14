//! Diagnosis flow: walks the active question list one question at a time.
//!
//! The flow owns the answer map for the session. It validates every answer
//! against the current question's options, supports a single step back, and
//! hands the completed map off without performing any request itself.

pub mod answers;
pub mod flow;
pub mod progress;

pub use answers::{Answer, AnswerMap, resolve_answer};
pub use flow::{DiagnosisFlow, FlowEvent, FlowPosition};
pub use progress::StageProgress;
