//! Session controller: owns all per-session state.
//!
//! Progresses Entry → Diagnosis → Report. The report step holds the
//! captured answers so a retry can re-run the request without re-running
//! the diagnosis. `reset` returns to Entry from anywhere and discards
//! everything.

use serde::Serialize;
use uuid::Uuid;

use crate::catalog::AgeGroup;
use crate::color::{BaseColor, derive_color};
use crate::diagnosis::{AnswerMap, DiagnosisFlow, FlowEvent};
use crate::error::SessionError;
use crate::report::{ReportData, ReportRequest, ReportState};

/// Who the session is for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub name: String,
    pub age_group: AgeGroup,
    /// Derived once the diagnosis completes; never chosen directly.
    pub selected_color: Option<BaseColor>,
}

/// The current step of the session.
#[derive(Debug, Clone)]
pub enum Step {
    Entry,
    Diagnosis(DiagnosisFlow),
    Report {
        answers: AnswerMap,
        state: ReportState,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Diagnosis(_) => "diagnosis",
            Self::Report { .. } => "report",
        }
    }
}

/// Result of answering a question through the session.
#[derive(Debug, Clone)]
pub enum AnswerOutcome {
    /// Moved to the next question.
    Next,
    /// The diagnosis completed; the report is now loading and this request
    /// must be run.
    ReportRequested(ReportRequest),
}

#[derive(Debug)]
pub struct Session {
    id: Uuid,
    profile: Option<UserProfile>,
    step: Step,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            profile: None,
            step: Step::Entry,
            generation: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn step(&self) -> &Step {
        &self.step
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn flow(&self) -> Option<&DiagnosisFlow> {
        match &self.step {
            Step::Diagnosis(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn report_state(&self) -> Option<&ReportState> {
        match &self.step {
            Step::Report { state, .. } => Some(state),
            _ => None,
        }
    }

    /// The finished report, if the last request succeeded.
    pub fn report(&self) -> Option<&ReportData> {
        match self.report_state() {
            Some(ReportState::Success(report)) => Some(report),
            _ => None,
        }
    }

    fn wrong_step(&self, operation: &str) -> SessionError {
        SessionError::WrongStep {
            operation: operation.to_string(),
            step: self.step.name().to_string(),
        }
    }

    /// Leave Entry with a name and age group.
    pub fn start(&mut self, name: &str, age_group: AgeGroup) -> Result<(), SessionError> {
        if !matches!(self.step, Step::Entry) {
            return Err(self.wrong_step("start"));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        self.profile = Some(UserProfile {
            name: name.to_string(),
            age_group,
            selected_color: None,
        });
        self.step = Step::Diagnosis(DiagnosisFlow::new(age_group));
        tracing::info!(session_id = %self.id, %age_group, "Session started");
        Ok(())
    }

    /// Answer the current diagnosis question.
    pub fn answer(&mut self, input: &str) -> Result<AnswerOutcome, SessionError> {
        let Step::Diagnosis(flow) = &mut self.step else {
            return Err(self.wrong_step("answer"));
        };

        match flow.answer(input)? {
            FlowEvent::Advanced { .. } => Ok(AnswerOutcome::Next),
            FlowEvent::Completed(answers) => {
                let color = derive_color(flow.questions(), &answers);
                if let Some(profile) = self.profile.as_mut() {
                    profile.selected_color = Some(color);
                }
                tracing::info!(session_id = %self.id, %color, answers = answers.len(), "Color derived");
                Ok(AnswerOutcome::ReportRequested(self.begin_report(answers)))
            }
        }
    }

    /// Step back one question.
    pub fn back(&mut self) -> Result<usize, SessionError> {
        match &mut self.step {
            Step::Diagnosis(flow) => Ok(flow.back()?),
            _ => Err(self.wrong_step("back")),
        }
    }

    /// Re-run the report request with the captured answers. Only available
    /// from `Failure`.
    pub fn retry(&mut self) -> Result<ReportRequest, SessionError> {
        match &self.step {
            Step::Report {
                answers,
                state: ReportState::Failure(_),
            } => {
                let answers = answers.clone();
                tracing::info!(session_id = %self.id, "Retrying report request");
                Ok(self.begin_report(answers))
            }
            _ => Err(self.wrong_step("retry")),
        }
    }

    /// Enter `Loading` under a fresh generation and capture the request.
    fn begin_report(&mut self, answers: AnswerMap) -> ReportRequest {
        self.generation += 1;
        let (name, age_group, color) = match &self.profile {
            Some(p) => (
                p.name.clone(),
                p.age_group,
                p.selected_color.unwrap_or(BaseColor::DEFAULT),
            ),
            None => (String::new(), AgeGroup::DEFAULT, BaseColor::DEFAULT),
        };
        let request = ReportRequest {
            generation: self.generation,
            name,
            age_group,
            color,
            answers: answers.clone(),
        };
        self.step = Step::Report {
            answers,
            state: ReportState::Loading,
        };
        request
    }

    /// Apply the outcome of a request. Ignored (returns false) unless the
    /// session is still loading that same generation.
    pub fn apply_report(&mut self, generation: u64, outcome: ReportState) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, current = self.generation, "Stale report outcome ignored");
            return false;
        }
        match &mut self.step {
            Step::Report { state, .. } if *state == ReportState::Loading => {
                *state = outcome;
                true
            }
            _ => false,
        }
    }

    /// Back to Entry with nothing retained.
    pub fn reset(&mut self) {
        tracing::info!(session_id = %self.id, step = self.step.name(), "Session reset");
        self.id = Uuid::new_v4();
        self.profile = None;
        self.step = Step::Entry;
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportFailure;
    use crate::report::model::tests::sample_report;

    fn failure() -> ReportState {
        ReportState::Failure(ReportFailure {
            kind: "timeout",
            message: "timed out".to_string(),
        })
    }

    /// Answer every question with option `choice`, returning the request.
    fn complete(session: &mut Session, choice: &str) -> ReportRequest {
        loop {
            match session.answer(choice).unwrap() {
                AnswerOutcome::Next => continue,
                AnswerOutcome::ReportRequested(request) => return request,
            }
        }
    }

    fn assert_reset(session: &Session) {
        assert!(matches!(session.step(), Step::Entry));
        assert!(session.profile().is_none());
        assert!(session.flow().is_none());
        assert!(session.report_state().is_none());
    }

    #[test]
    fn start_requires_a_name() {
        let mut session = Session::new();
        assert_eq!(session.start("   ", AgeGroup::DreamTree), Err(SessionError::EmptyName));
        assert!(matches!(session.step(), Step::Entry));

        session.start("  하늘 ", AgeGroup::DreamTree).unwrap();
        let profile = session.profile().unwrap();
        assert_eq!(profile.name, "하늘");
        assert_eq!(profile.selected_color, None);
    }

    #[test]
    fn start_twice_is_rejected() {
        let mut session = Session::new();
        session.start("a", AgeGroup::MindReset).unwrap();
        assert!(matches!(
            session.start("b", AgeGroup::DreamTree),
            Err(SessionError::WrongStep { .. })
        ));
    }

    #[test]
    fn completion_derives_color_and_enters_loading() {
        let mut session = Session::new();
        session.start("a", AgeGroup::DreamTree).unwrap();
        // Option 5 on every psych question is 보라.
        let request = complete(&mut session, "5");

        assert_eq!(request.color, BaseColor::Purple);
        assert_eq!(request.answers.len(), 20);
        assert_eq!(session.profile().unwrap().selected_color, Some(BaseColor::Purple));
        assert_eq!(session.report_state(), Some(&ReportState::Loading));
        assert!(session.back().is_err());
    }

    #[test]
    fn success_is_applied_for_current_generation() {
        let mut session = Session::new();
        session.start("a", AgeGroup::CareerPath).unwrap();
        let request = complete(&mut session, "1");

        let applied = session.apply_report(
            request.generation,
            ReportState::Success(Box::new(sample_report())),
        );
        assert!(applied);
        assert!(session.report().is_some());
    }

    #[test]
    fn retry_reuses_captured_answers_under_new_generation() {
        let mut session = Session::new();
        session.start("a", AgeGroup::CareerPath).unwrap();
        let first = complete(&mut session, "2");
        assert!(session.retry().is_err(), "retry is only available from failure");

        session.apply_report(first.generation, failure());
        let second = session.retry().unwrap();

        assert_eq!(second.answers, first.answers);
        assert!(second.generation > first.generation);
        assert_eq!(session.report_state(), Some(&ReportState::Loading));

        // The first request finishing late must not overwrite the retry.
        assert!(!session.apply_report(
            first.generation,
            ReportState::Success(Box::new(sample_report()))
        ));
        assert_eq!(session.report_state(), Some(&ReportState::Loading));
    }

    #[test]
    fn outcome_after_reset_is_ignored() {
        let mut session = Session::new();
        session.start("a", AgeGroup::DreamTree).unwrap();
        let request = complete(&mut session, "1");
        session.reset();
        assert!(!session.apply_report(request.generation, failure()));
        assert_reset(&session);
    }

    #[test]
    fn reset_from_every_step() {
        // Entry
        let mut session = Session::new();
        session.reset();
        assert_reset(&session);

        // AtQuestion(k)
        session.start("a", AgeGroup::MindReset).unwrap();
        session.answer("1").unwrap();
        session.answer("1").unwrap();
        session.reset();
        assert_reset(&session);

        // Loading
        session.start("a", AgeGroup::MindReset).unwrap();
        let request = complete(&mut session, "3");
        session.reset();
        assert_reset(&session);

        // Success
        session.start("a", AgeGroup::MindReset).unwrap();
        let request2 = complete(&mut session, "3");
        assert!(request2.generation > request.generation);
        session.apply_report(request2.generation, ReportState::Success(Box::new(sample_report())));
        session.reset();
        assert_reset(&session);

        // Failure
        session.start("a", AgeGroup::MindReset).unwrap();
        let request3 = complete(&mut session, "3");
        session.apply_report(request3.generation, failure());
        session.reset();
        assert_reset(&session);

        // A fresh start after reset begins with empty answers.
        session.start("b", AgeGroup::DreamTree).unwrap();
        assert!(session.flow().unwrap().answers().is_empty());
    }

    #[test]
    fn operations_in_wrong_step_are_rejected() {
        let mut session = Session::new();
        assert!(session.answer("1").is_err());
        assert!(session.back().is_err());
        assert!(session.retry().is_err());
    }
}
