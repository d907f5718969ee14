//! Diagnosis state machine.

use crate::catalog::{AgeGroup, Question, get_questions};
use crate::error::DiagnosisError;

use super::answers::{Answer, AnswerMap, resolve_answer};
use super::progress::StageProgress;

/// Where the flow currently is.
///
/// Starts at `AtQuestion(0)`, moves forward one question per answer, and
/// ends in `Completed` after the last answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPosition {
    AtQuestion(usize),
    Completed,
}

impl std::fmt::Display for FlowPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AtQuestion(i) => write!(f, "at_question({i})"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Outcome of recording an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowEvent {
    /// Moved on to the question at `index`.
    Advanced { index: usize },
    /// The last question was answered. Carries the full answer map.
    Completed(AnswerMap),
}

/// Walks one age group's questions in catalog order.
#[derive(Debug, Clone)]
pub struct DiagnosisFlow {
    age_group: AgeGroup,
    questions: &'static [Question],
    position: FlowPosition,
    answers: AnswerMap,
}

impl DiagnosisFlow {
    pub fn new(age_group: AgeGroup) -> Self {
        let questions = get_questions(age_group);
        let position = if questions.is_empty() {
            FlowPosition::Completed
        } else {
            FlowPosition::AtQuestion(0)
        };
        Self {
            age_group,
            questions,
            position,
            answers: AnswerMap::new(),
        }
    }

    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    pub fn questions(&self) -> &'static [Question] {
        self.questions
    }

    pub fn position(&self) -> FlowPosition {
        self.position
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn is_completed(&self) -> bool {
        self.position == FlowPosition::Completed
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&'static Question> {
        match self.position {
            FlowPosition::AtQuestion(i) => self.questions.get(i),
            FlowPosition::Completed => None,
        }
    }

    /// Stage progress for display. `None` once completed.
    pub fn progress(&self) -> Option<StageProgress> {
        match self.position {
            FlowPosition::AtQuestion(i) => Some(StageProgress::new(i, self.questions.len())),
            FlowPosition::Completed => None,
        }
    }

    /// Answer the current question from raw input (option number or text).
    pub fn answer(&mut self, input: &str) -> Result<FlowEvent, DiagnosisError> {
        let question = self
            .current_question()
            .ok_or(DiagnosisError::AlreadyCompleted)?;
        let answer =
            resolve_answer(question, input).ok_or_else(|| DiagnosisError::InvalidAnswer {
                question_id: question.id.to_string(),
                input: input.trim().to_string(),
            })?;
        self.record(question, answer)
    }

    /// Answer the current question with an already-tagged value.
    ///
    /// Colors are only accepted for psych questions; choices must be one of
    /// the question's options.
    pub fn answer_with(&mut self, answer: Answer) -> Result<FlowEvent, DiagnosisError> {
        let question = self
            .current_question()
            .ok_or(DiagnosisError::AlreadyCompleted)?;
        let validated = match &answer {
            Answer::Color(_) if question.is_psych() => Some(answer.clone()),
            Answer::Color(_) => None,
            Answer::Choice(text) => resolve_answer(question, text)
                .filter(|_| question.options.contains(&text.as_str())),
        };
        let validated = validated.ok_or_else(|| DiagnosisError::InvalidAnswer {
            question_id: question.id.to_string(),
            input: answer.to_string(),
        })?;
        self.record(question, validated)
    }

    fn record(&mut self, question: &Question, answer: Answer) -> Result<FlowEvent, DiagnosisError> {
        let FlowPosition::AtQuestion(index) = self.position else {
            return Err(DiagnosisError::AlreadyCompleted);
        };

        if let Some(previous) = self.answers.insert(question.id, answer) {
            tracing::debug!(question_id = question.id, %previous, "Answer replaced");
        }

        if index + 1 < self.questions.len() {
            self.position = FlowPosition::AtQuestion(index + 1);
            Ok(FlowEvent::Advanced { index: index + 1 })
        } else {
            self.position = FlowPosition::Completed;
            tracing::info!(
                age_group = %self.age_group,
                answers = self.answers.len(),
                "Diagnosis completed"
            );
            Ok(FlowEvent::Completed(self.answers.clone()))
        }
    }

    /// Step back one question without touching the answers. A no-op on the
    /// first question. Returns the new index.
    pub fn back(&mut self) -> Result<usize, DiagnosisError> {
        match self.position {
            FlowPosition::AtQuestion(0) => Ok(0),
            FlowPosition::AtQuestion(i) => {
                self.position = FlowPosition::AtQuestion(i - 1);
                Ok(i - 1)
            }
            FlowPosition::Completed => Err(DiagnosisError::BackUnavailable),
        }
    }
}
