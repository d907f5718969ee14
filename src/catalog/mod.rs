//! Question catalog: the static, per-age-group question tables.
//!
//! Each age group has an ordered list of 20 questions arranged in four
//! stages of five. The first question of every stage is a `psych` question
//! answered with a color name; the other four are `career` questions
//! answered on a five-point scale.

mod questions;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Number of consecutive questions that make up one stage.
pub const STAGE_SIZE: usize = 5;

/// Color options offered for every psych question, in display order.
pub const COLOR_OPTIONS: &[&str] = &["빨강", "노랑", "파랑", "초록", "보라"];

/// Likert options offered for every career question.
pub const SCALE_OPTIONS: &[&str] = &["전혀 아니다", "아니다", "보통", "그렇다", "매우 그렇다"];

/// The age bracket chosen at entry. Selects the question list for the
/// whole session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AgeGroup {
    DreamTree,
    CareerPath,
    MindReset,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [Self::DreamTree, Self::CareerPath, Self::MindReset];

    /// Group used when a lookup somehow misses.
    pub const DEFAULT: AgeGroup = Self::DreamTree;

    /// Wire/prompt name, e.g. `DREAM_TREE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DreamTree => "DREAM_TREE",
            Self::CareerPath => "CAREER_PATH",
            Self::MindReset => "MIND_RESET",
        }
    }

    /// Title shown on the entry screen.
    pub fn title(&self) -> &'static str {
        match self {
            Self::DreamTree => "꿈나무 (초·중등)",
            Self::CareerPath => "커리어 패스 (고등·대학)",
            Self::MindReset => "마인드 리셋 (성인)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::DreamTree => "나의 숨겨진 잠재력을 발견해요.",
            Self::CareerPath => "나에게 맞는 학과와 직무를 매칭해요.",
            Self::MindReset => "경력 재설계와 현재 상태를 체크해요.",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgeGroup {
    type Err = SessionError;

    /// Accepts the wire name (any case, `-` or `_`) or the 1-based menu number.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "1" | "DREAM_TREE" => Ok(Self::DreamTree),
            "2" | "CAREER_PATH" => Ok(Self::CareerPath),
            "3" | "MIND_RESET" => Ok(Self::MindReset),
            _ => Err(SessionError::UnknownAgeGroup(s.trim().to_string())),
        }
    }
}

/// Which part of the analysis a question feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionCategory {
    /// Answered with a color; feeds color derivation.
    Psych,
    /// Answered on a scale; feeds the report transcript only.
    Career,
}

/// A single immutable catalog entry. The id is the answer-map key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub category: QuestionCategory,
    pub text: &'static str,
    /// Classification tag shown next to the question.
    pub theory: &'static str,
    pub options: &'static [&'static str],
}

impl Question {
    pub fn is_psych(&self) -> bool {
        self.category == QuestionCategory::Psych
    }
}

/// Ordered questions for an age group, falling back to the default group's
/// list if the table has no entry for it.
pub fn get_questions(age_group: AgeGroup) -> &'static [Question] {
    lookup(questions::CATALOG, age_group)
}

fn lookup(
    table: &'static [(AgeGroup, &'static [Question])],
    age_group: AgeGroup,
) -> &'static [Question] {
    let find = |group: AgeGroup| {
        table
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, questions)| *questions)
    };
    find(age_group)
        .or_else(|| {
            tracing::warn!(%age_group, "No questions for age group, using default");
            find(AgeGroup::DEFAULT)
        })
        .unwrap_or(&[])
}
