//! Base colors and color derivation.

use serde::{Deserialize, Serialize};

use crate::catalog::Question;
use crate::diagnosis::{Answer, AnswerMap};

/// One of the five fixed color identities. Used both as the derived trait
/// and as the theme key for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BaseColor {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
}

impl BaseColor {
    pub const ALL: [BaseColor; 5] = [
        Self::Red,
        Self::Blue,
        Self::Yellow,
        Self::Green,
        Self::Purple,
    ];

    /// Color used when no recognizable psych answer exists.
    pub const DEFAULT: BaseColor = Self::Blue;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Blue => "BLUE",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
            Self::Purple => "PURPLE",
        }
    }

    /// Display label, which is also the answer text of psych questions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Red => "빨강",
            Self::Blue => "파랑",
            Self::Yellow => "노랑",
            Self::Green => "초록",
            Self::Purple => "보라",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Red => "에너지, 주도성, 현실 지향",
            Self::Blue => "분석, 냉철, 이성적 사고",
            Self::Yellow => "희망, 아이디어, 관계 지향",
            Self::Green => "평화, 조화, 자연 친화",
            Self::Purple => "예술, 창의성, 신비로운 영감",
        }
    }

    /// Theme color as an `#rrggbb` hex string.
    pub fn hex(&self) -> &'static str {
        match self {
            Self::Red => "#ef4444",
            Self::Blue => "#3b82f6",
            Self::Yellow => "#eab308",
            Self::Green => "#22c55e",
            Self::Purple => "#a855f7",
        }
    }

    /// Theme color as RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Red => (0xef, 0x44, 0x44),
            Self::Blue => (0x3b, 0x82, 0xf6),
            Self::Yellow => (0xea, 0xb3, 0x08),
            Self::Green => (0x22, 0xc5, 0x5e),
            Self::Purple => (0xa8, 0x55, 0xf7),
        }
    }

    /// Look up a color by its display label.
    pub fn from_label(label: &str) -> Option<BaseColor> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl std::fmt::Display for BaseColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the session color from the psych answers.
///
/// Takes the answer to the last psych question in catalog order that has
/// one, and maps it through the label table. Missing or unrecognized
/// answers give [`BaseColor::DEFAULT`]. Career answers never contribute,
/// and earlier psych answers are ignored.
pub fn derive_color(questions: &[Question], answers: &AnswerMap) -> BaseColor {
    let last = questions
        .iter()
        .rev()
        .filter(|q| q.is_psych())
        .find_map(|q| answers.get(q.id));

    match last {
        Some(Answer::Color(color)) => *color,
        Some(Answer::Choice(text)) => BaseColor::from_label(text).unwrap_or(BaseColor::DEFAULT),
        None => BaseColor::DEFAULT,
    }
}
