//! Answer values and the answer map.

use std::collections::HashMap;

use crate::catalog::Question;
use crate::color::BaseColor;

/// A validated answer. Psych questions produce colors, career questions
/// produce the chosen option text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Color(BaseColor),
    Choice(String),
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color(color) => f.write_str(color.label()),
            Self::Choice(text) => f.write_str(text),
        }
    }
}

/// Answers keyed by question id. One entry per answered question; a second
/// answer to the same question replaces the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: HashMap<String, Answer>,
}

impl AnswerMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, returning the value it replaced.
    pub fn insert(&mut self, question_id: impl Into<String>, answer: Answer) -> Option<Answer> {
        self.entries.insert(question_id.into(), answer)
    }

    pub fn get(&self, question_id: &str) -> Option<&Answer> {
        self.entries.get(question_id)
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.entries.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Answer)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Turn raw user input into an answer for `question`.
///
/// Input is either a 1-based option number or the exact option text.
/// Returns `None` when it matches neither.
pub fn resolve_answer(question: &Question, input: &str) -> Option<Answer> {
    let input = input.trim();
    let option = match input.parse::<usize>() {
        Ok(n) if (1..=question.options.len()).contains(&n) => question.options[n - 1],
        _ => question.options.iter().copied().find(|opt| *opt == input)?,
    };

    if question.is_psych() {
        BaseColor::from_label(option).map(Answer::Color)
    } else {
        Some(Answer::Choice(option.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{AgeGroup, get_questions};

    #[test]
    fn psych_input_by_number_follows_display_order() {
        let q = &get_questions(AgeGroup::DreamTree)[0];
        assert_eq!(resolve_answer(q, "1"), Some(Answer::Color(BaseColor::Red)));
        assert_eq!(resolve_answer(q, "2"), Some(Answer::Color(BaseColor::Yellow)));
        assert_eq!(resolve_answer(q, "3"), Some(Answer::Color(BaseColor::Blue)));
        assert_eq!(resolve_answer(q, " 5 "), Some(Answer::Color(BaseColor::Purple)));
    }

    #[test]
    fn psych_input_by_label() {
        let q = &get_questions(AgeGroup::MindReset)[5];
        assert_eq!(resolve_answer(q, "초록"), Some(Answer::Color(BaseColor::Green)));
    }

    #[test]
    fn career_input_by_number_and_text() {
        let q = &get_questions(AgeGroup::CareerPath)[1];
        assert_eq!(resolve_answer(q, "4"), Some(Answer::Choice("그렇다".to_string())));
        assert_eq!(
            resolve_answer(q, "매우 그렇다"),
            Some(Answer::Choice("매우 그렇다".to_string()))
        );
    }

    #[test]
    fn invalid_input_is_rejected() {
        let career = &get_questions(AgeGroup::CareerPath)[1];
        let psych = &get_questions(AgeGroup::CareerPath)[0];
        assert_eq!(resolve_answer(career, "0"), None);
        assert_eq!(resolve_answer(career, "6"), None);
        assert_eq!(resolve_answer(career, "빨강"), None);
        assert_eq!(resolve_answer(psych, "그렇다"), None);
        assert_eq!(resolve_answer(psych, ""), None);
    }

    #[test]
    fn insert_overwrites() {
        let mut answers = AnswerMap::new();
        assert!(answers.insert("dt_s1_p", Answer::Color(BaseColor::Red)).is_none());
        let previous = answers.insert("dt_s1_p", Answer::Color(BaseColor::Blue));
        assert_eq!(previous, Some(Answer::Color(BaseColor::Red)));
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.get("dt_s1_p").unwrap().to_string(), "파랑");
    }
}
