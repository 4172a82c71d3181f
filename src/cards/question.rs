use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnswerType {
    Romaji,
    #[default]
    Hiragana,
    Katakana,
    Kana,
}

impl AnswerType {
    pub const ALL: [AnswerType; 4] =
        [AnswerType::Romaji, AnswerType::Hiragana, AnswerType::Katakana, AnswerType::Kana];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerType::Romaji => "ROMAJI",
            AnswerType::Hiragana => "HIRAGANA",
            AnswerType::Katakana => "KATAKANA",
            AnswerType::Kana => "KANA",
        }
    }
}

/// A candidate answer. Required answers must be given for a response to count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerText {
    pub answer_text: String,
    #[serde(default)]
    pub required: bool,
}

impl AnswerText {
    pub fn new(answer_text: impl Into<String>, required: bool) -> Self {
        Self { answer_text: answer_text.into(), required }
    }

    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self { answer_text: text.into(), required: self.required }
    }

    pub fn with_required_toggled(&self) -> Self {
        Self { answer_text: self.answer_text.clone(), required: !self.required }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Answer {
    #[serde(default, alias = "id")]
    pub answer_id: String,
    #[serde(default)]
    pub answer_type: AnswerType,
    #[serde(default)]
    pub header: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_num_questions: Option<String>,
    #[serde(default)]
    pub answers: Vec<AnswerText>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Answer {
    /// Blank answer appended by the custom question editor.
    pub fn blank() -> Self {
        Self { answer_type: AnswerType::Hiragana, ..Default::default() }
    }

    pub fn answers_joined(&self) -> String {
        self.answers.iter().map(|a| a.answer_text.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// Replaces the answer list from comma separated text, keeping the
    /// `required` flag of entries whose text is unchanged.
    pub fn with_answers_from_text(&self, text: &str) -> Self {
        let answers = text
            .split(", ")
            .map(|piece| {
                let required = self
                    .answers
                    .iter()
                    .find(|existing| existing.answer_text == piece)
                    .map(|existing| existing.required)
                    .unwrap_or(false);
                AnswerText::new(piece, required)
            })
            .collect();
        Self { answers, ..self.clone() }
    }

    pub fn display_header(&self) -> String {
        match &self.header_num_questions {
            Some(suffix) => format!("{}{}", self.header, suffix),
            None => self.header.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnswerGroup {
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub header: Option<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// Server-prepared question shown by the test runner.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestQuestion {
    #[serde(default, alias = "id")]
    pub question_id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub answers: Vec<AnswerGroup>,
}

impl TestQuestion {
    /// Answer ids in display order, flattened across groups.
    pub fn answer_order(&self) -> Vec<String> {
        self.answers
            .iter()
            .flat_map(|group| group.answers.iter().map(|answer| answer.answer_id.clone()))
            .collect()
    }

    pub fn with_question_text(&self, question: impl Into<String>) -> Self {
        Self { question: question.into(), ..self.clone() }
    }

    pub fn with_answer_replaced(&self, group_idx: usize, answer_idx: usize, answer: Answer) -> Self {
        let answers = self
            .answers
            .iter()
            .enumerate()
            .map(|(g, group)| {
                if g != group_idx {
                    return group.clone();
                }
                AnswerGroup {
                    answers: super::with_replaced(&group.answers, answer_idx, answer.clone()),
                    ..group.clone()
                }
            })
            .collect();
        Self { answers, ..self.clone() }
    }
}

/// User responses keyed by server-issued answer id.
pub type TestAnswer = HashMap<String, String>;
