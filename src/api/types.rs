use std::collections::{
    BTreeMap,
    HashMap,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::cards::{
    Card,
    CardType,
    TestQuestion,
};

/// Reply shape shared by every mutation endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub card_id: Option<String>,
    #[serde(default)]
    pub source_id: Option<String>,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self { status: "ok".to_string(), ..Default::default() }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { status: "error".to_string(), error: Some(error.into()), ..Default::default() }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// A named origin (textbook chapter, deck...) cards can be tagged with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardSource {
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_section: Option<String>,
}

impl CardSource {
    pub fn label(&self) -> String {
        format!("{} - {}", self.source_name, self.source_section.as_deref().unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CardFilter {
    pub card_sources: Vec<CardSource>,
    pub card_types: Vec<CardType>,
    pub search_text: String,
    pub start_index: Option<u32>,
    pub num_cards: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartTestRequest {
    #[serde(flatten)]
    pub filter: CardFilter,
    pub mark_answers: bool,
    pub generate_extra_questions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    AnyState,
    New,
    Studied,
    Due,
}

impl TestKind {
    pub const ALL: [TestKind; 4] = [TestKind::AnyState, TestKind::New, TestKind::Studied, TestKind::Due];

    pub fn start_endpoint(&self) -> &'static str {
        match self {
            TestKind::AnyState => "test/start",
            TestKind::New => "test/start_new",
            TestKind::Studied => "test/start_studied",
            TestKind::Due => "test/start_due",
        }
    }

    pub fn count_endpoint(&self) -> &'static str {
        match self {
            TestKind::AnyState => "test/num_any_state",
            TestKind::New => "test/num_new",
            TestKind::Studied => "test/num_studied",
            TestKind::Due => "test/num_due",
        }
    }
}

/// `test_card` is absent once the session has no more questions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NextCardMessage {
    #[serde(default)]
    pub test_card: Option<Card>,
    #[serde(default)]
    pub next_question: Option<TestQuestion>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerResult {
    pub answer_is_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TestStatusMessage {
    pub questions_completed: u32,
    pub questions_total: u32,
    pub cards_completed: u32,
    pub cards_total: u32,
}

impl TestStatusMessage {
    pub fn progress_text(&self) -> String {
        format!(
            "{}/{} cards completed ({}/{} questions)",
            self.cards_completed, self.cards_total, self.questions_completed, self.questions_total
        )
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TestResults {
    #[serde(default)]
    pub total_cards: u32,
    #[serde(default)]
    pub correct_responses: u32,
    #[serde(default)]
    pub incorrect_responses: u32,
    #[serde(default)]
    pub stats: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionActiveMessage {
    pub session_active: bool,
}

/// Provenance tree node of a generated import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ImportItem {
    pub item_id: String,
    #[serde(default)]
    pub sub_items: Vec<ImportItem>,
}

impl ImportItem {
    /// Copy of this subtree without any node whose id matches; `None` if this
    /// node itself matches.
    pub fn without(&self, item_id: &str) -> Option<ImportItem> {
        if self.item_id == item_id {
            return None;
        }
        Some(ImportItem {
            item_id: self.item_id.clone(),
            sub_items: self.sub_items.iter().filter_map(|sub| sub.without(item_id)).collect(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedImports {
    #[serde(default)]
    pub import_items: Vec<ImportItem>,
    #[serde(default)]
    pub generated_cards: HashMap<String, Card>,
    #[serde(default)]
    pub new_card_ids: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl GeneratedImports {
    pub fn is_new_card(&self, card_id: &str) -> bool {
        self.new_card_ids.iter().any(|id| id == card_id)
    }

    /// Detaches the matching node and its descendants from the forest.
    /// `generated_cards` is left as is, so detached cards stay in the map.
    pub fn without_item(&self, item_id: &str) -> Self {
        Self {
            import_items: self.import_items.iter().filter_map(|item| item.without(item_id)).collect(),
            ..self.clone()
        }
    }

    pub fn with_card(&self, card: Card) -> Self {
        let mut generated_cards = self.generated_cards.clone();
        generated_cards.insert(card.card_id().to_string(), card);
        Self { generated_cards, ..self.clone() }
    }
}

/// Upcoming-due and recent-mistake histograms, keyed by days.
pub type DayHistogram = BTreeMap<u32, u64>;
