use serde::{
    Deserialize,
    Serialize,
};

use super::{
    with_pushed,
    with_removed,
    with_replaced,
    Answer,
    AnswerText,
    AnswerType,
    TestQuestion,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CardType {
    Vocabulary,
    Kanji,
    Radical,
    Question,
    MultiCard,
    Onomatopoeia,
}

impl CardType {
    pub const ALL: [CardType; 6] = [
        CardType::Kanji,
        CardType::Vocabulary,
        CardType::Radical,
        CardType::Onomatopoeia,
        CardType::MultiCard,
        CardType::Question,
    ];

    /// Types a user can create or edit directly.
    pub const EDITABLE: [CardType; 5] = [
        CardType::Vocabulary,
        CardType::Kanji,
        CardType::Radical,
        CardType::Onomatopoeia,
        CardType::Question,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CardType::Vocabulary => "Vocabulary",
            CardType::Kanji => "Kanji",
            CardType::Radical => "Radical",
            CardType::Question => "Custom Question",
            CardType::MultiCard => "Multi Card",
            CardType::Onomatopoeia => "Onomatopoeia",
        }
    }

    pub fn is_editable(&self) -> bool {
        *self != CardType::MultiCard
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VocabularyMeaningEntry {
    #[serde(default)]
    pub test_enabled: bool,
    #[serde(default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub meanings: Vec<AnswerText>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VocabCard {
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub dictionary_id: Option<i64>,
    #[serde(default)]
    pub custom_questions: Vec<TestQuestion>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub writing: String,
    #[serde(default)]
    pub reading_type: AnswerType,
    #[serde(default)]
    pub readings: Vec<AnswerText>,
    #[serde(default)]
    pub meanings: Vec<VocabularyMeaningEntry>,
}

impl VocabCard {
    pub fn blank() -> Self {
        Self { dictionary_id: Some(0), reading_type: AnswerType::Hiragana, ..Default::default() }
    }

    pub fn with_meaning_added(&self) -> Self {
        let entry = VocabularyMeaningEntry {
            part_of_speech: String::new(),
            meanings: Vec::new(),
            test_enabled: false,
        };
        Self { meanings: with_pushed(&self.meanings, entry), ..self.clone() }
    }

    pub fn with_meaning_removed(&self, index: usize) -> Self {
        Self { meanings: with_removed(&self.meanings, index), ..self.clone() }
    }

    pub fn with_meaning_replaced(&self, index: usize, entry: VocabularyMeaningEntry) -> Self {
        Self { meanings: with_replaced(&self.meanings, index, entry), ..self.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KanjiCard {
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub dictionary_id: Option<i64>,
    #[serde(default)]
    pub custom_questions: Vec<TestQuestion>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub writing: String,
    #[serde(default)]
    pub on_readings: Vec<AnswerText>,
    #[serde(default)]
    pub kun_readings: Vec<AnswerText>,
    #[serde(default)]
    pub meanings: Vec<AnswerText>,
    #[serde(default)]
    pub radical_id: Option<i64>,
}

impl KanjiCard {
    pub fn blank() -> Self {
        Self { dictionary_id: None, radical_id: Some(0), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadicalCard {
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub dictionary_id: Option<i64>,
    #[serde(default)]
    pub custom_questions: Vec<TestQuestion>,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub writing: String,
    #[serde(default)]
    pub meanings: Vec<AnswerText>,
    #[serde(default)]
    pub reading: String,
}

impl RadicalCard {
    pub fn blank() -> Self {
        Self { dictionary_id: Some(0), ..Default::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuestionCard {
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default, alias = "writing")]
    pub question: String,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

impl QuestionCard {
    pub fn with_answer_added(&self) -> Self {
        Self { answers: with_pushed(&self.answers, Answer::blank()), ..self.clone() }
    }

    pub fn with_answer_removed(&self, index: usize) -> Self {
        Self { answers: with_removed(&self.answers, index), ..self.clone() }
    }

    pub fn with_answer_replaced(&self, index: usize, answer: Answer) -> Self {
        Self { answers: with_replaced(&self.answers, index, answer), ..self.clone() }
    }
}

/// Cards a multi-card can aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "card_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MultiCardMember {
    Vocabulary(VocabCard),
    Kanji(KanjiCard),
    Radical(RadicalCard),
}

impl MultiCardMember {
    pub fn card_type(&self) -> CardType {
        match self {
            MultiCardMember::Vocabulary(_) => CardType::Vocabulary,
            MultiCardMember::Kanji(_) => CardType::Kanji,
            MultiCardMember::Radical(_) => CardType::Radical,
        }
    }

    pub fn writing(&self) -> &str {
        match self {
            MultiCardMember::Vocabulary(card) => &card.writing,
            MultiCardMember::Kanji(card) => &card.writing,
            MultiCardMember::Radical(card) => &card.writing,
        }
    }

    /// One line per meaning group for vocabulary, a single line otherwise.
    pub fn meaning_lines(&self) -> Vec<String> {
        match self {
            MultiCardMember::Vocabulary(card) => {
                card.meanings.iter().map(|group| join_answers(&group.meanings)).collect()
            }
            MultiCardMember::Kanji(card) => vec![join_answers(&card.meanings)],
            MultiCardMember::Radical(card) => vec![join_answers(&card.meanings)],
        }
    }

    pub fn reading_lines(&self) -> Vec<String> {
        match self {
            MultiCardMember::Vocabulary(card) => {
                vec![format!("Readings: {}", join_answers(&card.readings))]
            }
            MultiCardMember::Kanji(card) => vec![
                format!("On readings: {}", join_answers(&card.on_readings)),
                format!("Kun readings: {}", join_answers(&card.kun_readings)),
            ],
            MultiCardMember::Radical(card) => vec![format!("Reading: {}", card.reading)],
        }
    }
}

pub fn join_answers(answers: &[AnswerText]) -> String {
    answers.iter().map(|a| a.answer_text.as_str()).collect::<Vec<_>>().join("; ")
}

/// Read-only aggregation of existing cards that share a writing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiCard {
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default = "default_true")]
    pub test_readings: bool,
    #[serde(default = "default_true")]
    pub test_meanings: bool,
    pub multicard_type: CardType,
    #[serde(default)]
    pub card_ids: Vec<String>,
    #[serde(default)]
    pub cards: Vec<MultiCardMember>,
    #[serde(default)]
    pub writing: String,
}

impl MultiCard {
    /// Drops a member from the aggregation along with its id.
    pub fn with_member_removed(&self, index: usize) -> Self {
        let Some(member) = self.cards.get(index) else {
            return self.clone();
        };
        let member_id = member_card_id(member);
        Self {
            cards: with_removed(&self.cards, index),
            card_ids: self.card_ids.iter().filter(|id| id.as_str() != member_id).cloned().collect(),
            ..self.clone()
        }
    }
}

fn member_card_id(member: &MultiCardMember) -> &str {
    match member {
        MultiCardMember::Vocabulary(card) => &card.card_id,
        MultiCardMember::Kanji(card) => &card.card_id,
        MultiCardMember::Radical(card) => &card.card_id,
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnomatopoeiaDefinition {
    #[serde(default)]
    pub equivalent: Vec<AnswerText>,
    #[serde(default)]
    pub meaning: AnswerText,
}

impl OnomatopoeiaDefinition {
    pub fn placeholder() -> Self {
        Self {
            meaning: AnswerText::new("Meaning", false),
            equivalent: vec![AnswerText::new("Equivalent", false)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OnomatopoeiaCard {
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub hint: String,
    #[serde(default)]
    pub writing: String,
    #[serde(default)]
    pub kana_writing: Vec<String>,
    #[serde(default)]
    pub definitions: Vec<OnomatopoeiaDefinition>,
}

impl OnomatopoeiaCard {
    pub fn blank() -> Self {
        Self {
            kana_writing: vec![String::new()],
            definitions: vec![OnomatopoeiaDefinition {
                meaning: AnswerText::new("", false),
                equivalent: vec![AnswerText::new("", false)],
            }],
            ..Default::default()
        }
    }

    /// The last definition can never be removed.
    pub fn can_remove_definition(&self) -> bool {
        self.definitions.len() > 1
    }

    pub fn with_definition_added(&self) -> Self {
        Self {
            definitions: with_pushed(&self.definitions, OnomatopoeiaDefinition::placeholder()),
            ..self.clone()
        }
    }

    pub fn with_definition_removed(&self, index: usize) -> Self {
        if !self.can_remove_definition() {
            return self.clone();
        }
        Self { definitions: with_removed(&self.definitions, index), ..self.clone() }
    }

    pub fn with_definition_meaning(&self, index: usize, meaning: AnswerText) -> Self {
        let Some(current) = self.definitions.get(index) else {
            return self.clone();
        };
        let definition = OnomatopoeiaDefinition { meaning, ..current.clone() };
        Self { definitions: with_replaced(&self.definitions, index, definition), ..self.clone() }
    }

    pub fn with_definition_equivalent(&self, index: usize, equivalent: Vec<AnswerText>) -> Self {
        let Some(current) = self.definitions.get(index) else {
            return self.clone();
        };
        let definition = OnomatopoeiaDefinition { equivalent, ..current.clone() };
        Self { definitions: with_replaced(&self.definitions, index, definition), ..self.clone() }
    }
}

/// A unit of study material, tagged on the wire by `card_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "card_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Card {
    Vocabulary(VocabCard),
    Kanji(KanjiCard),
    Radical(RadicalCard),
    Question(QuestionCard),
    MultiCard(MultiCard),
    Onomatopoeia(OnomatopoeiaCard),
    /// Any tag this client does not know. Never sent back to the server.
    #[serde(other)]
    Unknown,
}

impl Card {
    /// Fresh draft for the card editor. Multi-cards cannot be created directly.
    pub fn blank(card_type: CardType) -> Option<Card> {
        match card_type {
            CardType::Vocabulary => Some(Card::Vocabulary(VocabCard::blank())),
            CardType::Kanji => Some(Card::Kanji(KanjiCard::blank())),
            CardType::Radical => Some(Card::Radical(RadicalCard::blank())),
            CardType::Question => Some(Card::Question(QuestionCard::default())),
            CardType::Onomatopoeia => Some(Card::Onomatopoeia(OnomatopoeiaCard::blank())),
            CardType::MultiCard => None,
        }
    }

    pub fn card_type(&self) -> Option<CardType> {
        match self {
            Card::Vocabulary(_) => Some(CardType::Vocabulary),
            Card::Kanji(_) => Some(CardType::Kanji),
            Card::Radical(_) => Some(CardType::Radical),
            Card::Question(_) => Some(CardType::Question),
            Card::MultiCard(_) => Some(CardType::MultiCard),
            Card::Onomatopoeia(_) => Some(CardType::Onomatopoeia),
            Card::Unknown => None,
        }
    }

    pub fn card_id(&self) -> &str {
        match self {
            Card::Vocabulary(card) => &card.card_id,
            Card::Kanji(card) => &card.card_id,
            Card::Radical(card) => &card.card_id,
            Card::Question(card) => &card.card_id,
            Card::MultiCard(card) => &card.card_id,
            Card::Onomatopoeia(card) => &card.card_id,
            Card::Unknown => "",
        }
    }

    pub fn is_persisted(&self) -> bool {
        !self.card_id().is_empty()
    }

    pub fn is_editable(&self) -> bool {
        self.card_type().is_some_and(|card_type| card_type.is_editable())
    }

    /// Short text used in lists and logs.
    pub fn title(&self) -> &str {
        match self {
            Card::Vocabulary(card) => &card.writing,
            Card::Kanji(card) => &card.writing,
            Card::Radical(card) => &card.writing,
            Card::Question(card) => &card.question,
            Card::MultiCard(card) => &card.writing,
            Card::Onomatopoeia(card) => &card.writing,
            Card::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_cards_have_type_defaults() {
        for card_type in CardType::EDITABLE {
            let card = Card::blank(card_type).unwrap();
            assert_eq!(card.card_type(), Some(card_type));
            assert_eq!(card.card_id(), "");
        }
        assert!(Card::blank(CardType::MultiCard).is_none());

        let Some(Card::Vocabulary(vocab)) = Card::blank(CardType::Vocabulary) else {
            panic!("expected vocabulary card");
        };
        assert_eq!(vocab.dictionary_id, Some(0));
        assert_eq!(vocab.reading_type, AnswerType::Hiragana);
        assert!(vocab.readings.is_empty() && vocab.meanings.is_empty());

        let Some(Card::Kanji(kanji)) = Card::blank(CardType::Kanji) else {
            panic!("expected kanji card");
        };
        assert_eq!(kanji.dictionary_id, None);
        assert_eq!(kanji.radical_id, Some(0));

        let Some(Card::Onomatopoeia(ono)) = Card::blank(CardType::Onomatopoeia) else {
            panic!("expected onomatopoeia card");
        };
        assert_eq!(ono.kana_writing, vec![String::new()]);
        assert_eq!(ono.definitions.len(), 1);
        assert_eq!(ono.definitions[0].equivalent.len(), 1);
    }

    #[test]
    fn card_round_trips_with_tag() {
        let card = Card::Radical(RadicalCard {
            card_id: "r1".into(),
            writing: "氵".into(),
            reading: "さんずい".into(),
            ..RadicalCard::blank()
        });

        let value = serde_json::to_value(&card).unwrap();
        assert_eq!(value["card_type"], "RADICAL");
        assert_eq!(value["writing"], "氵");

        let back: Card = serde_json::from_value(value).unwrap();
        assert_eq!(back, card);
    }

    #[test]
    fn unknown_tag_becomes_unknown_variant() {
        let card: Card = serde_json::from_value(json!({
            "card_type": "SENTENCE",
            "card_id": "x",
            "writing": "文"
        }))
        .unwrap();

        assert_eq!(card, Card::Unknown);
        assert_eq!(card.card_type(), None);
        assert!(!card.is_editable());
    }

    #[test]
    fn question_card_accepts_writing_key() {
        let card: Card = serde_json::from_value(json!({
            "card_type": "QUESTION",
            "card_id": "q1",
            "writing": "What is 猫?",
            "answers": []
        }))
        .unwrap();

        let Card::Question(question) = card else { panic!("expected question card") };
        assert_eq!(question.question, "What is 猫?");
    }

    #[test]
    fn multi_card_parses_members() {
        let card: Card = serde_json::from_value(json!({
            "card_type": "MULTI_CARD",
            "card_id": "m1",
            "multicard_type": "KANJI",
            "card_ids": ["k1", "k2"],
            "writing": "生",
            "cards": [
                {"card_type": "KANJI", "card_id": "k1", "writing": "生",
                 "on_readings": [{"answer_text": "セイ", "required": true}],
                 "kun_readings": [], "meanings": [{"answer_text": "life"}], "radical_id": null},
                {"card_type": "RADICAL", "card_id": "r1", "writing": "生",
                 "meanings": [{"answer_text": "birth"}], "reading": "うまれる"}
            ]
        }))
        .unwrap();

        let Card::MultiCard(multi) = card else { panic!("expected multi card") };
        assert!(multi.test_readings && multi.test_meanings);
        assert_eq!(multi.cards.len(), 2);
        assert_eq!(multi.cards[0].card_type(), CardType::Kanji);
        assert_eq!(multi.cards[0].reading_lines()[0], "On readings: セイ");
        assert_eq!(multi.cards[1].meaning_lines(), vec!["birth".to_string()]);

        let trimmed = multi.with_member_removed(0);
        assert_eq!(trimmed.cards.len(), 1);
        assert_eq!(trimmed.card_ids, vec!["k2".to_string()]);
        assert_eq!(multi.cards.len(), 2);
        assert!(!Card::MultiCard(multi).is_editable());
    }

    #[test]
    fn vocab_meaning_edits_copy() {
        let vocab = VocabCard::blank();
        let added = vocab.with_meaning_added();
        assert_eq!(added.meanings.len(), 1);
        assert!(!added.meanings[0].test_enabled);
        assert!(vocab.meanings.is_empty());

        let entry = VocabularyMeaningEntry {
            part_of_speech: "noun".into(),
            ..added.meanings[0].clone()
        };
        let replaced = added.with_meaning_added().with_meaning_replaced(0, entry);
        assert_eq!(replaced.meanings[0].part_of_speech, "noun");
        assert_eq!(replaced.meanings[1].part_of_speech, "");

        let removed = replaced.with_meaning_removed(0);
        assert_eq!(removed.meanings.len(), 1);
        assert_eq!(removed.meanings[0].part_of_speech, "");
    }

    #[test]
    fn onomatopoeia_keeps_last_definition() {
        let card = OnomatopoeiaCard::blank();
        assert!(!card.can_remove_definition());
        assert_eq!(card.with_definition_removed(0).definitions.len(), 1);

        let two = card.with_definition_added();
        assert!(two.can_remove_definition());
        assert_eq!(two.definitions[1], OnomatopoeiaDefinition::placeholder());

        let one = two.with_definition_removed(0);
        assert_eq!(one.definitions, vec![OnomatopoeiaDefinition::placeholder()]);
        assert!(!one.can_remove_definition());
    }

    #[test]
    fn onomatopoeia_definition_updates_target_index() {
        let card = OnomatopoeiaCard::blank().with_definition_added();
        let updated = card.with_definition_meaning(1, AnswerText::new("dizzy", true));
        assert_eq!(updated.definitions[1].meaning, AnswerText::new("dizzy", true));
        assert_eq!(updated.definitions[1].equivalent, card.definitions[1].equivalent);
        assert_eq!(updated.definitions[0], card.definitions[0]);

        let equivalents = vec![AnswerText::new("spinning", false)];
        let updated = card.with_definition_equivalent(0, equivalents.clone());
        assert_eq!(updated.definitions[0].equivalent, equivalents);
        assert_eq!(card.with_definition_meaning(9, AnswerText::default()), card);
    }

    #[test]
    fn question_card_answer_edits() {
        let card = QuestionCard::default().with_answer_added().with_answer_added();
        assert_eq!(card.answers.len(), 2);
        assert_eq!(card.answers[0].answer_type, AnswerType::Hiragana);

        let replaced =
            card.with_answer_replaced(1, Answer { header: "Reading".into(), ..Answer::blank() });
        assert_eq!(replaced.answers[1].header, "Reading");
        assert_eq!(replaced.with_answer_removed(0).answers[0].header, "Reading");
    }
}
