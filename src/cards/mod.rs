pub mod card;
pub mod question;

pub use card::{
    Card,
    CardType,
    KanjiCard,
    MultiCard,
    MultiCardMember,
    OnomatopoeiaCard,
    OnomatopoeiaDefinition,
    QuestionCard,
    RadicalCard,
    VocabCard,
    VocabularyMeaningEntry,
};
pub use question::{
    Answer,
    AnswerGroup,
    AnswerText,
    AnswerType,
    TestAnswer,
    TestQuestion,
};

// Card values are never edited in place. Every list edit goes through one of
// these and produces a fresh vector for the replacement card.

pub fn with_pushed<T: Clone>(items: &[T], item: T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(items);
    out.push(item);
    out
}

pub fn with_removed<T: Clone>(items: &[T], index: usize) -> Vec<T> {
    items.iter().enumerate().filter(|(i, _)| *i != index).map(|(_, item)| item.clone()).collect()
}

/// Out of range indices leave the list unchanged.
pub fn with_replaced<T: Clone>(items: &[T], index: usize, item: T) -> Vec<T> {
    items
        .iter()
        .enumerate()
        .map(|(i, existing)| if i == index { item.clone() } else { existing.clone() })
        .collect()
}
