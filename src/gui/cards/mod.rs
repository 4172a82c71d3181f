mod kanji;
mod multi;
mod onomatopoeia;
mod question;
mod radical;
mod vocab;

use eframe::egui::{
    Id,
    TextEdit,
    Ui,
};
pub use kanji::kanji_editor;
pub use multi::multi_card_view;
pub use onomatopoeia::onomatopoeia_editor;
pub use question::question_editor;
pub use radical::radical_editor;
pub use vocab::vocab_editor;

use super::widgets::answer_editor::answer_editor;
use crate::cards::{
    with_replaced,
    Card,
    TestQuestion,
};

/// Draws the editor matching the card's variant. Returns the replacement card
/// after an edit; the input card is never modified. Unknown cards draw nothing.
pub fn card_view(ui: &mut Ui, id: Id, card: &Card) -> Option<Card> {
    let id = id.with(card.card_id());
    match card {
        Card::Vocabulary(entry) => vocab_editor(ui, id, entry).map(Card::Vocabulary),
        Card::Kanji(entry) => kanji_editor(ui, id, entry).map(Card::Kanji),
        Card::Radical(entry) => radical_editor(ui, id, entry).map(Card::Radical),
        Card::Question(entry) => question_editor(ui, id, entry).map(Card::Question),
        Card::MultiCard(entry) => multi_card_view(ui, id, entry).map(Card::MultiCard),
        Card::Onomatopoeia(entry) => onomatopoeia_editor(ui, id, entry).map(Card::Onomatopoeia),
        Card::Unknown => {
            tracing::debug!("skipping card of unknown type");
            None
        }
    }
}

/// Custom questions attached to vocabulary, kanji and radical cards.
fn custom_questions_editor(ui: &mut Ui, id: Id, questions: &[TestQuestion]) -> Option<Vec<TestQuestion>> {
    let mut updated = None;

    for (index, question) in questions.iter().enumerate() {
        let question_id = id.with(("custom_question", index));
        ui.group(|ui| {
            let mut text = question.question.clone();
            if ui.add(TextEdit::singleline(&mut text).hint_text("Custom Question")).changed() {
                updated = Some(with_replaced(questions, index, question.with_question_text(text)));
            }

            for (group_idx, group) in question.answers.iter().enumerate() {
                for (answer_idx, answer) in group.answers.iter().enumerate() {
                    let answer_id = question_id.with((group_idx, answer_idx));
                    if let Some(answer) = answer_editor(ui, answer_id, answer) {
                        let replaced = question.with_answer_replaced(group_idx, answer_idx, answer);
                        updated = Some(with_replaced(questions, index, replaced));
                    }
                }
            }
        });
    }

    updated
}

fn dictionary_id_label(ui: &mut Ui, label: &str, id: Option<i64>) {
    let text = id.map(|id| id.to_string()).unwrap_or_default();
    ui.weak(format!("{label}: {text}"));
}

#[cfg(test)]
mod tests {
    use eframe::egui::{
        CentralPanel,
        Context,
        RawInput,
        Shape,
    };

    use super::*;
    use crate::cards::{
        CardType,
        MultiCard,
    };

    /// A label only the editor for that card type draws.
    const MARKERS: [(CardType, &str); 6] = [
        (CardType::Vocabulary, "Reading Type:"),
        (CardType::Kanji, "Kun Readings:"),
        (CardType::Radical, "Radical:"),
        (CardType::Question, "Add Answer"),
        (CardType::MultiCard, "Multicard type:"),
        (CardType::Onomatopoeia, "Kana writing:"),
    ];

    fn multi_card() -> Card {
        Card::MultiCard(MultiCard {
            card_id: "m1".into(),
            note: String::new(),
            hint: String::new(),
            test_readings: true,
            test_meanings: true,
            multicard_type: CardType::Kanji,
            card_ids: vec![],
            cards: vec![],
            writing: "生".into(),
        })
    }

    fn sample_cards() -> Vec<Card> {
        let mut cards: Vec<Card> =
            CardType::EDITABLE.iter().filter_map(|card_type| Card::blank(*card_type)).collect();
        cards.push(multi_card());
        cards
    }

    fn collect_text(shape: &Shape, out: &mut Vec<String>) {
        match shape {
            Shape::Text(text) => out.push(text.galley.text().to_owned()),
            Shape::Vec(shapes) => shapes.iter().for_each(|shape| collect_text(shape, out)),
            _ => {}
        }
    }

    /// Renders `card` alone for two frames; returns the drawn text and the last edit.
    fn render(card: &Card) -> (Vec<String>, Option<Card>) {
        let ctx = Context::default();
        let mut edited = None;
        let mut output = None;

        for _ in 0..2 {
            output = Some(ctx.run(RawInput::default(), |ctx| {
                CentralPanel::default().show(ctx, |ui| {
                    edited = card_view(ui, Id::new("card"), card);
                });
            }));
        }

        let mut texts = Vec::new();
        for clipped in output.map(|output| output.shapes).unwrap_or_default() {
            collect_text(&clipped.shape, &mut texts);
        }
        (texts, edited)
    }

    #[test]
    fn every_variant_draws_only_its_own_editor() {
        let cards = sample_cards();
        assert_eq!(cards.len(), 6);

        for card in &cards {
            let card_type = card.card_type().unwrap();
            let (texts, edited) = render(card);
            assert!(edited.is_none());

            for (marker_type, marker) in MARKERS {
                let drawn = texts.iter().any(|text| text == marker);
                assert_eq!(
                    drawn,
                    marker_type == card_type,
                    "{card_type:?} card, marker {marker:?} drawn: {drawn}"
                );
            }
        }
    }

    #[test]
    fn unknown_card_draws_nothing() {
        let (texts, edited) = render(&Card::Unknown);
        assert!(texts.is_empty());
        assert!(edited.is_none());
    }

    #[test]
    fn multi_card_is_shown_read_only() {
        let (texts, edited) = render(&multi_card());
        assert!(edited.is_none());
        assert!(texts.iter().any(|text| text == "生"));
        assert!(!texts.iter().any(|text| text == "Add Answer" || text == "Kana writing:"));
    }
}
