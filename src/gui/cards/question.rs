use eframe::egui::{
    Id,
    TextEdit,
    Ui,
};

use crate::{
    cards::QuestionCard,
    gui::widgets::{
        answer_editor::answer_editor,
        note_and_hint,
        NoteHintEdit,
    },
};

pub fn question_editor(ui: &mut Ui, id: Id, entry: &QuestionCard) -> Option<QuestionCard> {
    let mut updated = None;

    ui.horizontal(|ui| {
        ui.strong("Question:");
        let mut question = entry.question.clone();
        if ui.add(TextEdit::singleline(&mut question).hint_text("Question")).changed() {
            updated = Some(QuestionCard { question, ..entry.clone() });
        }
    });

    for (index, answer) in entry.answers.iter().enumerate() {
        ui.group(|ui| {
            if let Some(answer) = answer_editor(ui, id.with(("answer", index)), answer) {
                updated = Some(entry.with_answer_replaced(index, answer));
            }
            if ui.button("Remove Answer").clicked() {
                updated = Some(entry.with_answer_removed(index));
            }
        });
    }
    if ui.button("Add Answer").clicked() {
        updated = Some(entry.with_answer_added());
    }

    match note_and_hint(ui, &entry.note, &entry.hint) {
        Some(NoteHintEdit::Note(note)) => updated = Some(QuestionCard { note, ..entry.clone() }),
        Some(NoteHintEdit::Hint(hint)) => updated = Some(QuestionCard { hint, ..entry.clone() }),
        None => {}
    }

    updated
}
