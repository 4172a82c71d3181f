use eframe::egui::{
    self,
    Id,
    TextEdit,
    Ui,
};

use super::text_field;
use crate::cards::{
    Answer,
    AnswerType,
};

/// Editor for one custom-question answer. Answers are edited as one
/// `", "` separated line.
pub fn answer_editor(ui: &mut Ui, id: Id, answer: &Answer) -> Option<Answer> {
    let mut updated = None;

    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.label("Answer type:");
            let mut answer_type = answer.answer_type;
            egui::ComboBox::from_id_salt(id.with("answer_type"))
                .selected_text(answer_type.as_str())
                .show_ui(ui, |ui| {
                    for option in AnswerType::ALL {
                        ui.selectable_value(&mut answer_type, option, option.as_str());
                    }
                });
            if answer_type != answer.answer_type {
                updated = Some(Answer { answer_type, ..answer.clone() });
            }
        });

        ui.horizontal(|ui| {
            let mut header = answer.header.clone();
            if ui.add(TextEdit::singleline(&mut header).hint_text("Header")).changed() {
                updated = Some(Answer { header, ..answer.clone() });
            }

            let mut joined = answer.answers_joined();
            if ui
                .add(TextEdit::singleline(&mut joined).hint_text("Answers (comma-separated)"))
                .changed()
            {
                updated = Some(answer.with_answers_from_text(&joined));
            }
        });

        ui.horizontal(|ui| {
            if let Some(hint) = text_field(ui, answer.hint.as_deref().unwrap_or_default(), "Hint") {
                updated = Some(Answer { hint: Some(hint), ..answer.clone() });
            }
            if let Some(note) = text_field(ui, answer.note.as_deref().unwrap_or_default(), "Note") {
                updated = Some(Answer { note: Some(note), ..answer.clone() });
            }
        });
    });

    updated
}
