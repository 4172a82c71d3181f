use eframe::egui::{
    self,
    Id,
    Ui,
};

use super::{
    custom_questions_editor,
    dictionary_id_label,
};
use crate::{
    cards::{
        AnswerType,
        VocabCard,
        VocabularyMeaningEntry,
    },
    gui::widgets::{
        meaning_editor::meaning_editor,
        multi_input::multi_input,
        note_and_hint,
        ImeInput,
        ImeMode,
        NoteHintEdit,
    },
};

pub fn vocab_editor(ui: &mut Ui, id: Id, entry: &VocabCard) -> Option<VocabCard> {
    let mut updated = None;

    ui.horizontal(|ui| {
        ui.strong("Vocabulary:");
        let mut writing = entry.writing.clone();
        if ImeInput::new(&mut writing, id.with("writing")).show(ui).changed {
            updated = Some(VocabCard { writing, ..entry.clone() });
        }
    });

    ui.horizontal(|ui| {
        ui.strong("Reading Type:");
        let mut reading_type = entry.reading_type;
        egui::ComboBox::from_id_salt(id.with("reading_type"))
            .selected_text(reading_type.as_str())
            .show_ui(ui, |ui| {
                for option in AnswerType::ALL {
                    ui.selectable_value(&mut reading_type, option, option.as_str());
                }
            });
        if reading_type != entry.reading_type {
            updated = Some(VocabCard { reading_type, ..entry.clone() });
        }
    });

    ui.label("Readings:");
    let mode = ImeMode::from_answer_type(entry.reading_type);
    if let Some(readings) = multi_input(ui, id.with("readings"), &entry.readings, mode) {
        updated = Some(VocabCard { readings, ..entry.clone() });
    }

    ui.add_space(6.0);
    ui.strong("Meanings:");
    for (index, meaning) in entry.meanings.iter().enumerate() {
        let meaning_id = id.with(("meaning", index));
        ui.group(|ui| {
            if let Some(edited) = meaning_editor(ui, meaning_id, meaning) {
                updated = Some(entry.with_meaning_replaced(index, edited));
            }
            if ui.button("Remove Meaning").clicked() {
                updated = Some(entry.with_meaning_removed(index));
            }
            let mut test_enabled = meaning.test_enabled;
            if ui.checkbox(&mut test_enabled, "Enable Testing").changed() {
                let toggled = VocabularyMeaningEntry { test_enabled, ..meaning.clone() };
                updated = Some(entry.with_meaning_replaced(index, toggled));
            }
        });
    }
    if ui.button("Add Meaning").clicked() {
        updated = Some(entry.with_meaning_added());
    }

    match note_and_hint(ui, &entry.note, &entry.hint) {
        Some(NoteHintEdit::Note(note)) => updated = Some(VocabCard { note, ..entry.clone() }),
        Some(NoteHintEdit::Hint(hint)) => updated = Some(VocabCard { hint, ..entry.clone() }),
        None => {}
    }

    if let Some(custom_questions) =
        custom_questions_editor(ui, id.with("questions"), &entry.custom_questions)
    {
        updated = Some(VocabCard { custom_questions, ..entry.clone() });
    }

    dictionary_id_label(ui, "Dictionary ID", entry.dictionary_id);

    updated
}
