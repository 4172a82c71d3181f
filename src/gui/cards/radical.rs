use eframe::egui::{
    Id,
    TextEdit,
    Ui,
};

use super::{
    custom_questions_editor,
    dictionary_id_label,
};
use crate::{
    cards::RadicalCard,
    gui::widgets::{
        multi_input::multi_input,
        note_and_hint,
        ImeInput,
        ImeMode,
        NoteHintEdit,
    },
};

pub fn radical_editor(ui: &mut Ui, id: Id, entry: &RadicalCard) -> Option<RadicalCard> {
    let mut updated = None;

    ui.horizontal(|ui| {
        ui.strong("Radical:");
        let mut writing = entry.writing.clone();
        if ImeInput::new(&mut writing, id.with("writing")).show(ui).changed {
            updated = Some(RadicalCard { writing, ..entry.clone() });
        }
    });

    ui.label("Meanings:");
    if let Some(meanings) = multi_input(ui, id.with("meanings"), &entry.meanings, ImeMode::Romaji) {
        updated = Some(RadicalCard { meanings, ..entry.clone() });
    }

    ui.label("Reading:");
    let mut reading = entry.reading.clone();
    if ui.add(TextEdit::singleline(&mut reading)).changed() {
        updated = Some(RadicalCard { reading, ..entry.clone() });
    }

    match note_and_hint(ui, &entry.note, &entry.hint) {
        Some(NoteHintEdit::Note(note)) => updated = Some(RadicalCard { note, ..entry.clone() }),
        Some(NoteHintEdit::Hint(hint)) => updated = Some(RadicalCard { hint, ..entry.clone() }),
        None => {}
    }

    dictionary_id_label(ui, "Radical ID", entry.dictionary_id);

    if let Some(custom_questions) =
        custom_questions_editor(ui, id.with("questions"), &entry.custom_questions)
    {
        updated = Some(RadicalCard { custom_questions, ..entry.clone() });
    }

    updated
}
