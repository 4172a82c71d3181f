use eframe::egui::{
    Id,
    Ui,
};

use super::{
    custom_questions_editor,
    dictionary_id_label,
};
use crate::{
    cards::KanjiCard,
    gui::widgets::{
        multi_input::multi_input,
        note_and_hint,
        ImeInput,
        ImeMode,
        NoteHintEdit,
    },
};

pub fn kanji_editor(ui: &mut Ui, id: Id, entry: &KanjiCard) -> Option<KanjiCard> {
    let mut updated = None;

    ui.horizontal(|ui| {
        ui.strong("Kanji:");
        let mut writing = entry.writing.clone();
        if ImeInput::new(&mut writing, id.with("writing")).show(ui).changed {
            updated = Some(KanjiCard { writing, ..entry.clone() });
        }
    });

    ui.label("On Readings:");
    if let Some(on_readings) =
        multi_input(ui, id.with("on_readings"), &entry.on_readings, ImeMode::Katakana)
    {
        updated = Some(KanjiCard { on_readings, ..entry.clone() });
    }

    ui.label("Kun Readings:");
    if let Some(kun_readings) =
        multi_input(ui, id.with("kun_readings"), &entry.kun_readings, ImeMode::Hiragana)
    {
        updated = Some(KanjiCard { kun_readings, ..entry.clone() });
    }

    ui.label("Meanings:");
    if let Some(meanings) = multi_input(ui, id.with("meanings"), &entry.meanings, ImeMode::Romaji) {
        updated = Some(KanjiCard { meanings, ..entry.clone() });
    }

    match note_and_hint(ui, &entry.note, &entry.hint) {
        Some(NoteHintEdit::Note(note)) => updated = Some(KanjiCard { note, ..entry.clone() }),
        Some(NoteHintEdit::Hint(hint)) => updated = Some(KanjiCard { hint, ..entry.clone() }),
        None => {}
    }

    dictionary_id_label(ui, "Dictionary ID", entry.dictionary_id);

    if let Some(custom_questions) =
        custom_questions_editor(ui, id.with("questions"), &entry.custom_questions)
    {
        updated = Some(KanjiCard { custom_questions, ..entry.clone() });
    }

    updated
}
