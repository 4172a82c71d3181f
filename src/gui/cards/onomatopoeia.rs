use eframe::egui::{
    Button,
    Id,
    TextEdit,
    Ui,
};

use crate::{
    cards::{
        AnswerText,
        OnomatopoeiaCard,
    },
    gui::widgets::{
        multi_input::{
            multi_input,
            multi_input_str,
        },
        note_and_hint,
        ImeMode,
        NoteHintEdit,
    },
};

pub fn onomatopoeia_editor(ui: &mut Ui, id: Id, entry: &OnomatopoeiaCard) -> Option<OnomatopoeiaCard> {
    let mut updated = None;

    ui.horizontal(|ui| {
        ui.strong("Onomatopoeia:");
        let mut writing = entry.writing.clone();
        if ui.add(TextEdit::singleline(&mut writing)).changed() {
            updated = Some(OnomatopoeiaCard { writing, ..entry.clone() });
        }
    });

    ui.label("Kana writing:");
    if let Some(kana_writing) =
        multi_input_str(ui, id.with("kana_writing"), &entry.kana_writing, ImeMode::Hiragana)
    {
        updated = Some(OnomatopoeiaCard { kana_writing, ..entry.clone() });
    }

    let removable = entry.can_remove_definition();
    for (index, definition) in entry.definitions.iter().enumerate() {
        let definition_id = id.with(("definition", index));
        ui.group(|ui| {
            ui.strong("Definition:");
            ui.label("Equivalents:");
            if let Some(equivalent) =
                multi_input(ui, definition_id.with("equivalent"), &definition.equivalent, ImeMode::Romaji)
            {
                updated = Some(entry.with_definition_equivalent(index, equivalent));
            }

            ui.label("Meaning:");
            ui.horizontal(|ui| {
                let mut text = definition.meaning.answer_text.clone();
                if ui.add(TextEdit::singleline(&mut text)).changed() {
                    let meaning = AnswerText::new(text, definition.meaning.required);
                    updated = Some(entry.with_definition_meaning(index, meaning));
                }
                let mut required = definition.meaning.required;
                if ui.checkbox(&mut required, "Required").changed() {
                    let meaning = definition.meaning.with_required_toggled();
                    updated = Some(entry.with_definition_meaning(index, meaning));
                }
                if ui.add_enabled(removable, Button::new("Remove Definition")).clicked() {
                    updated = Some(entry.with_definition_removed(index));
                }
            });
        });
    }
    if ui.button("Add Definition").clicked() {
        updated = Some(entry.with_definition_added());
    }

    match note_and_hint(ui, &entry.note, &entry.hint) {
        Some(NoteHintEdit::Note(note)) => updated = Some(OnomatopoeiaCard { note, ..entry.clone() }),
        Some(NoteHintEdit::Hint(hint)) => updated = Some(OnomatopoeiaCard { hint, ..entry.clone() }),
        None => {}
    }

    updated
}
