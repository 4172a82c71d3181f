pub mod answer_editor;
pub mod ime_input;
pub mod meaning_editor;
pub mod multi_input;
pub mod multi_select;
pub mod tab_view;

use eframe::egui::{
    TextEdit,
    Ui,
};
pub use ime_input::{
    ImeInput,
    ImeMode,
};
pub use multi_select::multi_select;
pub use tab_view::TabView;

/// Multiline field; returns the new text when edited.
pub fn text_field(ui: &mut Ui, current: &str, hint: &str) -> Option<String> {
    let mut text = current.to_string();
    let response =
        ui.add(TextEdit::multiline(&mut text).hint_text(hint).desired_rows(2).desired_width(220.0));
    response.changed().then_some(text)
}

pub enum NoteHintEdit {
    Note(String),
    Hint(String),
}

/// The note and hint text areas every card editor ends with.
pub fn note_and_hint(ui: &mut Ui, note: &str, hint: &str) -> Option<NoteHintEdit> {
    let mut edit = None;
    ui.horizontal_wrapped(|ui| {
        ui.vertical(|ui| {
            ui.label("Note:");
            if let Some(note) = text_field(ui, note, "") {
                edit = Some(NoteHintEdit::Note(note));
            }
        });
        ui.vertical(|ui| {
            ui.label("Hint:");
            if let Some(hint) = text_field(ui, hint, "") {
                edit = Some(NoteHintEdit::Hint(hint));
            }
        });
    });
    edit
}
