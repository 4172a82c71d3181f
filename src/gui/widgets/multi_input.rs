use eframe::egui::{
    self,
    Id,
    RichText,
    Ui,
};

use super::ime_input::{
    ImeInput,
    ImeMode,
};
use crate::cards::{
    with_pushed,
    with_removed,
    with_replaced,
    AnswerText,
};

const ROW_WIDTH: f32 = 160.0;

enum RowEdit<T> {
    Replace(usize, T),
    Remove(usize),
    Add,
}

/// Editable list of answers, each with a "Required" flag. Returns the new list
/// when anything changed.
pub fn multi_input(ui: &mut Ui, id: Id, values: &[AnswerText], mode: ImeMode) -> Option<Vec<AnswerText>> {
    let mut edit = None;

    ui.horizontal_wrapped(|ui| {
        for (index, value) in values.iter().enumerate() {
            ui.group(|ui| {
                let mut text = value.answer_text.clone();
                let row_id = id.with(index);
                if ImeInput::new(&mut text, row_id).mode(mode).desired_width(ROW_WIDTH).show(ui).changed {
                    edit = Some(RowEdit::Replace(index, value.with_text(text)));
                }

                let mut required = value.required;
                if ui.checkbox(&mut required, "Required").changed() {
                    edit = Some(RowEdit::Replace(index, value.with_required_toggled()));
                }

                if ui.button(RichText::new("X").color(egui::Color32::DARK_RED)).clicked() {
                    edit = Some(RowEdit::Remove(index));
                }
            });
        }

        if ui.button(RichText::new("+").color(egui::Color32::DARK_GREEN)).clicked() {
            edit = Some(RowEdit::Add);
        }
    });

    edit.map(|edit| match edit {
        RowEdit::Replace(index, value) => with_replaced(values, index, value),
        RowEdit::Remove(index) => with_removed(values, index),
        RowEdit::Add => with_pushed(values, AnswerText::new("", false)),
    })
}

/// Plain string variant of [`multi_input`], without the required flag.
pub fn multi_input_str(ui: &mut Ui, id: Id, values: &[String], mode: ImeMode) -> Option<Vec<String>> {
    let mut edit = None;

    ui.horizontal_wrapped(|ui| {
        for (index, value) in values.iter().enumerate() {
            ui.group(|ui| {
                let mut text = value.clone();
                if ImeInput::new(&mut text, id.with(index)).mode(mode).desired_width(ROW_WIDTH).show(ui).changed {
                    edit = Some(RowEdit::Replace(index, text));
                }
                if ui.button(RichText::new("X").color(egui::Color32::DARK_RED)).clicked() {
                    edit = Some(RowEdit::Remove(index));
                }
            });
        }

        if ui.button(RichText::new("+").color(egui::Color32::DARK_GREEN)).clicked() {
            edit = Some(RowEdit::Add);
        }
    });

    edit.map(|edit| match edit {
        RowEdit::Replace(index, value) => with_replaced(values, index, value),
        RowEdit::Remove(index) => with_removed(values, index),
        RowEdit::Add => with_pushed(values, String::new()),
    })
}
