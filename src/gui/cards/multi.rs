use eframe::egui::{
    Id,
    RichText,
    Ui,
};

use crate::{
    cards::MultiCard,
    gui::widgets::{
        note_and_hint,
        NoteHintEdit,
    },
};

/// Read-only summary of the member cards. Only the test flags, note, hint and
/// membership can change.
pub fn multi_card_view(ui: &mut Ui, id: Id, entry: &MultiCard) -> Option<MultiCard> {
    let mut updated = None;

    ui.horizontal(|ui| {
        ui.strong("Question:");
        ui.label(RichText::new(&entry.writing).size(18.0));
    });
    ui.horizontal(|ui| {
        ui.strong("Multicard type:");
        ui.label(entry.multicard_type.label());
    });

    ui.strong("Cards:");
    ui.horizontal_wrapped(|ui| {
        for (index, member) in entry.cards.iter().enumerate() {
            ui.push_id(id.with(index), |ui| {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        ui.strong(member.card_type().label());
                        ui.label(RichText::new(member.writing()).size(16.0));
                        ui.label("Meanings:");
                        for line in member.meaning_lines() {
                            ui.label(line);
                        }
                        for line in member.reading_lines() {
                            ui.label(line);
                        }
                        if ui.button("Delete").clicked() {
                            updated = Some(entry.with_member_removed(index));
                        }
                    });
                });
            });
        }
    });

    ui.horizontal(|ui| {
        let mut test_readings = entry.test_readings;
        if ui.checkbox(&mut test_readings, "Test readings").changed() {
            updated = Some(MultiCard { test_readings, ..entry.clone() });
        }
        let mut test_meanings = entry.test_meanings;
        if ui.checkbox(&mut test_meanings, "Test meanings").changed() {
            updated = Some(MultiCard { test_meanings, ..entry.clone() });
        }
    });

    match note_and_hint(ui, &entry.note, &entry.hint) {
        Some(NoteHintEdit::Note(note)) => updated = Some(MultiCard { note, ..entry.clone() }),
        Some(NoteHintEdit::Hint(hint)) => updated = Some(MultiCard { hint, ..entry.clone() }),
        None => {}
    }

    updated
}
