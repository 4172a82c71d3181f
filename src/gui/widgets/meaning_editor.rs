use eframe::egui::{
    Id,
    TextEdit,
    Ui,
};

use super::{
    ime_input::ImeMode,
    multi_input::multi_input,
};
use crate::cards::VocabularyMeaningEntry;

/// Part of speech plus the meanings of one vocabulary meaning group.
pub fn meaning_editor(
    ui: &mut Ui,
    id: Id,
    meaning: &VocabularyMeaningEntry,
) -> Option<VocabularyMeaningEntry> {
    let mut updated = None;

    ui.label("Meaning:");
    ui.horizontal(|ui| {
        ui.label("Part of Speech:");
        let mut part_of_speech = meaning.part_of_speech.clone();
        if ui.add(TextEdit::singleline(&mut part_of_speech).desired_width(240.0)).changed() {
            updated = Some(VocabularyMeaningEntry { part_of_speech, ..meaning.clone() });
        }
    });

    if let Some(meanings) = multi_input(ui, id.with("meanings"), &meaning.meanings, ImeMode::Romaji) {
        updated = Some(VocabularyMeaningEntry { meanings, ..meaning.clone() });
    }

    updated
}
