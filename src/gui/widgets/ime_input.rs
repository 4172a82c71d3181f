use eframe::egui::{
    self,
    text::{
        CCursor,
        CCursorRange,
    },
    Id,
    Response,
    TextEdit,
    Ui,
};
use wana_kana::ConvertJapanese;

use crate::cards::AnswerType;

/// Conversion applied to typed romaji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImeMode {
    #[default]
    Hiragana,
    Katakana,
    Romaji,
}

impl ImeMode {
    pub fn from_answer_type(answer_type: AnswerType) -> Self {
        match answer_type {
            AnswerType::Hiragana => ImeMode::Hiragana,
            AnswerType::Katakana => ImeMode::Katakana,
            _ => ImeMode::Romaji,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ImeMode::Hiragana => ImeMode::Katakana,
            ImeMode::Katakana => ImeMode::Romaji,
            ImeMode::Romaji => ImeMode::Hiragana,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImeMode::Hiragana => "Hiragana",
            ImeMode::Katakana => "Katakana",
            ImeMode::Romaji => "Romaji",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ImeMode::Hiragana => "あ",
            ImeMode::Katakana => "ア",
            ImeMode::Romaji => "A",
        }
    }

    /// Converts typed text. A trailing lone `n` stays as typed so `na`, `ni`...
    /// can still be completed.
    pub fn convert(&self, input: &str) -> String {
        let convert = |text: &str| match self {
            ImeMode::Hiragana => text.to_kana(),
            ImeMode::Katakana => text.to_katakana(),
            ImeMode::Romaji => text.to_string(),
        };

        if *self == ImeMode::Romaji {
            return input.to_string();
        }

        match trailing_lone_n(input) {
            Some(head) => format!("{}{}", convert(head), &input[head.len()..]),
            None => convert(input),
        }
    }

    /// Converts the text before char index `cursor` (the end when `None`).
    /// Returns the new text and the char index just past the converted part.
    pub fn convert_at(&self, input: &str, cursor: Option<usize>) -> (String, usize) {
        let split = cursor
            .and_then(|cursor| input.char_indices().nth(cursor).map(|(index, _)| index))
            .unwrap_or(input.len());
        let (head, tail) = input.split_at(split);
        let head = self.convert(head);
        let cursor = head.chars().count();
        (format!("{head}{tail}"), cursor)
    }
}

fn trailing_lone_n(input: &str) -> Option<&str> {
    let mut chars = input.chars().rev();
    let last = chars.next()?;
    if !last.eq_ignore_ascii_case(&'n') {
        return None;
    }
    match chars.next() {
        Some(prev) if prev.eq_ignore_ascii_case(&'n') => None,
        _ => Some(&input[..input.len() - 1]),
    }
}

/// Single line text edit with a romaji-to-kana mode button.
pub struct ImeInput<'a> {
    text: &'a mut String,
    id: Id,
    initial_mode: ImeMode,
    desired_width: Option<f32>,
}

pub struct ImeResponse {
    pub response: Response,
    pub changed: bool,
}

impl<'a> ImeInput<'a> {
    pub fn new(text: &'a mut String, id: Id) -> Self {
        Self { text, id, initial_mode: ImeMode::Romaji, desired_width: None }
    }

    pub fn mode(mut self, mode: ImeMode) -> Self {
        self.initial_mode = mode;
        self
    }

    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    pub fn show(self, ui: &mut Ui) -> ImeResponse {
        let ImeInput { text, id, initial_mode, desired_width } = self;
        let mode_id = id.with("ime_mode");
        let mode = ui.data_mut(|d| *d.get_temp_mut_or(mode_id, initial_mode));

        let mut changed = false;
        let inner = ui.horizontal(|ui| {
            let mut edit = TextEdit::singleline(&mut *text).id(id);
            if let Some(width) = desired_width {
                edit = edit.desired_width(width);
            }
            let mut output = edit.show(ui);
            if output.response.changed() {
                let cursor = output.state.cursor.char_range().map(|range| range.primary.index);
                let (converted, cursor) = mode.convert_at(text.as_str(), cursor);
                if converted != *text {
                    *text = converted;
                    output.state.cursor.set_char_range(Some(CCursorRange::one(CCursor::new(cursor))));
                    output.state.store(ui.ctx(), output.response.id);
                }
                changed = true;
            }

            let toggle = ui.add(egui::Button::new(mode.symbol()).small()).on_hover_text(mode.label());
            if toggle.clicked() {
                ui.data_mut(|d| d.insert_temp(mode_id, mode.next()));
            }
            output.response
        });

        ImeResponse { response: inner.inner, changed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hiragana_mode_converts_romaji() {
        assert_eq!(ImeMode::Hiragana.convert("neko"), "ねこ");
        assert_eq!(ImeMode::Katakana.convert("neko"), "ネコ");
        assert_eq!(ImeMode::Romaji.convert("neko"), "neko");
    }

    #[test]
    fn trailing_n_is_held_back() {
        assert_eq!(ImeMode::Hiragana.convert("kan"), "かn");
        assert_eq!(ImeMode::Hiragana.convert("kann"), "かん");
        assert_eq!(ImeMode::Hiragana.convert("n"), "n");
        assert_eq!(ImeMode::Katakana.convert("pan"), "パn");
    }

    #[test]
    fn already_converted_text_is_stable() {
        let once = ImeMode::Hiragana.convert("sakura");
        assert_eq!(ImeMode::Hiragana.convert(&once), once);
        assert_eq!(ImeMode::Hiragana.convert("かn"), "かn");
    }

    #[test]
    fn conversion_in_the_middle_moves_cursor_past_it() {
        // "ka" typed in front of already converted text
        assert_eq!(ImeMode::Hiragana.convert_at("kaねこ", Some(2)), ("かねこ".to_string(), 1));
        assert_eq!(ImeMode::Katakana.convert_at("ネkoコ", Some(3)), ("ネココ".to_string(), 2));
        // held back n keeps the cursor after it
        assert_eq!(ImeMode::Hiragana.convert_at("kanねこ", Some(3)), ("かnねこ".to_string(), 2));
    }

    #[test]
    fn cursor_at_or_past_end_converts_everything() {
        assert_eq!(ImeMode::Hiragana.convert_at("neko", None), ("ねこ".to_string(), 2));
        assert_eq!(ImeMode::Hiragana.convert_at("neko", Some(10)), ("ねこ".to_string(), 2));
        assert_eq!(ImeMode::Romaji.convert_at("neko", Some(2)), ("neko".to_string(), 2));
    }

    #[test]
    fn mode_cycle_and_answer_type_mapping() {
        assert_eq!(ImeMode::Hiragana.next(), ImeMode::Katakana);
        assert_eq!(ImeMode::Katakana.next(), ImeMode::Romaji);
        assert_eq!(ImeMode::Romaji.next(), ImeMode::Hiragana);

        assert_eq!(ImeMode::from_answer_type(AnswerType::Hiragana), ImeMode::Hiragana);
        assert_eq!(ImeMode::from_answer_type(AnswerType::Katakana), ImeMode::Katakana);
        assert_eq!(ImeMode::from_answer_type(AnswerType::Kana), ImeMode::Romaji);
        assert_eq!(ImeMode::from_answer_type(AnswerType::Romaji), ImeMode::Romaji);
    }
}
