use eframe::egui::{
    self,
    ComboBox,
    Id,
    Key,
    Modifiers,
    ScrollArea,
    TextEdit,
    Ui,
};

use super::{
    card_type_options,
    log_failure,
    source_options,
    Page,
    PageCommand,
};
use crate::{
    api::{
        CardFilter,
        CardSource,
        StatusResponse,
    },
    cards::{
        Card,
        CardType,
    },
    core::tasks::{
        ApiCall,
        ApiReply,
        Mutation,
    },
    gui::{
        cards::card_view,
        session::SessionState,
        widgets::multi_select,
    },
};

/// Draft editing and the full card list. The draft and the canonical list are
/// kept apart: the list is only ever replaced by a fresh server fetch.
#[derive(Debug, Default)]
pub struct CardEditorPage {
    draft: Option<Card>,
    /// Snapshot of the draft most recently sent for saving.
    saving: Option<Card>,
    cards: Vec<Card>,
    sources: Vec<CardSource>,
    selected_sources: Vec<CardSource>,
    selected_types: Vec<CardType>,
    new_card_type: Option<CardType>,
    num_due: u64,
    search_text: String,
    search_results: Option<Vec<Card>>,
}

impl CardEditorPage {
    pub fn new() -> Self {
        Self { new_card_type: Some(CardType::Vocabulary), ..Default::default() }
    }

    pub fn draft(&self) -> Option<&Card> {
        self.draft.as_ref()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn num_due(&self) -> u64 {
        self.num_due
    }

    pub fn set_new_card_type(&mut self, card_type: CardType) {
        self.new_card_type = Some(card_type);
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    pub fn set_selected_sources(&mut self, sources: Vec<CardSource>) {
        self.selected_sources = sources;
    }

    pub fn set_selected_types(&mut self, types: Vec<CardType>) {
        self.selected_types = types;
    }

    pub fn filter(&self) -> CardFilter {
        CardFilter {
            card_sources: self.selected_sources.clone(),
            card_types: self.selected_types.clone(),
            search_text: self.search_text.clone(),
            start_index: None,
            num_cards: None,
        }
    }

    /// Replaces the draft with a blank card of the selected type.
    pub fn new_card(&mut self) {
        self.draft = self.new_card_type.and_then(Card::blank);
    }

    /// Opens `card` for editing. Multi-cards are not editable and are ignored.
    pub fn set_draft(&mut self, card: Card) {
        if card.is_editable() {
            self.draft = Some(card);
        } else {
            tracing::debug!(card_id = card.card_id(), "ignoring non-editable card");
        }
    }

    /// Updates persisted drafts, adds new ones.
    pub fn save(&mut self) -> Vec<PageCommand> {
        let Some(draft) = self.draft.clone() else {
            return vec![];
        };
        self.saving = Some(draft.clone());
        let call =
            if draft.is_persisted() { ApiCall::UpdateCard(draft) } else { ApiCall::AddCard(draft) };
        vec![call.into()]
    }

    pub fn delete(&self, card: &Card) -> Vec<PageCommand> {
        tracing::info!(card = card.title(), card_id = card.card_id(), "deleting card");
        vec![ApiCall::DeleteCard(card.clone()).into()]
    }

    pub fn search(&self) -> Vec<PageCommand> {
        vec![ApiCall::SearchCards(self.filter()).into()]
    }

    pub fn clear_search(&mut self) {
        self.search_text.clear();
        self.search_results = None;
    }

    /// Tags the open draft with every selected source.
    pub fn link_selected_sources(&self) -> Vec<PageCommand> {
        let Some(card_id) = self.persisted_draft_id() else {
            return vec![];
        };
        self.selected_sources
            .iter()
            .map(|source| {
                ApiCall::LinkSource { card_id: card_id.clone(), source_id: source.source_id.clone() }
                    .into()
            })
            .collect()
    }

    pub fn unlink_selected_sources(&self) -> Vec<PageCommand> {
        let Some(card_id) = self.persisted_draft_id() else {
            return vec![];
        };
        self.selected_sources
            .iter()
            .map(|source| {
                ApiCall::UnlinkSource { card_id: card_id.clone(), source_id: source.source_id.clone() }
                    .into()
            })
            .collect()
    }

    pub fn unlink_all_sources(&self) -> Vec<PageCommand> {
        match self.persisted_draft_id() {
            Some(card_id) => vec![ApiCall::UnlinkAllSources { card_id }.into()],
            None => vec![],
        }
    }

    fn persisted_draft_id(&self) -> Option<String> {
        self.draft.as_ref().filter(|draft| draft.is_persisted()).map(|draft| draft.card_id().to_string())
    }

    fn on_mutation(&mut self, mutation: Mutation, result: Result<StatusResponse, String>) -> Vec<PageCommand> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                log_failure(&format!("{mutation:?}"), &e);
                return vec![];
            }
        };
        if !response.is_ok() {
            tracing::warn!(?mutation, error = ?response.error, "card mutation rejected");
            return vec![];
        }

        match mutation {
            Mutation::AddCard | Mutation::UpdateCard => {
                tracing::info!(card_id = ?response.card_id, "card saved");
                let saved = self.saving.take();
                if saved.is_some() && saved == self.draft {
                    self.draft = None;
                }
                vec![ApiCall::GetCards.into()]
            }
            Mutation::DeleteCard => vec![ApiCall::GetCards.into()],
            Mutation::LinkSource | Mutation::UnlinkSource | Mutation::UnlinkAllSources => {
                tracing::info!(?mutation, "card sources updated");
                vec![]
            }
            _ => vec![],
        }
    }

    fn show_filters(&mut self, ui: &mut Ui) {
        ui.group(|ui| {
            ui.strong("Select sources");
            let options = source_options(&self.sources);
            if let Some(selected) =
                multi_select(ui, Id::new("card_editor_sources"), &options, &self.selected_sources)
            {
                self.selected_sources = selected;
            }
            ui.strong("Select card types");
            if let Some(selected) = multi_select(
                ui,
                Id::new("card_editor_types"),
                &card_type_options(),
                &self.selected_types,
            ) {
                self.selected_types = selected;
            }
            ui.weak(format!("Due cards: {}", self.num_due));
        });
    }

    fn show_draft(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        ui.group(|ui| {
            ui.heading("Card Editor");
            ui.horizontal(|ui| {
                let selected = self.new_card_type.map(|card_type| card_type.label()).unwrap_or_default();
                ComboBox::from_id_salt("new_card_type").selected_text(selected).show_ui(ui, |ui| {
                    for card_type in CardType::EDITABLE {
                        ui.selectable_value(&mut self.new_card_type, Some(card_type), card_type.label());
                    }
                });
                if ui.button("New Card").clicked() {
                    self.new_card();
                }
            });

            let Some(draft) = &self.draft else {
                return;
            };
            if let Some(updated) = card_view(ui, Id::new("card_draft"), draft) {
                self.draft = Some(updated);
            }

            ui.horizontal(|ui| {
                if ui.button("Save Card").on_hover_text("Ctrl+Enter").clicked() {
                    commands.extend(self.save());
                }
                let persisted = self.persisted_draft_id().is_some();
                let can_link = persisted && !self.selected_sources.is_empty();
                if ui.add_enabled(can_link, egui::Button::new("Link selected sources")).clicked() {
                    commands.extend(self.link_selected_sources());
                }
                if ui.add_enabled(can_link, egui::Button::new("Unlink selected sources")).clicked() {
                    commands.extend(self.unlink_selected_sources());
                }
                if ui.add_enabled(persisted, egui::Button::new("Unlink all sources")).clicked() {
                    commands.extend(self.unlink_all_sources());
                }
            });
        });
    }

    fn show_list(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        ui.group(|ui| {
            ui.heading("All Cards");
            ui.horizontal(|ui| {
                let response = ui.add(TextEdit::singleline(&mut self.search_text).hint_text("Search"));
                let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                if ui.button("Search").clicked() || submitted {
                    commands.extend(self.search());
                }
                if self.search_results.is_some() && ui.button("Show all").clicked() {
                    self.clear_search();
                }
            });
            ui.separator();

            let mut edit = None;
            let mut delete = None;
            let listed = self.search_results.as_deref().unwrap_or(&self.cards);
            ScrollArea::vertical().id_salt("card_list").max_height(600.0).show(ui, |ui| {
                for (index, card) in listed.iter().enumerate() {
                    ui.push_id(index, |ui| {
                        // edits in the list are discarded; use Edit to open a draft
                        let _ = card_view(ui, Id::new("card_list").with(index), card);
                        ui.horizontal(|ui| {
                            if card.is_editable() && ui.button("Edit").clicked() {
                                edit = Some(card.clone());
                            }
                            if ui.button("Delete").clicked() {
                                delete = Some(card.clone());
                            }
                        });
                    });
                    ui.separator();
                }
            });

            if let Some(card) = edit {
                self.set_draft(card);
            }
            if let Some(card) = delete {
                commands.extend(self.delete(&card));
            }
        });
    }
}

impl Page for CardEditorPage {
    fn mount(&mut self) -> Vec<PageCommand> {
        self.selected_sources.clear();
        vec![
            ApiCall::GetCards.into(),
            ApiCall::GetSources.into(),
            ApiCall::CountDue(self.filter()).into(),
        ]
    }

    fn on_reply(&mut self, reply: ApiReply) -> Vec<PageCommand> {
        match reply {
            ApiReply::Cards(Ok(cards)) => {
                tracing::debug!(count = cards.len(), "cards loaded");
                self.cards = cards;
            }
            ApiReply::Cards(Err(e)) => log_failure("fetching cards", &e),
            ApiReply::SearchResults(Ok(cards)) => self.search_results = Some(cards),
            ApiReply::SearchResults(Err(e)) => log_failure("card search", &e),
            ApiReply::Sources(Ok(sources)) => {
                self.selected_sources.retain(|selected| sources.contains(selected));
                self.sources = sources;
            }
            ApiReply::Sources(Err(e)) => log_failure("fetching sources", &e),
            ApiReply::DueCount(Ok(due)) => self.num_due = due,
            ApiReply::DueCount(Err(e)) => log_failure("counting due cards", &e),
            ApiReply::Mutation { mutation, result } => return self.on_mutation(mutation, result),
            other => tracing::debug!(?other, "card editor ignoring reply"),
        }
        vec![]
    }

    fn show(&mut self, ui: &mut Ui, _session: &SessionState) -> Vec<PageCommand> {
        let mut commands = Vec::new();

        if self.draft.is_some() && ui.input_mut(|i| i.consume_key(Modifiers::CTRL, Key::Enter)) {
            commands.extend(self.save());
        }

        ui.heading("Card Editor");
        ui.columns(2, |columns| {
            columns[0].vertical(|ui| {
                self.show_filters(ui);
                self.show_draft(ui, &mut commands);
            });
            self.show_list(&mut columns[1], &mut commands);
        });

        commands
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::cards::{
        MultiCard,
        VocabCard,
    };

    fn persisted_vocab() -> Card {
        Card::Vocabulary(VocabCard { card_id: "c1".into(), writing: "猫".into(), ..VocabCard::blank() })
    }

    fn saved(mutation: Mutation) -> ApiReply {
        ApiReply::Mutation { mutation, result: Ok(StatusResponse::ok()) }
    }

    #[test]
    fn new_card_uses_selected_type() {
        let mut page = CardEditorPage::new();
        page.set_new_card_type(CardType::Kanji);
        page.new_card();
        assert_eq!(page.draft().and_then(Card::card_type), Some(CardType::Kanji));
        assert!(!page.draft().unwrap().is_persisted());
    }

    #[test]
    fn save_adds_unpersisted_draft() {
        let mut page = CardEditorPage::new();
        page.new_card();
        let draft = page.draft().cloned().unwrap();

        assert_eq!(page.save(), vec![PageCommand::Call(ApiCall::AddCard(draft))]);
    }

    #[test]
    fn save_updates_persisted_draft() {
        let mut page = CardEditorPage::new();
        page.set_draft(persisted_vocab());

        assert_eq!(page.save(), vec![PageCommand::Call(ApiCall::UpdateCard(persisted_vocab()))]);
    }

    #[test]
    fn successful_save_refetches_and_clears_draft() {
        let mut page = CardEditorPage::new();
        page.set_draft(persisted_vocab());
        page.save();

        let commands = page.on_reply(saved(Mutation::UpdateCard));
        assert_eq!(commands, vec![PageCommand::Call(ApiCall::GetCards)]);
        assert!(page.draft().is_none());
    }

    #[test]
    fn failed_save_keeps_draft() {
        let mut page = CardEditorPage::new();
        page.new_card();
        page.save();

        let rejected = ApiReply::Mutation {
            mutation: Mutation::AddCard,
            result: Ok(StatusResponse::failed("duplicate")),
        };
        assert!(page.on_reply(rejected).is_empty());
        assert!(page.draft().is_some());

        let offline =
            ApiReply::Mutation { mutation: Mutation::AddCard, result: Err("connection refused".into()) };
        assert!(page.on_reply(offline).is_empty());
        assert!(page.draft().is_some());
    }

    #[test]
    fn draft_edited_during_save_survives() {
        let mut page = CardEditorPage::new();
        page.set_draft(persisted_vocab());
        page.save();
        page.set_new_card_type(CardType::Radical);
        page.new_card();

        page.on_reply(saved(Mutation::UpdateCard));
        assert_eq!(page.draft().and_then(Card::card_type), Some(CardType::Radical));
    }

    #[test]
    fn multi_card_cannot_become_draft() {
        let mut page = CardEditorPage::new();
        let multi: MultiCard =
            serde_json::from_value(json!({"card_id": "m1", "writing": "生", "multicard_type": "KANJI"})).unwrap();
        page.set_draft(Card::MultiCard(multi));
        assert!(page.draft().is_none());

        page.set_draft(Card::Unknown);
        assert!(page.draft().is_none());
    }

    #[test]
    fn delete_refetches_only_on_success() {
        let mut page = CardEditorPage::new();
        let card = persisted_vocab();
        assert_eq!(page.delete(&card), vec![PageCommand::Call(ApiCall::DeleteCard(card))]);

        assert_eq!(page.on_reply(saved(Mutation::DeleteCard)), vec![PageCommand::Call(ApiCall::GetCards)]);
        let failed = ApiReply::Mutation {
            mutation: Mutation::DeleteCard,
            result: Ok(StatusResponse::failed("missing")),
        };
        assert!(page.on_reply(failed).is_empty());
    }

    #[test]
    fn cards_reply_replaces_list() {
        let mut page = CardEditorPage::new();
        page.on_reply(ApiReply::Cards(Ok(vec![persisted_vocab()])));
        assert_eq!(page.cards().len(), 1);

        page.on_reply(ApiReply::Cards(Err("timeout".into())));
        assert_eq!(page.cards().len(), 1);
    }

    #[test]
    fn search_sends_filter_with_text() {
        let mut page = CardEditorPage::new();
        page.set_search_text("ねこ");
        page.set_selected_types(vec![CardType::Vocabulary]);

        let commands = page.search();
        let [PageCommand::Call(ApiCall::SearchCards(filter))] = commands.as_slice() else {
            panic!("expected a single search call");
        };
        assert_eq!(filter.search_text, "ねこ");
        assert_eq!(filter.card_types, vec![CardType::Vocabulary]);
        assert_eq!(filter.num_cards, None);
    }

    #[test]
    fn source_links_need_persisted_draft() {
        let mut page = CardEditorPage::new();
        let source = CardSource { source_id: "s1".into(), ..Default::default() };
        page.set_selected_sources(vec![source]);
        page.new_card();
        assert!(page.link_selected_sources().is_empty());
        assert!(page.unlink_all_sources().is_empty());

        page.set_draft(persisted_vocab());
        assert_eq!(
            page.link_selected_sources(),
            vec![PageCommand::Call(ApiCall::LinkSource { card_id: "c1".into(), source_id: "s1".into() })]
        );
        assert_eq!(
            page.unlink_all_sources(),
            vec![PageCommand::Call(ApiCall::UnlinkAllSources { card_id: "c1".into() })]
        );
    }

    #[test]
    fn mount_fetches_cards_sources_and_due_count() {
        let mut page = CardEditorPage::new();
        let commands = page.mount();
        assert!(commands.contains(&PageCommand::Call(ApiCall::GetCards)));
        assert!(commands.contains(&PageCommand::Call(ApiCall::GetSources)));
        assert!(commands.contains(&PageCommand::Call(ApiCall::CountDue(page.filter()))));
        assert!(!commands.iter().any(|c| matches!(c, PageCommand::Call(ApiCall::CountCards { .. }))));

        page.on_reply(ApiReply::DueCount(Ok(4)));
        assert_eq!(page.num_due(), 4);

        page.on_reply(ApiReply::DueCount(Err("timeout".into())));
        assert_eq!(page.num_due(), 4);
    }
}
