use std::path::Path;

use eframe::egui::{
    Color32,
    Id,
    RichText,
    ScrollArea,
    TextEdit,
    Ui,
};
use rfd::FileDialog;

use super::{
    log_failure,
    source_options,
    Page,
    PageCommand,
};
use crate::{
    api::{
        CardSource,
        GeneratedImports,
        ImportItem,
        StatusResponse,
    },
    cards::Card,
    core::{
        tasks::{
            ApiCall,
            ApiReply,
            Mutation,
        },
        GakuError,
    },
    gui::{
        cards::card_view,
        session::SessionState,
        widgets::multi_select,
    },
};

const TREE_INDENT: f32 = 16.0;

enum TreeAction {
    Delete(String),
    Edit(Card),
}

#[derive(Debug)]
pub struct ImportToolPage {
    import_text: String,
    all_sources: Vec<CardSource>,
    selected_sources: Vec<CardSource>,
    generated: Option<GeneratedImports>,
    import_result: Option<String>,
    show_existing: bool,
}

impl Default for ImportToolPage {
    fn default() -> Self {
        Self {
            import_text: String::new(),
            all_sources: Vec::new(),
            selected_sources: Vec::new(),
            generated: None,
            import_result: None,
            show_existing: true,
        }
    }
}

impl ImportToolPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn import_text(&self) -> &str {
        &self.import_text
    }

    pub fn set_import_text(&mut self, text: impl Into<String>) {
        self.import_text = text.into();
    }

    pub fn generated(&self) -> Option<&GeneratedImports> {
        self.generated.as_ref()
    }

    pub fn import_result(&self) -> Option<&str> {
        self.import_result.as_deref()
    }

    pub fn set_show_existing(&mut self, show: bool) {
        self.show_existing = show;
    }

    pub fn set_selected_sources(&mut self, sources: Vec<CardSource>) {
        self.selected_sources = sources;
    }

    /// Replaces the import text with the contents of a text file.
    pub fn load_file(&mut self, path: &Path) -> Result<(), GakuError> {
        self.import_text = std::fs::read_to_string(path)?;
        tracing::info!(path = %path.display(), "loaded import text");
        Ok(())
    }

    pub fn generate(&mut self) -> Vec<PageCommand> {
        self.generated = None;
        vec![ApiCall::GenerateImport(self.import_text.clone()).into()]
    }

    pub fn clear(&mut self) {
        self.generated = None;
        self.import_text.clear();
    }

    pub fn edit_card(&mut self, card: Card) {
        if let Some(generated) = &self.generated {
            self.generated = Some(generated.with_card(card));
        }
    }

    pub fn delete_item(&mut self, item_id: &str) {
        if let Some(generated) = &self.generated {
            self.generated = Some(generated.without_item(item_id));
        }
    }

    pub fn import(&self) -> Vec<PageCommand> {
        match &self.generated {
            Some(cards) => vec![ApiCall::ImportCards {
                cards: cards.clone(),
                sources: self.selected_sources.clone(),
            }
            .into()],
            None => vec![],
        }
    }

    /// Whether `item_id` is drawn. Hidden nodes hide their whole subtree.
    pub fn is_visible(&self, item_id: &str) -> bool {
        self.generated.as_ref().is_some_and(|generated| {
            generated.generated_cards.contains_key(item_id)
                && (self.show_existing || generated.is_new_card(item_id))
        })
    }

    fn on_import(&mut self, result: Result<StatusResponse, String>) {
        match result {
            Ok(response) if response.is_ok() => {
                tracing::info!("import successful");
                self.import_result = Some("Import successful".to_string());
                self.clear();
            }
            Ok(response) => {
                let error = response.error.unwrap_or_default();
                tracing::warn!(%error, "import rejected");
                self.import_result = Some(format!("Import failed: {error}"));
            }
            Err(e) => {
                log_failure("import", &e);
                self.import_result = Some(format!("Import failed: {e}"));
            }
        }
    }

    fn show_text_input(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        ui.heading("Vocabulary import");
        if ui.button("Open text file...").clicked() {
            if let Some(path) = FileDialog::new().add_filter("Text files", &["txt"]).pick_file() {
                if let Err(e) = self.load_file(&path) {
                    tracing::warn!("Failed to read {}: {e}", path.display());
                }
            }
        }
        ui.add(
            TextEdit::multiline(&mut self.import_text)
                .desired_rows(20)
                .desired_width(280.0)
                .hint_text("One word per line"),
        );
        ui.horizontal(|ui| {
            if ui.button("Generate imports").clicked() {
                commands.extend(self.generate());
            }
            if ui.button("Clear").clicked() {
                self.clear();
            }
        });

        let Some(generated) = &self.generated else {
            return;
        };
        let errors = generated.errors.join("\n");
        ui.checkbox(&mut self.show_existing, "Show existing cards");
        if ui.button("Import cards").clicked() {
            commands.extend(self.import());
        }
        if !errors.is_empty() {
            ui.strong("Import generation errors:");
            let mut log = errors.as_str();
            ui.add(TextEdit::multiline(&mut log).desired_rows(6).desired_width(280.0));
        }
    }

    fn show_tree(&mut self, ui: &mut Ui) {
        ui.heading("Generated imports");
        ui.strong("Selected sources");
        let options = source_options(&self.all_sources);
        if let Some(selected) =
            multi_select(ui, Id::new("import_sources"), &options, &self.selected_sources)
        {
            self.selected_sources = selected;
        }
        ui.separator();

        let Some(generated) = &self.generated else {
            return;
        };
        let mut actions = Vec::new();
        ScrollArea::vertical().id_salt("import_tree").show(ui, |ui| {
            for item in &generated.import_items {
                self.show_item(ui, generated, item, &mut actions);
            }
        });

        for action in actions {
            match action {
                TreeAction::Delete(item_id) => self.delete_item(&item_id),
                TreeAction::Edit(card) => self.edit_card(card),
            }
        }
    }

    fn show_item(
        &self,
        ui: &mut Ui,
        generated: &GeneratedImports,
        item: &ImportItem,
        actions: &mut Vec<TreeAction>,
    ) {
        if !self.is_visible(&item.item_id) {
            return;
        }
        let Some(card) = generated.generated_cards.get(&item.item_id) else {
            return;
        };

        ui.push_id(&item.item_id, |ui| {
            ui.horizontal(|ui| {
                if generated.is_new_card(&item.item_id) {
                    ui.label(RichText::new("New card").color(Color32::from_rgb(200, 80, 80)));
                } else {
                    ui.label(RichText::new("Existing card").color(Color32::from_rgb(0, 160, 0)));
                }
                if ui.button("Delete").clicked() {
                    actions.push(TreeAction::Delete(item.item_id.clone()));
                }
            });
            if let Some(updated) = card_view(ui, Id::new("import_card").with(&item.item_id), card) {
                actions.push(TreeAction::Edit(updated));
            }
            ui.separator();

            if !item.sub_items.is_empty() {
                ui.horizontal(|ui| {
                    ui.add_space(TREE_INDENT);
                    ui.vertical(|ui| {
                        for sub_item in &item.sub_items {
                            self.show_item(ui, generated, sub_item, actions);
                        }
                    });
                });
            }
        });
    }
}

impl Page for ImportToolPage {
    fn mount(&mut self) -> Vec<PageCommand> {
        vec![ApiCall::GetSources.into()]
    }

    fn on_reply(&mut self, reply: ApiReply) -> Vec<PageCommand> {
        match reply {
            ApiReply::Sources(Ok(sources)) => {
                self.selected_sources.retain(|selected| sources.contains(selected));
                self.all_sources = sources;
            }
            ApiReply::Sources(Err(e)) => log_failure("fetching sources", &e),
            ApiReply::Generated(Ok(generated)) => {
                tracing::info!(
                    cards = generated.generated_cards.len(),
                    errors = generated.errors.len(),
                    "import generated"
                );
                self.generated = Some(generated);
            }
            ApiReply::Generated(Err(e)) => log_failure("generating import", &e),
            ApiReply::Mutation { mutation: Mutation::ImportCards, result } => self.on_import(result),
            other => tracing::debug!(?other, "import tool ignoring reply"),
        }
        vec![]
    }

    fn show(&mut self, ui: &mut Ui, _session: &SessionState) -> Vec<PageCommand> {
        let mut commands = Vec::new();

        ui.horizontal_top(|ui| {
            ui.vertical(|ui| {
                ui.set_max_width(300.0);
                self.show_text_input(ui, &mut commands);
            });
            ui.vertical(|ui| {
                ui.set_min_width(360.0);
                self.show_tree(ui);
            });
            if let Some(result) = &self.import_result {
                ui.vertical(|ui| {
                    ui.heading("Import result");
                    ui.label(result);
                });
            }
        });

        commands
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::cards::{
        KanjiCard,
        VocabCard,
    };

    fn vocab(id: &str) -> Card {
        Card::Vocabulary(VocabCard { card_id: id.to_string(), ..VocabCard::blank() })
    }

    fn generated() -> GeneratedImports {
        GeneratedImports {
            import_items: vec![ImportItem {
                item_id: "v1".into(),
                sub_items: vec![ImportItem { item_id: "k1".into(), sub_items: vec![] }],
            }],
            generated_cards: [("v1".to_string(), vocab("v1")), ("k1".to_string(), vocab("k1"))]
                .into_iter()
                .collect(),
            new_card_ids: vec!["k1".into()],
            errors: vec!["unknown word: ほげ".into()],
        }
    }

    fn page_with_import() -> ImportToolPage {
        let mut page = ImportToolPage::new();
        page.set_import_text("猫\n犬");
        page.on_reply(ApiReply::Generated(Ok(generated())));
        page
    }

    #[test]
    fn generate_discards_previous_result() {
        let mut page = page_with_import();
        let commands = page.generate();
        assert_eq!(commands, vec![PageCommand::Call(ApiCall::GenerateImport("猫\n犬".into()))]);
        assert!(page.generated().is_none());
    }

    #[test]
    fn hiding_existing_cards_hides_subtrees() {
        let mut page = page_with_import();
        assert!(page.is_visible("v1"));
        assert!(page.is_visible("k1"));

        page.set_show_existing(false);
        assert!(!page.is_visible("v1"));
        assert!(page.is_visible("k1"));
        assert!(!page.is_visible("missing"));
    }

    #[test]
    fn delete_and_edit_touch_local_copy() {
        let mut page = page_with_import();
        page.delete_item("k1");
        let imports = page.generated().unwrap();
        assert!(imports.import_items[0].sub_items.is_empty());
        assert!(imports.generated_cards.contains_key("k1"));

        let edited = Card::Kanji(KanjiCard { card_id: "k1".into(), writing: "猫".into(), ..KanjiCard::blank() });
        page.edit_card(edited.clone());
        assert_eq!(page.generated().unwrap().generated_cards["k1"], edited);
    }

    #[test]
    fn import_sends_forest_and_sources() {
        let mut page = page_with_import();
        let source = CardSource { source_id: "s1".into(), ..Default::default() };
        page.set_selected_sources(vec![source.clone()]);

        assert_eq!(
            page.import(),
            vec![PageCommand::Call(ApiCall::ImportCards { cards: generated(), sources: vec![source] })]
        );
        assert!(ImportToolPage::new().import().is_empty());
    }

    #[test]
    fn successful_import_clears_form() {
        let mut page = page_with_import();
        page.on_reply(ApiReply::Mutation {
            mutation: Mutation::ImportCards,
            result: Ok(StatusResponse::ok()),
        });
        assert_eq!(page.import_result(), Some("Import successful"));
        assert!(page.generated().is_none());
        assert!(page.import_text().is_empty());
    }

    #[test]
    fn failed_import_reports_error_and_keeps_form() {
        let mut page = page_with_import();
        page.on_reply(ApiReply::Mutation {
            mutation: Mutation::ImportCards,
            result: Ok(StatusResponse::failed("duplicate card")),
        });
        assert_eq!(page.import_result(), Some("Import failed: duplicate card"));
        assert!(page.generated().is_some());

        page.on_reply(ApiReply::Mutation {
            mutation: Mutation::ImportCards,
            result: Err("connection refused".into()),
        });
        assert_eq!(page.import_result(), Some("Import failed: connection refused"));
    }

    #[test]
    fn load_file_replaces_text() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "食べる\n飲む").unwrap();

        let mut page = page_with_import();
        page.load_file(file.path()).unwrap();
        assert_eq!(page.import_text(), "食べる\n飲む");

        assert!(page.load_file(Path::new("/nonexistent/gaku.txt")).is_err());
    }
}
