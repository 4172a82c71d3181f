use eframe::egui::{
    TextEdit,
    Ui,
};

use super::{
    log_failure,
    Page,
    PageCommand,
};
use crate::{
    api::CardSource,
    core::tasks::{
        ApiCall,
        ApiReply,
        Mutation,
    },
    gui::session::SessionState,
};

#[derive(Debug, Default)]
pub struct SourcesPage {
    sources: Vec<CardSource>,
    input: CardSource,
    editing: Option<CardSource>,
}

impl SourcesPage {
    pub fn new() -> Self {
        Self { input: blank_source(), ..Default::default() }
    }

    pub fn sources(&self) -> &[CardSource] {
        &self.sources
    }

    pub fn input(&self) -> &CardSource {
        &self.input
    }

    pub fn set_input(&mut self, name: impl Into<String>, section: impl Into<String>) {
        self.input.source_name = name.into();
        self.input.source_section = Some(section.into());
    }

    /// Submits the form and resets it whatever the outcome.
    pub fn add(&mut self) -> Vec<PageCommand> {
        let source = std::mem::replace(&mut self.input, blank_source());
        vec![ApiCall::AddSource(source).into()]
    }

    pub fn begin_edit(&mut self, source: &CardSource) {
        self.editing = Some(source.clone());
    }

    pub fn update(&mut self) -> Vec<PageCommand> {
        match self.editing.take() {
            Some(source) => vec![ApiCall::UpdateSource(source).into()],
            None => vec![],
        }
    }

    pub fn delete(&self, source: &CardSource) -> Vec<PageCommand> {
        vec![ApiCall::DeleteSource(source.clone()).into()]
    }

    fn show_editing(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        let mut save = false;
        let mut cancel = false;
        if let Some(editing) = &mut self.editing {
            ui.horizontal(|ui| {
                ui.add(TextEdit::singleline(&mut editing.source_name).hint_text("Source Name"));
                let section = editing.source_section.get_or_insert_with(String::new);
                ui.add(TextEdit::singleline(section).hint_text("Source Section"));
                save = ui.button("Save").clicked();
                cancel = ui.button("Cancel").clicked();
            });
        }
        if save {
            commands.extend(self.update());
        } else if cancel {
            self.editing = None;
        }
    }
}

fn blank_source() -> CardSource {
    CardSource { source_section: Some(String::new()), ..Default::default() }
}

impl Page for SourcesPage {
    fn mount(&mut self) -> Vec<PageCommand> {
        vec![ApiCall::GetSources.into()]
    }

    fn on_reply(&mut self, reply: ApiReply) -> Vec<PageCommand> {
        match reply {
            ApiReply::Sources(Ok(sources)) => self.sources = sources,
            ApiReply::Sources(Err(e)) => log_failure("fetching sources", &e),
            ApiReply::Mutation {
                mutation: mutation @ (Mutation::AddSource | Mutation::UpdateSource | Mutation::DeleteSource),
                result,
            } => match result {
                Ok(response) if response.is_ok() => {
                    tracing::info!(?mutation, source_id = ?response.source_id, "source saved");
                    return vec![ApiCall::GetSources.into()];
                }
                Ok(response) => tracing::warn!(?mutation, error = ?response.error, "source change rejected"),
                Err(e) => log_failure(&format!("{mutation:?}"), &e),
            },
            other => tracing::debug!(?other, "sources page ignoring reply"),
        }
        vec![]
    }

    fn show(&mut self, ui: &mut Ui, _session: &SessionState) -> Vec<PageCommand> {
        let mut commands = Vec::new();

        ui.heading("Sources");
        let mut edit = None;
        let mut delete = None;
        for source in &self.sources {
            ui.horizontal(|ui| {
                ui.label(source.label());
                if ui.button("Delete").clicked() {
                    delete = Some(source.clone());
                }
                if ui.button("Edit").clicked() {
                    edit = Some(source.clone());
                }
            });
        }
        if let Some(source) = edit {
            self.begin_edit(&source);
        }
        if let Some(source) = delete {
            commands.extend(self.delete(&source));
        }
        self.show_editing(ui, &mut commands);

        ui.separator();
        ui.strong("Add Source");
        ui.horizontal(|ui| {
            ui.add(TextEdit::singleline(&mut self.input.source_name).hint_text("Source Name"));
            let section = self.input.source_section.get_or_insert_with(String::new);
            ui.add(TextEdit::singleline(section).hint_text("Source Section"));
            if ui.button("Add Source").clicked() {
                commands.extend(self.add());
            }
        });

        commands
    }
}
