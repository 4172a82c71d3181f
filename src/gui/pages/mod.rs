pub mod card_editor;
pub mod import_tool;
pub mod results;
pub mod sources;
pub mod test_runner;

use eframe::egui::Ui;

pub use card_editor::CardEditorPage;
pub use import_tool::ImportToolPage;
pub use results::ResultsPage;
pub use select_test::SelectTestPage;
pub use sources::SourcesPage;
pub use test_runner::TestRunnerPage;

use super::session::SessionState;
pub use crate::core::Route;
use crate::{
    api::CardSource,
    cards::CardType,
    core::tasks::{
        ApiCall,
        ApiReply,
    },
};

/// Side effect a page asks the app to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum PageCommand {
    Call(ApiCall),
    Navigate(Route),
}

impl From<ApiCall> for PageCommand {
    fn from(call: ApiCall) -> Self {
        PageCommand::Call(call)
    }
}

/// A route-level screen. Pages never do I/O themselves: every operation
/// returns the commands the app should run on their behalf.
pub trait Page {
    /// Called whenever the page becomes visible.
    fn mount(&mut self) -> Vec<PageCommand>;

    /// Reply to a call this page issued earlier.
    fn on_reply(&mut self, reply: ApiReply) -> Vec<PageCommand>;

    fn show(&mut self, ui: &mut Ui, session: &SessionState) -> Vec<PageCommand>;
}

pub(crate) fn source_options(sources: &[CardSource]) -> Vec<(CardSource, String)> {
    sources.iter().map(|source| (source.clone(), source.label())).collect()
}

pub(crate) fn card_type_options() -> Vec<(CardType, String)> {
    CardType::ALL.iter().map(|card_type| (*card_type, card_type.label().to_string())).collect()
}

/// Logs the failure of a call whose reply carries nothing else for the page.
pub(crate) fn log_failure(what: &str, error: &str) {
    tracing::warn!("{what} failed: {error}");
}
