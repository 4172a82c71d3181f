use eframe::egui::Ui;

use super::{
    log_failure,
    Page,
    PageCommand,
    Route,
};
use crate::{
    api::TestResults,
    core::tasks::{
        ApiCall,
        ApiReply,
        Mutation,
    },
    gui::session::SessionState,
};

#[derive(Debug, Default)]
pub struct ResultsPage {
    results: Option<TestResults>,
}

impl ResultsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> Option<&TestResults> {
        self.results.as_ref()
    }

    pub fn practice_failed(&self) -> Vec<PageCommand> {
        vec![ApiCall::PracticeFailed.into()]
    }

    pub fn practice_all(&self) -> Vec<PageCommand> {
        vec![ApiCall::PracticeAll.into()]
    }
}

impl Page for ResultsPage {
    fn mount(&mut self) -> Vec<PageCommand> {
        self.results = None;
        vec![ApiCall::TestResults.into()]
    }

    fn on_reply(&mut self, reply: ApiReply) -> Vec<PageCommand> {
        match reply {
            ApiReply::TestResults(Ok(results)) => self.results = Some(results),
            ApiReply::TestResults(Err(e)) => log_failure("fetching test results", &e),
            ApiReply::Mutation {
                mutation: mutation @ (Mutation::PracticeFailed | Mutation::PracticeAll),
                result,
            } => match result {
                Ok(response) => {
                    if !response.is_ok() {
                        tracing::warn!(?mutation, error = ?response.error, "practice run rejected");
                    }
                    return vec![PageCommand::Navigate(Route::Test)];
                }
                Err(e) => log_failure(&format!("{mutation:?}"), &e),
            },
            other => tracing::debug!(?other, "results page ignoring reply"),
        }
        vec![]
    }

    fn show(&mut self, ui: &mut Ui, _session: &SessionState) -> Vec<PageCommand> {
        let mut commands = Vec::new();

        ui.heading("Test Results");
        let Some(results) = &self.results else {
            ui.label("Loading...");
            return commands;
        };

        ui.label(format!("Number of cards: {}", results.total_cards));
        ui.label(format!("Number of correct answers: {}", results.correct_responses));
        ui.label(format!("Number of incorrect answers: {}", results.incorrect_responses));
        for stat in &results.stats {
            ui.label(stat);
        }
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Practice failed cards").clicked() {
                commands.extend(self.practice_failed());
            }
            if ui.button("Practice all cards").clicked() {
                commands.extend(self.practice_all());
            }
        });

        commands
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::StatusResponse;

    #[test]
    fn mount_requests_results() {
        let mut page = ResultsPage::new();
        assert_eq!(page.mount(), vec![PageCommand::Call(ApiCall::TestResults)]);

        let results: TestResults = serde_json::from_value(json!({
            "total_cards": 5,
            "correct_responses": 4,
            "incorrect_responses": 1,
            "stats": ["Kanji: 2/2"]
        }))
        .unwrap();
        page.on_reply(ApiReply::TestResults(Ok(results)));
        assert_eq!(page.results().map(|r| r.total_cards), Some(5));

        page.mount();
        assert!(page.results().is_none());
    }

    #[test]
    fn practice_runs_go_to_test_page() {
        let mut page = ResultsPage::new();
        assert_eq!(page.practice_failed(), vec![PageCommand::Call(ApiCall::PracticeFailed)]);
        assert_eq!(page.practice_all(), vec![PageCommand::Call(ApiCall::PracticeAll)]);

        for mutation in [Mutation::PracticeFailed, Mutation::PracticeAll] {
            let reply = ApiReply::Mutation { mutation, result: Ok(StatusResponse::ok()) };
            assert_eq!(page.on_reply(reply), vec![PageCommand::Navigate(Route::Test)]);
        }

        let offline =
            ApiReply::Mutation { mutation: Mutation::PracticeAll, result: Err("refused".into()) };
        assert!(page.on_reply(offline).is_empty());
    }
}
