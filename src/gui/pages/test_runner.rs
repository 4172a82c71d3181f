use eframe::egui::{
    self,
    Frame,
    Id,
    Key,
    Modifiers,
    RichText,
    Ui,
};

use super::{
    log_failure,
    Page,
    PageCommand,
    Route,
};
use crate::{
    api::{
        NextCardMessage,
        StatusResponse,
        TestStatusMessage,
    },
    cards::{
        Answer,
        Card,
        TestAnswer,
        TestQuestion,
    },
    core::tasks::{
        ApiCall,
        ApiReply,
        Mutation,
    },
    gui::{
        cards::card_view,
        session::SessionState,
        theme::Palette,
        widgets::{
            ImeInput,
            ImeMode,
        },
    },
};

/// Where the runner is in the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Loading,
    AwaitingAnswer,
    Correct,
    Incorrect,
}

/// Runs a test session one question at a time. The server decides what comes
/// next and whether an answer is right; this page only holds the current
/// question, the typed answers and a few display toggles.
#[derive(Debug, Default)]
pub struct TestRunnerPage {
    question: Option<TestQuestion>,
    card: Option<Card>,
    answers: TestAnswer,
    answer_order: Vec<String>,
    status: TestStatusMessage,
    check_result: Option<bool>,
    show_hint: bool,
    show_answer: bool,
    show_card_info: bool,
    is_practice: Option<bool>,
    awaiting_session_check: bool,
    focus: Option<usize>,
}

impl TestRunnerPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunnerState {
        match (&self.question, self.check_result) {
            (None, _) => RunnerState::Loading,
            (Some(_), None) => RunnerState::AwaitingAnswer,
            (Some(_), Some(true)) => RunnerState::Correct,
            (Some(_), Some(false)) => RunnerState::Incorrect,
        }
    }

    pub fn question(&self) -> Option<&TestQuestion> {
        self.question.as_ref()
    }

    pub fn answers(&self) -> &TestAnswer {
        &self.answers
    }

    pub fn answer_order(&self) -> &[String] {
        &self.answer_order
    }

    pub fn is_answer_shown(&self) -> bool {
        self.show_answer
    }

    pub fn is_hint_shown(&self) -> bool {
        self.show_hint
    }

    pub fn is_card_info_shown(&self) -> bool {
        self.show_card_info
    }

    pub fn focused_field(&self) -> Option<usize> {
        self.focus
    }

    /// "Practice" or "Test" followed by the progress counters.
    pub fn progress_text(&self) -> String {
        let kind = if self.is_practice == Some(true) { "Practice" } else { "Test" };
        format!("{kind}: {}", self.status.progress_text())
    }

    pub fn set_answer(&mut self, answer_id: &str, value: impl Into<String>) {
        self.answers.insert(answer_id.to_string(), value.into());
    }

    pub fn fetch_next(&mut self) -> Vec<PageCommand> {
        self.show_card_info = false;
        self.check_result = None;
        self.show_answer = false;
        vec![ApiCall::NextCard.into()]
    }

    pub fn check(&self) -> Vec<PageCommand> {
        vec![ApiCall::CheckAnswer(self.answers.clone()).into()]
    }

    /// Advances after a verdict; without one, checks instead.
    pub fn submit(&mut self) -> Vec<PageCommand> {
        if self.check_result.is_none() {
            return self.check();
        }
        let mut commands = vec![ApiCall::TestStatus.into()];
        commands.extend(self.fetch_next());
        commands
    }

    pub fn mark_correct(&self) -> Vec<PageCommand> {
        vec![ApiCall::MarkCorrect(self.answers.clone()).into()]
    }

    pub fn mark_mistake(&self) -> Vec<PageCommand> {
        vec![ApiCall::MarkMistake(self.answers.clone()).into()]
    }

    /// Back to answering the same question, keeping what was typed.
    pub fn retry(&mut self) {
        self.check_result = None;
        self.show_answer = false;
        self.focus = Some(0);
    }

    pub fn toggle_hint(&mut self) {
        self.show_hint = !self.show_hint;
    }

    pub fn toggle_card_info(&mut self) {
        self.show_card_info = !self.show_card_info;
    }

    /// Only meaningful once the answer has been checked.
    pub fn toggle_answer(&mut self) {
        if self.check_result.is_some() {
            self.show_answer = !self.show_answer;
        }
    }

    /// Enter in answer field `index`: move to the next field, or check on the last one.
    pub fn on_enter(&mut self, index: usize) -> Vec<PageCommand> {
        if index + 1 < self.answer_order.len() {
            self.focus = Some(index + 1);
            vec![]
        } else {
            self.focus = None;
            self.check()
        }
    }

    fn on_next_card(&mut self, message: NextCardMessage) -> Vec<PageCommand> {
        let mut commands = match (message.test_card, message.next_question) {
            (Some(card), Some(question)) => {
                tracing::debug!(question_id = %question.question_id, "next question");
                self.answers.clear();
                self.answer_order = question.answer_order();
                self.focus = Some(0);
                self.question = Some(question);
                self.card = Some(card);
                vec![]
            }
            (Some(_), None) => {
                tracing::warn!("next card arrived without a question");
                vec![]
            }
            (None, _) => {
                tracing::info!("test session finished");
                self.question = None;
                self.card = None;
                vec![ApiCall::SessionActive.into(), PageCommand::Navigate(Route::Results)]
            }
        };
        commands.push(ApiCall::TestStatus.into());
        commands
    }

    fn on_override(&mut self, mutation: Mutation, result: Result<StatusResponse, String>) -> Vec<PageCommand> {
        match result {
            Ok(response) => {
                if !response.is_ok() {
                    tracing::warn!(?mutation, error = ?response.error, "override rejected");
                }
                let mut commands = vec![ApiCall::TestStatus.into()];
                commands.extend(self.fetch_next());
                commands
            }
            Err(e) => {
                log_failure(&format!("{mutation:?}"), &e);
                vec![]
            }
        }
    }

    fn handle_shortcuts(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        let (submit, hint, answer, card_info) = ui.input_mut(|i| {
            (
                i.consume_key(Modifiers::CTRL, Key::Enter),
                i.consume_key(Modifiers::NONE, Key::F2),
                i.consume_key(Modifiers::NONE, Key::F3),
                i.consume_key(Modifiers::NONE, Key::F4),
            )
        });
        if submit && self.question.is_some() {
            commands.extend(self.submit());
        }
        if hint {
            self.toggle_hint();
        }
        if answer {
            self.toggle_answer();
        }
        if card_info {
            self.toggle_card_info();
        }
    }

    fn show_question(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        let Some(question) = self.question.clone() else {
            ui.label("Loading...");
            return;
        };

        ui.strong(&question.header);
        ui.label(RichText::new(&question.question).size(40.0));
        if self.show_hint {
            ui.label(&question.hint);
        }

        ui.horizontal_wrapped(|ui| {
            for (group_idx, group) in question.answers.iter().enumerate() {
                ui.group(|ui| {
                    ui.vertical(|ui| {
                        if let Some(header) = &group.header {
                            ui.label(RichText::new(header).size(18.0));
                        }
                        for answer in &group.answers {
                            self.show_answer_field(ui, group_idx, answer, commands);
                        }
                    });
                });
            }
        });

        self.show_verdict(ui, commands);

        if self.show_answer {
            show_correct_answers(ui, &question);
        }
    }

    fn show_answer_field(
        &mut self,
        ui: &mut Ui,
        group_idx: usize,
        answer: &Answer,
        commands: &mut Vec<PageCommand>,
    ) {
        let Some(index) = self.answer_order.iter().position(|id| *id == answer.answer_id) else {
            return;
        };
        ui.label(format!("{}:", answer.display_header()));

        let mut value = self.answers.get(&answer.answer_id).cloned().unwrap_or_default();
        let field = ImeInput::new(&mut value, Id::new("test_answer").with((group_idx, index)))
            .mode(ImeMode::from_answer_type(answer.answer_type))
            .desired_width(220.0)
            .show(ui);
        if field.changed {
            self.set_answer(&answer.answer_id, value);
        }
        if self.focus == Some(index) {
            field.response.request_focus();
            self.focus = None;
        }
        let entered = field.response.lost_focus()
            && ui.input(|i| i.key_pressed(Key::Enter) && !i.modifiers.ctrl);
        if entered {
            commands.extend(self.on_enter(index));
        }
    }

    fn show_verdict(&mut self, ui: &mut Ui, commands: &mut Vec<PageCommand>) {
        let palette = Palette::of(ui.ctx());
        match self.check_result {
            None => {
                if ui.button("Check answer").clicked() {
                    commands.extend(self.check());
                }
            }
            Some(false) => {
                verdict_banner(ui, "Wrong answer", palette.incorrect_bg);
                ui.horizontal(|ui| {
                    if ui.button("Mark as correct").clicked() {
                        commands.extend(self.mark_correct());
                    }
                    if ui.button("Recheck").clicked() {
                        commands.extend(self.check());
                    }
                    if ui.button("Try again").clicked() {
                        self.retry();
                    }
                });
            }
            Some(true) => {
                verdict_banner(ui, "Correct answer", palette.correct_bg);
                ui.horizontal(|ui| {
                    if ui.button("Mark as mistake").clicked() {
                        commands.extend(self.mark_mistake());
                    }
                    let label = if self.show_answer { "Hide Answer" } else { "Show Answer" };
                    if ui.button(label).on_hover_text("F3").clicked() {
                        self.toggle_answer();
                    }
                    if ui.button("Next Card").on_hover_text("Ctrl+Enter").clicked() {
                        commands.extend(self.submit());
                    }
                });
            }
        }
    }
}

fn verdict_banner(ui: &mut Ui, text: &str, fill: egui::Color32) {
    Frame::new().fill(fill).inner_margin(8.0).corner_radius(4.0).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(text).color(egui::Color32::BLACK));
        });
    });
}

/// Every accepted answer, required ones in bold, separated by "; ".
fn show_correct_answers(ui: &mut Ui, question: &TestQuestion) {
    ui.group(|ui| {
        ui.horizontal_wrapped(|ui| {
            ui.label("Correct answers (required answers in");
            ui.strong("bold");
            ui.label("):");
        });
        for group in &question.answers {
            if let Some(header) = &group.header {
                ui.label(RichText::new(format!("{header}:")).size(18.0));
            }
            for answer in &group.answers {
                ui.small(format!("{}:", answer.header));
                ui.horizontal_wrapped(|ui| {
                    ui.spacing_mut().item_spacing.x = 0.0;
                    for (index, item) in answer.answers.iter().enumerate() {
                        let text = RichText::new(&item.answer_text);
                        ui.label(if item.required { text.strong() } else { text });
                        if index + 1 < answer.answers.len() {
                            ui.label("; ");
                        }
                    }
                });
            }
        }
    });
}

impl Page for TestRunnerPage {
    fn mount(&mut self) -> Vec<PageCommand> {
        *self = Self { show_hint: self.show_hint, awaiting_session_check: true, ..Self::default() };
        vec![ApiCall::SessionActive.into(), ApiCall::IsPractice.into()]
    }

    fn on_reply(&mut self, reply: ApiReply) -> Vec<PageCommand> {
        match reply {
            ApiReply::SessionActive(result) if self.awaiting_session_check => {
                self.awaiting_session_check = false;
                match result {
                    Ok(false) => {
                        tracing::info!("no active test session");
                        return vec![PageCommand::Navigate(Route::SelectTest)];
                    }
                    Ok(true) => {}
                    Err(e) => log_failure("checking test session", &e),
                }
                return self.fetch_next();
            }
            ApiReply::NextCard(Ok(message)) => return self.on_next_card(message),
            ApiReply::NextCard(Err(e)) => log_failure("fetching next card", &e),
            ApiReply::Checked(Ok(result)) => {
                let correct = result.answer_is_correct;
                self.check_result = Some(correct);
                self.show_answer = !correct;
            }
            ApiReply::Checked(Err(e)) => log_failure("checking answer", &e),
            ApiReply::TestStatus(Ok(status)) => self.status = status,
            ApiReply::TestStatus(Err(e)) => log_failure("fetching test status", &e),
            ApiReply::IsPractice(Ok(practice)) => self.is_practice = Some(practice),
            ApiReply::IsPractice(Err(e)) => log_failure("fetching test type", &e),
            ApiReply::Mutation {
                mutation: mutation @ (Mutation::MarkCorrect | Mutation::MarkMistake),
                result,
            } => return self.on_override(mutation, result),
            other => tracing::debug!(?other, "test runner ignoring reply"),
        }
        vec![]
    }

    fn show(&mut self, ui: &mut Ui, _session: &SessionState) -> Vec<PageCommand> {
        let mut commands = Vec::new();
        self.handle_shortcuts(ui, &mut commands);

        ui.horizontal(|ui| {
            ui.small(self.progress_text());
            let hint = if self.show_hint { "Hint on" } else { "Hint off" };
            if ui.link(hint).on_hover_text("F2").clicked() {
                self.toggle_hint();
            }
        });
        ui.separator();

        self.show_question(ui, &mut commands);

        ui.add_space(12.0);
        let label = if self.show_card_info { "Hide Card Info" } else { "Show Card Info" };
        if ui.button(label).on_hover_text("F4 - show/hide card info").clicked() {
            self.toggle_card_info();
        }
        if self.show_card_info {
            if let Some(card) = &self.card {
                ui.group(|ui| {
                    // read-only here; edits are discarded
                    let _ = card_view(ui, Id::new("test_card_info"), card);
                });
            }
        }

        commands
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::AnswerResult;

    fn next_card() -> NextCardMessage {
        serde_json::from_value(json!({
            "test_card": {"card_type": "VOCABULARY", "card_id": "c1", "writing": "猫"},
            "next_question": {
                "question_id": "q1",
                "header": "Vocabulary",
                "question": "猫",
                "hint": "animal",
                "answers": [
                    {"group_id": "g1", "answers": [
                        {"answer_id": "reading", "answer_type": "HIRAGANA", "header": "Reading",
                         "answers": [{"answer_text": "ねこ", "required": true}]},
                        {"answer_id": "meaning", "answer_type": "ROMAJI", "header": "Meaning",
                         "answers": [{"answer_text": "cat", "required": true}]}
                    ]}
                ]
            }
        }))
        .unwrap()
    }

    fn mounted_with_question() -> TestRunnerPage {
        let mut page = TestRunnerPage::new();
        page.mount();
        page.on_reply(ApiReply::SessionActive(Ok(true)));
        page.on_reply(ApiReply::NextCard(Ok(next_card())));
        page
    }

    fn checked(correct: bool) -> ApiReply {
        ApiReply::Checked(Ok(AnswerResult { answer_is_correct: correct }))
    }

    #[test]
    fn mount_checks_session_then_fetches() {
        let mut page = TestRunnerPage::new();
        assert_eq!(
            page.mount(),
            vec![PageCommand::Call(ApiCall::SessionActive), PageCommand::Call(ApiCall::IsPractice)]
        );
        assert_eq!(page.state(), RunnerState::Loading);
        assert_eq!(page.on_reply(ApiReply::SessionActive(Ok(true))), vec![PageCommand::Call(ApiCall::NextCard)]);
        // later session replies are only status refreshes
        assert!(page.on_reply(ApiReply::SessionActive(Ok(true))).is_empty());
    }

    #[test]
    fn inactive_session_returns_to_selection() {
        let mut page = TestRunnerPage::new();
        page.mount();
        assert_eq!(
            page.on_reply(ApiReply::SessionActive(Ok(false))),
            vec![PageCommand::Navigate(Route::SelectTest)]
        );
    }

    #[test]
    fn next_card_sets_question_and_order() {
        let page = mounted_with_question();
        assert_eq!(page.state(), RunnerState::AwaitingAnswer);
        assert_eq!(page.answer_order(), ["reading", "meaning"]);
        assert_eq!(page.focused_field(), Some(0));
        assert!(!page.is_answer_shown());
    }

    #[test]
    fn finished_session_navigates_to_results() {
        let mut page = TestRunnerPage::new();
        page.mount();
        page.on_reply(ApiReply::SessionActive(Ok(true)));

        let commands = page.on_reply(ApiReply::NextCard(Ok(NextCardMessage::default())));
        assert_eq!(
            commands,
            vec![
                PageCommand::Call(ApiCall::SessionActive),
                PageCommand::Navigate(Route::Results),
                PageCommand::Call(ApiCall::TestStatus),
            ]
        );
    }

    #[test]
    fn correct_answer_is_not_revealed() {
        let mut page = mounted_with_question();
        page.set_answer("reading", "ねこ");
        page.on_reply(checked(true));
        assert_eq!(page.state(), RunnerState::Correct);
        assert!(!page.is_answer_shown());

        page.toggle_answer();
        assert!(page.is_answer_shown());
    }

    #[test]
    fn incorrect_answer_is_revealed() {
        let mut page = mounted_with_question();
        page.on_reply(checked(false));
        assert_eq!(page.state(), RunnerState::Incorrect);
        assert!(page.is_answer_shown());
    }

    #[test]
    fn check_sends_typed_answers() {
        let mut page = mounted_with_question();
        page.set_answer("reading", "ねこ");
        page.set_answer("meaning", "cat");

        let commands = page.check();
        let [PageCommand::Call(ApiCall::CheckAnswer(answers))] = commands.as_slice() else {
            panic!("expected a check call");
        };
        assert_eq!(answers.len(), 2);
        assert_eq!(answers["meaning"], "cat");
    }

    #[test]
    fn submit_without_verdict_checks() {
        let mut page = mounted_with_question();
        let commands = page.submit();
        assert!(matches!(commands.as_slice(), [PageCommand::Call(ApiCall::CheckAnswer(_))]));
        assert_eq!(page.state(), RunnerState::AwaitingAnswer);
    }

    #[test]
    fn submit_after_verdict_advances() {
        let mut page = mounted_with_question();
        page.on_reply(checked(true));
        page.toggle_card_info();

        let commands = page.submit();
        assert_eq!(
            commands,
            vec![PageCommand::Call(ApiCall::TestStatus), PageCommand::Call(ApiCall::NextCard)]
        );
        assert!(!page.is_card_info_shown());
        assert!(!page.is_answer_shown());
    }

    #[test]
    fn retry_stays_on_question() {
        let mut page = mounted_with_question();
        page.set_answer("reading", "ねご");
        page.on_reply(checked(false));

        page.retry();
        assert_eq!(page.state(), RunnerState::AwaitingAnswer);
        assert_eq!(page.question().map(|q| q.question_id.as_str()), Some("q1"));
        assert_eq!(page.answers()["reading"], "ねご");
        assert!(!page.is_answer_shown());
    }

    #[test]
    fn overrides_advance_after_reply() {
        let mut page = mounted_with_question();
        page.on_reply(checked(false));
        assert!(matches!(page.mark_correct().as_slice(), [PageCommand::Call(ApiCall::MarkCorrect(_))]));

        let commands = page.on_reply(ApiReply::Mutation {
            mutation: Mutation::MarkCorrect,
            result: Ok(StatusResponse::ok()),
        });
        assert_eq!(
            commands,
            vec![PageCommand::Call(ApiCall::TestStatus), PageCommand::Call(ApiCall::NextCard)]
        );

        let failed = page.on_reply(ApiReply::Mutation {
            mutation: Mutation::MarkMistake,
            result: Err("connection reset".into()),
        });
        assert!(failed.is_empty());
    }

    #[test]
    fn enter_moves_focus_then_checks() {
        let mut page = mounted_with_question();
        assert!(page.on_enter(0).is_empty());
        assert_eq!(page.focused_field(), Some(1));

        let commands = page.on_enter(1);
        assert!(matches!(commands.as_slice(), [PageCommand::Call(ApiCall::CheckAnswer(_))]));
    }

    #[test]
    fn answer_toggle_needs_verdict() {
        let mut page = mounted_with_question();
        page.toggle_answer();
        assert!(!page.is_answer_shown());

        page.toggle_hint();
        assert!(page.is_hint_shown());
    }

    #[test]
    fn progress_text_names_test_kind() {
        let mut page = mounted_with_question();
        page.on_reply(ApiReply::TestStatus(Ok(TestStatusMessage {
            questions_completed: 3,
            questions_total: 8,
            cards_completed: 1,
            cards_total: 4,
        })));
        assert_eq!(page.progress_text(), "Test: 1/4 cards completed (3/8 questions)");

        page.on_reply(ApiReply::IsPractice(Ok(true)));
        assert!(page.progress_text().starts_with("Practice: "));
    }
}
