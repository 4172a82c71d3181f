use std::{
    sync::{
        atomic::{
            AtomicBool,
            Ordering,
        },
        mpsc,
        Arc,
    },
    thread,
    time::Duration,
};

use eframe::egui;
use futures::future::join_all;
use tokio::runtime::Runtime;

use super::{
    ApiCall,
    ApiReply,
    CardCounts,
    Mutation,
    TaskHandle,
    TaskResult,
};
use crate::{
    api::{
        CardFilter,
        GakuClient,
        TestKind,
    },
    core::{
        GakuError,
        Route,
    },
};

const CANCEL_CHECK: Duration = Duration::from_millis(250);

pub struct TaskManager {
    runtime: Arc<Runtime>,
    receiver: mpsc::Receiver<TaskResult>,
    sender: mpsc::Sender<TaskResult>,
    client: GakuClient,
    repaint: Option<egui::Context>,
}

impl TaskManager {
    pub fn new(client: GakuClient) -> Result<Self, GakuError> {
        let runtime = Arc::new(Runtime::new()?);

        let (sender, receiver) = mpsc::channel();

        Ok(Self { runtime, receiver, sender, client, repaint: None })
    }

    /// Wakes the UI whenever a result lands.
    pub fn with_repaint(mut self, ctx: egui::Context) -> Self {
        self.repaint = Some(ctx);
        self
    }

    pub fn client(&self) -> &GakuClient {
        &self.client
    }

    pub fn poll_results(&mut self) -> Vec<TaskResult> {
        let mut results = Vec::new();

        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }

        results
    }

    fn task_context(&self) -> (mpsc::Sender<TaskResult>, Arc<Runtime>, GakuClient) {
        (self.sender.clone(), self.runtime.clone(), self.client.clone())
    }

    /// Runs `call` on a background thread and sends the reply tagged with `route`.
    pub fn dispatch(&self, route: Route, call: ApiCall) {
        let (sender, runtime, client) = self.task_context();
        let repaint = self.repaint.clone();

        thread::spawn(move || {
            let reply = runtime.block_on(run_call(&client, call));
            if let Err(e) = sender.send(TaskResult::Api { route, reply }) {
                tracing::debug!("dropping reply, receiver gone: {e}");
            }
            if let Some(ctx) = repaint {
                ctx.request_repaint();
            }
        });
    }

    /// Polls `/test/session_active` now and then every `period` until cancelled.
    pub fn spawn_session_poll(&self, period: Duration) -> TaskHandle {
        let (sender, runtime, client) = self.task_context();
        let repaint = self.repaint.clone();
        let cancel_token = Arc::new(AtomicBool::new(false));
        let token = cancel_token.clone();

        let join_handle = thread::spawn(move || {
            runtime.block_on(async move {
                loop {
                    let result = client.session_active().await.map_err(|e| e.to_string());
                    if token.load(Ordering::Relaxed) {
                        break;
                    }
                    tracing::debug!(?result, "periodic test session status update");
                    if sender.send(TaskResult::SessionPoll(result)).is_err() {
                        break;
                    }
                    if let Some(ctx) = &repaint {
                        ctx.request_repaint();
                    }
                    if !sleep_unless_cancelled(period, &token).await {
                        break;
                    }
                }
            });
            tracing::debug!("session poll stopped");
        });

        TaskHandle::new(cancel_token, join_handle)
    }
}

/// Sleeps for `period`, waking early to observe cancellation. Returns `false` if cancelled.
async fn sleep_unless_cancelled(period: Duration, token: &AtomicBool) -> bool {
    let mut remaining = period;
    while !remaining.is_zero() {
        if token.load(Ordering::Relaxed) {
            return false;
        }
        let step = remaining.min(CANCEL_CHECK);
        tokio::time::sleep(step).await;
        remaining -= step;
    }
    !token.load(Ordering::Relaxed)
}

async fn count_all(client: &GakuClient, filter: &CardFilter) -> Result<CardCounts, GakuError> {
    let replies = join_all(TestKind::ALL.iter().map(|kind| client.count_cards(*kind, filter))).await;

    let mut counts = CardCounts::default();
    for (kind, reply) in TestKind::ALL.iter().zip(replies) {
        let count = reply?;
        match kind {
            TestKind::AnyState => counts.any_state = count,
            TestKind::New => counts.new = count,
            TestKind::Studied => counts.studied = count,
            TestKind::Due => counts.due = count,
        }
    }
    Ok(counts)
}

fn stringify<T>(result: Result<T, GakuError>) -> Result<T, String> {
    result.map_err(|e| e.to_string())
}

async fn run_call(client: &GakuClient, call: ApiCall) -> ApiReply {
    let mutation = |mutation: Mutation, result| ApiReply::Mutation { mutation, result: stringify(result) };

    match call {
        ApiCall::GetCards => ApiReply::Cards(stringify(client.get_cards().await)),
        ApiCall::AddCard(card) => mutation(Mutation::AddCard, client.add_card(&card).await),
        ApiCall::UpdateCard(card) => mutation(Mutation::UpdateCard, client.update_card(&card).await),
        ApiCall::DeleteCard(card) => mutation(Mutation::DeleteCard, client.delete_card(&card).await),
        ApiCall::SearchCards(filter) => {
            ApiReply::SearchResults(stringify(client.get_cards_by_text(&filter).await))
        }

        ApiCall::GetSources => ApiReply::Sources(stringify(client.get_sources().await)),
        ApiCall::AddSource(source) => mutation(Mutation::AddSource, client.add_source(&source).await),
        ApiCall::UpdateSource(source) => {
            mutation(Mutation::UpdateSource, client.update_source(&source).await)
        }
        ApiCall::DeleteSource(source) => {
            mutation(Mutation::DeleteSource, client.delete_source(&source).await)
        }
        ApiCall::LinkSource { card_id, source_id } => {
            mutation(Mutation::LinkSource, client.add_card_source_link(&card_id, &source_id).await)
        }
        ApiCall::UnlinkSource { card_id, source_id } => mutation(
            Mutation::UnlinkSource,
            client.delete_card_source_link(&card_id, &source_id).await,
        ),
        ApiCall::UnlinkAllSources { card_id } => {
            mutation(Mutation::UnlinkAllSources, client.delete_all_card_source_links(&card_id).await)
        }

        ApiCall::StartTest { kind, request } => {
            mutation(Mutation::StartTest, client.start_test(kind, &request).await)
        }
        ApiCall::StartRecentMistakes { request, time_since } => mutation(
            Mutation::StartTest,
            client.start_test_recent_mistakes(&request, time_since).await,
        ),
        ApiCall::CountCards { generation, filter } => {
            ApiReply::Counts { generation, result: stringify(count_all(client, &filter).await) }
        }
        ApiCall::CountDue(filter) => {
            ApiReply::DueCount(stringify(client.count_cards(TestKind::Due, &filter).await))
        }
        ApiCall::CountMistakesSince { generation, filter, time_since } => ApiReply::MistakesSince {
            generation,
            result: stringify(client.num_recent_mistakes_since(&filter, time_since).await),
        },
        ApiCall::DueStats { generation } => {
            ApiReply::DueStats { generation, result: stringify(client.num_due_stats().await) }
        }
        ApiCall::MistakeStats { generation } => ApiReply::MistakeStats {
            generation,
            result: stringify(client.num_recent_mistakes_stats().await),
        },

        ApiCall::NextCard => ApiReply::NextCard(stringify(client.next_card().await)),
        ApiCall::CheckAnswer(answer) => ApiReply::Checked(stringify(client.check_answer(&answer).await)),
        ApiCall::MarkCorrect(answer) => {
            mutation(Mutation::MarkCorrect, client.mark_correct(&answer).await)
        }
        ApiCall::MarkMistake(answer) => {
            mutation(Mutation::MarkMistake, client.mark_mistake(&answer).await)
        }
        ApiCall::TestStatus => ApiReply::TestStatus(stringify(client.test_status().await)),
        ApiCall::TestResults => ApiReply::TestResults(stringify(client.test_results().await)),
        ApiCall::SessionActive => ApiReply::SessionActive(stringify(client.session_active().await)),
        ApiCall::IsPractice => ApiReply::IsPractice(stringify(client.is_practice().await)),
        ApiCall::PracticeFailed => {
            mutation(Mutation::PracticeFailed, client.practice_failed_cards().await)
        }
        ApiCall::PracticeAll => mutation(Mutation::PracticeAll, client.practice_all_cards().await),

        ApiCall::GenerateImport(vocab) => {
            ApiReply::Generated(stringify(client.generate_vocab_import(&vocab).await))
        }
        ApiCall::ImportCards { cards, sources } => {
            mutation(Mutation::ImportCards, client.import_cards(&cards, &sources).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    fn offline_manager() -> TaskManager {
        let client = GakuClient::new("http://127.0.0.1:9/api", Some(Duration::from_secs(2))).unwrap();
        TaskManager::new(client).unwrap()
    }

    fn wait_for_result(manager: &mut TaskManager) -> TaskResult {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = manager.poll_results().into_iter().next() {
                return result;
            }
            assert!(Instant::now() < deadline, "no task result before deadline");
            thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn failed_call_is_routed_back_as_error() {
        let mut manager = offline_manager();
        manager.dispatch(Route::Sources, ApiCall::GetSources);

        match wait_for_result(&mut manager) {
            TaskResult::Api { route, reply: ApiReply::Sources(Err(_)) } => {
                assert_eq!(route, Route::Sources)
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn counts_keep_generation_on_failure() {
        let mut manager = offline_manager();
        manager.dispatch(
            Route::SelectTest,
            ApiCall::CountCards { generation: 7, filter: Default::default() },
        );

        let result = wait_for_result(&mut manager);
        assert_eq!(result.task_type(), "counts");
        assert!(matches!(
            result,
            TaskResult::Api { reply: ApiReply::Counts { generation: 7, result: Err(_) }, .. }
        ));
    }

    #[test]
    fn due_count_is_routed_to_the_editor() {
        let mut manager = offline_manager();
        manager.dispatch(Route::Cards, ApiCall::CountDue(CardFilter::default()));

        let result = wait_for_result(&mut manager);
        assert_eq!(result.task_type(), "due_count");
        assert!(matches!(
            result,
            TaskResult::Api { route: Route::Cards, reply: ApiReply::DueCount(Err(_)) }
        ));
    }

    #[test]
    fn session_poll_reports_then_cancels() {
        let mut manager = offline_manager();
        let handle = manager.spawn_session_poll(Duration::from_secs(60));

        assert!(matches!(wait_for_result(&mut manager), TaskResult::SessionPoll(Err(_))));

        handle.cancel();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !handle.is_finished() {
            assert!(Instant::now() < deadline, "poll did not stop after cancel");
            thread::sleep(Duration::from_millis(20));
        }
    }

    #[test]
    fn card_counts_lookup_by_kind() {
        let counts = CardCounts { any_state: 9, new: 3, studied: 6, due: 2 };
        assert_eq!(counts.get(TestKind::Due), 2);
        assert_eq!(counts.get(TestKind::AnyState), 9);
    }
}
