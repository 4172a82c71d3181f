pub mod types;

use std::time::Duration;

use reqwest::Client;
use serde::{
    de::DeserializeOwned,
    Serialize,
};
use serde_json::json;
pub use types::*;

use crate::{
    cards::{
        Card,
        TestAnswer,
    },
    core::{
        http::{
            ensure_success,
            http_client,
            join_url,
        },
        GakuError,
    },
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Thin wrapper over the Gaku backend REST API. No retries, no caching.
#[derive(Clone, Debug)]
pub struct GakuClient {
    client: Client,
    base_url: String,
}

impl GakuClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, GakuError> {
        Ok(Self { client: http_client(timeout)?, base_url: base_url.into() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, endpoint: &str) -> String {
        join_url(&self.base_url, endpoint)
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GakuError> {
        tracing::debug!(endpoint, "GET");
        let resp = self.client.get(self.url(endpoint)).send().await?;
        ensure_success(&resp, endpoint)?;
        Ok(resp.json().await?)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, GakuError> {
        tracing::debug!(endpoint, "POST");
        let resp = self.client.post(self.url(endpoint)).json(body).send().await?;
        ensure_success(&resp, endpoint)?;
        Ok(resp.json().await?)
    }

    async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, GakuError> {
        tracing::debug!(endpoint, "POST");
        let resp = self.client.post(self.url(endpoint)).send().await?;
        ensure_success(&resp, endpoint)?;
        Ok(resp.json().await?)
    }

    // cards

    pub async fn get_cards(&self) -> Result<Vec<Card>, GakuError> {
        self.get_json("cards").await
    }

    pub async fn add_card(&self, card: &Card) -> Result<StatusResponse, GakuError> {
        self.post_json("cards/add", card).await
    }

    pub async fn update_card(&self, card: &Card) -> Result<StatusResponse, GakuError> {
        self.post_json("cards/update", card).await
    }

    pub async fn delete_card(&self, card: &Card) -> Result<StatusResponse, GakuError> {
        self.post_json("cards/delete", card).await
    }

    pub async fn get_cards_by_text(&self, filter: &CardFilter) -> Result<Vec<Card>, GakuError> {
        self.post_json("cards/get_by_text", filter).await
    }

    // sources

    pub async fn get_sources(&self) -> Result<Vec<CardSource>, GakuError> {
        self.get_json("sources").await
    }

    pub async fn add_source(&self, source: &CardSource) -> Result<StatusResponse, GakuError> {
        self.post_json("sources/add", source).await
    }

    pub async fn update_source(&self, source: &CardSource) -> Result<StatusResponse, GakuError> {
        self.post_json("sources/update", source).await
    }

    pub async fn delete_source(&self, source: &CardSource) -> Result<StatusResponse, GakuError> {
        self.post_json("sources/delete", source).await
    }

    pub async fn add_card_source_link(
        &self,
        card_id: &str,
        source_id: &str,
    ) -> Result<StatusResponse, GakuError> {
        self.post_json("cards/add_source_link", &json!({ "card_id": card_id, "source_id": source_id }))
            .await
    }

    pub async fn delete_card_source_link(
        &self,
        card_id: &str,
        source_id: &str,
    ) -> Result<StatusResponse, GakuError> {
        self.post_json(
            "cards/delete_source_link",
            &json!({ "card_id": card_id, "source_id": source_id }),
        )
        .await
    }

    pub async fn delete_all_card_source_links(
        &self,
        card_id: &str,
    ) -> Result<StatusResponse, GakuError> {
        self.post_json("cards/delete_all_source_links", &json!({ "card_id": card_id })).await
    }

    // test session

    pub async fn start_test(
        &self,
        kind: TestKind,
        request: &StartTestRequest,
    ) -> Result<StatusResponse, GakuError> {
        self.post_json(kind.start_endpoint(), request).await
    }

    pub async fn count_cards(&self, kind: TestKind, filter: &CardFilter) -> Result<u64, GakuError> {
        self.post_json(kind.count_endpoint(), filter).await
    }

    pub async fn start_test_recent_mistakes(
        &self,
        request: &StartTestRequest,
        time_since: u64,
    ) -> Result<StatusResponse, GakuError> {
        self.post_json(
            "test/start_recent_mistakes",
            &json!({ "start_request": request, "time_since": time_since }),
        )
        .await
    }

    pub async fn num_recent_mistakes_since(
        &self,
        filter: &CardFilter,
        time_since: u64,
    ) -> Result<u64, GakuError> {
        self.post_json(
            "test/num_recent_mistakes_since",
            &json!({ "filter": filter, "time_since": time_since }),
        )
        .await
    }

    pub async fn next_card(&self) -> Result<NextCardMessage, GakuError> {
        self.get_json("test/next").await
    }

    pub async fn check_answer(&self, answer: &TestAnswer) -> Result<AnswerResult, GakuError> {
        self.post_json("test/check_answer", &json!({ "answer": answer })).await
    }

    pub async fn mark_correct(&self, answer: &TestAnswer) -> Result<StatusResponse, GakuError> {
        self.post_json("test/mark_correct", &json!({ "answer": answer })).await
    }

    pub async fn mark_mistake(&self, answer: &TestAnswer) -> Result<StatusResponse, GakuError> {
        self.post_json("test/mark_mistake", &json!({ "answer": answer })).await
    }

    pub async fn test_results(&self) -> Result<TestResults, GakuError> {
        self.get_json("test/results").await
    }

    pub async fn test_status(&self) -> Result<TestStatusMessage, GakuError> {
        self.get_json("test/status").await
    }

    pub async fn session_active(&self) -> Result<bool, GakuError> {
        let message: SessionActiveMessage = self.get_json("test/session_active").await?;
        Ok(message.session_active)
    }

    pub async fn is_practice(&self) -> Result<bool, GakuError> {
        self.get_json("test/is_practice").await
    }

    pub async fn practice_failed_cards(&self) -> Result<StatusResponse, GakuError> {
        self.post_empty("test/practice_failed_cards").await
    }

    pub async fn practice_all_cards(&self) -> Result<StatusResponse, GakuError> {
        self.post_empty("test/practice_all_cards").await
    }

    // import

    pub async fn generate_vocab_import(&self, vocab: &str) -> Result<GeneratedImports, GakuError> {
        self.post_json("vocab/generate_vocab_import", &json!({ "vocab": vocab })).await
    }

    pub async fn import_cards(
        &self,
        cards: &GeneratedImports,
        sources: &[CardSource],
    ) -> Result<StatusResponse, GakuError> {
        self.post_json("vocab/import_cards", &json!({ "cards": cards, "sources": sources })).await
    }

    // stats

    pub async fn num_due_stats(&self) -> Result<DayHistogram, GakuError> {
        self.get_json("stats/num_due").await
    }

    pub async fn num_recent_mistakes_stats(&self) -> Result<DayHistogram, GakuError> {
        self.get_json("stats/num_recent_mistakes").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_base() {
        let client = GakuClient::new(DEFAULT_API_URL, None).unwrap();
        assert_eq!(client.url("cards/add"), "http://localhost:8000/api/cards/add");
        assert_eq!(client.url(TestKind::Due.start_endpoint()), "http://localhost:8000/api/test/start_due");
        assert_eq!(
            client.url(TestKind::AnyState.count_endpoint()),
            "http://localhost:8000/api/test/num_any_state"
        );
    }

    #[tokio::test]
    async fn unreachable_backend_is_an_error() {
        let client = GakuClient::new("http://127.0.0.1:9", Some(Duration::from_secs(2))).unwrap();
        let result = client.get_cards().await;
        assert!(matches!(result, Err(GakuError::Reqwest(_))));
    }
}
