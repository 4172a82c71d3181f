pub use super::handle::TaskHandle;
use crate::{
    api::{
        AnswerResult,
        CardFilter,
        CardSource,
        DayHistogram,
        GeneratedImports,
        NextCardMessage,
        StartTestRequest,
        StatusResponse,
        TestKind,
        TestResults,
        TestStatusMessage,
    },
    cards::{
        Card,
        TestAnswer,
    },
    core::Route,
};

/// Backend request a page wants issued. Executed off the UI thread.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetCards,
    AddCard(Card),
    UpdateCard(Card),
    DeleteCard(Card),
    SearchCards(CardFilter),

    GetSources,
    AddSource(CardSource),
    UpdateSource(CardSource),
    DeleteSource(CardSource),
    LinkSource { card_id: String, source_id: String },
    UnlinkSource { card_id: String, source_id: String },
    UnlinkAllSources { card_id: String },

    StartTest { kind: TestKind, request: StartTestRequest },
    StartRecentMistakes { request: StartTestRequest, time_since: u64 },
    CountCards { generation: u64, filter: CardFilter },
    CountDue(CardFilter),
    CountMistakesSince { generation: u64, filter: CardFilter, time_since: u64 },
    DueStats { generation: u64 },
    MistakeStats { generation: u64 },

    NextCard,
    CheckAnswer(TestAnswer),
    MarkCorrect(TestAnswer),
    MarkMistake(TestAnswer),
    TestStatus,
    TestResults,
    SessionActive,
    IsPractice,
    PracticeFailed,
    PracticeAll,

    GenerateImport(String),
    ImportCards { cards: GeneratedImports, sources: Vec<CardSource> },
}

/// Which mutation a `StatusResponse` answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    AddCard,
    UpdateCard,
    DeleteCard,
    AddSource,
    UpdateSource,
    DeleteSource,
    LinkSource,
    UnlinkSource,
    UnlinkAllSources,
    StartTest,
    MarkCorrect,
    MarkMistake,
    PracticeFailed,
    PracticeAll,
    ImportCards,
}

/// Per-kind card counts fetched together for the select-test page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CardCounts {
    pub any_state: u64,
    pub new: u64,
    pub studied: u64,
    pub due: u64,
}

impl CardCounts {
    pub fn get(&self, kind: TestKind) -> u64 {
        match kind {
            TestKind::AnyState => self.any_state,
            TestKind::New => self.new,
            TestKind::Studied => self.studied,
            TestKind::Due => self.due,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Cards(Result<Vec<Card>, String>),
    SearchResults(Result<Vec<Card>, String>),
    Sources(Result<Vec<CardSource>, String>),
    Mutation { mutation: Mutation, result: Result<StatusResponse, String> },

    Counts { generation: u64, result: Result<CardCounts, String> },
    DueCount(Result<u64, String>),
    MistakesSince { generation: u64, result: Result<u64, String> },
    DueStats { generation: u64, result: Result<DayHistogram, String> },
    MistakeStats { generation: u64, result: Result<DayHistogram, String> },

    NextCard(Result<NextCardMessage, String>),
    Checked(Result<AnswerResult, String>),
    TestStatus(Result<TestStatusMessage, String>),
    TestResults(Result<TestResults, String>),
    SessionActive(Result<bool, String>),
    IsPractice(Result<bool, String>),

    Generated(Result<GeneratedImports, String>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TaskResult {
    /// Reply to a call issued by the page at `route`.
    Api { route: Route, reply: ApiReply },
    /// Tick of the background session-active poll.
    SessionPoll(Result<bool, String>),
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::Api { reply, .. } => match reply {
                ApiReply::Cards(_) => "cards",
                ApiReply::SearchResults(_) => "search_results",
                ApiReply::Sources(_) => "sources",
                ApiReply::Mutation { .. } => "mutation",
                ApiReply::Counts { .. } => "counts",
                ApiReply::DueCount(_) => "due_count",
                ApiReply::MistakesSince { .. } => "mistakes_since",
                ApiReply::DueStats { .. } => "due_stats",
                ApiReply::MistakeStats { .. } => "mistake_stats",
                ApiReply::NextCard(_) => "next_card",
                ApiReply::Checked(_) => "check_answer",
                ApiReply::TestStatus(_) => "test_status",
                ApiReply::TestResults(_) => "test_results",
                ApiReply::SessionActive(_) => "session_active",
                ApiReply::IsPractice(_) => "is_practice",
                ApiReply::Generated(_) => "generated_import",
            },
            TaskResult::SessionPoll(_) => "session_poll",
        }
    }
}
