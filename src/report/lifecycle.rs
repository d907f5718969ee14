//! Report request lifecycle: one bounded call to the AI collaborator per
//! request, mapped into `Loading` / `Success` / `Failure`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::catalog::AgeGroup;
use crate::color::BaseColor;
use crate::diagnosis::AnswerMap;
use crate::error::ReportError;
use crate::llm::{ChatMessage, CompletionRequest, LlmProvider};

use super::model::{ReportData, parse_report};
use super::prompts::{SYSTEM_INSTRUCTION, report_prompt, report_schema};

/// Default wait ceiling for one request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Everything captured for one report request. Retries reuse the same
/// captured answers under a new generation.
#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Session generation this request belongs to. A completion is only
    /// applied while the session is still on this generation.
    pub generation: u64,
    pub name: String,
    pub age_group: AgeGroup,
    pub color: BaseColor,
    pub answers: AnswerMap,
}

/// Why a request ended in failure, kept for display and logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFailure {
    pub kind: &'static str,
    pub message: String,
}

impl From<&ReportError> for ReportFailure {
    fn from(err: &ReportError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Observable report state. Exactly one holds at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportState {
    Loading,
    Success(Box<ReportData>),
    Failure(ReportFailure),
}

impl ReportState {
    pub fn from_result(result: Result<ReportData, ReportError>) -> Self {
        match result {
            Ok(report) => Self::Success(Box::new(report)),
            Err(e) => Self::Failure(ReportFailure::from(&e)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

/// Issues report requests against an LLM provider with a wait ceiling.
pub struct ReportService {
    llm: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl ReportService {
    pub fn new(llm: Arc<dyn LlmProvider>, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn model_name(&self) -> &str {
        self.llm.model_name()
    }

    /// Run one request. Exceeding the timeout drops the in-flight call and
    /// returns [`ReportError::Timeout`]; no partial result is kept.
    pub async fn generate(&self, request: &ReportRequest) -> Result<ReportData, ReportError> {
        let started = Instant::now();
        info!(
            generation = request.generation,
            age_group = %request.age_group,
            color = %request.color,
            model = self.llm.model_name(),
            "Requesting career report"
        );

        let prompt = report_prompt(
            &request.name,
            request.age_group,
            request.color,
            &request.answers,
        );
        let completion = CompletionRequest::new(vec![
            ChatMessage::system(SYSTEM_INSTRUCTION),
            ChatMessage::user(prompt),
        ])
        .with_response_schema(report_schema());

        let response = tokio::time::timeout(self.timeout, self.llm.complete(completion))
            .await
            .map_err(|_| ReportError::Timeout(self.timeout))??;

        info!(
            generation = request.generation,
            elapsed_ms = started.elapsed().as_millis() as u64,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            "Career report received"
        );

        parse_report(&response.content)
    }

    /// Run one request and convert the outcome into a report state. Nothing
    /// escapes this boundary as an error.
    pub async fn run(&self, request: &ReportRequest) -> ReportState {
        let result = self.generate(request).await;
        if let Err(ref e) = result {
            warn!(generation = request.generation, kind = e.kind(), "Report request failed: {}", e);
        }
        ReportState::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::LlmError;
    use crate::llm::{CompletionResponse, FinishReason, Role};
    use crate::report::model::tests::sample_json;

    enum Behavior {
        Reply(String),
        Fail,
        Hang,
    }

    struct StubLlm {
        behavior: Behavior,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl StubLlm {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        fn model_name(&self) -> &str {
            "stub"
        }

        async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request);
            match &self.behavior {
                Behavior::Reply(content) => Ok(CompletionResponse {
                    content: content.clone(),
                    input_tokens: 10,
                    output_tokens: 20,
                    finish_reason: FinishReason::Stop,
                    response_id: None,
                }),
                Behavior::Fail => Err(LlmError::AuthFailed {
                    provider: "stub".to_string(),
                }),
                Behavior::Hang => {
                    std::future::pending::<()>().await;
                    unreachable!()
                }
            }
        }
    }

    fn request() -> ReportRequest {
        ReportRequest {
            generation: 1,
            name: "지우".to_string(),
            age_group: AgeGroup::DreamTree,
            color: BaseColor::Purple,
            answers: AnswerMap::new(),
        }
    }

    #[tokio::test]
    async fn success_carries_parsed_report() {
        let llm = StubLlm::new(Behavior::Reply(sample_json().to_string()));
        let service = ReportService::new(llm.clone(), Duration::from_secs(5));

        let state = service.run(&request()).await;
        match state {
            ReportState::Success(report) => assert_eq!(report.swot.strengths.len(), 2),
            other => panic!("expected success, got {other:?}"),
        }

        let seen = llm.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].response_schema.is_some());
        let messages = &seen[0].messages;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, SYSTEM_INSTRUCTION);
        assert_eq!(messages[1].role, Role::User);
        assert!(messages[1].content.contains("이름: 지우"));
    }

    #[tokio::test]
    async fn timeout_resolves_to_failure() {
        let service = ReportService::new(StubLlm::new(Behavior::Hang), Duration::from_millis(50));

        let started = Instant::now();
        let state = tokio::time::timeout(Duration::from_secs(2), service.run(&request()))
            .await
            .expect("lifecycle must resolve after the ceiling");

        assert!(started.elapsed() < Duration::from_secs(1));
        match state {
            ReportState::Failure(failure) => assert_eq!(failure.kind, "timeout"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn incomplete_payload_is_failure_not_partial_success() {
        let mut value = sample_json();
        value.as_object_mut().unwrap().remove("actionPlan");
        let service = ReportService::new(
            StubLlm::new(Behavior::Reply(value.to_string())),
            Duration::from_secs(5),
        );
        let state = service.run(&request()).await;
        assert!(matches!(state, ReportState::Failure(ref f) if f.kind == "invalid_shape"));
    }

    #[tokio::test]
    async fn empty_payload_is_failure() {
        let service = ReportService::new(
            StubLlm::new(Behavior::Reply(String::new())),
            Duration::from_secs(5),
        );
        let state = service.run(&request()).await;
        assert!(matches!(state, ReportState::Failure(ref f) if f.kind == "empty_response"));
    }

    #[tokio::test]
    async fn provider_error_is_failure() {
        let service = ReportService::new(StubLlm::new(Behavior::Fail), Duration::from_secs(5));
        let err = service.generate(&request()).await.unwrap_err();
        assert!(matches!(err, ReportError::Provider(LlmError::AuthFailed { .. })));
    }
}
