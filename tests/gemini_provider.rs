//! Integration tests for the Gemini provider and the report lifecycle.
//!
//! Each test spins up an Axum server on a random port that stands in for
//! the `generateContent` endpoint, then drives the real reqwest provider
//! through `ReportService`.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use colorheart::catalog::AgeGroup;
use colorheart::color::BaseColor;
use colorheart::diagnosis::{Answer, AnswerMap};
use colorheart::llm::{GeminiProvider, LlmProvider};
use colorheart::report::{ReportRequest, ReportService, ReportState, SYSTEM_INSTRUCTION};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

const API_KEY: &str = "test-key";
const MODEL: &str = "gemini-test";

/// How the stub endpoint answers.
#[derive(Clone)]
enum Reply {
    Text(String),
    Status(StatusCode),
    Delay(Duration),
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    seen: Arc<Mutex<Vec<(String, Value)>>>,
}

async fn generate_content(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    state.seen.lock().unwrap().push((key, body));

    let text = match &state.reply {
        Reply::Text(text) => text.clone(),
        Reply::Status(status) => {
            return (*status, Json(json!({ "error": { "message": "stub" } })));
        }
        Reply::Delay(delay) => {
            tokio::time::sleep(*delay).await;
            String::new()
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 480 },
            "responseId": "resp-1"
        })),
    )
}

/// Start the stub endpoint, return (base url, recorded requests).
async fn start_server(reply: Reply) -> (String, Arc<Mutex<Vec<(String, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        reply,
        seen: Arc::clone(&seen),
    };
    let app = Router::new()
        .route("/v1beta/models/{action}", post(generate_content))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    (format!("http://127.0.0.1:{port}/v1beta"), seen)
}

fn service(base_url: &str, wait: Duration) -> ReportService {
    let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::new(
        API_KEY.to_string().into(),
        base_url,
        MODEL,
    ));
    ReportService::new(llm, wait)
}

fn request() -> ReportRequest {
    let mut answers = AnswerMap::new();
    answers.insert("mr_s1_p", Answer::Color(BaseColor::Green));
    ReportRequest {
        generation: 1,
        name: "하린".to_string(),
        age_group: AgeGroup::MindReset,
        color: BaseColor::Green,
        answers,
    }
}

fn report_json() -> Value {
    json!({
        "persona": "따뜻한 조율가",
        "keyword": "공감, 균형, 회복",
        "summary": "당신은 **공감 능력**이 뛰어납니다.",
        "chartData": [
            {"subject": "공감", "value": 92, "fullMark": 100},
            {"subject": "논리", "value": 70, "fullMark": 100},
            {"subject": "실행", "value": 65, "fullMark": 100},
            {"subject": "창의", "value": 78, "fullMark": 100},
            {"subject": "회복", "value": 58, "fullMark": 100}
        ],
        "careerFactorInterpretation": "사람 중심 역량이 강합니다.",
        "energyBalance": {
            "theoryScore": 75,
            "psychEnergy": 55,
            "status": "회복 필요",
            "interpretation": "휴식이 필요한 시기입니다."
        },
        "swot": {
            "strengths": ["경청", "배려"],
            "weaknesses": ["거절의 어려움", "과로"],
            "opportunities": ["상담 수요", "복지 확대"],
            "threats": ["감정 소진", "경쟁"]
        },
        "actionPlan": {
            "careers": [
                {"title": "상담심리사", "reason": "공감 역량"},
                {"title": "HR 매니저", "reason": "조율 능력"},
                {"title": "코치", "reason": "성장 지원"}
            ],
            "colorTherapy": "파랑",
            "colorTherapyReason": "마음을 진정시킵니다.",
            "scentTherapy": "베르가못",
            "immediateAction": "오늘 10분간 산책하세요."
        }
    })
}

#[tokio::test]
async fn success_sends_schema_and_key() {
    timeout(TEST_TIMEOUT, async {
        let (base_url, seen) = start_server(Reply::Text(report_json().to_string())).await;
        let state = service(&base_url, Duration::from_secs(3)).run(&request()).await;

        match state {
            ReportState::Success(report) => {
                assert_eq!(report.persona, "따뜻한 조율가");
                assert_eq!(report.action_plan.careers.len(), 3);
            }
            other => panic!("expected success, got {other:?}"),
        }

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let (key, body) = &seen[0];
        assert_eq!(key, API_KEY);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"]["type"], "OBJECT");
        let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("이름: 하린"));
        assert!(prompt.contains("답변: 초록"));
        assert_eq!(
            body["systemInstruction"]["parts"][0]["text"],
            SYSTEM_INSTRUCTION
        );
        assert_eq!(body["contents"].as_array().unwrap().len(), 1);
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn fenced_payload_is_accepted() {
    timeout(TEST_TIMEOUT, async {
        let fenced = format!("```json\n{}\n```", report_json());
        let (base_url, _) = start_server(Reply::Text(fenced)).await;
        let state = service(&base_url, Duration::from_secs(3)).run(&request()).await;
        assert_eq!(state.name(), "success");
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn incomplete_payload_is_failure() {
    timeout(TEST_TIMEOUT, async {
        let mut payload = report_json();
        payload.as_object_mut().unwrap().remove("swot");
        let (base_url, _) = start_server(Reply::Text(payload.to_string())).await;
        let state = service(&base_url, Duration::from_secs(3)).run(&request()).await;
        assert!(matches!(state, ReportState::Failure(ref f) if f.kind == "invalid_shape"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn auth_rejection_is_failure() {
    timeout(TEST_TIMEOUT, async {
        let (base_url, _) = start_server(Reply::Status(StatusCode::FORBIDDEN)).await;
        let state = service(&base_url, Duration::from_secs(3)).run(&request()).await;
        assert!(matches!(state, ReportState::Failure(ref f) if f.kind == "provider"));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    timeout(TEST_TIMEOUT, async {
        let (base_url, _) = start_server(Reply::Delay(Duration::from_secs(3))).await;
        let started = std::time::Instant::now();
        let state = service(&base_url, Duration::from_millis(200))
            .run(&request())
            .await;
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(matches!(state, ReportState::Failure(ref f) if f.kind == "timeout"));
    })
    .await
    .expect("test timed out");
}
