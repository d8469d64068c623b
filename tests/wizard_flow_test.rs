use std::sync::{Arc, Mutex};

use flowcraft::cli::{Console, run_wizard};
use flowcraft::config::ServiceConfig;
use flowcraft::error::WizardError;
use flowcraft::history::HistoryViewer;
use flowcraft::service::create_service;
use flowcraft::wizard::{Completion, Progress, WizardController, WizardObserver, WizardPhase};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingObserver {
    completions: Mutex<Vec<Completion>>,
    errors: Mutex<Vec<String>>,
}

impl WizardObserver for RecordingObserver {
    fn on_complete(&self, completion: &Completion) {
        self.completions.lock().unwrap().push(completion.clone());
    }

    fn on_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

async fn mount_todo_app_session(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/start-session/"))
        .and(body_json(json!({"idea": "build a todo app"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s1",
            "question": "Who is the target user?"
        })))
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/answer-question/"))
        .and(body_json(json!({"session_id": "s1", "answer": "developers"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"question": "What platforms?"})),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/answer-question/"))
        .and(body_json(json!({"session_id": "s1", "answer": "web and mobile"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(server)
        .await;
}

fn wizard_for(server: &MockServer) -> (WizardController, Arc<RecordingObserver>) {
    let service = create_service(&ServiceConfig::new(&server.uri(), 5).unwrap()).unwrap();
    let observer = Arc::new(RecordingObserver::default());
    (WizardController::new(service, observer.clone()), observer)
}

fn todo_app_completion() -> Completion {
    Completion {
        idea: "build a todo app".to_string(),
        answers: vec!["developers".to_string(), "web and mobile".to_string()],
    }
}

#[tokio::test]
async fn test_todo_app_scenario_over_http() {
    let server = MockServer::start().await;
    mount_todo_app_session(&server).await;
    let (wizard, observer) = wizard_for(&server);

    assert_eq!(
        wizard.start("build a todo app").await.unwrap(),
        "Who is the target user?"
    );
    assert_eq!(
        wizard.submit_answer("developers".to_string()).await.unwrap(),
        Progress::Next("What platforms?".to_string())
    );
    assert_eq!(
        wizard.submit_answer("web and mobile".to_string()).await.unwrap(),
        Progress::Completed(todo_app_completion())
    );

    assert_eq!(*observer.completions.lock().unwrap(), vec![todo_app_completion()]);
    assert!(observer.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_empty_answer_never_reaches_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-session/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s1",
            "question": "Q?"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/answer-question/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let (wizard, observer) = wizard_for(&server);
    wizard.start("idea").await.unwrap();

    assert!(matches!(
        wizard.submit_answer("   ".to_string()).await,
        Err(WizardError::EmptyAnswer)
    ));
    assert!(observer.errors.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_failure_then_recovery_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-session/"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/start-session/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s2",
            "question": "Q?"
        })))
        .mount(&server)
        .await;

    let (wizard, observer) = wizard_for(&server);

    assert!(wizard.start("idea").await.is_err());
    assert_eq!(wizard.phase(), WizardPhase::Unstarted);
    assert_eq!(observer.errors.lock().unwrap().len(), 1);

    assert_eq!(wizard.start("idea").await.unwrap(), "Q?");
    assert_eq!(wizard.session_id().as_deref(), Some("s2"));
}

#[tokio::test]
async fn test_console_wizard_rejects_blank_answer_and_completes() {
    let server = MockServer::start().await;
    mount_todo_app_session(&server).await;
    let (wizard, observer) = wizard_for(&server);

    let input: &[u8] = b"build a todo app\ndevelopers\n\nweb and mobile\n";
    let mut console = Console::new(input, Vec::new());

    let completion = run_wizard(&wizard, &mut console, None).await.unwrap();
    assert_eq!(completion, todo_app_completion());
    assert_eq!(observer.completions.lock().unwrap().len(), 1);

    let output = String::from_utf8(console.into_writer()).unwrap();
    assert!(output.starts_with("Enter your idea: "));
    assert!(output.contains("Who is the target user?\n> "));
    assert!(output.contains("Please provide an answer before proceeding."));
    // 空の回答の後も同じ質問が再表示される
    assert_eq!(output.matches("What platforms?").count(), 2);
}

#[tokio::test]
async fn test_console_wizard_reports_submit_failure_and_reasks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/start-session/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "s1",
            "question": "Q?"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/answer-question/"))
        .and(body_json(json!({"session_id": "s1", "answer": "first try"})))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/answer-question/"))
        .and(body_json(json!({"session_id": "s1", "answer": "second try"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let (wizard, observer) = wizard_for(&server);
    let input: &[u8] = b"first try\nsecond try\n";
    let mut console = Console::new(input, Vec::new());

    let completion = run_wizard(&wizard, &mut console, Some("idea".to_string()))
        .await
        .unwrap();
    assert_eq!(completion.answers, vec!["second try".to_string()]);
    assert_eq!(observer.errors.lock().unwrap().len(), 1);

    let output = String::from_utf8(console.into_writer()).unwrap();
    assert!(output.contains("Error: API error: 503 Service Unavailable"));
    assert_eq!(output.matches("Q?").count(), 2);
}

#[tokio::test]
async fn test_console_wizard_input_closed() {
    let server = MockServer::start().await;
    let (wizard, _observer) = wizard_for(&server);

    let input: &[u8] = b"";
    let mut console = Console::new(input, Vec::new());

    let result = run_wizard(&wizard, &mut console, None).await;
    assert!(matches!(result, Err(flowcraft::error::CliError::InputClosed)));
}

#[tokio::test]
async fn test_history_viewer_empty_list_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-workflows/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"workflows": []})))
        .expect(1)
        .mount(&server)
        .await;

    let service = create_service(&ServiceConfig::new(&server.uri(), 5).unwrap()).unwrap();
    let mut viewer = HistoryViewer::new(service);

    assert!(viewer.load().await.is_empty());
    assert!(viewer.last_error().is_none());
    assert!(viewer.render().contains("(no saved workflows)"));
}

#[tokio::test]
async fn test_history_viewer_failure_is_not_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get-workflows/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let service = create_service(&ServiceConfig::new(&server.uri(), 5).unwrap()).unwrap();
    let mut viewer = HistoryViewer::new(service);

    assert!(viewer.load().await.is_empty());
    assert!(viewer.last_error().is_some());
}
