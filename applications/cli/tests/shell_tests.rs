//! End-to-end shell tests against a mock notes backend.

use jotter_cli::{Command, Flow, Prompt, Shell};
use jotter_client::{ClientConfig, JotterClient};
use jotter_core::{GuardState, NoteId};
use std::collections::VecDeque;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Answers prompts from a fixed script
struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&mut self, _prompt: &str) -> Option<String> {
        self.answers.pop_front()
    }
}

fn mock_note(id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "_id": id,
        "title": title,
        "content": format!("{} content", title),
        "createdAt": "2024-01-01T00:00:00.000Z",
        "updatedAt": "2024-01-01T00:00:00.000Z"
    })
}

fn mock_user() -> serde_json::Value {
    serde_json::json!({"id": "1", "name": "A", "dob": "2000-01-01", "email": "a@x.com"})
}

async fn shell(mock_server: &MockServer, answers: &[&str]) -> Shell<ScriptedPrompt, Vec<u8>> {
    let client = JotterClient::new(ClientConfig::new(mock_server.uri())).unwrap();
    Shell::new(client, ScriptedPrompt::new(answers), Vec::new())
}

fn output(shell: Shell<ScriptedPrompt, Vec<u8>>) -> String {
    String::from_utf8(shell.into_output()).unwrap()
}

async fn mount_signed_out(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(mock_server)
        .await;
}

async fn mount_signed_in(mock_server: &MockServer, notes: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": mock_user() })))
        .mount(mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "notes": notes })))
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_signed_out_start_guards_notes() {
    let mock_server = MockServer::start().await;
    mount_signed_out(&mock_server).await;

    let mut shell = shell(&mock_server, &[]).await;
    shell.start().await.unwrap();
    shell.handle(Command::Notes).await.unwrap();
    shell.handle(Command::New).await.unwrap();

    assert_eq!(shell.client().session().guard(), GuardState::Unauthorized);
    let out = output(shell);
    assert!(out.contains("Sign in with `signin`"));
    assert_eq!(out.matches("Access Denied").count(), 2);
}

#[tokio::test]
async fn test_restored_session_lists_notes() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server, serde_json::json!([mock_note("n1", "First")])).await;

    let mut shell = shell(&mock_server, &[]).await;
    shell.start().await.unwrap();

    assert_eq!(shell.notes().len(), 1);
    let out = output(shell);
    assert!(out.contains("Welcome back, A!"));
    assert!(out.contains("[n1] First (Jan 1, 2024)"));
}

#[tokio::test]
async fn test_signin_verify_and_create() {
    let mock_server = MockServer::start().await;
    mount_signed_out(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .and(body_json(serde_json::json!({"email": "a@x.com"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-otp"))
        .and(body_json(serde_json::json!({"email": "a@x.com", "otp": "123456"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": mock_user() })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "notes": [mock_note("n1", "Old")] })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .and(body_json(serde_json::json!({"title": "New", "content": "Body"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({ "note": mock_note("n2", "New") })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut shell = shell(&mock_server, &["New", "Body"]).await;
    shell.start().await.unwrap();
    shell
        .handle(Command::Signin {
            email: Some("a@x.com".into()),
        })
        .await
        .unwrap();
    shell
        .handle(Command::Verify {
            code: "123456".into(),
        })
        .await
        .unwrap();
    shell.handle(Command::New).await.unwrap();

    let ids: Vec<_> = shell.notes().iter().map(|n| n.id.as_str().to_string()).collect();
    assert_eq!(ids, vec!["n2", "n1"]);

    let out = output(shell);
    assert!(out.contains("A code was sent to a@x.com"));
    assert!(out.contains("Welcome, A!"));
    assert!(out.contains("Created [n2] New"));
}

#[tokio::test]
async fn test_resend_respects_cooldown() {
    let mock_server = MockServer::start().await;
    mount_signed_out(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/auth/signin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut shell = shell(&mock_server, &["a@x.com"]).await;
    shell.start().await.unwrap();
    shell.handle(Command::Signin { email: None }).await.unwrap();
    shell.handle(Command::Resend).await.unwrap();

    assert!(output(shell).contains("Resend OTP in 1:00"));
}

#[tokio::test]
async fn test_wrong_code_is_shown_inline() {
    let mock_server = MockServer::start().await;
    mount_signed_out(&mock_server).await;

    Mock::given(method("POST"))
        .and(path("/auth/signup"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/verify-otp"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({"message": "Invalid OTP"})))
        .mount(&mock_server)
        .await;

    let mut shell = shell(&mock_server, &["Ada", "2000-01-01", "a@x.com"]).await;
    shell.start().await.unwrap();
    shell.handle(Command::Signup).await.unwrap();
    shell
        .handle(Command::Verify {
            code: "000000".into(),
        })
        .await
        .unwrap();

    assert_eq!(shell.client().session().guard(), GuardState::Unauthorized);
    assert!(output(shell).contains("Invalid OTP"));
}

#[tokio::test]
async fn test_expired_session_returns_to_signin() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server, serde_json::json!([mock_note("n1", "First")])).await;

    Mock::given(method("DELETE"))
        .and(path("/notes/n1"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut shell = shell(&mock_server, &[]).await;
    shell.start().await.unwrap();
    shell.handle(Command::Rm { id: "n1".into() }).await.unwrap();

    assert_eq!(shell.client().session().guard(), GuardState::Unauthorized);
    assert!(shell.notes().get(&NoteId::new("n1")).is_none());
    assert!(output(shell).contains("Your session has expired"));
}

#[tokio::test]
async fn test_expiry_during_startup_guards_next_command() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "user": mock_user() })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/notes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut shell = shell(&mock_server, &["Title", "Body"]).await;
    shell.start().await.unwrap();
    assert_eq!(shell.client().session().guard(), GuardState::Unauthorized);

    shell.handle(Command::New).await.unwrap();

    let out = output(shell);
    assert_eq!(out.matches("Your session has expired").count(), 1);
    assert!(out.contains("Access Denied"));
}

#[tokio::test]
async fn test_logout_and_quit() {
    let mock_server = MockServer::start().await;
    mount_signed_in(&mock_server, serde_json::json!([])).await;

    Mock::given(method("POST"))
        .and(path("/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut shell = shell(&mock_server, &[]).await;
    shell.start().await.unwrap();
    assert_eq!(shell.handle(Command::Logout).await.unwrap(), Flow::Continue);
    assert_eq!(shell.handle(Command::Quit).await.unwrap(), Flow::Quit);

    assert!(shell.client().session().user().is_none());
    assert!(output(shell).contains("Signed out."));
}

#[tokio::test]
async fn test_run_reads_commands_until_quit() {
    let mock_server = MockServer::start().await;
    mount_signed_out(&mock_server).await;

    let mut shell = shell(&mock_server, &["", "help", "bogus", "quit", "me"]).await;
    shell.run().await.unwrap();

    let out = output(shell);
    assert!(out.contains("verify <code>"));
    assert!(!out.contains("Not signed in."));
}
