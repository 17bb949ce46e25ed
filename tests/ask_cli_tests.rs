// Runs the `ask` binary against the local stand-in inference backend.

mod common;

use common::backend::spawn_backend;
use std::process::Output;
use tokio::process::Command;

async fn run_ask(base_url: &str, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ask"))
        .args(args)
        .env_clear()
        .env("INFERENCE_BASE_URL", base_url)
        .env("CHAT_VARIANT", "blenderbot")
        .env("GENERATION_MODEL", "chat")
        .env("SENTIMENT_MODEL", "sst2")
        .env("RUST_LOG", "off")
        .output()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_prompt_reply_goes_to_stdout() {
    let (base_url, backend) = spawn_backend().await;

    let output = run_ask(&base_url, &["hello"]).await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "reply to hello\n");

    // without --sentiment only the generation model is called
    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "chat");
    assert_eq!(seen[0].2["inputs"], "hello");
}

#[tokio::test]
async fn test_sentiment_flag_prints_label_line() {
    let (base_url, _backend) = spawn_backend().await;

    let output = run_ask(&base_url, &["--sentiment", "hello"]).await;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "reply to hello\nNEGATIVE (0.7500)\n"
    );
}

#[tokio::test]
async fn test_generation_flags_reach_backend() {
    let (base_url, backend) = spawn_backend().await;

    let output = run_ask(&base_url, &["--max-new-tokens", "12", "--temperature", "0.5", "hi"]).await;
    assert!(output.status.success());

    let seen = backend.seen.lock().unwrap();
    assert_eq!(seen[0].2["parameters"]["max_new_tokens"], 12);
    assert_eq!(seen[0].2["parameters"]["temperature"], 0.5);
}

#[tokio::test]
async fn test_empty_prompt_fails_on_stderr() {
    let (base_url, backend) = spawn_backend().await;

    let output = run_ask(&base_url, &["   "]).await;
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No message provided"));
    assert!(backend.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_backend_failure_exits_non_zero() {
    let (base_url, _backend) = spawn_backend().await;

    let output = Command::new(env!("CARGO_BIN_EXE_ask"))
        .arg("hello")
        .env_clear()
        .env("INFERENCE_BASE_URL", &base_url)
        .env("GENERATION_MODEL", "loading")
        .env("RUST_LOG", "off")
        .output()
        .await
        .unwrap();

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Model loading is taking longer than expected"));
}
