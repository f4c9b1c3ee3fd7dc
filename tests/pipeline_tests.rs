// ABOUTME: Integration tests for the signature pipeline
// ABOUTME: Drives fetch, normalize, render, and push end to end with a fake admin tool

mod common;
use common::{StaticRowSource, TestEnvironment};

use sigsync::pipeline::{Pipeline, PipelineError};
use sigsync::push::PushAgent;
use sigsync::records::RecordError;
use sigsync::source::SourceError;
use sigsync::template::SignatureRenderer;

fn users() -> StaticRowSource {
    StaticRowSource::with_users(vec![
        vec!["ann@corp.com", "Ann Lee", "CEO", "123-456-7890", "she/her"],
        vec!["bob@corp.com", "Bob Ray", "CTO", "", "he/him"],
        vec!["cy@corp.com", "Cy Poe", "Engineer"],
    ])
}

fn renderer() -> SignatureRenderer {
    SignatureRenderer::from_template(
        "<p>{{name}} | {{title}}{{#if phone_dotted}} | {{phone_dotted}}{{/if}}</p>",
    )
    .unwrap()
}

#[tokio::test]
async fn test_dry_run_renders_without_pushing() {
    let env = TestEnvironment::new();
    let output_dir = env.output_dir();
    env.fake_tool(None);

    let pipeline = Pipeline::new("corp.com", &output_dir, renderer());
    let report = pipeline.run(&users()).await.unwrap();

    assert!(report.dry_run);
    assert_eq!(report.records_loaded, 3);
    assert_eq!(report.signatures_written.len(), 3);
    assert!(report.pushes.is_empty());
    assert!(env.pushed_accounts().is_empty());
    assert!(!env.calls_log().exists());

    let ann = std::fs::read_to_string(output_dir.join("ann@corp.com.html")).unwrap();
    assert_eq!(ann, "<p>Ann Lee | CEO | 123.456.7890</p>");
    let bob = std::fs::read_to_string(output_dir.join("bob@corp.com.html")).unwrap();
    assert_eq!(bob, "<p>Bob Ray | CTO</p>");
}

#[tokio::test]
async fn test_confirmed_run_pushes_every_account_in_order() {
    let env = TestEnvironment::new();
    let output_dir = env.output_dir();
    let tool = env.fake_tool(None);

    let pipeline =
        Pipeline::new("corp.com", &output_dir, renderer()).with_push(PushAgent::new(tool, "corp.com"));
    let report = pipeline.run(&users()).await.unwrap();

    assert!(!report.dry_run);
    assert_eq!(report.pushed_count(), 3);
    assert_eq!(
        env.pushed_accounts(),
        vec!["ann@corp.com", "bob@corp.com", "cy@corp.com"]
    );
}

#[tokio::test]
async fn test_push_skips_files_from_other_domains() {
    let env = TestEnvironment::new();
    let output_dir = env.output_dir();
    env.write_signature("zed@other.com.html");
    let tool = env.fake_tool(None);

    let pipeline =
        Pipeline::new("corp.com", &output_dir, renderer()).with_push(PushAgent::new(tool, "corp.com"));
    pipeline.run(&users()).await.unwrap();

    let pushed = env.pushed_accounts();
    assert_eq!(pushed.len(), 3);
    assert!(!pushed.contains(&"zed@other.com".to_string()));
}

#[tokio::test]
async fn test_tool_failure_aborts_remaining_pushes() {
    let env = TestEnvironment::new();
    let output_dir = env.output_dir();
    let tool = env.fake_tool(Some("bob@corp.com"));

    let pipeline =
        Pipeline::new("corp.com", &output_dir, renderer()).with_push(PushAgent::new(tool, "corp.com"));
    let err = pipeline.run(&users()).await.unwrap_err();

    assert!(matches!(err, PipelineError::PushError(_)));
    assert_eq!(env.pushed_accounts(), vec!["ann@corp.com", "bob@corp.com"]);
}

#[tokio::test]
async fn test_bad_row_aborts_before_rendering() {
    let env = TestEnvironment::new();
    let output_dir = env.output_dir();
    let tool = env.fake_tool(None);

    let source = StaticRowSource::with_users(vec![
        vec!["ann@corp.com", "Ann Lee"],
        vec!["bob@corp.com", "Bob Ray", "CTO", "555 0100"],
    ]);

    let pipeline =
        Pipeline::new("corp.com", &output_dir, renderer()).with_push(PushAgent::new(tool, "corp.com"));
    let err = pipeline.run(&source).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::RecordError(RecordError::InvalidPhone { row: 3, .. })
    ));
    // All or nothing: not even the valid first row was rendered
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
    assert!(env.pushed_accounts().is_empty());
}

#[tokio::test]
async fn test_email_escaping_output_dir_aborts_batch() {
    let env = TestEnvironment::new();
    let output_dir = env.output_dir();
    let tool = env.fake_tool(None);

    let source = StaticRowSource::with_users(vec![
        vec!["ann@corp.com", "Ann Lee"],
        vec!["../bob@corp.com", "Bob Ray"],
    ]);

    let pipeline =
        Pipeline::new("corp.com", &output_dir, renderer()).with_push(PushAgent::new(tool, "corp.com"));
    let err = pipeline.run(&source).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::RecordError(RecordError::InvalidEmail { row: 3, .. })
    ));
    assert_eq!(std::fs::read_dir(&output_dir).unwrap().count(), 0);
    assert!(!env.path().join("bob@corp.com.html").exists());
    assert!(env.pushed_accounts().is_empty());
}

#[tokio::test]
async fn test_header_only_sheet_is_fatal() {
    let env = TestEnvironment::new();
    let source = StaticRowSource::with_users(vec![]);

    let pipeline = Pipeline::new("corp.com", env.output_dir(), renderer());
    let err = pipeline.run(&source).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::SourceError(SourceError::EmptySheet { .. })
    ));
}

#[tokio::test]
async fn test_remote_failure_is_fatal() {
    let env = TestEnvironment::new();
    let source = StaticRowSource::failing();

    let pipeline = Pipeline::new("corp.com", env.output_dir(), renderer());
    let result = pipeline.run(&source).await;

    assert!(matches!(result, Err(PipelineError::SourceError(_))));
    assert_eq!(source.fetch_count(), 1);
    assert_eq!(std::fs::read_dir(env.output_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_missing_output_directory_is_fatal() {
    let env = TestEnvironment::new();
    let missing = env.path().join("does-not-exist");

    let pipeline = Pipeline::new("corp.com", &missing, renderer());
    let err = pipeline.run(&users()).await.unwrap_err();

    assert!(matches!(err, PipelineError::TemplateError(_)));
}

#[tokio::test]
async fn test_load_records_keeps_sheet_order() {
    let records = sigsync::pipeline::load_records(&users(), "corp.com")
        .await
        .unwrap();

    let emails: Vec<&str> = records.iter().map(|r| r.email()).collect();
    assert_eq!(emails, vec!["ann@corp.com", "bob@corp.com", "cy@corp.com"]);
    assert_eq!(records[0].phone_dotted(), Some("123.456.7890"));
    assert_eq!(records[2].pronouns(), "");
}
