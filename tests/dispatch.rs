// tests/dispatch.rs

mod common;
use crate::common::builders::WorkspaceBuilder;
use crate::common::init_tracing;

use clap::Parser;
use esqlate_startup::cli::CliArgs;
use esqlate_startup::dispatch::{Dispatcher, reject_arguments};
use esqlate_startup::pipeline::{Pipeline, Registry};
use esqlate_startup_test_utils::fake_executor::argv_starts_with;

async fn dispatch(dispatcher: &Dispatcher, name: &str) -> (i32, String) {
    let mut err_out = Vec::new();
    let code = dispatcher.dispatch(name, &mut err_out).await;
    (code, String::from_utf8(err_out).unwrap())
}

#[tokio::test]
async fn unknown_command_lists_registry_and_runs_nothing() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();
    let executor = fake.executor.clone();
    let dispatcher = Dispatcher::new(Registry::standard(), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "serve").await;

    assert_eq!(code, 1);
    assert!(stderr.contains("\"serve\""), "{stderr}");
    for pipeline in Pipeline::ALL {
        assert!(stderr.contains(pipeline.name()), "missing {pipeline} in {stderr}");
    }
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn missing_command_is_unknown() {
    init_tracing();
    let fake = WorkspaceBuilder::new().build();
    let dispatcher = Dispatcher::new(Registry::standard(), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "").await;

    assert_eq!(code, 1);
    assert!(stderr.contains("You must specify a command"));
    assert!(stderr.contains("silly-sed-front"));
}

#[tokio::test]
async fn names_outside_the_given_registry_are_unknown() {
    init_tracing();
    let fake = WorkspaceBuilder::new().build();
    let dispatcher = Dispatcher::new(Registry::new([Pipeline::NpmFront]), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "server").await;

    assert_eq!(code, 1);
    assert!(stderr.contains("npm-front"));
    assert!(!stderr.contains("build-server"));
}

#[tokio::test]
async fn successful_pipeline_exits_zero_silently() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();
    let dispatcher = Dispatcher::new(Registry::standard(), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "build-server").await;

    assert_eq!(code, 0);
    assert!(stderr.is_empty(), "{stderr}");
}

#[tokio::test]
async fn setup_failure_exits_with_child_code_and_diagnostics() {
    init_tracing();
    let fake = WorkspaceBuilder::new()
        .with_simulated_toolchain()
        .with_executor(|e| e.exit_with(argv_starts_with(&["git", "checkout"]), 128))
        .build();
    let executor = fake.executor.clone();
    let dispatcher = Dispatcher::new(Registry::standard(), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "server").await;

    assert_eq!(code, 128);
    assert!(stderr.contains(r#"Error running git ["checkout", "v1.2.0"]"#), "{stderr}");
    assert!(stderr.contains("exit code: 128"));
    assert!(stderr.contains("STDERR:"));
    assert!(stderr.contains("fake failure of git"));
    // Nothing after the checkout ran.
    assert_eq!(executor.calls().len(), 2);
}

#[tokio::test]
async fn streaming_failure_exits_one_with_message() {
    init_tracing();
    let fake = WorkspaceBuilder::new()
        .with_simulated_toolchain()
        .with_executor(|e| e.exit_with(argv_starts_with(&["node"]), 3))
        .build();
    let dispatcher = Dispatcher::new(Registry::standard(), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "server").await;

    assert_eq!(code, 1);
    assert!(stderr.starts_with("Exit Status: 1\n"), "{stderr}");
    assert!(stderr.contains(r#"node ["dist/cmd.js", "serve"] exited with status 3"#));
}

#[tokio::test]
async fn unexpected_failure_exits_one() {
    init_tracing();
    // No body served for the asset URL, so the download fails.
    let fake = WorkspaceBuilder::new().build();
    let dispatcher = Dispatcher::new(Registry::standard(), fake.workspace);

    let (code, stderr) = dispatch(&dispatcher, "download-front").await;

    assert_eq!(code, 1);
    assert!(stderr.contains("404"), "{stderr}");
}

#[test]
fn unparseable_arguments_list_registry_and_exit_one() {
    let err = CliArgs::try_parse_from(["esqlate-startup", "-x"]).unwrap_err();
    let mut err_out = Vec::new();

    let code = reject_arguments(&err, &Registry::standard(), &mut err_out);

    let stderr = String::from_utf8(err_out).unwrap();
    assert_eq!(code, 1);
    assert!(stderr.contains("-x"), "{stderr}");
    for pipeline in Pipeline::ALL {
        assert!(stderr.contains(pipeline.name()), "missing {pipeline} in {stderr}");
    }
}
