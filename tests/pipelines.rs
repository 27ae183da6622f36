// tests/pipelines.rs

mod common;
use crate::common::builders::{WorkspaceBuilder, root_path};
use crate::common::init_tracing;

use esqlate_startup::config::Tools;
use esqlate_startup::exec::ExecutionResult;
use esqlate_startup::fs::{FileSystem, PathKind};
use esqlate_startup::pipeline::Pipeline;
use esqlate_startup::pipeline::pins::{FRONT_ASSET, FRONT_ASSET_URL};
use esqlate_startup_test_utils::fake_executor::{Mode, argv_starts_with};
use esqlate_startup_test_utils::fake_fetcher::FakeFetcher;

const SERVER_CLONE: &str =
    "git clone https://github.com/forbesmyester/esqlate-server.git dep-esqlate-server";
const FRONT_CLONE: &str =
    "git clone https://github.com/forbesmyester/esqlate-front.git dep-esqlate-front";

#[tokio::test]
async fn build_server_from_scratch_runs_every_step_in_order() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();

    let res = Pipeline::BuildServer.run(&fake.workspace).await.unwrap();

    assert_eq!(res, ExecutionResult::success());
    assert_eq!(
        fake.executor.argv_lines(),
        vec![
            SERVER_CLONE,
            "git checkout v1.2.0",
            "npm install",
            "npm run-script build",
        ]
    );
    assert_eq!(
        fake.fs.read(root_path("definition/a.json")).unwrap(),
        b"{\"a\":1}"
    );
    assert!(fake.fs.probe(&root_path("dep-esqlate-server/dist/cmd.js")).is_expected(PathKind::File));
}

#[tokio::test]
async fn build_server_second_run_only_checks_out() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();

    Pipeline::BuildServer.run(&fake.workspace).await.unwrap();
    let first = fake.executor.calls().len();
    Pipeline::BuildServer.run(&fake.workspace).await.unwrap();

    let second: Vec<String> = fake.executor.argv_lines().split_off(first);
    assert_eq!(second, vec!["git checkout v1.2.0"]);
}

#[tokio::test]
async fn failed_install_stops_the_pipeline() {
    init_tracing();
    let fake = WorkspaceBuilder::new()
        .with_simulated_toolchain()
        .with_executor(|e| e.exit_with(argv_starts_with(&["npm", "install"]), 9))
        .build();

    let err = Pipeline::BuildServer.run(&fake.workspace).await.unwrap_err();

    assert_eq!(err.exit_code(), 9);
    let lines = fake.executor.argv_lines();
    assert_eq!(lines.last().map(String::as_str), Some("npm install"));
    assert!(!lines.iter().any(|l| l.contains("run-script")));
}

#[tokio::test]
async fn server_streams_compiled_entry_point_with_definition_env() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();

    let res = Pipeline::Server.run(&fake.workspace).await.unwrap();
    assert!(res.is_success());

    let calls = fake.executor.calls();
    let (mode, run) = calls.last().unwrap();
    assert_eq!(*mode, Mode::Streaming);
    assert_eq!(run.argv(), vec!["node", "dist/cmd.js", "serve"]);
    assert_eq!(run.cwd, Some(root_path("dep-esqlate-server")));
    assert_eq!(
        run.env.get("DEFINITION_DIRECTORY").map(String::as_str),
        Some("../definition")
    );
    assert!(calls[..calls.len() - 1]
        .iter()
        .all(|(mode, _)| *mode == Mode::Blocking));
}

#[tokio::test]
async fn server_failure_after_start_is_reported_not_raised() {
    init_tracing();
    let fake = WorkspaceBuilder::new()
        .with_simulated_toolchain()
        .with_executor(|e| e.exit_with(argv_starts_with(&["node"]), 2))
        .build();

    let res = Pipeline::Server.run(&fake.workspace).await.unwrap();

    assert_eq!(res.exit_code, 1);
    assert!(res.message.unwrap().contains("exited with status 2"));
}

#[tokio::test]
async fn front_downloads_once_then_runs_webview() {
    init_tracing();
    let fake = WorkspaceBuilder::new()
        .with_fetcher(FakeFetcher::new().serve(FRONT_ASSET_URL, "<html/>"))
        .build();

    Pipeline::Front.run(&fake.workspace).await.unwrap();
    Pipeline::Front.run(&fake.workspace).await.unwrap();

    assert_eq!(fake.fetcher.requested().len(), 1);
    let lines = fake.executor.argv_lines();
    assert_eq!(
        lines,
        vec![
            "wv_linewise -t eSQLate -c dep-esqlate-front.html -s IN=-",
            "wv_linewise -t eSQLate -c dep-esqlate-front.html -s IN=-",
        ]
    );
    assert_eq!(fake.fs.read(root_path(FRONT_ASSET)).unwrap(), b"<html/>");
}

#[tokio::test]
async fn front_download_failure_runs_nothing() {
    init_tracing();
    let fake = WorkspaceBuilder::new().build();

    let err = Pipeline::Front.run(&fake.workspace).await.unwrap_err();

    assert_eq!(err.exit_code(), 1);
    assert!(fake.executor.calls().is_empty());
}

#[tokio::test]
async fn build_front_publishes_built_html() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();

    Pipeline::BuildFront.run(&fake.workspace).await.unwrap();

    assert_eq!(
        fake.executor.argv_lines(),
        vec![
            FRONT_CLONE,
            "git checkout v1.1.2",
            "npm install",
            "npm run-script build",
        ]
    );
    assert_eq!(fake.fs.read(root_path(FRONT_ASSET)).unwrap(), b"built");
}

#[tokio::test]
async fn npm_commands_only_install() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();

    Pipeline::NpmServer.run(&fake.workspace).await.unwrap();
    Pipeline::NpmFront.run(&fake.workspace).await.unwrap();

    let calls = fake.executor.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].1.cwd, Some(root_path("dep-esqlate-server")));
    assert_eq!(calls[1].1.cwd, Some(root_path("dep-esqlate-front")));
    assert!(calls.iter().all(|(_, spec)| spec.argv() == vec!["npm", "install"]));
}

#[tokio::test]
async fn checkout_commands_only_acquire() {
    init_tracing();
    let fake = WorkspaceBuilder::new().with_simulated_toolchain().build();

    Pipeline::CheckoutFront.run(&fake.workspace).await.unwrap();
    Pipeline::CheckoutServer.run(&fake.workspace).await.unwrap();

    assert_eq!(
        fake.executor.argv_lines(),
        vec![
            FRONT_CLONE,
            "git checkout v1.1.2",
            SERVER_CLONE,
            "git checkout v1.2.0",
        ]
    );
    // No definitions are copied by a plain checkout.
    assert!(!fake.fs.probe(&root_path("definition")).exists());
}

#[tokio::test]
async fn configured_tool_names_are_used() {
    init_tracing();
    let tools = Tools {
        npm: "npm.cmd".to_string(),
        ..Tools::default()
    };
    let fake = WorkspaceBuilder::new().with_tools(tools).build();

    Pipeline::NpmFront.run(&fake.workspace).await.unwrap();

    assert_eq!(fake.executor.argv_lines(), vec!["npm.cmd install"]);
}
