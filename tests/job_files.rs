// tests/job_files.rs

use std::io::Write;
use std::sync::Arc;

use jobqueue::config::{load_and_validate, register_jobs, Settings};
use jobqueue::engine::{self, JobOutcome};
use jobqueue::errors::JobqueueError;
use jobqueue::fs::mock::MockFileSystem;
use jobqueue::job::Registry;
use jobqueue::report::Console;
use jobqueue::types::StdinMode;
use jobqueue_test_utils::builders::{JobConfigBuilder, JobsFileBuilder};
use jobqueue_test_utils::fake_executor::FakeExecutor;
use jobqueue_test_utils::Harness;
use tempfile::NamedTempFile;

#[test]
fn test_job_file_loads_with_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[job]]
inputs = ["data"]
outputs = ["out"]
cmd = [["python", "-c", "print('hi')"]]
"#
    )
    .unwrap();

    let jobs = load_and_validate(file.path()).unwrap();

    assert!(jobs.config.progress);
    assert_eq!(jobs.config.progress_interval_ms, 1000);
    assert_eq!(jobs.config.progress_length, 5);
    assert_eq!(jobs.config.stdin, StdinMode::Null);
    assert!(jobs.config.merge_stderr);
    assert!(jobs.config.command_prefix.is_empty());
    assert_eq!(jobs.job[0].cmd[0], vec!["python", "-c", "print('hi')"]);
}

#[test]
fn test_empty_command_returns_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[[job]]
name = "nothing"
outputs = ["out"]
cmd = [[]]
"#
    )
    .unwrap();

    match load_and_validate(file.path()) {
        Err(JobqueueError::ConfigError(msg)) => {
            assert!(msg.contains("nothing"));
            assert!(msg.contains("empty"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_missing_cmd_is_a_toml_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[[job]]\noutputs = [\"out\"]\n").unwrap();

    assert!(matches!(
        load_and_validate(file.path()),
        Err(JobqueueError::TomlError(_))
    ));
}

#[test]
fn test_declarative_jobs_run_commands_in_order() {
    let fs = MockFileSystem::new();
    fs.add_file("raw.csv", "1,2,3");

    let jobs = JobsFileBuilder::new()
        .with_job(
            JobConfigBuilder::new()
                .name("clean")
                .input("raw.csv")
                .output("clean.csv")
                .cmd(&["fetch", "raw.csv"])
                .cmd(&["clean", "raw.csv", "clean.csv"])
                .build(),
        )
        .with_job(
            JobConfigBuilder::new()
                .input("clean.csv")
                .output("report.txt")
                .cmd(&["report", "clean.csv"])
                .build(),
        )
        .build();

    let mut registry = Registry::new(Arc::new(fs.clone()));
    register_jobs(&jobs, &mut registry).unwrap();

    let (mut console, _out) = Console::capture();
    let report = engine::verify(&mut registry, &mut console).into_result().unwrap();
    assert_eq!(report.jobs[1].name, "job #1");

    let fake = FakeExecutor::new()
        .with_fs(fs.clone())
        .produces("clean", &["clean.csv"])
        .produces("report", &["report.txt"]);
    let mut harness = Harness::new(Arc::new(fake.clone()));

    let summary = engine::run(&mut registry, &mut harness.ctx);

    assert!(summary.is_success());
    assert_eq!(fake.programs(), vec!["fetch", "clean", "report"]);
}

#[test]
fn test_declarative_job_stops_at_first_failing_command() {
    let fs = MockFileSystem::new();
    let jobs = JobsFileBuilder::new()
        .with_job(
            JobConfigBuilder::new()
                .name("two steps")
                .output("out")
                .cmd(&["first"])
                .cmd(&["second"])
                .build(),
        )
        .build();

    let mut registry = Registry::new(Arc::new(fs.clone()));
    register_jobs(&jobs, &mut registry).unwrap();

    let fake = FakeExecutor::new().with_fs(fs).exit_code("first", 4);
    let mut harness = Harness::new(Arc::new(fake.clone()));
    let summary = engine::run(&mut registry, &mut harness.ctx);

    assert_eq!(fake.programs(), vec!["first"]);
    assert!(matches!(
        summary.outcome_of("two steps"),
        Some(JobOutcome::CommandFailed { exit_code: 4, .. })
    ));
}

#[test]
fn test_builder_prefix_reaches_exec_options() {
    let jobs = JobsFileBuilder::new()
        .with_command_prefix(&["cmd", "/c", "start", "/wait"])
        .with_job(JobConfigBuilder::new().output("x").cmd(&["a"]).build())
        .build();

    let settings = Settings {
        exec: jobs.config.exec_options(),
        ..Settings::default()
    };
    assert_eq!(settings.exec.command_prefix, vec!["cmd", "/c", "start", "/wait"]);
}
