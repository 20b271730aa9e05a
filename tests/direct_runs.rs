// tests/direct_runs.rs
#![cfg(unix)]

use jobqueue::config::Settings;
use jobqueue::engine::{self, JobOutcome};
use jobqueue::errors::JobqueueError;
use jobqueue::job::{JobDef, Registry};
use jobqueue::run_with;
use jobqueue_test_utils::{init_tracing, quiet_options, Harness};

#[test]
fn jobs_produce_real_files() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.txt");
    let output = dir.path().join("out.txt");
    std::fs::write(&input, "hello").unwrap();

    let def = JobDef::new("copy", |job, (from, to): &(String, String)| {
        job.input_path(from.as_str());
        job.output_path(to.as_str());
        let Some(mut cmd) = job.commit() else {
            return Ok(());
        };
        cmd.run(["cp", from.as_str(), to.as_str()])
    });

    let mut registry = Registry::default();
    registry
        .schedule(
            &def,
            (
                input.display().to_string(),
                output.display().to_string(),
            ),
        )
        .unwrap();

    let mut harness = Harness::direct();
    let summary = engine::run(&mut registry, &mut harness.ctx);

    assert_eq!(summary.outcome_of("copy"), Some(&JobOutcome::Succeeded));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "hello");
}

#[test]
fn run_with_dry_run_executes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");

    let def = JobDef::new("touch", |job, path: &String| {
        job.output_path(path.as_str());
        let Some(mut cmd) = job.commit() else {
            return Ok(());
        };
        cmd.run(["touch", path.as_str()])
    });
    let mut registry = Registry::default();
    registry
        .schedule(&def, marker.display().to_string())
        .unwrap();

    let settings = Settings {
        run: false,
        window: false,
        exec: quiet_options(),
    };
    assert!(run_with(&settings, registry).unwrap());
    assert!(!marker.exists());
}

#[test]
fn run_with_executes_and_reports_success() {
    let dir = tempfile::tempdir().unwrap();
    let marker = dir.path().join("marker");

    let def = JobDef::new("touch", |job, path: &String| {
        job.output_path(path.as_str());
        let Some(mut cmd) = job.commit() else {
            return Ok(());
        };
        cmd.run(["touch", path.as_str()])
    });
    let mut registry = Registry::default();
    registry
        .schedule(&def, marker.display().to_string())
        .unwrap();

    let settings = Settings {
        run: true,
        window: false,
        exec: quiet_options(),
    };
    assert!(run_with(&settings, registry).unwrap());
    assert!(marker.exists());
}

#[test]
fn run_with_aborts_before_running_when_jobs_have_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing-input");
    let marker = dir.path().join("marker");

    let def = JobDef::new("needs-input", |job, (input, output): &(String, String)| {
        job.input_path(input.as_str());
        job.output_path(output.as_str());
        let Some(mut cmd) = job.commit() else {
            return Ok(());
        };
        cmd.run(["touch", output.as_str()])
    });
    let mut registry = Registry::default();
    registry
        .schedule(
            &def,
            (missing.display().to_string(), marker.display().to_string()),
        )
        .unwrap();

    let settings = Settings {
        run: true,
        ..Settings::default()
    };
    let result = run_with(&settings, registry);

    assert!(matches!(result, Err(JobqueueError::JobsHaveErrors(1))));
    assert!(!marker.exists());
}

#[test]
fn failing_job_makes_run_with_return_false() {
    let dir = tempfile::tempdir().unwrap();
    let never = dir.path().join("never");

    let def = JobDef::new("fails", |job, path: &String| {
        job.output_path(path.as_str());
        let Some(mut cmd) = job.commit() else {
            return Ok(());
        };
        cmd.run(["sh", "-c", "exit 3"])
    });
    let mut registry = Registry::default();
    registry
        .schedule(&def, never.display().to_string())
        .unwrap();

    let settings = Settings {
        run: true,
        window: false,
        exec: quiet_options(),
    };
    assert!(!run_with(&settings, registry).unwrap());
}

