pub mod builders;
pub mod fake_executor;
pub mod resources;

use std::sync::{Arc, Once};

use jobqueue::exec::{ExecContext, ExecOptions, ProcessExecutor, ProgressOptions};
use jobqueue::report::{Capture, Console};
use tokio::runtime::Runtime;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Options for tests: no progress animation, default I/O wiring.
pub fn quiet_options() -> ExecOptions {
    ExecOptions {
        progress: ProgressOptions {
            enabled: false,
            ..ProgressOptions::default()
        },
        ..ExecOptions::default()
    }
}

/// Everything needed to drive a run pass from a plain `#[test]`.
///
/// Keep `runtime` alive for as long as `ctx` is used.
pub struct Harness {
    pub runtime: Runtime,
    pub ctx: ExecContext,
    pub output: Capture,
}

impl Harness {
    pub fn new(executor: Arc<dyn ProcessExecutor>) -> Self {
        Self::with_options(executor, quiet_options())
    }

    pub fn with_options(executor: Arc<dyn ProcessExecutor>, options: ExecOptions) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to build test runtime");
        let (console, output) = Console::capture();
        let ctx = ExecContext::new(runtime.handle().clone(), executor, console, options);

        Self {
            runtime,
            ctx,
            output,
        }
    }

    /// Harness around the real process executor.
    pub fn direct() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .expect("failed to build test runtime");
        let (console, output) = Console::capture();
        let ctx = ExecContext::direct(runtime.handle().clone(), console, quiet_options());

        Self {
            runtime,
            ctx,
            output,
        }
    }

    pub fn output(&self) -> String {
        self.output.contents()
    }
}
