use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use jobqueue::exec::{CommandRequest, ProcessExecutor, ProcessFuture};
use jobqueue::fs::mock::MockFileSystem;

/// A fake executor that:
/// - records the argv of every command it is asked to run
/// - resolves immediately with a configurable exit code per program (0 by
///   default)
/// - optionally "produces" files by writing them into a `MockFileSystem`.
#[derive(Debug, Clone, Default)]
pub struct FakeExecutor {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    exit_codes: HashMap<String, i32>,
    produces: HashMap<String, Vec<String>>,
    fs: Option<MockFileSystem>,
}

impl FakeExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written by `produces` go into `fs`.
    pub fn with_fs(mut self, fs: MockFileSystem) -> Self {
        self.fs = Some(fs);
        self
    }

    pub fn exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    /// Running `program` creates `paths`.
    pub fn produces(mut self, program: &str, paths: &[&str]) -> Self {
        self.produces.insert(
            program.to_string(),
            paths.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    /// Program names of every recorded call, in order.
    pub fn programs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|argv| argv.first().cloned())
            .collect()
    }
}

impl ProcessExecutor for FakeExecutor {
    fn execute(&self, request: CommandRequest) -> ProcessFuture {
        let program = request.program().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(request.argv.clone());

        if let (Some(fs), Some(paths)) = (&self.fs, self.produces.get(&program)) {
            for path in paths {
                fs.add_file(path, format!("made by {program}"));
            }
        }

        let code = self.exit_codes.get(&program).copied().unwrap_or(0);
        ProcessFuture::ready(Ok(code))
    }
}
