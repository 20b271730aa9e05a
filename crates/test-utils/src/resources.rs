use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jobqueue::job::Resource;

/// Resource whose existence is a switch the test controls.
///
/// Clones share the switch, so a test can keep one and hand the other to
/// a job body.
#[derive(Debug, Clone)]
pub struct StubResource {
    path: String,
    present: Arc<AtomicBool>,
}

impl StubResource {
    pub fn new(path: &str, present: bool) -> Self {
        Self {
            path: path.to_string(),
            present: Arc::new(AtomicBool::new(present)),
        }
    }

    pub fn set_present(&self, present: bool) {
        self.present.store(present, Ordering::SeqCst);
    }
}

impl Resource for StubResource {
    fn path(&self) -> &str {
        &self.path
    }

    fn title(&self) -> String {
        format!("stub:{}", self.path)
    }

    fn verify(&self) -> bool {
        self.present.load(Ordering::SeqCst)
    }
}
