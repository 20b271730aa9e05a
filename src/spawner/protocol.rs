// src/spawner/protocol.rs

//! Wire format between the spawner and its worker.
//!
//! One JSON document per line, in both directions. Every request carries an
//! id that the matching response echoes back.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::exec::{CommandRequest, ExecError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub id: u64,
    pub command: CommandRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub id: u64,
    pub outcome: WorkerOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorkerOutcome {
    Exited { code: i32 },
    Failed { message: String },
}

/// Serialize `msg` as a single newline-terminated line.
pub fn encode<T: Serialize>(msg: &T) -> Result<String, ExecError> {
    let mut line =
        serde_json::to_string(msg).map_err(|e| ExecError::Protocol(e.to_string()))?;
    line.push('\n');
    Ok(line)
}

pub fn decode<T: DeserializeOwned>(line: &str) -> Result<T, ExecError> {
    serde_json::from_str(line.trim_end()).map_err(|e| ExecError::Protocol(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exec::IoOptions;
    use crate::types::StdinMode;

    #[test]
    fn encoded_messages_are_single_lines() {
        let req = WorkerRequest {
            id: 3,
            command: CommandRequest::new(
                vec!["echo".into(), "two\nlines".into()],
                IoOptions {
                    stdin: StdinMode::Inherit,
                    merge_stderr: false,
                },
            ),
        };
        let line = encode(&req).unwrap();
        assert_eq!(line.matches('\n').count(), 1);
        assert!(line.ends_with('\n'));

        let back: WorkerRequest = decode(&line).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn outcome_is_tagged() {
        let resp = WorkerResponse {
            id: 1,
            outcome: WorkerOutcome::Exited { code: 2 },
        };
        let line = encode(&resp).unwrap();
        assert!(line.contains("\"kind\":\"exited\""));
    }

    #[test]
    fn garbage_is_a_protocol_error() {
        let err = decode::<WorkerResponse>("not json").unwrap_err();
        assert!(matches!(err, ExecError::Protocol(_)));
    }
}
