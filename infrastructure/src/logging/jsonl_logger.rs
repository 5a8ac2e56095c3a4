//! JSONL transcript writer for research runs.
//!
//! Every [`ConversationEvent`] becomes one JSON object per line carrying its
//! `type`, a `seq` number and a `timestamp` next to the payload fields.
//! Workers log concurrently, so `seq` gives the order events were written in.

use research_application::{ConversationEvent, ConversationLogger};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// Thread-safe JSONL transcript (`Mutex<BufWriter<File>>`), flushed per line.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    seq: AtomicU64,
}

impl JsonlConversationLogger {
    /// Create the transcript file, including missing parent directories.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(path)?;

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            seq: AtomicU64::new(0),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of events written so far.
    pub fn event_count(&self) -> u64 {
        self.seq.load(Ordering::Relaxed)
    }

    fn record(&self, event: ConversationEvent, seq: u64) -> serde_json::Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        let mut map = match event.payload {
            serde_json::Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), event.event_type.into());
        map.insert("seq".to_string(), seq.into());
        map.insert("timestamp".to_string(), timestamp.into());
        serde_json::Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        // Numbered under the lock so seq matches line order
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let record = self.record(event, seq);

        let Ok(line) = serde_json::to_string(&record) else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|()| writer.flush()) {
            warn!("Failed to write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use research_application::ports::conversation_logger::event_types;
    use serde_json::json;

    fn read_lines(path: &Path) -> Vec<serde_json::Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_events_are_numbered_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs/20240101_000000/transcript.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(
            event_types::PLAN_GENERATED,
            json!({"model": "planner", "plan": "1. Construction"}),
        ));
        logger.log(ConversationEvent::new(
            event_types::SUBTASK_COMPLETED,
            json!({"subtask_id": "B", "failed": true}),
        ));
        assert_eq!(logger.event_count(), 2);
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "plan_generated");
        assert_eq!(lines[0]["seq"], 1);
        assert_eq!(lines[0]["plan"], "1. Construction");
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(lines[1]["type"], "subtask_completed");
        assert_eq!(lines[1]["seq"], 2);
        assert_eq!(lines[1]["subtask_id"], "B");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.jsonl");
        let logger = JsonlConversationLogger::create(&path).unwrap();

        logger.log(ConversationEvent::new(event_types::LLM_RESPONSE, json!("plain text")));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "llm_response");
        assert_eq!(lines[0]["data"], "plain text");
    }

    #[test]
    fn test_create_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("occupied");
        std::fs::write(&file, "x").unwrap();
        assert!(JsonlConversationLogger::create(file.join("t.jsonl")).is_err());
    }
}
